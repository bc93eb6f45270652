use digitmult_common::checker::{check_multiple, quotient, residue_of};
use digitmult_common::search::search;
use digitmult_common::{SearchOutcome, ValidationError, find_min_multiple, validate};

fn found(k: i64, digits: &[i64]) -> String {
    match find_min_multiple(k, digits) {
        Ok(SearchOutcome::Found(m)) => m.to_string(),
        other => panic!("expected a multiple for k={k}, S={digits:?}, got {other:?}"),
    }
}

#[test_log::test]
fn textbook_example() {
    assert_eq!(found(26147, &[1, 3]), "1113313113");
}

#[test_log::test]
fn binary_digits_result_is_checked() {
    let (k, s) = validate(92917, &[0, 1]).unwrap();
    let outcome = search(k, &s);
    let m = outcome.multiple().expect("92917 has a 0/1 multiple");
    assert!(m.as_str().chars().all(|c| c == '0' || c == '1'));
    assert!(!m.as_str().starts_with('0'));
    assert_eq!(residue_of(m.as_str(), k), Ok(0));
    assert!(check_multiple(m, k, &s).passed());
    assert!(quotient(m, k).is_some());
}

#[test_log::test]
fn unsolvable_and_invalid_are_distinct() {
    assert_eq!(
        find_min_multiple(1355, &[1, 3, 7]),
        Ok(SearchOutcome::NoSolution)
    );
    assert_eq!(find_min_multiple(5, &[0]), Ok(SearchOutcome::NoSolution));
    assert_eq!(
        find_min_multiple(0, &[1]),
        Err(ValidationError::InvalidModulus { modulus: 0 })
    );
    assert_eq!(find_min_multiple(5, &[]), Err(ValidationError::EmptyAlphabet));
    assert_eq!(
        find_min_multiple(5, &[3, 15]),
        Err(ValidationError::DigitOutOfRange { digit: 15 })
    );
}

#[test_log::test]
fn every_result_is_a_minimal_multiple() {
    // For each k, compare against the smallest multiple found by walking
    // k, 2k, 3k, ... and picking the first whose digits are all allowed.
    let digit_sets: [&[i64]; 5] = [&[1, 2], &[0, 7], &[3, 5, 9], &[0, 2, 4], &[6]];
    for k in 1..120i64 {
        for digits in digit_sets {
            let outcome = find_min_multiple(k, digits).unwrap();
            let allowed = |n: i64| {
                n.to_string()
                    .bytes()
                    .all(|b| digits.contains(&i64::from(b - b'0')))
            };
            let naive = (1..=20_000i64).map(|i| i * k).find(|&n| allowed(n));
            match (outcome, naive) {
                (SearchOutcome::Found(m), Some(n)) => assert_eq!(m.to_string(), n.to_string()),
                (SearchOutcome::Found(m), None) => {
                    // Too large for the naive walk; must at least be longer
                    // than anything the walk covered
                    assert!(m.len() > (20_000 * k).to_string().len() - 1, "k={k}");
                }
                (SearchOutcome::NoSolution, Some(n)) => {
                    panic!("k={k}, S={digits:?}: search found nothing but {n} works")
                }
                (SearchOutcome::NoSolution, None) => {}
            }
        }
    }
}

#[test_log::test]
fn larger_modulus_stays_fast_and_correct() {
    let (k, s) = validate(9_999_991, &[0, 1]).unwrap();
    let m = search(k, &s).into_multiple().unwrap();
    assert!(check_multiple(&m, k, &s).passed());
}
