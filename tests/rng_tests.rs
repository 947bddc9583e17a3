//! RNG tests for draft-engine
//!
//! Эти тесты проверяют:
//! - детерминированность SeededRandom
//! - различие seed → различие последовательностей
//! - границы next / next_int / next_int_max
//! - shuffle / choice / sample и их ошибки
//! - derive: независимость под-потоков и воспроизводимость
//! - reset

use std::collections::HashSet;

use draft_engine::infra::{RngError, RngSeed, SeededRandom};

fn take(rng: &mut SeededRandom, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.next()).collect()
}

//
// TEST 1: один seed, одна последовательность
//
#[test]
fn same_seed_same_sequence() {
    let mut a = SeededRandom::new("draft-42");
    let mut b = SeededRandom::new("draft-42");

    assert_eq!(take(&mut a, 100), take(&mut b, 100));
}

//
// TEST 2: разные seed дают разные последовательности
//
#[test]
fn different_seeds_differ() {
    let mut a = SeededRandom::new("alpha");
    let mut b = SeededRandom::new("beta");

    assert_ne!(take(&mut a, 20), take(&mut b, 20));
}

#[test]
fn next_stays_in_unit_interval() {
    let mut rng = SeededRandom::new("unit");
    for _ in 0..10_000 {
        let v = rng.next();
        assert!((0.0..1.0).contains(&v), "value {v} out of [0, 1)");
    }
}

#[test]
fn next_int_respects_exclusive_upper_bound() {
    let mut rng = SeededRandom::new("bounds");
    let mut seen = HashSet::new();
    for _ in 0..2_000 {
        let v = rng.next_int(-3, 4).unwrap();
        assert!((-3..4).contains(&v));
        seen.insert(v);
    }
    // На 2000 выборках все 7 значений должны встретиться.
    assert_eq!(seen.len(), 7);
}

#[test]
fn next_int_rejects_empty_range() {
    let mut rng = SeededRandom::new("bad-range");

    assert!(matches!(rng.next_int(5, 5), Err(RngError::InvalidArgument(_))));
    assert!(matches!(rng.next_int(6, 2), Err(RngError::InvalidArgument(_))));
}

#[test]
fn next_int_full_i64_range_does_not_overflow() {
    let mut rng = SeededRandom::new("wide");
    let mut negative = false;
    let mut positive = false;
    for _ in 0..200 {
        let v = rng.next_int(i64::MIN, i64::MAX).unwrap();
        assert!(v < i64::MAX);
        negative |= v < 0;
        positive |= v > 0;
    }
    assert!(negative && positive, "values must cover both halves");

    let v = rng.next_int(i64::MAX - 1, i64::MAX).unwrap();
    assert_eq!(v, i64::MAX - 1);
}

#[test]
fn next_int_max_zero_is_invalid() {
    let mut rng = SeededRandom::new("max");
    assert!(rng.next_int_max(0).is_err());
    for _ in 0..100 {
        assert!(rng.next_int_max(3).unwrap() < 3);
    }
}

#[test]
fn shuffle_returns_permutation_and_keeps_input() {
    let mut rng = SeededRandom::new("shuffle");
    let input: Vec<u32> = (0..52).collect();

    let out = rng.shuffle(&input);

    assert_eq!(input, (0..52).collect::<Vec<u32>>(), "input must stay untouched");
    assert_ne!(out, input);
    let mut sorted = out.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, input);
}

#[test]
fn shuffle_empty_and_single_ok() {
    let mut rng = SeededRandom::new("tiny");
    let empty: Vec<u32> = vec![];
    assert!(rng.shuffle(&empty).is_empty());
    assert_eq!(rng.shuffle(&[7]), vec![7]);
}

#[test]
fn choice_on_empty_fails() {
    let mut rng = SeededRandom::new("choice");
    let empty: [u8; 0] = [];

    assert_eq!(rng.choice(&empty), Err(RngError::EmptyInput));
    assert_eq!(*rng.choice(&[9]).unwrap(), 9);
}

#[test]
fn sample_returns_unique_elements() {
    let mut rng = SeededRandom::new("sample");
    let items: Vec<u32> = (0..20).collect();

    let picked = rng.sample(&items, 11).unwrap();
    let unique: HashSet<_> = picked.iter().collect();

    assert_eq!(picked.len(), 11);
    assert_eq!(unique.len(), 11);
    assert!(picked.iter().all(|v| items.contains(v)));
}

#[test]
fn sample_more_than_available_fails() {
    let mut rng = SeededRandom::new("sample");
    assert!(matches!(
        rng.sample(&[1, 2, 3], 4),
        Err(RngError::InvalidArgument(_))
    ));
    assert_eq!(rng.sample(&[1, 2, 3], 0).unwrap(), Vec::<i32>::new());
}

//
// Scenario D: derive('bot1') от независимых корней с одним seed
//
#[test]
fn derived_streams_from_independent_roots_match() {
    let mut a = SeededRandom::new("x").derive("bot1");
    let mut b = SeededRandom::new("x").derive("bot1");

    assert_eq!(take(&mut a, 100), take(&mut b, 100));
}

#[test]
fn derive_does_not_depend_on_parent_position() {
    let root = SeededRandom::new("x");
    let mut advanced = SeededRandom::new("x");
    take(&mut advanced, 1_000);

    let mut a = root.derive("bot1");
    let mut b = advanced.derive("bot1");

    assert_eq!(take(&mut a, 50), take(&mut b, 50));
}

#[test]
fn derived_streams_do_not_interfere() {
    let root = SeededRandom::new("x");
    let mut parent = SeededRandom::new("x");
    let mut bot1 = root.derive("bot1");
    let mut bot2 = root.derive("bot2");

    let p = take(&mut parent, 20);
    let b1 = take(&mut bot1, 20);
    let b2 = take(&mut bot2, 20);

    assert_ne!(p, b1);
    assert_ne!(b1, b2);
    assert_eq!(bot1.seed(), "x::bot1");
}

#[test]
fn label_boundaries_are_not_ambiguous() {
    let mut a = SeededRandom::new("ab").derive("c");
    let mut b = SeededRandom::new("a").derive("bc");
    assert_ne!(take(&mut a, 10), take(&mut b, 10));
}

#[test]
fn reset_rewinds_stream() {
    let mut rng = SeededRandom::new("reset");
    let first = take(&mut rng, 30);
    take(&mut rng, 7);

    rng.reset();

    assert_eq!(take(&mut rng, 30), first);
    assert_eq!(rng.seed(), "reset");
}

#[test]
fn rngseed_derive_changes_bytes() {
    let base = RngSeed::from_seed_str("seed");

    assert_eq!(base, RngSeed::from_seed_str("seed"));
    assert_ne!(base.derive("packs"), base.derive("bot_1"));
    assert_ne!(base.derive("packs"), base);
}
