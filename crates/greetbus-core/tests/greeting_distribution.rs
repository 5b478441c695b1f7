//! Statistical checks for greeting selection and delay sampling.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;
use std::time::Duration;

use greetbus_core::greeting::{DEFAULT_MAX_DELAY_MS, DEFAULT_MIN_DELAY_MS, GREETINGS};
use greetbus_core::{DelayRange, GreetingCatalog, SeededRandomness, ThreadRandomness};

const SAMPLES: usize = 40_000;

#[test]
fn seeded_pick_is_close_to_uniform() {
    let catalog = GreetingCatalog::standard();
    let rng = SeededRandomness::new(0x5eed);

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for _ in 0..SAMPLES {
        *seen.entry(catalog.pick(&rng).as_str()).or_default() += 1;
    }

    assert_eq!(seen.len(), GREETINGS.len());
    let expected = SAMPLES as f64 / GREETINGS.len() as f64;
    for g in GREETINGS {
        let n = seen[g] as f64;
        // 4 sigma is roughly 2% of expected at this sample size; allow 5%.
        assert!(
            (n - expected).abs() / expected < 0.05,
            "greeting {g:?} drawn {n} times, expected ~{expected}"
        );
    }
}

#[test]
fn thread_pick_only_yields_catalog_entries() {
    let catalog = GreetingCatalog::standard();
    for _ in 0..1_000 {
        let g = catalog.pick(&ThreadRandomness);
        assert!(catalog.contains(g.as_str()), "unexpected greeting {g}");
    }
}

#[test]
fn default_delay_stays_in_bounds() {
    let range = DelayRange::default();
    assert_eq!(range.min_ms(), DEFAULT_MIN_DELAY_MS);
    assert_eq!(range.max_ms(), DEFAULT_MAX_DELAY_MS);

    let rng = SeededRandomness::new(7);
    let mut lo = Duration::MAX;
    let mut hi = Duration::ZERO;
    for _ in 0..SAMPLES {
        let d = range.sample(&rng);
        assert!(d >= Duration::from_millis(DEFAULT_MIN_DELAY_MS));
        assert!(d < Duration::from_millis(DEFAULT_MAX_DELAY_MS));
        lo = lo.min(d);
        hi = hi.max(d);
    }
    // The whole span gets exercised, not just a corner of it.
    assert_eq!(lo, Duration::from_millis(20));
    assert_eq!(hi, Duration::from_millis(99));
}

#[test]
fn inverted_delay_range_rejected() {
    let err = DelayRange::new(100, 20).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
    assert!(DelayRange::new(50, 50).is_err());
}
