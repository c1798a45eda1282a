use std::path::PathBuf;
use std::sync::OnceLock;

use pbp_core::{PercentileEngine, classify};
use pbp_model::{BpStatus, BpType, Sex, Subject};
use pbp_standards::ReferenceTableStore;
use proptest::prelude::*;

fn store() -> &'static ReferenceTableStore {
    static STORE: OnceLock<ReferenceTableStore> = OnceLock::new();
    STORE.get_or_init(|| {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../pbp-standards/tests/fixtures/bp-tables");
        ReferenceTableStore::load_dir(&dir)
            .expect("load fixture tables")
            .0
    })
}

fn sex_strategy() -> impl Strategy<Value = Sex> {
    prop_oneof![Just(Sex::Male), Just(Sex::Female)]
}

fn bp_type_strategy() -> impl Strategy<Value = BpType> {
    prop_oneof![Just(BpType::Systolic), Just(BpType::Diastolic)]
}

proptest! {
    #[test]
    fn percentile_stays_in_range(
        sex in sex_strategy(),
        bp_type in bp_type_strategy(),
        age in 0.0f64..13.4,
        height in 30.0f64..200.0,
        bp in 1.0f64..250.0,
    ) {
        let subject = Subject::new(sex, bp_type, age, height, bp).unwrap();
        let result = PercentileEngine::new(store()).compute_percentile(&subject).unwrap();
        prop_assert!((0.0..=100.0).contains(&result.percentile));
        prop_assert_eq!(result.status, classify(result.percentile));
    }

    #[test]
    fn percentile_is_monotonic_in_bp(
        sex in sex_strategy(),
        bp_type in bp_type_strategy(),
        age in 0u8..=13,
        height in 30.0f64..200.0,
        low in 1.0f64..200.0,
        step in 0.0f64..50.0,
    ) {
        let engine = PercentileEngine::new(store());
        let lower = Subject::new(sex, bp_type, f64::from(age), height, low).unwrap();
        let higher = Subject::new(sex, bp_type, f64::from(age), height, low + step).unwrap();
        let a = engine.compute_percentile(&lower).unwrap();
        let b = engine.compute_percentile(&higher).unwrap();
        prop_assert!(b.percentile >= a.percentile - 1e-9);
        prop_assert!(b.status >= a.status);
    }

    #[test]
    fn status_never_decreases_with_percentile(p in 0.0f64..100.0, delta in 0.0f64..10.0) {
        let lower: BpStatus = classify(p);
        let higher: BpStatus = classify((p + delta).min(100.0));
        prop_assert!(higher >= lower);
    }
}
