//! Property-based tests for failure isolation across arbitrary failure sets

use admock::{Catalog, DispatchMode, GenerationStatus, MockupApi};
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

use super::test_utils::{config_with, ScriptedGenerator};

fn run_with_failures(failing: &BTreeSet<u32>, dispatch: DispatchMode) -> admock::SessionSnapshot {
    let catalog = Catalog::builtin();
    let generator = failing
        .iter()
        .fold(ScriptedGenerator::new(&catalog), |g, id| g.fail(*id, "quota exceeded"));
    let api = MockupApi::new(Arc::new(generator), Arc::new(catalog), &config_with(dispatch));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    runtime
        .block_on(api.upload_bytes("image/png", b"product"))
        .unwrap();
    api.snapshot()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn failures_never_leak_to_siblings(
        failing in proptest::collection::btree_set(1u32..=10, 0..=10),
        concurrent in any::<bool>(),
    ) {
        let dispatch = if concurrent { DispatchMode::Concurrent } else { DispatchMode::Sequential };
        let snapshot = run_with_failures(&failing, dispatch);

        let keys: Vec<u32> = snapshot.results.iter().map(|r| r.format_id).collect();
        prop_assert_eq!(keys, Catalog::builtin().ids());
        prop_assert!(!snapshot.in_flight);
        prop_assert_eq!(snapshot.count(GenerationStatus::Failed), failing.len());
        prop_assert_eq!(
            snapshot.count(GenerationStatus::Succeeded) + snapshot.count(GenerationStatus::Failed),
            10
        );

        for result in &snapshot.results {
            if failing.contains(&result.format_id) {
                prop_assert_eq!(result.status, GenerationStatus::Failed);
                prop_assert!(result.image.is_none());
            } else {
                prop_assert_eq!(result.status, GenerationStatus::Succeeded);
                prop_assert!(result.error.is_none());
            }
        }
    }
}
