//! Property tests for registry invariants.

use std::collections::HashSet;

use proptest::prelude::*;
use unvendor_analysis::FeatureRegistry;
use unvendor_core::{FeatureId, FeatureStatus, NewFeature};

fn status_strategy() -> impl Strategy<Value = FeatureStatus> {
    prop::sample::select(FeatureStatus::ALL.to_vec())
}

/// A registry operation: register a feature, or update the status of the
/// n-th registered feature (out-of-range indices target an unknown id).
#[derive(Debug, Clone)]
enum Op {
    Register(String),
    Update(usize, FeatureStatus),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[A-Za-z]{1,8}\\.[a-z]{1,8}".prop_map(Op::Register),
        (0usize..16, status_strategy()).prop_map(|(i, s)| Op::Update(i, s)),
    ]
}

proptest! {
    #[test]
    fn stats_always_partition_total(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut registry = FeatureRegistry::new();
        let mut ids: Vec<FeatureId> = Vec::new();
        for op in ops {
            match op {
                Op::Register(name) => {
                    ids.push(registry.register_feature(NewFeature::detected(name, "", Vec::new())));
                }
                Op::Update(i, status) => {
                    let id = ids.get(i).cloned().unwrap_or_else(|| FeatureId::from("feature_unknown"));
                    registry.update_feature_status(&id, status);
                }
            }
            let stats = registry.migration_stats();
            prop_assert_eq!(stats.total, registry.len());
            prop_assert_eq!(
                stats.total,
                stats.migrated + stats.in_progress + stats.failed + stats.pending
            );
        }
    }

    #[test]
    fn ids_are_unique_and_len_grows_by_one(names in prop::collection::vec("[a-z]{1,6}", 1..30)) {
        let mut registry = FeatureRegistry::new();
        let mut seen = HashSet::new();
        for (i, name) in names.into_iter().enumerate() {
            let id = registry.register_feature(NewFeature::detected(name, "", Vec::new()));
            prop_assert!(seen.insert(id));
            prop_assert_eq!(registry.len(), i + 1);
        }
    }

    #[test]
    fn migrated_at_tracks_last_status(statuses in prop::collection::vec(status_strategy(), 1..10)) {
        let mut registry = FeatureRegistry::new();
        let id = registry.register_feature(NewFeature::detected("Task.get", "", Vec::new()));
        let mut ever_migrated = false;
        for status in statuses {
            registry.update_feature_status(&id, status);
            ever_migrated |= status == FeatureStatus::Migrated;
            let feature = registry.feature(&id).unwrap();
            prop_assert_eq!(feature.status, status);
            prop_assert_eq!(feature.migrated_at.is_some(), ever_migrated);
        }
    }
}
