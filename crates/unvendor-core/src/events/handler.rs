//! FeatureChangeHandler trait: receives every stored feature after a change.

use crate::types::feature::Feature;

/// Listener invoked synchronously after each registration and status update.
///
/// Handlers run on the caller's stack, so a slow handler delays the mutating
/// call. A handler that panics is isolated by the dispatcher.
pub trait FeatureChangeHandler: Send + Sync {
    fn on_feature_change(&self, feature: &Feature);
}

impl<F> FeatureChangeHandler for F
where
    F: Fn(&Feature) + Send + Sync,
{
    fn on_feature_change(&self, feature: &Feature) {
        self(feature)
    }
}
