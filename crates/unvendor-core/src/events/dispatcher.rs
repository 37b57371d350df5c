//! EventDispatcher: synchronous fan-out to registered handlers, in registration order.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::types::feature::Feature;

use super::handler::FeatureChangeHandler;

#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn FeatureChangeHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Arc<dyn FeatureChangeHandler>) {
        self.handlers.push(handler);
    }

    /// Remove a handler by identity. Returns whether one was removed.
    ///
    /// Only the first registration of the same `Arc` is removed.
    pub fn remove(&mut self, handler: &Arc<dyn FeatureChangeHandler>) -> bool {
        let target = Arc::as_ptr(handler) as *const ();
        match self
            .handlers
            .iter()
            .position(|h| Arc::as_ptr(h) as *const () == target)
        {
            Some(idx) => {
                self.handlers.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Deliver `feature` to every handler. Returns the number of handlers that panicked.
    pub fn emit_feature_change(&self, feature: &Feature) -> usize {
        let mut failures = 0;
        for (index, handler) in self.handlers.iter().enumerate() {
            let result = catch_unwind(AssertUnwindSafe(|| handler.on_feature_change(feature)));
            if let Err(payload) = result {
                failures += 1;
                tracing::error!(
                    handler_index = index,
                    feature_id = %feature.id,
                    panic = panic_message(payload.as_ref()),
                    "feature change listener panicked"
                );
            }
        }
        failures
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}
