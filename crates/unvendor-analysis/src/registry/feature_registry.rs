//! FeatureRegistry: register features, update status, generate scripts, notify listeners.
//!
//! The registry is a ledger, not a uniqueness-enforcing store: registering the
//! same name twice yields two features. It has no internal locking; share it
//! across threads only behind a `Mutex`.

use std::sync::Arc;

use chrono::Utc;
use rustc_hash::FxHashMap;
use unvendor_core::errors::GenerateError;
use unvendor_core::events::dispatcher::EventDispatcher;
use unvendor_core::events::handler::FeatureChangeHandler;
use unvendor_core::{Feature, FeatureId, FeatureStatus, MigrationStats, NewFeature};

use super::library::TemplateLibrary;
use super::template::MigrationTemplate;

pub struct FeatureRegistry {
    /// Insertion order.
    features: Vec<Feature>,
    index: FxHashMap<FeatureId, usize>,
    templates: TemplateLibrary,
    dispatcher: EventDispatcher,
}

impl FeatureRegistry {
    /// Empty registry with the built-in template library.
    pub fn new() -> Self {
        Self::with_templates(TemplateLibrary::with_builtins())
    }

    pub fn with_templates(templates: TemplateLibrary) -> Self {
        Self {
            features: Vec::new(),
            index: FxHashMap::default(),
            templates,
            dispatcher: EventDispatcher::new(),
        }
    }

    /// Reload previously stored features without notifying listeners.
    ///
    /// A feature whose id is already present is skipped.
    pub fn restore(&mut self, features: Vec<Feature>) {
        for feature in features {
            if self.index.contains_key(&feature.id) {
                tracing::warn!(feature_id = %feature.id, "skipping duplicate feature id on restore");
                continue;
            }
            self.insert(feature);
        }
    }

    fn insert(&mut self, feature: Feature) -> usize {
        let idx = self.features.len();
        self.index.insert(feature.id.clone(), idx);
        self.features.push(feature);
        idx
    }

    /// Store a new feature and return its generated id. No validation is done.
    pub fn register_feature(&mut self, data: NewFeature) -> FeatureId {
        let mut feature = Feature::from_new(data);
        // Ids carry a random suffix, so this only loops on a real collision.
        while self.index.contains_key(&feature.id) {
            feature.id = FeatureId::generate();
        }

        let id = feature.id.clone();
        let idx = self.insert(feature);
        tracing::debug!(feature_id = %id, name = %self.features[idx].name, "feature registered");
        self.dispatcher.emit_feature_change(&self.features[idx]);
        id
    }

    /// Set the status of `id`. Unknown ids are ignored; returns whether a feature was updated.
    ///
    /// The completion time is stamped only when the new status is `migrated`.
    pub fn update_feature_status(&mut self, id: &FeatureId, status: FeatureStatus) -> bool {
        let Some(&idx) = self.index.get(id) else {
            tracing::debug!(feature_id = %id, "status update for unknown feature ignored");
            return false;
        };

        let feature = &mut self.features[idx];
        let previous = feature.status;
        feature.status = status;
        if status == FeatureStatus::Migrated {
            feature.migrated_at = Some(Utc::now());
        }
        tracing::debug!(feature_id = %id, from = %previous, to = %status, "feature status updated");

        self.dispatcher.emit_feature_change(&self.features[idx]);
        true
    }

    /// Render the first matching template for `id`.
    pub fn generate_migration_script(&self, id: &FeatureId) -> Result<String, GenerateError> {
        let (feature, template) = self.select_template(id)?;
        Ok(template.render(feature))
    }

    /// Generate the script and store it, with the template's endpoints, on the feature.
    pub fn attach_migration_script(&mut self, id: &FeatureId) -> Result<&Feature, GenerateError> {
        let (script, endpoints) = {
            let (feature, template) = self.select_template(id)?;
            (template.render(feature), template.render_endpoints(feature))
        };

        let idx = self.index[id];
        let feature = &mut self.features[idx];
        feature.migration_script = Some(script);
        for endpoint in endpoints {
            if !feature.endpoints.contains(&endpoint) {
                feature.endpoints.push(endpoint);
            }
        }

        self.dispatcher.emit_feature_change(&self.features[idx]);
        Ok(&self.features[idx])
    }

    fn select_template(
        &self,
        id: &FeatureId,
    ) -> Result<(&Feature, &MigrationTemplate), GenerateError> {
        let feature = self
            .feature(id)
            .ok_or_else(|| GenerateError::FeatureNotFound(id.clone()))?;
        let template = self
            .templates
            .find_match(feature)
            .ok_or_else(|| GenerateError::NoMatchingTemplate(id.clone()))?;
        tracing::debug!(feature_id = %id, template = %template.name, "template selected");
        Ok((feature, template))
    }

    pub fn feature(&self, id: &FeatureId) -> Option<&Feature> {
        self.index.get(id).map(|&idx| &self.features[idx])
    }

    /// All features in registration order.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn features_by_status(&self, status: FeatureStatus) -> Vec<&Feature> {
        self.features.iter().filter(|f| f.status == status).collect()
    }

    pub fn migration_stats(&self) -> MigrationStats {
        MigrationStats::tally(&self.features)
    }

    pub fn templates(&self) -> &TemplateLibrary {
        &self.templates
    }

    /// Subscribe to registrations, status updates, and attached scripts.
    pub fn on_feature_change(&mut self, handler: Arc<dyn FeatureChangeHandler>) {
        self.dispatcher.register(handler);
    }

    /// Unsubscribe a handler previously passed to [`Self::on_feature_change`].
    pub fn remove_feature_change_listener(
        &mut self,
        handler: &Arc<dyn FeatureChangeHandler>,
    ) -> bool {
        self.dispatcher.remove(handler)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl Default for FeatureRegistry {
    fn default() -> Self {
        Self::new()
    }
}
