//! Candidate feature extraction from usage records.

use rustc_hash::FxHashSet;
use unvendor_core::NewFeature;

use super::patterns::PatternKind;
use super::types::UsageRecord;

/// Feature name implied by a record, if its kind is auto-extracted.
///
/// `entity_method` → `Entity.method`, `function_call` → `function.name`.
pub fn feature_name(record: &UsageRecord) -> Option<String> {
    match record.kind {
        PatternKind::EntityMethod => match record.captures.as_slice() {
            [entity, method, ..] => Some(format!("{entity}.{method}")),
            _ => None,
        },
        PatternKind::FunctionCall => record
            .captures
            .first()
            .map(|name| format!("function.{name}")),
        _ => None,
    }
}

/// One detected feature per distinct name, first occurrence wins.
pub fn extract_features(records: &[UsageRecord]) -> Vec<NewFeature> {
    let mut seen = FxHashSet::default();
    let mut features = Vec::new();
    for record in records {
        let Some(name) = feature_name(record) else {
            continue;
        };
        if !seen.insert(name.clone()) {
            continue;
        }
        let description = format!(
            "Auto-detected {} usage in {}:{}",
            record.kind,
            record.file.display(),
            record.line
        );
        features.push(NewFeature::detected(
            name,
            description,
            vec![record.line_text.clone()],
        ));
    }
    features
}
