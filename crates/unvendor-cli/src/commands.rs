//! Command implementations. Each writes its report to `out` and says whether
//! the registry changed and whether the run counts as a success.

use std::io::Write;

use unvendor_core::errors::GenerateError;
use unvendor_core::{Feature, FeatureId, FeatureStatus, NewFeature, Priority, UnvendorErrorCode};

use crate::session::Session;
use crate::table::write_feature_table;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// The registry changed and should be saved.
    pub mutated: bool,
    /// Process exit status: only `check` reports failure this way.
    pub success: bool,
}

impl Outcome {
    const READ: Self = Self {
        mutated: false,
        success: true,
    };
    const MUTATED: Self = Self {
        mutated: true,
        success: true,
    };
}

pub fn register(
    session: &mut Session,
    name: &str,
    description: &str,
    usage: &[String],
    priority: Priority,
    out: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    let mut data = NewFeature::detected(name, description, usage.to_vec());
    data.priority = priority;
    let id = session.registry.register_feature(data);
    writeln!(out, "Registered feature: {name}")?;
    writeln!(out, "ID: {id}")?;
    Ok(Outcome::MUTATED)
}

/// Print the migration script. With `attach`, also store it on the feature.
///
/// A missing feature and a feature no template matches both print the
/// "no suitable template" message and still exit successfully.
pub fn generate(
    session: &mut Session,
    feature_id: &str,
    attach: bool,
    out: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    let id = FeatureId::from(feature_id);
    let result = if attach {
        session
            .registry
            .attach_migration_script(&id)
            .map(|f| f.migration_script.clone().unwrap_or_default())
    } else {
        session.registry.generate_migration_script(&id)
    };

    match result {
        Ok(script) => {
            write!(out, "{script}")?;
            Ok(if attach { Outcome::MUTATED } else { Outcome::READ })
        }
        Err(e) => {
            tracing::info!(code = e.error_code(), feature_id = %id, "no script generated");
            let reason = match e {
                GenerateError::FeatureNotFound(_) => "unknown feature",
                GenerateError::NoMatchingTemplate(_) => "no template matches its usage",
            };
            writeln!(out, "No suitable template found for feature {id} ({reason})")?;
            Ok(Outcome::READ)
        }
    }
}

pub fn list(
    session: &Session,
    status: Option<FeatureStatus>,
    json: bool,
    out: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    let features: Vec<&Feature> = match status {
        Some(status) => session.registry.features_by_status(status),
        None => session.registry.features().iter().collect(),
    };

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&features)?)?;
    } else if features.is_empty() {
        writeln!(out, "No features registered.")?;
    } else {
        write_feature_table(out, &features)?;
    }
    Ok(Outcome::READ)
}

pub fn stats(session: &Session, json: bool, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    let stats = session.registry.migration_stats();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
    } else {
        writeln!(out, "Migration statistics:")?;
        writeln!(out, "  Total:       {}", stats.total)?;
        writeln!(out, "  Migrated:    {}", stats.migrated)?;
        writeln!(out, "  In progress: {}", stats.in_progress)?;
        writeln!(out, "  Failed:      {}", stats.failed)?;
        writeln!(out, "  Pending:     {}", stats.pending)?;
    }
    Ok(Outcome::READ)
}

pub fn scan(session: &mut Session, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    let summary = session
        .detector
        .generate_migration_suggestions(&session.root, &mut session.registry, out)?;
    Ok(Outcome {
        mutated: !summary.registered.is_empty(),
        success: true,
    })
}

/// CI gate: fails when any vendor usage remains.
pub fn check(session: &Session, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    let clean = session.detector.check_for_new_usage(&session.root, out)?;
    if clean {
        writeln!(out, "No Base44 SDK usage found.")?;
    }
    Ok(Outcome {
        mutated: false,
        success: clean,
    })
}

/// Set a feature's status. Transitions outside the lifecycle are applied with a warning.
pub fn set_status(
    session: &mut Session,
    feature_id: &str,
    status: FeatureStatus,
    out: &mut dyn Write,
) -> anyhow::Result<Outcome> {
    let id = FeatureId::from(feature_id);
    let Some(current) = session.registry.feature(&id).map(|f| f.status) else {
        anyhow::bail!("feature not found: {id}");
    };

    if current != status && !current.can_transition_to(status) {
        tracing::warn!(feature_id = %id, from = %current, to = %status, "unusual status transition");
        writeln!(out, "Warning: {id} moves from {current} to {status} outside the usual lifecycle")?;
    }
    session.registry.update_feature_status(&id, status);
    writeln!(out, "Feature {id}: {current} -> {status}")?;
    Ok(Outcome::MUTATED)
}

pub fn templates(session: &Session, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    let library = session.registry.templates();
    let width = library.iter().map(|t| t.name.len()).max().unwrap_or(0);
    for template in library.iter() {
        writeln!(out, "{:<width$}  {}", template.name, template.description)?;
    }
    Ok(Outcome::READ)
}
