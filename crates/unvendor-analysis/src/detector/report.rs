//! Plain-text scan reports.

use std::io::{self, Write};
use std::path::Path;

use super::types::UsageRecord;

/// Path as shown to the user: relative to `base` when possible.
pub fn display_path(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Records grouped by file, files in first-seen order.
pub fn write_grouped_report(
    out: &mut dyn Write,
    base: &Path,
    records: &[UsageRecord],
) -> io::Result<()> {
    let mut groups: Vec<(&Path, Vec<&UsageRecord>)> = Vec::new();
    for record in records {
        match groups.iter_mut().find(|(file, _)| *file == record.file.as_path()) {
            Some((_, group)) => group.push(record),
            None => groups.push((record.file.as_path(), vec![record])),
        }
    }

    for (file, group) in groups {
        writeln!(out, "{}", display_path(base, file))?;
        for record in group {
            writeln!(out, "  Line {}: {}", record.line, record.kind)?;
            writeln!(out, "    Code: {}", record.line_text)?;
            writeln!(out, "    Suggestion: {}", record.suggestion)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// One line per offending location, for CI logs.
pub fn write_violations(
    out: &mut dyn Write,
    base: &Path,
    records: &[UsageRecord],
) -> io::Result<()> {
    for record in records {
        writeln!(
            out,
            "  {}:{} [{}] {}",
            display_path(base, &record.file),
            record.line,
            record.kind,
            record.line_text
        )?;
        writeln!(out, "    -> {}", record.suggestion)?;
    }
    Ok(())
}
