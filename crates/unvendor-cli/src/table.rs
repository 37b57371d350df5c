//! Plain-text feature table for `list`.

use std::io::{self, Write};

use unvendor_core::Feature;

const HEADERS: [&str; 5] = ["ID", "NAME", "STATUS", "PRIORITY", "CREATED"];

pub fn write_feature_table(out: &mut dyn Write, features: &[&Feature]) -> io::Result<()> {
    let rows: Vec<[String; 5]> = features
        .iter()
        .map(|f| {
            [
                f.id.to_string(),
                f.name.clone(),
                f.status.to_string(),
                f.priority.to_string(),
                f.created_at.format("%Y-%m-%d %H:%M").to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, &HEADERS.map(String::from), &widths)?;
    for row in &rows {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn write_row(out: &mut dyn Write, cells: &[String; 5], widths: &[usize; 5]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}
