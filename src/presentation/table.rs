// Display projection of format descriptors

use std::fmt::Write as _;

use crate::downloader::{FormatDescriptor, BEST_SENTINEL};

const NOT_AVAILABLE: &str = "N/A";

pub const BEST_LABEL: &str = "Best Quality (Auto Select)";

/// One table row: {ID, Quality, Format, Size}
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRow {
    pub id: String,
    pub quality: String,
    pub format: String,
    pub size: String,
}

impl FormatRow {
    pub fn from_descriptor(descriptor: &FormatDescriptor) -> Self {
        Self {
            id: or_not_available(&descriptor.id),
            quality: descriptor
                .resolution
                .as_deref()
                .map(or_not_available)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            format: or_not_available(&descriptor.container.to_uppercase()),
            size: format_size(descriptor.size_bytes),
        }
    }

    /// Label used in the selection list
    pub fn option_label(&self) -> String {
        format!(
            "ID: {} | {} | {} | {}",
            self.id, self.quality, self.format, self.size
        )
    }
}

/// "X.Y MB" for a known, non-zero size, "N/A" otherwise
pub fn format_size(bytes: Option<u64>) -> String {
    match bytes {
        Some(b) if b > 0 => format!("{:.1} MB", b as f64 / 1024.0 / 1024.0),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn or_not_available(value: &str) -> String {
    if value.trim().is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value.to_string()
    }
}

pub fn build_rows(formats: &[FormatDescriptor]) -> Vec<FormatRow> {
    formats.iter().map(FormatRow::from_descriptor).collect()
}

/// Selection choices: `best` first, then each distinct id in catalog order
pub fn selection_options(rows: &[FormatRow]) -> Vec<(String, String)> {
    let mut options = vec![(BEST_SENTINEL.to_string(), BEST_LABEL.to_string())];
    for row in rows {
        if options.iter().all(|(id, _)| id != &row.id) {
            options.push((row.id.clone(), row.option_label()));
        }
    }
    options
}

/// Render rows as a fixed-width text table
pub fn render_table(rows: &[FormatRow]) -> String {
    let headers = ["ID", "Quality", "Format", "Size"];
    let mut widths = headers.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule.iter().map(String::as_str).collect::<Vec<_>>(), &widths);
    for row in rows {
        push_line(&mut out, &row.cells(), &widths);
    }
    out
}

impl FormatRow {
    fn cells(&self) -> [&str; 4] {
        [&self.id, &self.quality, &self.format, &self.size]
    }
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}
