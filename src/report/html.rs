use crate::analyzer::sort_by_price;
use crate::model::{ExportError, PriceRecord};
use crate::utils::format_number;
use chrono::{DateTime, Local};
use std::fmt::Write;
use std::fs;
use std::path::Path;
use tracing::info;

/// Renders the catalog as one HTML table, ordered by raw price ascending.
pub fn render(records: &[PriceRecord], generated_at: DateTime<Local>) -> Result<String, std::fmt::Error> {
    let mut out = String::new();

    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html>")?;
    writeln!(out, "<head>")?;
    writeln!(out, "  <meta charset=\"UTF-8\">")?;
    writeln!(out, "  <title>Product positions</title>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(
        out,
        "  <p>Generated {}</p>",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    )?;
    writeln!(out, "  <table>")?;
    writeln!(out, "    <tr>")?;
    for title in ["No.", "Name", "Price", "Weight", "File", "Price per kg"] {
        writeln!(out, "      <th>{title}</th>")?;
    }
    writeln!(out, "    </tr>")?;

    for (i, record) in sort_by_price(records).into_iter().enumerate() {
        writeln!(out, "    <tr>")?;
        writeln!(out, "      <td>{}</td>", i + 1)?;
        writeln!(out, "      <td>{}</td>", html_escape(&record.name))?;
        writeln!(out, "      <td>{}</td>", format_number(record.price))?;
        writeln!(out, "      <td>{}</td>", format_number(record.weight))?;
        writeln!(out, "      <td>{}</td>", html_escape(&record.source_file))?;
        writeln!(out, "      <td>{:.2}</td>", record.price_per_kg)?;
        writeln!(out, "    </tr>")?;
    }

    writeln!(out, "  </table>")?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;
    Ok(out)
}

/// Writes the HTML report to `path` and returns the number of data rows.
pub fn export(
    records: &[PriceRecord],
    path: &Path,
    generated_at: DateTime<Local>,
) -> Result<usize, ExportError> {
    let html = render(records, generated_at)?;
    fs::write(path, html)?;
    info!("Exported {} record(s) to {}", records.len(), path.display());
    Ok(records.len())
}

fn html_escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
