use crate::model::PriceRecord;
use crate::utils::format_number;
use std::fmt::Write;

/// Renders search results as a fixed-width text table.
pub fn render_table(records: &[&PriceRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<4} {:<30} {:>10} {:>8} {:<20} {:>12}",
        "No.", "Name", "Price", "Weight", "File", "Price per kg"
    );
    for (i, record) in records.iter().enumerate() {
        let ratio = if record.is_ratable() {
            format!("{:.2}", record.price_per_kg)
        } else {
            "n/a".to_string()
        };
        let _ = writeln!(
            out,
            "{:<4} {:<30} {:>10} {:>8} {:<20} {:>12}",
            i + 1,
            record.name,
            format_number(record.price),
            format_number(record.weight),
            record.source_file,
            ratio
        );
    }
    out
}
