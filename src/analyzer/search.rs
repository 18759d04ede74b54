use crate::model::PriceRecord;

/// Returns the records whose name contains `needle` (case-insensitive),
/// cheapest per kilogram first. Ties keep catalog order.
pub fn search<'a>(catalog: &'a [PriceRecord], needle: &str) -> Vec<&'a PriceRecord> {
    let needle = needle.to_lowercase();
    let mut results: Vec<&PriceRecord> = catalog
        .iter()
        .filter(|r| r.name.contains(&needle))
        .collect();
    results.sort_by(|a, b| a.price_per_kg.total_cmp(&b.price_per_kg));
    results
}

/// Orders records by raw price ascending, keeping catalog order for equal prices.
pub fn sort_by_price(catalog: &[PriceRecord]) -> Vec<&PriceRecord> {
    let mut sorted: Vec<&PriceRecord> = catalog.iter().collect();
    sorted.sort_by(|a, b| a.price.total_cmp(&b.price));
    sorted
}
