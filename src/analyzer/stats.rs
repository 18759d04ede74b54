use crate::model::PriceRecord;
use std::collections::HashSet;

/// Aggregate view of a loaded catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogStats {
    pub records: usize,
    pub distinct_names: usize,
    pub unratable: usize,
    pub cheapest: Option<PriceRecord>,
    pub avg_price_per_kg: Option<f64>,
}

/// Computes catalog statistics. Unratable records are left out of the ratio figures.
pub fn summarize(catalog: &[PriceRecord]) -> CatalogStats {
    let distinct_names = catalog
        .iter()
        .map(|r| r.name.as_str())
        .collect::<HashSet<_>>()
        .len();
    let ratable: Vec<&PriceRecord> = catalog.iter().filter(|r| r.is_ratable()).collect();

    let cheapest = ratable
        .iter()
        .copied()
        .reduce(|best, r| if r.price_per_kg < best.price_per_kg { r } else { best })
        .cloned();
    let avg_price_per_kg = if ratable.is_empty() {
        None
    } else {
        Some(ratable.iter().map(|r| r.price_per_kg).sum::<f64>() / ratable.len() as f64)
    };

    CatalogStats {
        records: catalog.len(),
        distinct_names,
        unratable: catalog.len() - ratable.len(),
        cheapest,
        avg_price_per_kg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_unratable_in_ratios() {
        let data = vec![
            PriceRecord::new("salt".into(), 10.0, 0.0, "a".into()),
            PriceRecord::new("tea".into(), 30.0, 1.0, "a".into()),
            PriceRecord::new("tea".into(), 10.0, 1.0, "b".into()),
        ];
        let stats = summarize(&data);
        assert_eq!(stats.records, 3);
        assert_eq!(stats.distinct_names, 2);
        assert_eq!(stats.unratable, 1);
        assert_eq!(stats.cheapest.as_ref().map(|r| r.source_file.as_str()), Some("b"));
        assert_eq!(stats.avg_price_per_kg, Some(20.0));
    }

    #[test]
    fn empty_catalog() {
        let stats = summarize(&[]);
        assert_eq!(stats.records, 0);
        assert!(stats.cheapest.is_none());
        assert!(stats.avg_price_per_kg.is_none());
    }
}
