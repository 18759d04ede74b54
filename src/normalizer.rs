use crate::model::{Field, NormalizationError, PriceRecord};
use crate::utils::parse_decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// Accepted column names per logical field, in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldSynonyms {
    pub name: Vec<String>,
    pub price: Vec<String>,
    pub weight: Vec<String>,
}

impl Default for FieldSynonyms {
    fn default() -> Self {
        fn owned(keys: &[&str]) -> Vec<String> {
            keys.iter().map(|k| (*k).to_string()).collect()
        }
        Self {
            name: owned(&[
                "название",
                "товар",
                "продукт",
                "наименование",
                "name",
                "product",
                "item",
                "title",
            ]),
            price: owned(&["цена", "розница", "price", "retailPrice"]),
            weight: owned(&["вес", "масса", "фасовка", "weight", "mass", "packSize"]),
        }
    }
}

impl FieldSynonyms {
    pub fn for_field(&self, field: Field) -> &[String] {
        match field {
            Field::Name => &self.name,
            Field::Price => &self.price,
            Field::Weight => &self.weight,
        }
    }
}

/// Canonical form of a header key: trimmed, BOM-free, lower-cased.
pub fn header_key(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Returns the value of the first synonym present in the row.
/// Row keys are expected in `header_key` form.
fn resolve<'a>(
    row: &'a HashMap<String, String>,
    synonyms: &FieldSynonyms,
    field: Field,
) -> Result<&'a str, NormalizationError> {
    synonyms
        .for_field(field)
        .iter()
        .find_map(|key| row.get(&header_key(key)))
        .map(String::as_str)
        .ok_or(NormalizationError::MissingField { field })
}

fn resolve_number(
    row: &HashMap<String, String>,
    synonyms: &FieldSynonyms,
    field: Field,
) -> Result<f64, NormalizationError> {
    let raw = resolve(row, synonyms, field)?;
    parse_decimal(raw).ok_or_else(|| NormalizationError::UnparsableNumber {
        field,
        value: raw.to_string(),
    })
}

/// Turns a raw CSV row into a `PriceRecord`.
pub fn normalize(
    row: &HashMap<String, String>,
    source_file: &str,
    synonyms: &FieldSynonyms,
) -> Result<PriceRecord, NormalizationError> {
    let name = resolve(row, synonyms, Field::Name)?.trim().to_lowercase();
    if name.is_empty() {
        return Err(NormalizationError::MissingField { field: Field::Name });
    }
    // A negative price would rank below the zero sentinel; `-0` is folded into `0`.
    let price = match resolve_number(row, synonyms, Field::Price)? {
        p if p < 0.0 => {
            return Err(NormalizationError::UnparsableNumber {
                field: Field::Price,
                value: resolve(row, synonyms, Field::Price)?.to_string(),
            });
        }
        p if p == 0.0 => 0.0,
        p => p,
    };
    let weight = resolve_number(row, synonyms, Field::Weight)?;

    Ok(PriceRecord::new(name, price, weight, source_file.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NormalizationReason;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (header_key(k), (*v).to_string()))
            .collect()
    }

    #[test]
    fn computes_price_per_kg() {
        let r = row(&[("название", "  Яблоки "), ("цена", "100"), ("вес", "2")]);
        let rec = normalize(&r, "price_a.csv", &FieldSynonyms::default()).unwrap();
        assert_eq!(rec.name, "яблоки");
        assert_eq!(rec.price, 100.0);
        assert_eq!(rec.weight, 2.0);
        assert_eq!(rec.price_per_kg, 50.0);
        assert_eq!(rec.source_file, "price_a.csv");
        assert!(rec.is_ratable());
    }

    #[test]
    fn accepts_comma_decimals() {
        let r = row(&[("товар", "Груши"), ("розница", "150,5"), ("масса", "3,0")]);
        let rec = normalize(&r, "price_b.csv", &FieldSynonyms::default()).unwrap();
        assert_eq!(rec.price, 150.5);
        assert_eq!(rec.weight, 3.0);
        assert!((rec.price_per_kg - 150.5 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn zero_weight_keeps_record_with_sentinel() {
        let r = row(&[("name", "Salt"), ("price", "10"), ("weight", "0")]);
        let rec = normalize(&r, "price.csv", &FieldSynonyms::default()).unwrap();
        assert_eq!(rec.price_per_kg, 0.0);
        assert!(!rec.is_ratable());
    }

    #[test]
    fn first_synonym_wins() {
        let r = row(&[("название", "first"), ("product", "second"), ("цена", "1"), ("вес", "1")]);
        let rec = normalize(&r, "f", &FieldSynonyms::default()).unwrap();
        assert_eq!(rec.name, "first");
    }

    #[test]
    fn present_but_empty_synonym_does_not_fall_through() {
        let r = row(&[("name", "tea"), ("цена", ""), ("price", "5"), ("weight", "1")]);
        let err = normalize(&r, "f", &FieldSynonyms::default()).unwrap_err();
        assert_eq!(err.field(), Field::Price);
        assert_eq!(err.reason(), NormalizationReason::UnparsableNumber);
    }

    #[test]
    fn headers_match_case_insensitively() {
        let r = row(&[(" Name ", "Tea"), ("RetailPrice", "12"), ("PACKSIZE", "0,5")]);
        let rec = normalize(&r, "f", &FieldSynonyms::default()).unwrap();
        assert_eq!(rec.name, "tea");
        assert_eq!(rec.price_per_kg, 24.0);
    }

    #[test]
    fn missing_name_is_reported() {
        let r = row(&[("цена", "1"), ("вес", "1")]);
        let err = normalize(&r, "f", &FieldSynonyms::default()).unwrap_err();
        assert_eq!(err, NormalizationError::MissingField { field: Field::Name });
    }

    #[test]
    fn blank_name_is_missing() {
        let r = row(&[("name", "   "), ("price", "1"), ("weight", "1")]);
        let err = normalize(&r, "f", &FieldSynonyms::default()).unwrap_err();
        assert_eq!(err.reason(), NormalizationReason::MissingField);
    }

    #[test]
    fn missing_weight_is_reported() {
        let r = row(&[("name", "rice"), ("price", "1")]);
        let err = normalize(&r, "f", &FieldSynonyms::default()).unwrap_err();
        assert_eq!(err, NormalizationError::MissingField { field: Field::Weight });
    }

    #[test]
    fn unparsable_price_is_reported() {
        let r = row(&[("name", "rice"), ("price", "cheap"), ("weight", "1")]);
        let err = normalize(&r, "f", &FieldSynonyms::default()).unwrap_err();
        assert_eq!(err.field(), Field::Price);
        assert_eq!(err.reason(), NormalizationReason::UnparsableNumber);
    }

    #[test]
    fn negative_price_is_rejected() {
        let r = row(&[("name", "tea"), ("price", "-10"), ("weight", "2")]);
        let err = normalize(&r, "f", &FieldSynonyms::default()).unwrap_err();
        assert_eq!(err.field(), Field::Price);
        assert_eq!(err.reason(), NormalizationReason::UnparsableNumber);
    }

    #[test]
    fn zero_price_is_kept() {
        let r = row(&[("name", "sample"), ("price", "0"), ("weight", "1")]);
        let rec = normalize(&r, "f", &FieldSynonyms::default()).unwrap();
        assert_eq!(rec.price_per_kg, 0.0);
        assert!(rec.is_ratable());
    }

    #[test]
    fn negative_zero_price_is_plain_zero() {
        let r = row(&[("name", "sample"), ("price", "-0,0"), ("weight", "2")]);
        let rec = normalize(&r, "f", &FieldSynonyms::default()).unwrap();
        assert!(rec.price_per_kg.is_sign_positive());
    }

    #[test]
    fn custom_synonyms() {
        let synonyms = FieldSynonyms {
            name: vec!["sku".into()],
            price: vec!["cost".into()],
            weight: vec!["kg".into()],
        };
        let r = row(&[("sku", "X1"), ("cost", "9"), ("kg", "3")]);
        let rec = normalize(&r, "f", &synonyms).unwrap();
        assert_eq!(rec.name, "x1");
        assert_eq!(rec.price_per_kg, 3.0);
    }
}
