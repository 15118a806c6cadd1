//! Catalog-sink record preparation.
//!
//! The external catalog expects a cleaned product record: numeric price
//! where the scraped price string parses as one, and no empty strings,
//! arrays, or objects taking up columns.

use serde_json::{Map, Value, json};

use scrapeflow_shared::ProcessedData;

/// Build the record handed to the catalog integration sink.
pub fn clean_product_record(data: &ProcessedData) -> Value {
    let mut record = Map::new();

    if let Some(title) = non_empty(&data.title) {
        record.insert("title".into(), json!(title));
    }
    if let Some(description) = non_empty(&data.description) {
        record.insert("description".into(), json!(description));
    }
    if let Some(price) = non_empty(&data.price) {
        record.insert("price".into(), coerce_price(price));
    }
    if let Some(image_url) = non_empty(&data.image_url) {
        record.insert("imageUrl".into(), json!(image_url));
    }

    let metadata: Map<String, Value> = data
        .metadata
        .iter()
        .filter(|(_, v)| !is_empty_value(v))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    if !metadata.is_empty() {
        record.insert("metadata".into(), Value::Object(metadata));
    }

    Value::Object(record)
}

/// Parse a scraped price string as a number where possible.
///
/// Currency symbols and thousands separators are stripped first; strings
/// that still do not parse are passed through unchanged.
pub fn coerce_price(price: &str) -> Value {
    let cleaned: String = price
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | '¥' | ','))
        .collect();
    let cleaned = cleaned.trim();

    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() => json!(n),
        _ => json!(price),
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn price_is_coerced_to_number() {
        assert_eq!(coerce_price("$1,299.99"), json!(1299.99));
        assert_eq!(coerce_price(" €50 "), json!(50.0));
        assert_eq!(coerce_price("Call for price"), json!("Call for price"));
    }

    #[test]
    fn empty_containers_are_omitted() {
        let data = ProcessedData {
            title: Some("Widget".into()),
            description: Some("".into()),
            price: Some("$10".into()),
            image_url: None,
            metadata: [
                ("tags".to_string(), json!([])),
                ("attrs".to_string(), json!({})),
                ("note".to_string(), json!("")),
                ("brand".to_string(), json!("Acme")),
            ]
            .into_iter()
            .collect(),
        };

        let record = clean_product_record(&data);
        assert_eq!(record["title"], json!("Widget"));
        assert_eq!(record["price"], json!(10.0));
        assert!(record.get("description").is_none());
        assert!(record.get("imageUrl").is_none());
        assert_eq!(record["metadata"], json!({ "brand": "Acme" }));
    }

    #[test]
    fn fully_empty_metadata_is_omitted() {
        let data = ProcessedData {
            metadata: [("tags".to_string(), json!([]))].into_iter().collect(),
            ..ProcessedData::default()
        };
        let record = clean_product_record(&data);
        assert!(record.get("metadata").is_none());
        assert_eq!(record, json!({}));
    }
}
