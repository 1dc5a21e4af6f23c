//! Input validation for collection requests.
//!
//! Request bodies for reorder and import arrive as untyped JSON so that a
//! malformed body produces a [`CatalogError::Validation`] with a useful
//! message rather than a generic deserialization rejection.

use std::collections::HashSet;

use serde_json::Value;
use sitenav_types::WebsiteRecord;

use crate::error::{CatalogError, CatalogResult};

/// A record name must contain at least one non-whitespace character.
pub fn validate_name(name: &str) -> CatalogResult<()> {
    if name.trim().is_empty() {
        return Err(CatalogError::Validation("website name is required".into()));
    }
    Ok(())
}

/// Extract the `order` list from a reorder body of the form
/// `{"order": ["name", ...]}`.
pub fn parse_order(body: &Value) -> CatalogResult<Vec<String>> {
    let Some(items) = body.get("order").and_then(Value::as_array) else {
        return Err(CatalogError::Validation(
            "order must be a list of website names".into(),
        ));
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str().map(str::to_owned).ok_or_else(|| {
                CatalogError::Validation(format!("order entry at index {i} is not a string"))
            })
        })
        .collect()
}

/// Extract and validate the `websites` list from an import body of the form
/// `{"websites": [...]}`.
pub fn parse_import(body: &Value) -> CatalogResult<Vec<WebsiteRecord>> {
    let Some(items) = body.get("websites").and_then(Value::as_array) else {
        return Err(CatalogError::Validation(
            "import data must contain a websites list".into(),
        ));
    };

    let mut records = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let has_name = item
            .get("name")
            .and_then(Value::as_str)
            .is_some_and(|n| !n.trim().is_empty());
        if !has_name {
            return Err(CatalogError::Validation(format!(
                "website at index {i} is missing required field: name"
            )));
        }
        let record: WebsiteRecord = serde_json::from_value(item.clone()).map_err(|e| {
            CatalogError::Validation(format!("website at index {i} is not an object: {e}"))
        })?;
        records.push(record);
    }

    ensure_unique_names(&records)?;
    Ok(records)
}

/// Reject a list in which two records share a name.
pub fn ensure_unique_names(records: &[WebsiteRecord]) -> CatalogResult<()> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.name.as_str()) {
            return Err(CatalogError::Validation(format!(
                "duplicate website name: {}",
                record.name
            )));
        }
    }
    Ok(())
}
