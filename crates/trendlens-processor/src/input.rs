//! Decoding collector output into [`ContentItem`] values.

use serde_json::Value;
use trendlens_core::ContentItem;

use crate::error::ProcessorError;

/// Decode a JSON array of items, or a single item object.
///
/// Array elements that are not objects are logged and skipped so one bad
/// record never sinks the batch.
///
/// # Errors
///
/// Returns [`ProcessorError::Json`] when `json` is not valid JSON and
/// [`ProcessorError::InvalidInput`] when the top level is neither an array
/// nor an object.
pub fn decode_items(json: &str) -> Result<Vec<ContentItem>, ProcessorError> {
    let value: Value = serde_json::from_str(json)?;

    match value {
        Value::Array(elements) => {
            let total = elements.len();
            let items: Vec<ContentItem> = elements
                .into_iter()
                .enumerate()
                .filter_map(|(index, element)| match decode_one(element) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        tracing::warn!(index, error = %e, "skipping undecodable content record");
                        None
                    }
                })
                .collect();

            if items.len() < total {
                tracing::warn!(
                    decoded = items.len(),
                    total,
                    "some content records were skipped"
                );
            }
            Ok(items)
        }
        Value::Object(_) => Ok(vec![decode_one(value)?]),
        other => Err(ProcessorError::InvalidInput(format!(
            "expected an array or object of content items, got {}",
            kind(&other)
        ))),
    }
}

fn decode_one(value: Value) -> Result<ContentItem, ProcessorError> {
    if !value.is_object() {
        return Err(ProcessorError::InvalidInput(format!(
            "content record must be an object, got {}",
            kind(&value)
        )));
    }
    Ok(serde_json::from_value(value)?)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
