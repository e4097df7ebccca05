use serde_json::{Map, Value};
use thiserror::Error;

/// Field of the feed envelope that carries the record array.
pub const DATA_FIELD: &str = "data";

/// One opaque item of the feed. Never interpreted by the fetcher.
pub type Record = Map<String, Value>;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object at the top level, found {found}")]
    NotAnObject { found: &'static str },

    #[error("envelope has no \"data\" field")]
    MissingData,

    #[error("envelope \"data\" must be an array, found {found}")]
    DataNotArray { found: &'static str },

    #[error("data[{index}] must be an object, found {found}")]
    RecordNotObject { index: usize, found: &'static str },
}

/// Decode a feed body and pull out its `data` records, preserving order.
pub fn extract_records(body: &[u8]) -> Result<Vec<Record>, DecodeError> {
    let value: Value = serde_json::from_slice(body)?;
    let mut envelope = match value {
        Value::Object(envelope) => envelope,
        other => return Err(DecodeError::NotAnObject { found: json_kind(&other) }),
    };

    let items = match envelope.remove(DATA_FIELD) {
        Some(Value::Array(items)) => items,
        Some(other) => return Err(DecodeError::DataNotArray { found: json_kind(&other) }),
        None => return Err(DecodeError::MissingData),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(record) => Ok(record),
            other => Err(DecodeError::RecordNotObject { index, found: json_kind(&other) }),
        })
        .collect()
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
