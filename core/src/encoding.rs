//! Form (`application/x-www-form-urlencoded`) body encoding.

use serde_json::Value;

use crate::error::RouterError;
use crate::operation::{json_type, Params};

/// Encode primitive parameters as a form body.
///
/// Strings go through unchanged, numbers use their JSON decimal form and
/// booleans become `true`/`false`. `null`, arrays and objects have no flat
/// form representation and are rejected.
pub fn encode_form(params: &Params) -> Result<String, RouterError> {
    let pairs = params
        .iter()
        .map(|(key, value)| form_value(key, value).map(|value| (key.as_str(), value)))
        .collect::<Result<Vec<_>, RouterError>>()?;
    serde_urlencoded::to_string(&pairs).map_err(|e| RouterError::EncodingError(e.to_string()))
}

fn form_value(key: &str, value: &Value) -> Result<String, RouterError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => Err(RouterError::EncodingError(format!(
            "parameter `{key}` is a non-primitive {}",
            json_type(value)
        ))),
    }
}
