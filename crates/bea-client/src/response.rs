//! Helpers for the `BEAAPI` response envelope.
//!
//! Every API answer is wrapped as `{"BEAAPI": {"Request": …, "Results": …}}`.
//! Fields whose cardinality varies are returned as a bare object when they
//! hold exactly one item, so callers should read them through [`as_list`].

use bea_core::{BeaError, Result};
use serde_json::Value;

static NULL: Value = Value::Null;

/// Returns the `BEAAPI.Results` member of a response document.
///
/// # Errors
/// Returns [`BeaError::Api`] if the document reports an API error, and
/// [`BeaError::Parse`] if the envelope is missing.
pub fn results(doc: &Value) -> Result<&Value> {
    let api = doc
        .get("BEAAPI")
        .ok_or_else(|| BeaError::Parse("response has no BEAAPI member".to_string()))?;

    if let Some(error) = api.get("Error") {
        return Err(api_error(error));
    }

    let results = api
        .get("Results")
        .ok_or_else(|| BeaError::Parse("response has no BEAAPI.Results member".to_string()))?;

    if let Some(error) = results.get("Error") {
        return Err(api_error(error));
    }

    Ok(results)
}

/// Returns `name` of an object, or `null` if absent.
#[must_use]
pub fn field<'a>(value: &'a Value, name: &str) -> &'a Value {
    value.get(name).unwrap_or(&NULL)
}

/// Views a variable-cardinality value as a list.
///
/// Arrays are returned as-is, a single object becomes a one-element list and
/// anything else (null, missing, scalars) is empty.
#[must_use]
pub fn as_list(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items.as_slice(),
        Value::Object(_) => std::slice::from_ref(value),
        _ => &[],
    }
}

/// Renders a scalar as text: strings verbatim, null as empty, everything else as JSON.
#[must_use]
pub fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn api_error(error: &Value) -> BeaError {
    let error = as_list(error).first().unwrap_or(error);
    BeaError::Api {
        code: text(field(error, "APIErrorCode")),
        description: text(field(error, "APIErrorDescription")),
    }
}
