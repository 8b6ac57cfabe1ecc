//! Access to the semi-structured extension metadata document.
//!
//! `meta.json` is deliberately schemaless: extensions put whatever they
//! like in it and it passes through untouched. Only two fields are
//! contractual: `config.code_source` names the code file to bundle, and
//! `config.code` is where its contents are injected on checkout.

use serde_json::Value;

use crate::error::{Error, Result};

/// Parse raw `meta.json` bytes into a document.
pub fn parse(bytes: &[u8]) -> Result<Value> {
    serde_json::from_slice(bytes).map_err(|e| Error::MetadataMalformed {
        reason: e.to_string(),
    })
}

/// The `config.code_source` field: the file to bundle on checkout.
///
/// Missing or non-string is [`Error::MetadataMalformed`]; the rest of
/// the checkout depends on this field's presence and type.
pub fn code_source(doc: &Value) -> Result<&str> {
    doc.get("config")
        .and_then(|config| config.get("code_source"))
        .and_then(Value::as_str)
        .ok_or_else(|| Error::MetadataMalformed {
            reason: "missing or non-string 'config.code_source'".to_string(),
        })
}

/// Inject the checked-out code text at `config.code`.
pub fn set_code(doc: &mut Value, code: String) -> Result<()> {
    let config = doc
        .get_mut("config")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| Error::MetadataMalformed {
            reason: "'config' is not an object".to_string(),
        })?;
    config.insert("code".to_string(), Value::String(code));
    Ok(())
}
