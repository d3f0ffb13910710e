//! Test builders — single-field documents and templates.
//!
//! Most scalar scenarios put one raw JSON value under `foo` and normalise it
//! against a one-field template. [`SingleField`] keeps the three pieces
//! (document, matching template, template with the wrong key) together.

use fieldcast::{normalize, NormalizeError, Record, Template, TypeHandler};

/// A `{"foo": <raw>}` document paired with `{foo: handler}`.
pub struct SingleField {
    pub document: String,
    pub template: Template,
    pub misnamed: Template,
}

impl SingleField {
    /// `raw` is JSON text, e.g. `"\"123\""` or `"[1, 2]"`.
    pub fn new(raw: &str, handler: TypeHandler) -> Self {
        Self {
            document: format!(r#"{{"foo": {raw}}}"#),
            template: Template::new().field("foo", handler.clone()),
            misnamed: Template::new().field("boo", handler),
        }
    }

    pub fn normalize(&self) -> Result<Record, NormalizeError> {
        normalize(&self.document, &self.template)
    }

    pub fn normalize_misnamed(&self) -> Result<Record, NormalizeError> {
        normalize(&self.document, &self.misnamed)
    }
}

/// Wrap a Rust string as a JSON string literal.
pub fn json_string(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}
