//! Error types for normalisation and template parsing.

use crate::types::FieldKey;
use thiserror::Error;

/// Result type for normalisation.
pub type Result<T, E = NormalizeError> = std::result::Result<T, E>;

/// Why a document could not be normalised against a template.
///
/// `FieldNotFound` and `UnableCastDataToTemplate` are the domain errors.
/// `Json` and `Handler` come from outside the coercion rules and are never
/// re-wrapped by struct fields.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// A template key is absent from the input object.
    #[error(
        "template field not found, template: {}, data: {}",
        pair(.key, &type_value(.type_name)),
        pair(.key, &serde_json::Value::Null)
    )]
    FieldNotFound { key: FieldKey, type_name: String },

    /// A value exists but cannot be coerced to the declared type.
    ///
    /// Arrays and structs report failures of their elements through this
    /// variant under their own key and type name; the element failure is kept
    /// as `cause`.
    #[error("{}", cast_message(.key, .type_name, .data, .struct_template.as_deref()))]
    UnableCastDataToTemplate {
        key: FieldKey,
        type_name: String,
        data: serde_json::Value,
        /// `(field, type name)` for every field of a struct template.
        struct_template: Option<Vec<(String, String)>>,
        #[source]
        cause: Option<Box<NormalizeError>>,
    },

    /// The input text is not valid JSON.
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// A custom handler failed with an error of its own.
    #[error("{}", handler_message(.source, .context.as_ref()))]
    Handler {
        #[source]
        source: anyhow::Error,
        /// Top-level `(field, raw value)` the failure happened under.
        context: Option<(String, serde_json::Value)>,
    },
}

impl NormalizeError {
    pub(crate) fn cast(
        key: &FieldKey,
        type_name: impl Into<String>,
        data: &serde_json::Value,
    ) -> Self {
        NormalizeError::UnableCastDataToTemplate {
            key: key.clone(),
            type_name: type_name.into(),
            data: data.clone(),
            struct_template: None,
            cause: None,
        }
    }

    /// True for `FieldNotFound` and `UnableCastDataToTemplate`.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            NormalizeError::FieldNotFound { .. } | NormalizeError::UnableCastDataToTemplate { .. }
        )
    }

    /// The key of the field the error is reported under, if it has one.
    pub fn key(&self) -> Option<&FieldKey> {
        match self {
            NormalizeError::FieldNotFound { key, .. }
            | NormalizeError::UnableCastDataToTemplate { key, .. } => Some(key),
            NormalizeError::Json(_) | NormalizeError::Handler { .. } => None,
        }
    }

    /// The element failure a composite error was built from.
    pub fn cause(&self) -> Option<&NormalizeError> {
        match self {
            NormalizeError::UnableCastDataToTemplate { cause, .. } => cause.as_deref(),
            _ => None,
        }
    }

    /// Follow `cause` links down to the failure that started the chain.
    pub fn root_cause(&self) -> &NormalizeError {
        let mut current = self;
        while let Some(inner) = current.cause() {
            current = inner;
        }
        current
    }

    /// Attach `{key: raw}` to a handler error. Other variants already carry
    /// their location and are returned unchanged.
    pub(crate) fn with_field_context(self, key: &str, raw: &serde_json::Value) -> Self {
        match self {
            NormalizeError::Handler { source, .. } => NormalizeError::Handler {
                source,
                context: Some((key.to_string(), raw.clone())),
            },
            other => other,
        }
    }
}

/// Problems turning a textual template into a [`Template`](crate::Template).
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("template must be a JSON object mapping field names to types")]
    NotAnObject,

    #[error("unknown type {name:?} for field {field:?}")]
    UnknownType { field: String, name: String },

    #[error("invalid type spec for field {field:?}: {spec}")]
    InvalidSpec { field: String, spec: serde_json::Value },

    #[error("invalid phone pattern: {0}")]
    PhonePattern(#[from] regex::Error),
}

fn type_value(type_name: &str) -> serde_json::Value {
    serde_json::Value::String(type_name.to_string())
}

/// `{"key": value}` with `json.dumps`-style spacing.
fn pair(key: &FieldKey, value: &serde_json::Value) -> String {
    format!("{{{}: {}}}", type_value(&key.to_string()), spaced(value))
}

/// Compact JSON with a space after every `:` and `,` outside strings.
fn spaced(value: &serde_json::Value) -> String {
    let compact = value.to_string();
    let mut out = String::with_capacity(compact.len() + compact.len() / 4);
    let mut in_string = false;
    let mut escaped = false;
    for ch in compact.chars() {
        out.push(ch);
        if in_string {
            match (escaped, ch) {
                (true, _) => escaped = false,
                (false, '\\') => escaped = true,
                (false, '"') => in_string = false,
                _ => {}
            }
        } else {
            match ch {
                '"' => in_string = true,
                ':' | ',' => out.push(' '),
                _ => {}
            }
        }
    }
    out
}

fn cast_message(
    key: &FieldKey,
    type_name: &str,
    data: &serde_json::Value,
    struct_template: Option<&[(String, String)]>,
) -> String {
    let mut message = format!(
        "unable to cast data to type {type_name}, template: {}, data: {}",
        pair(key, &type_value(type_name)),
        pair(key, data)
    );
    if let Some(fields) = struct_template {
        let rendered: Vec<String> = fields
            .iter()
            .map(|(name, ty)| format!("{}: {}", type_value(name), type_value(ty)))
            .collect();
        message.push_str(&format!(", struct template: {{{}}}", rendered.join(", ")));
    }
    message
}

fn handler_message(source: &anyhow::Error, context: Option<&(String, serde_json::Value)>) -> String {
    match context {
        Some((key, raw)) => format!("{source}: {}", pair(&FieldKey::Name(key.clone()), raw)),
        None => source.to_string(),
    }
}
