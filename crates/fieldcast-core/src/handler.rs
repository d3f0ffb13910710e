//! Type handlers — coerce one raw JSON value to one declared type.
//!
//! Every handler answers to the same two calls: [`TypeHandler::name`] for
//! diagnostics and [`TypeHandler::normalize`] for the coercion itself.
//! Handlers hold no mutable state, so a template can be shared freely between
//! threads and reused across documents.

use crate::error::{NormalizeError, Result};
use crate::grammar::{self, PhoneFormat};
use crate::template::Template;
use crate::types::{FieldKey, Value};
use serde_json::Value as Json;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A user-supplied coercion.
///
/// Returning a [`NormalizeError`] (through `anyhow`) makes the failure a
/// domain error; anything else surfaces as [`NormalizeError::Handler`].
pub trait Coerce: fmt::Debug + Send + Sync {
    fn name(&self) -> String;

    fn coerce(&self, value: &Json, key: &FieldKey) -> anyhow::Result<Value>;
}

/// The declared type of a template field.
#[derive(Debug, Clone)]
pub enum TypeHandler {
    /// Identity: the raw value is kept as-is.
    None,
    Int,
    Float,
    Str,
    Phone(PhoneFormat),
    Array(Box<TypeHandler>),
    Struct(Template),
    Custom(Arc<dyn Coerce>),
}

impl TypeHandler {
    /// Type name used in error messages, e.g. `int` or `array<phone>`.
    pub fn name(&self) -> String {
        match self {
            TypeHandler::None => "none".to_string(),
            TypeHandler::Int => "int".to_string(),
            TypeHandler::Float => "float".to_string(),
            TypeHandler::Str => "str".to_string(),
            TypeHandler::Phone(_) => "phone".to_string(),
            TypeHandler::Array(inner) => format!("array<{}>", inner.name()),
            TypeHandler::Struct(_) => "struct".to_string(),
            TypeHandler::Custom(custom) => custom.name(),
        }
    }

    /// Coerce `value`, found under `key`, to this type.
    pub fn normalize(&self, value: &Json, key: &FieldKey) -> Result<Value> {
        let coerced = match self {
            TypeHandler::None => Some(Value::Raw(value.clone())),
            TypeHandler::Int => to_int(value).map(Value::Int),
            TypeHandler::Float => to_float(value).map(Value::Float),
            TypeHandler::Str => to_text(value).map(Value::Str),
            TypeHandler::Phone(format) => value.as_str().and_then(|s| format.extract(s)).map(Value::Str),
            TypeHandler::Array(inner) => return self.normalize_array(inner, value, key),
            TypeHandler::Struct(template) => return self.normalize_struct(template, value, key),
            TypeHandler::Custom(custom) => return normalize_custom(custom.as_ref(), value, key),
        };
        coerced.ok_or_else(|| {
            tracing::trace!(key = %key, ty = %self.name(), "cast failed");
            NormalizeError::cast(key, self.name(), value)
        })
    }

    fn normalize_array(&self, inner: &TypeHandler, value: &Json, key: &FieldKey) -> Result<Value> {
        let items: Cow<'_, [Json]> = match value {
            Json::Array(items) => Cow::Borrowed(items.as_slice()),
            Json::String(text) => match grammar::array_items(text) {
                Some(items) => Cow::Owned(items.into_iter().map(|item| Json::String(item.to_string())).collect()),
                None => return Err(NormalizeError::cast(key, self.name(), value)),
            },
            _ => return Err(NormalizeError::cast(key, self.name(), value)),
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| inner.normalize(item, &FieldKey::Index(index)))
            .collect::<Result<Vec<_>>>()
            .map(Value::Seq)
            .map_err(|cause| {
                tracing::trace!(key = %key, ty = %self.name(), "array element failed");
                NormalizeError::UnableCastDataToTemplate {
                    key: key.clone(),
                    type_name: self.name(),
                    data: value.clone(),
                    struct_template: None,
                    cause: Some(Box::new(cause)),
                }
            })
    }

    fn normalize_struct(&self, template: &Template, value: &Json, key: &FieldKey) -> Result<Value> {
        let wrap = |cause: Option<NormalizeError>| NormalizeError::UnableCastDataToTemplate {
            key: key.clone(),
            type_name: self.name(),
            data: value.clone(),
            struct_template: Some(template.type_names()),
            cause: cause.map(Box::new),
        };

        let Json::Object(object) = value else {
            return Err(wrap(None));
        };

        match crate::normalizer::normalize_object(object, template) {
            Ok(record) => Ok(Value::Record(record)),
            Err(err) if err.is_domain() => {
                tracing::trace!(key = %key, cause = %err, "struct field failed");
                Err(wrap(Some(err)))
            }
            Err(err) => Err(err),
        }
    }
}

fn normalize_custom(custom: &dyn Coerce, value: &Json, key: &FieldKey) -> Result<Value> {
    custom.coerce(value, key).map_err(|err| match err.downcast::<NormalizeError>() {
        Ok(domain) => domain,
        Err(source) => NormalizeError::Handler {
            source,
            context: None,
        },
    })
}

fn to_int(value: &Json) -> Option<i64> {
    match value {
        Json::String(s) => s.trim().parse().ok(),
        Json::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?;
            // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
            (f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64).then(|| f.trunc() as i64)
        }),
        Json::Bool(b) => Some(i64::from(*b)),
        Json::Null | Json::Array(_) | Json::Object(_) => None,
    }
}

fn to_float(value: &Json) -> Option<f64> {
    match value {
        Json::String(s) => s.trim().parse().ok(),
        Json::Number(n) => n.as_f64(),
        Json::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Json::Null | Json::Array(_) | Json::Object(_) => None,
    }
}

fn to_text(value: &Json) -> Option<String> {
    match value {
        Json::String(s) => Some(s.clone()),
        Json::Number(n) => Some(n.to_string()),
        Json::Bool(b) => Some(b.to_string()),
        Json::Null => Some("null".to_string()),
        Json::Array(_) | Json::Object(_) => serde_json::to_string(value).ok(),
    }
}
