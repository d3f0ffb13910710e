//! Templates — the declared shape of a document.
//!
//! A [`Template`] maps field names to [`TypeHandler`]s. It is built once,
//! either in code through the builder methods or from a textual description:
//!
//! ```text
//! {
//!   "id":      "int",
//!   "score":   "float",
//!   "note":    null,                      // untyped, coerced as str
//!   "phones":  "array<phone>",
//!   "author":  {"struct": {"name": "str", "phone": "phone"}},
//!   "history": {"array": {"struct": {"at": "str", "value": "float"}}}
//! }
//! ```

use crate::error::TemplateError;
use crate::field;
use crate::grammar::PhoneFormat;
use crate::handler::TypeHandler;
use serde_json::Value as Json;

/// Scalar type names accepted in textual templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scalar {
    None,
    Int,
    Float,
    Str,
    Phone,
}

static SCALARS: phf::Map<&'static str, Scalar> = phf::phf_map! {
    "none" => Scalar::None,
    "int" => Scalar::Int,
    "float" => Scalar::Float,
    "str" => Scalar::Str,
    "phone" => Scalar::Phone,
};

/// Ordered field name → type handler mapping.
///
/// Inserting an existing name replaces its handler in place, so names stay
/// unique and keep their first position.
#[derive(Debug, Clone, Default)]
pub struct Template {
    fields: Vec<(String, TypeHandler)>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Template::insert`].
    pub fn field(mut self, name: impl Into<String>, handler: TypeHandler) -> Self {
        self.insert(name, handler);
        self
    }

    /// Declare a field without a type. Its value is coerced as `str`.
    pub fn untyped(self, name: impl Into<String>) -> Self {
        self.field(name, field::str())
    }

    /// Add or replace a field, returning the handler it replaced.
    pub fn insert(&mut self, name: impl Into<String>, handler: TypeHandler) -> Option<TypeHandler> {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, handler)),
            None => {
                self.fields.push((name, handler));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&TypeHandler> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, handler)| handler)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeHandler)> {
        self.fields.iter().map(|(name, handler)| (name.as_str(), handler))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `(field, type name)` pairs, used to describe a struct in diagnostics.
    pub fn type_names(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|(name, handler)| (name.clone(), handler.name()))
            .collect()
    }

    /// Parse a textual template, building phone fields with `phone`.
    pub fn parse_with(text: &str, phone: &PhoneFormat) -> Result<Self, TemplateError> {
        let spec: Json = serde_json::from_str(text)?;
        match spec {
            Json::Object(fields) => object_template(&fields, phone),
            _ => Err(TemplateError::NotAnObject),
        }
    }
}

impl std::str::FromStr for Template {
    type Err = TemplateError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse_with(text, &PhoneFormat::default())
    }
}

impl<K: Into<String>> FromIterator<(K, TypeHandler)> for Template {
    fn from_iter<I: IntoIterator<Item = (K, TypeHandler)>>(iter: I) -> Self {
        let mut template = Template::new();
        for (name, handler) in iter {
            template.insert(name, handler);
        }
        template
    }
}

impl<K: Into<String>, const N: usize> From<[(K, TypeHandler); N]> for Template {
    fn from(fields: [(K, TypeHandler); N]) -> Self {
        fields.into_iter().collect()
    }
}

fn object_template(
    fields: &serde_json::Map<String, Json>,
    phone: &PhoneFormat,
) -> Result<Template, TemplateError> {
    fields
        .iter()
        .map(|(name, spec)| handler_spec(name, spec, phone).map(|handler| (name.clone(), handler)))
        .collect()
}

fn handler_spec(key: &str, spec: &Json, phone: &PhoneFormat) -> Result<TypeHandler, TemplateError> {
    let invalid = || TemplateError::InvalidSpec {
        field: key.to_string(),
        spec: spec.clone(),
    };

    match spec {
        Json::Null => Ok(field::str()),
        Json::String(name) => named_handler(key, name, phone),
        Json::Object(node) if node.len() == 1 => {
            let (kind, inner) = node.iter().next().ok_or_else(invalid)?;
            match (kind.as_str(), inner) {
                ("array", inner) => Ok(field::array(handler_spec(key, inner, phone)?)),
                ("struct", Json::Object(fields)) => Ok(field::structure(object_template(fields, phone)?)),
                _ => Err(invalid()),
            }
        }
        _ => Err(invalid()),
    }
}

fn named_handler(key: &str, name: &str, phone: &PhoneFormat) -> Result<TypeHandler, TemplateError> {
    let name = name.trim();
    if let Some(inner) = name.strip_prefix("array<").and_then(|rest| rest.strip_suffix('>')) {
        return Ok(field::array(named_handler(key, inner, phone)?));
    }
    match SCALARS.get(name) {
        Some(Scalar::None) => Ok(field::none()),
        Some(Scalar::Int) => Ok(field::int()),
        Some(Scalar::Float) => Ok(field::float()),
        Some(Scalar::Str) => Ok(field::str()),
        Some(Scalar::Phone) => Ok(field::phone_with(phone.clone())),
        None => Err(TemplateError::UnknownType {
            field: key.to_string(),
            name: name.to_string(),
        }),
    }
}
