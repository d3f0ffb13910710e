//! Constructors for every [`TypeHandler`].
//!
//! ```
//! use fieldcast_core::{field, Template};
//!
//! let template = Template::new()
//!     .field("id", field::int())
//!     .field("phones", field::array(field::phone()))
//!     .field("author", field::structure(Template::new().field("name", field::str())));
//! assert_eq!(template.len(), 3);
//! ```

use crate::grammar::PhoneFormat;
use crate::handler::{Coerce, TypeHandler};
use crate::template::Template;
use std::sync::Arc;

pub fn none() -> TypeHandler {
    TypeHandler::None
}

pub fn int() -> TypeHandler {
    TypeHandler::Int
}

pub fn float() -> TypeHandler {
    TypeHandler::Float
}

pub fn str() -> TypeHandler {
    TypeHandler::Str
}

/// Phone number with the default format: `7` + `9\d{9}`.
pub fn phone() -> TypeHandler {
    TypeHandler::Phone(PhoneFormat::default())
}

pub fn phone_with(format: PhoneFormat) -> TypeHandler {
    TypeHandler::Phone(format)
}

pub fn array(inner: TypeHandler) -> TypeHandler {
    TypeHandler::Array(Box::new(inner))
}

/// Nested object normalised against its own template.
pub fn structure(template: Template) -> TypeHandler {
    TypeHandler::Struct(template)
}

pub fn custom(coerce: impl Coerce + 'static) -> TypeHandler {
    TypeHandler::Custom(Arc::new(coerce))
}
