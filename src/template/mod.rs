//! # URI Template Module
//!
//! Compiles handler URI templates such as `/notes/{id}?format={fmt}&v=2` into
//! a normalized [`UriTemplateModel`].
//!
//! ## Grammar
//!
//! ```text
//! template := path [ "?" query ]
//! path     := segment ( "/" segment )*
//! segment  := "{" name "}" | literal
//! query    := pair ( "&" pair )*
//! pair     := key "=" ( "{" name "}" | literal )
//! ```
//!
//! Path placeholders are keyed by their zero-based segment index (after the
//! leading `/` is stripped), query placeholders by their query key. Placeholder
//! names share one namespace across path and query.
//!
//! ## Example
//!
//! ```rust
//! use providerkit::template::{PlaceholderKind, UriTemplateModel};
//!
//! let model = UriTemplateModel::parse("com.example.notes", "/users/{id}").unwrap();
//! assert_eq!(model.normalized_path(), "/users/*");
//! assert_eq!(model.placeholder_kind("id"), Some(PlaceholderKind::Path));
//! assert_eq!(model.placeholder_location("id"), Some("1"));
//! ```

mod model;
mod parser;
mod placeholder;
#[cfg(test)]
mod tests;

pub use model::{
    PathSegment, QueryParameter, QueryValue, UriTemplateModel, UriTemplateModelBuilder,
    DEFAULT_URI_SCHEME, DEFAULT_WILDCARD,
};
pub use parser::{parse_template, ParsedTemplate, RawQueryValue, Segment};
pub use placeholder::{Placeholder, PlaceholderKind};
