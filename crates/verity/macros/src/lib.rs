//! Procedural macros for verity
//!
//! - **`#[derive(Validate)]`** - describes a struct's fields and rule tags
//!   so the engine's struct walker can traverse it
//!
//! # Examples
//!
//! ```rust,ignore
//! use verity::Validate;
//!
//! #[derive(Validate)]
//! pub struct Order {
//!     #[validate = "string;len=8"]
//!     pub id: String,
//!     #[validate(rename = "Lines")]
//!     pub lines: Vec<Item>,
//!     #[validate(skip)]
//!     pub cached_total: u64,
//! }
//! ```

use proc_macro::TokenStream;

mod shared;
mod validate;

// ============================================================================
// VALIDATE DERIVE
// ============================================================================

/// Derives `verity::ToValue` for a struct with named fields.
///
/// The generated value is a `Value::Struct` whose fields carry their rule
/// tags. Only `pub` fields are exported to the walker; the others are
/// listed with a `Null` value so their types need not implement `ToValue`.
///
/// # Attributes
///
/// - `#[validate = "tag"]` - rule tag for the field
/// - `#[validate(tag = "tag")]` - same, in list form
/// - `#[validate(rename = "Name")]` - path segment used in errors
///   (defaults to the field name)
/// - `#[validate(skip)]` - leave the field out entirely
///
/// Type parameters get a `ToValue` bound.
#[proc_macro_derive(Validate, attributes(validate))]
pub fn derive_validate(input: TokenStream) -> TokenStream {
    validate::derive_validate_impl(input)
}
