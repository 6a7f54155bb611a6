//! Attribute system: values, spec strings, and the shared store.
//!
//! ## Key Types
//!
//! - [`AttributeValue`]: Tagged scalar (null, bool, number, text)
//! - [`AttributeStore`]: Shared map of character name to attributes
//! - [`CharacterSnapshot`]: Consistent copy used during resolution

mod spec;
mod store;
mod value;

pub use spec::parse_attribute_spec;
pub use store::{AttributeMap, AttributeStore, CharacterSnapshot};
pub use value::{AttributeValue, ValueKind};

pub(crate) use value::compare_int_float;
