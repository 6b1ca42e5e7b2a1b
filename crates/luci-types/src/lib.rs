//! Value model for UCI configuration sections.
//!
//! The LuCI RPC API hands back UCI sections as JSON objects whose values carry
//! no type information. This crate provides:
//!
//! - [`UciOption`]: a single value, decoded by trying boolean, integer, list,
//!   and string in that order, with `as_*` coercions to any of the four shapes
//! - [`Options`]: the option map of one section, with typed getters
//! - the error types returned when an option is missing, has the wrong type,
//!   or cannot be decoded at all

mod error;
mod option;
mod options;

pub use error::{
    DecodeError, OptionError, OptionNotFoundError, OptionType, OptionTypeMismatchError,
};
pub use option::{FALSY_TOKENS, TRUTHY_TOKENS, UciOption, parse_boolean_token};
pub use options::{ANONYMOUS_KEY, NAME_KEY, Options, TYPE_KEY};
