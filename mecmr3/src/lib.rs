//! Parser, printer and PHI-preserving scrubber for the TOSHIBA MEC MR3
//! container format.
//!
//! The container has no self-describing version header: a flat
//! sequence of groups, each a run of 32-byte-headered items whose
//! payload layout is selected by a 32-bit type code. This crate
//! recovers that grammar — cursor, tag dictionary, typed decoders,
//! printer, and scrubber — as a reusable library; [`mecmr3-tool`] is
//! the CLI built on top of it.

mod cursor;
mod dict;
mod error;
mod item;
mod printer;
mod scrub;
mod value;

pub use error::{MecMr3Error, Result};
pub use printer::{parse_and_print, Charset, CharsetDecoder};
pub use scrub::scrub;
pub use value::Value;

/// `(group, key, type)` must appear in the dictionary exactly.
pub fn validate(group: u8, key: u32, type_code: u32) -> bool {
    dict::validate(group, key, type_code)
}

/// Look up the dictionary's human name for `(group, key)`, if any.
pub fn name_for(group: u8, key: u32) -> Option<&'static str> {
    dict::name_for(group, key)
}

/// Whether `key` is on the fixed PHI key set; `group` does not
/// participate in the match.
pub fn is_phi_key(key: u32) -> bool {
    dict::is_phi_key(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_agrees_with_dictionary() {
        assert!(validate(5, 0x55F2, 0x0000_0300));
        assert!(!validate(5, 0x55F2, 0xFF00_2C00));
    }

    #[test]
    fn is_phi_key_ignores_group() {
        assert!(is_phi_key(0x55F2));
    }
}
