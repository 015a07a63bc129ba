use thiserror::Error;

#[derive(Error, Debug)]
pub enum MecMr3Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of input at offset {offset}, needed {needed} more byte(s)")]
    Eof { offset: usize, needed: usize },

    #[error("bad item separator at offset {offset}")]
    BadSeparator { offset: usize },

    #[error("reserved bits set in item header at offset {offset}: {detail}")]
    ReservedBits { offset: usize, detail: String },

    #[error("unknown key (group {group}, key 0x{key:05X}) at offset {offset}")]
    UnknownKey {
        offset: usize,
        group: u8,
        key: u32,
    },

    #[error(
        "type mismatch at offset {offset}: dictionary expects 0x{expected:08X} for (group {group}, key 0x{key:05X}), header has 0x{actual:08X}"
    )]
    TypeMismatch {
        offset: usize,
        group: u8,
        key: u32,
        expected: u32,
        actual: u32,
    },

    #[error("bad payload length {len} for type 0x{type_code:08X} at offset {offset}: {detail}")]
    BadLength {
        offset: usize,
        type_code: u32,
        len: usize,
        detail: String,
    },

    #[error("bad variant payload for type 0x{type_code:08X} at offset {offset}: {detail}")]
    BadVariantPayload {
        offset: usize,
        type_code: u32,
        detail: String,
    },

    #[error("trailing garbage: {remaining} byte(s) left at offset {offset}")]
    TrailingGarbage { offset: usize, remaining: usize },

    #[error("too many groups: observed {observed}, expected at most 8")]
    TooManyGroups { observed: u32 },

    #[error("too few groups: observed {observed}, expected at least 6")]
    TooFewGroups { observed: u32 },

    #[error("dictionary self-check failed: {0}")]
    DictionaryCorrupt(String),

    #[error("scrub error: PHI key 0x{key:05X} has non-scrubbable type 0x{type_code:08X} at offset {offset}")]
    UnscrubbablePhi {
        offset: usize,
        key: u32,
        type_code: u32,
    },

    #[error("output buffer length {output_len} does not match input length {input_len}")]
    OutputLengthMismatch { input_len: usize, output_len: usize },
}

pub type Result<T> = std::result::Result<T, MecMr3Error>;
