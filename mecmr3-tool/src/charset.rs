//! Concrete `CharsetDecoder`: the one collaborator the core spec
//! leaves external. ISO-8859-1 is a trivial 1:1 codepoint mapping, so
//! it's hand-rolled; SHIFT-JIS is delegated to `encoding_rs`, same as
//! any other ecosystem crate we reach for a concern the core doesn't
//! own.

use mecmr3::{Charset, CharsetDecoder};

pub(crate) struct Decoder;

impl CharsetDecoder for Decoder {
    fn decode(&self, charset: Charset, bytes: &[u8]) -> String {
        match charset {
            Charset::Iso8859_1 => bytes.iter().map(|&b| b as char).collect(),
            Charset::ShiftJis => {
                let (text, _, _) = encoding_rs::SHIFT_JIS.decode(bytes);
                text.into_owned()
            }
            Charset::Ascii => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso8859_1_passes_through_latin1_bytes() {
        let decoder = Decoder;
        assert_eq!(decoder.decode(Charset::Iso8859_1, b"Doe"), "Doe");
        assert_eq!(decoder.decode(Charset::Iso8859_1, &[0xE9]), "\u{e9}");
    }

    #[test]
    fn ascii_decodes_plain_text() {
        let decoder = Decoder;
        assert_eq!(decoder.decode(Charset::Ascii, b"ISO8859-1"), "ISO8859-1");
    }
}
