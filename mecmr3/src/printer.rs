//! Stable textual rendering of the item stream.
//!
//! One line per item: a bracketed, comma-separated rendering for
//! arrays, and a trailing `# len` tag. Charset conversion is pulled out
//! behind the `CharsetDecoder` collaborator so the core stays free of
//! a concrete encoding dependency.

use std::fmt::Write as _;

use crate::dict;
use crate::error::{MecMr3Error, Result};
use crate::item::{self, ItemHeader};
use crate::value::{self, Value};

/// The charset label a decoded byte string was tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Iso8859_1,
    ShiftJis,
    Ascii,
}

/// Converts labeled byte strings to UTF-8 for display. The core never
/// picks a concrete implementation; the CLI supplies one.
pub trait CharsetDecoder {
    fn decode(&self, charset: Charset, bytes: &[u8]) -> String;
}

/// Parse `data` and write one line per item to `out`.
///
/// Runs the dictionary self-check once before walking, per
/// `check_mec_mr3_dict()` in the original.
pub fn parse_and_print(
    data: &[u8],
    decoder: &dyn CharsetDecoder,
    out: &mut dyn std::fmt::Write,
) -> Result<()> {
    dict::self_check()?;

    item::walk_print(data, |group, header, payload| {
        render_item(group, header, payload, decoder, out)
    })
}

fn render_item(
    group: u8,
    header: ItemHeader,
    payload: &[u8],
    decoder: &dyn CharsetDecoder,
    out: &mut dyn std::fmt::Write,
) -> Result<()> {
    let (expected_type, name) = dict::lookup(group, header.key).ok_or(MecMr3Error::UnknownKey {
        offset: 0,
        group,
        key: header.key,
    })?;
    if expected_type != header.type_code {
        return Err(MecMr3Error::TypeMismatch {
            offset: 0,
            group,
            key: header.key,
            expected: expected_type,
            actual: header.type_code,
        });
    }

    let value = value::decode(header.type_code, payload)?;
    let type_mid = (header.type_code & 0x00FF_FF00) >> 8;
    let (rendered, multiplicity) = render_value(&value, decoder);

    writeln!(
        out,
        "({group:01x},{key:05x}) {sign}{type_mid:04x}{rendered} # {len},{mult} {name}",
        key = header.key,
        sign = header.sign_glyph(),
        len = header.len,
        mult = multiplicity,
    )
    .map_err(|_| MecMr3Error::BadVariantPayload {
        offset: 0,
        type_code: header.type_code,
        detail: "formatting failed".to_string(),
    })?;
    Ok(())
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    items.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",")
}

/// Render a decoded value as `" [...]"` plus its element count.
fn render_value(value: &Value<'_>, decoder: &dyn CharsetDecoder) -> (String, usize) {
    match value {
        Value::U32Scalar(v) => (format!(" [{v}]"), 1),
        Value::I32Array(v) => (format!(" [{}]", join(v)), v.len()),
        Value::IsoStringlet(s) => {
            let text = decoder.decode(Charset::Iso8859_1, s.bytes);
            if s.text_start.is_some() {
                (format!(" {{{} : {}}}", s.label, text), 1)
            } else {
                (format!(" {{{text}}}"), 1)
            }
        }
        Value::F32Vec2(v) => (format!(" [{},{}]", v[0], v[1]), 2),
        Value::F32Vec2Wide(v) => (format!(" [{}]", join(v)), v.len()),
        Value::F32Vec3(v) => {
            let flat: Vec<String> = v.iter().map(|t| format!("({},{},{})", t[0], t[1], t[2])).collect();
            (format!(" [{}]", flat.join(",")), v.len())
        }
        Value::I32Triple(v) => (format!(" [{},{},{}]", v[0], v[1], v[2]), 3),
        Value::AsciiDatetime(s) => (format!(" {s}"), 1),
        Value::I32Fixed156(v) => (format!(" [{}]", join(v)), v.len()),
        Value::U32Array(v) => (format!(" [{}]", join(v)), v.len()),
        Value::I16Array(v) => (format!(" [{}]", join(v)), v.len()),
        Value::U64ZeroArray(n) => (format!(" [{}]", "0,".repeat(*n).trim_end_matches(',')), *n),
        Value::U32Pair(v) => (format!(" [{},{}]", v[0], v[1]), 2),
        Value::U8Array(bytes) => {
            let hex: Vec<String> = bytes.iter().map(|b| format!("{b:02x}")).collect();
            (format!(" [{}]", hex.join("\\")), bytes.len())
        }
        Value::StrC1Group(triplets) => {
            let rendered: Vec<String> = triplets
                .iter()
                .map(|t| {
                    format!(
                        "{}{}{}/{}/{:02x}",
                        t.chars[0] as char, t.chars[1] as char, t.chars[2] as char, t.count, t.marker
                    )
                })
                .collect();
            (format!(" [{}]", rendered.join(",")), triplets.len())
        }
        Value::U16Array(v) => (format!(" [{}]", join(v)), v.len()),
        Value::StrBc3Group(records) => {
            let rendered: Vec<String> = records
                .iter()
                .map(|r| {
                    format!(
                        "{}{}{}/{:02x}/{}",
                        r.chars[0] as char, r.chars[1] as char, r.chars[2] as char, r.marker, r.count
                    )
                })
                .collect();
            (format!(" [{}]", rendered.join(",")), records.len())
        }
        Value::Usan48 { value } => (format!(" [<?USAN:{value}FIXME?>]"), 1),
        Value::Usan60 { a, b, c } => (format!(" [<?USAN:{a},{b},{c}FIXME?>]"), 3),
        Value::Usan68 { samples } => (format!(" [<?USAN:{}FIXME?>]", join(samples)), samples.len()),
        Value::Str40Record(entries) => {
            let mut rendered = String::new();
            for entry in entries.iter() {
                for s in entry.strings.iter() {
                    let end = s.iter().position(|&b| b == 0).unwrap_or(s.len());
                    let _ = write!(rendered, "{},", decoder.decode(Charset::Ascii, &s[..end]));
                }
            }
            (format!(" [{}]", rendered.trim_end_matches(',')), entries.len() * 7)
        }
        Value::Uid41Record { uid1, uid2 } => (format!(" [{uid1},{uid2}]"), 2),
        Value::Struct436(s) => (
            format!(" {{iver={} modality={} val={}}}", s.iver, s.modality, s.val),
            1,
        ),
        Value::Struct516(s) => (format!(" {{bools={}}}", join(&s.bools)), 1),
        Value::Struct325(_) => (" {5 fields}".to_string(), 5),
        Value::U32Bool(b) => (format!(" [{}]", *b as u8), 1),
        Value::F32Scalar(v) => (format!(" [{v}]"), 1),
        Value::CharsetLabel(bytes) => (format!(" {{{}}}", decoder.decode(Charset::Ascii, bytes)), 1),
        Value::F32Array(v) => (format!(" [{}]", join(v)), v.len()),
        Value::F64Scalar(v) => (format!(" [{v}]"), 1),
        Value::SjisString(bytes) => (format!(" {{{}}}", decoder.decode(Charset::ShiftJis, bytes)), 1),
        Value::U64Array(v) => (format!(" [{}]", join(v)), v.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct IdentityDecoder;
    impl CharsetDecoder for IdentityDecoder {
        fn decode(&self, _charset: Charset, bytes: &[u8]) -> String {
            String::from_utf8_lossy(bytes).into_owned()
        }
    }

    fn header_bytes(key: u32, type_code: u32, len: u32) -> Vec<u8> {
        let mut v = Vec::with_capacity(32);
        v.extend_from_slice(&key.to_le_bytes());
        v.extend_from_slice(&type_code.to_le_bytes());
        v.extend_from_slice(&len.to_le_bytes());
        v.extend_from_slice(&item::SEPARATOR);
        v
    }

    /// Builds one group containing `count` copies of the same item.
    /// `count` must exceed the §4.4 tail-sentinel threshold of 3, or the
    /// leading count would itself be mistaken for the sentinel.
    fn group_of(key: u32, type_code: u32, payload: &[u8], count: u32) -> Vec<u8> {
        let mut item = header_bytes(key, type_code, payload.len() as u32);
        item.extend_from_slice(payload);
        let mut v = Vec::with_capacity(4 + item.len() * count as usize);
        v.extend_from_slice(&count.to_le_bytes());
        for _ in 0..count {
            v.extend_from_slice(&item);
        }
        v
    }

    #[test]
    fn renders_unknown_key_as_error() {
        let data = group_of(0xABCDE, 0x100, &[0, 0, 0, 0], 4);
        let mut out = String::new();
        let result = parse_and_print(&data, &IdentityDecoder, &mut out);
        assert!(matches!(result, Err(MecMr3Error::UnknownKey { .. })));
    }

    #[test]
    fn renders_known_item_line() {
        let groups: [(u32, u32, Vec<u8>); 6] = [
            (0x17F2, 0xFF00_2300, b"ASCI".to_vec()),
            (0x17E3, 0xFF00_2400, vec![0, 0, 0, 0]),
            (0xA965, 0x000B_C100, vec![b'A', b'B', b'C', 0, 1, 0x41]),
            (0x3A5E, 0xFF00_2100, vec![0u8; 16]),
            (0x55F8, 0xFF00_0800, 1.0f32.to_le_bytes().to_vec()),
            (0x1005, 0x0000_0500, vec![0u8; 8]),
        ];
        let mut data = Vec::new();
        for (key, type_code, payload) in &groups {
            data.extend_from_slice(&group_of(*key, *type_code, payload, 4));
        }
        let mut out = String::new();
        parse_and_print(&data, &IdentityDecoder, &mut out).unwrap();
        assert!(out.contains("active_character_set"));
    }
}
