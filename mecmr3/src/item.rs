//! Item framing: the group/item state machine shared by the printer
//! and the scrubber.
//!
//! `walk_print` and `walk_scrub` each own their group counter and tail
//! sentinel as local loop state rather than module-level globals, and
//! header fields are read by explicit little-endian offset rather than
//! cast onto a packed struct.

use byteorder::{ByteOrder, LittleEndian};

use crate::cursor::{ByteCursor, MirrorCursor};
use crate::error::{MecMr3Error, Result};

pub const HEADER_LEN: usize = 32;

/// The 20-byte constant every item header must end with.
pub const SEPARATOR: [u8; 20] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00,
];

pub const MIN_GROUPS: u32 = 6;
pub const MAX_GROUPS: u32 = 8;
pub const MAX_PAYLOAD_LEN: usize = 9509;

/// A parsed, validated 32-byte item header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemHeader {
    pub key: u32,
    pub type_code: u32,
    pub len: usize,
}

impl ItemHeader {
    /// The display glyph derived from the top byte of `type`.
    pub fn sign_glyph(&self) -> char {
        if self.type_code >> 24 == 0 {
            ' '
        } else {
            '_'
        }
    }
}

/// Parse and validate a 32-byte header at `offset`. Checks reserved
/// bits, the separator constant, and the maximum observed payload
/// length; does not touch the dictionary.
pub fn parse_header(offset: usize, bytes: &[u8]) -> Result<ItemHeader> {
    debug_assert_eq!(bytes.len(), HEADER_LEN);

    let key = LittleEndian::read_u32(&bytes[0..4]);
    let type_code = LittleEndian::read_u32(&bytes[4..8]);
    let len = LittleEndian::read_u32(&bytes[8..12]) as usize;
    let separator = &bytes[12..32];

    if key & 0xFFF0_0000 != 0 {
        return Err(MecMr3Error::ReservedBits {
            offset,
            detail: format!("key 0x{key:08X} has nonzero upper 12 bits"),
        });
    }
    if type_code & 0xFF != 0 {
        return Err(MecMr3Error::ReservedBits {
            offset,
            detail: format!("type 0x{type_code:08X} has nonzero low byte"),
        });
    }
    let sign = type_code >> 24;
    if sign != 0x00 && sign != 0xFF {
        return Err(MecMr3Error::ReservedBits {
            offset,
            detail: format!("type 0x{type_code:08X} has sign byte 0x{sign:02X}, expected 0x00 or 0xFF"),
        });
    }
    if separator != SEPARATOR {
        return Err(MecMr3Error::BadSeparator { offset });
    }
    if len > MAX_PAYLOAD_LEN {
        return Err(MecMr3Error::BadLength {
            offset,
            type_code,
            len,
            detail: format!("payload length exceeds maximum observed {MAX_PAYLOAD_LEN}"),
        });
    }

    Ok(ItemHeader { key, type_code, len })
}

fn check_group_bounds(observed: u32) -> Result<()> {
    if observed > MAX_GROUPS {
        return Err(MecMr3Error::TooManyGroups { observed });
    }
    if observed < MIN_GROUPS {
        return Err(MecMr3Error::TooFewGroups { observed });
    }
    Ok(())
}

/// Walk the print path over a read-only cursor. `on_item` is invoked
/// once per item with the current group number (1-based), its parsed
/// header, and the raw payload slice.
pub fn walk_print<'a>(
    data: &'a [u8],
    mut on_item: impl FnMut(u8, ItemHeader, &'a [u8]) -> Result<()>,
) -> Result<()> {
    let mut cursor = ByteCursor::new(data);
    let mut group: u32 = 0;
    let mut tail: Option<u32> = None;

    loop {
        if let Some(remaining) = tail.as_mut() {
            *remaining -= 1;
            if *remaining == 0 {
                break;
            }
        }

        group += 1;
        let mut count = cursor.read_u32_le()?;
        if count <= 3 {
            if tail.is_some() {
                return Err(MecMr3Error::ReservedBits {
                    offset: cursor.position(),
                    detail: "tail sentinel encountered twice".to_string(),
                });
            }
            if count == 0 {
                return Err(MecMr3Error::ReservedBits {
                    offset: cursor.position(),
                    detail: "tail sentinel value is zero".to_string(),
                });
            }
            tail = Some(count);
            count = cursor.read_u32_le()?;
        }

        for _ in 0..count {
            let offset = cursor.position();
            let header_bytes = cursor.read_exact(HEADER_LEN)?;
            let header = parse_header(offset, header_bytes)?;
            let payload = cursor.read_exact(header.len)?;
            on_item(group as u8, header, payload)?;
        }
    }

    check_group_bounds(group)?;
    check_trailer(cursor.remaining(), |n| cursor.peek_exact(n).map(|s| s.to_vec()))?;
    Ok(())
}

/// Walk the scrub path over a mirrored cursor, returning the completed
/// output buffer. `on_item` receives the peeked (not yet committed)
/// payload and must return the bytes to commit: either `None` to
/// mirror unchanged, or `Some(replacement)` of identical length.
pub fn walk_scrub<'a>(
    input: &'a [u8],
    mut on_item: impl FnMut(u8, ItemHeader, &'a [u8]) -> Result<Option<Vec<u8>>>,
) -> Result<Vec<u8>> {
    let mut cursor = MirrorCursor::new(input);
    let mut group: u32 = 0;
    let mut tail: Option<u32> = None;

    loop {
        if let Some(remaining) = tail.as_mut() {
            *remaining -= 1;
            if *remaining == 0 {
                break;
            }
        }

        group += 1;
        let mut count = cursor.mirror_u32_le()?;
        if count <= 3 {
            if tail.is_some() {
                return Err(MecMr3Error::ReservedBits {
                    offset: cursor.position(),
                    detail: "tail sentinel encountered twice".to_string(),
                });
            }
            if count == 0 {
                return Err(MecMr3Error::ReservedBits {
                    offset: cursor.position(),
                    detail: "tail sentinel value is zero".to_string(),
                });
            }
            tail = Some(count);
            count = cursor.mirror_u32_le()?;
        }

        for _ in 0..count {
            let offset = cursor.position();
            let header_bytes = cursor.mirror(HEADER_LEN)?;
            let header = parse_header(offset, header_bytes)?;
            let payload = cursor.peek_exact(header.len)?;
            match on_item(group as u8, header, payload)? {
                None => {
                    cursor.mirror(header.len)?;
                }
                Some(replacement) => {
                    cursor.write_replacement(header.len, &replacement)?;
                }
            }
        }
    }

    check_group_bounds(group)?;
    let remaining = cursor.remaining();
    let tail_byte = if remaining == 1 {
        Some(cursor.mirror(1)?[0])
    } else {
        None
    };
    check_trailer(remaining, move |_| Ok(tail_byte.map(|b| vec![b]).unwrap_or_default()))?;
    Ok(cursor.into_output())
}

/// Trailer rule: either exactly at EOF, or one byte remains and it is
/// `0x00`.
fn check_trailer(remaining: usize, mut peek: impl FnMut(usize) -> Result<Vec<u8>>) -> Result<()> {
    match remaining {
        0 => Ok(()),
        1 => {
            let byte = peek(1)?;
            if byte == [0x00] {
                Ok(())
            } else {
                Err(MecMr3Error::TrailingGarbage { offset: 0, remaining })
            }
        }
        other => Err(MecMr3Error::TrailingGarbage { offset: 0, remaining: other }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(key: u32, type_code: u32, len: u32) -> Vec<u8> {
        let mut v = Vec::with_capacity(32);
        v.extend_from_slice(&key.to_le_bytes());
        v.extend_from_slice(&type_code.to_le_bytes());
        v.extend_from_slice(&len.to_le_bytes());
        v.extend_from_slice(&SEPARATOR);
        v
    }

    #[test]
    fn parse_header_accepts_well_formed_header() {
        let bytes = header_bytes(0x17E3, 0xFF00_2400, 4);
        let header = parse_header(0, &bytes).unwrap();
        assert_eq!(header.key, 0x17E3);
        assert_eq!(header.type_code, 0xFF00_2400);
        assert_eq!(header.len, 4);
        assert_eq!(header.sign_glyph(), '_');
    }

    #[test]
    fn parse_header_rejects_bad_separator() {
        let mut bytes = header_bytes(1, 0x100, 4);
        bytes[20] = 0x0D;
        assert!(matches!(parse_header(0, &bytes), Err(MecMr3Error::BadSeparator { .. })));
    }

    #[test]
    fn parse_header_rejects_reserved_key_bits() {
        let bytes = header_bytes(0xFFFF_FFFF, 0x100, 4);
        assert!(matches!(parse_header(0, &bytes), Err(MecMr3Error::ReservedBits { .. })));
    }

    #[test]
    fn parse_header_rejects_bad_sign_byte() {
        let bytes = header_bytes(1, 0xAB00_0100, 4);
        assert!(matches!(parse_header(0, &bytes), Err(MecMr3Error::ReservedBits { .. })));
    }

    /// Builds one group containing `count` copies of the same item.
    /// `count` must exceed the §4.4 tail-sentinel threshold of 3, or the
    /// leading count would itself be mistaken for the sentinel.
    fn group_of(key: u32, type_code: u32, payload: &[u8], count: u32) -> Vec<u8> {
        assert!(count > 3, "group item count must exceed the tail sentinel threshold");
        let mut item = header_bytes(key, type_code, payload.len() as u32);
        item.extend_from_slice(payload);
        let mut v = Vec::with_capacity(4 + item.len() * count as usize);
        v.extend_from_slice(&count.to_le_bytes());
        for _ in 0..count {
            v.extend_from_slice(&item);
        }
        v
    }

    /// Convenience: four copies of one item, the smallest unambiguous group.
    fn single_item_group(key: u32, type_code: u32, payload: &[u8]) -> Vec<u8> {
        group_of(key, type_code, payload, 4)
    }

    #[test]
    fn walk_print_rejects_group_count_below_minimum() {
        // A sentinel value of 1 fires on the very first read, so the one
        // group it introduces is also the last one consumed — well under
        // the §4.4 minimum of 6 groups.
        let mut data = Vec::new();
        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&single_item_group(1, 0x100, &[0, 0, 0, 0]));
        let result = walk_print(&data, |_, _, _| Ok(()));
        assert!(matches!(result, Err(MecMr3Error::TooFewGroups { observed: 1 })));
    }

    #[test]
    fn walk_print_accepts_trailing_zero_byte() {
        let mut data = Vec::new();
        for _ in 0..6 {
            data.extend_from_slice(&single_item_group(1, 0x100, &[0, 0, 0, 0]));
        }
        data.push(0x00);
        let mut seen = 0;
        walk_print(&data, |_, _, _| {
            seen += 1;
            Ok(())
        })
        .unwrap();
        assert_eq!(seen, 6 * 4);
    }

    #[test]
    fn walk_print_rejects_nonzero_trailing_byte() {
        let mut data = Vec::new();
        for _ in 0..6 {
            data.extend_from_slice(&single_item_group(1, 0x100, &[0, 0, 0, 0]));
        }
        data.push(0x01);
        assert!(matches!(
            walk_print(&data, |_, _, _| Ok(())),
            Err(MecMr3Error::TrailingGarbage { .. })
        ));
    }

    #[test]
    fn walk_print_tail_sentinel_consumes_k_groups() {
        let mut data = Vec::new();
        for _ in 0..5 {
            data.extend_from_slice(&single_item_group(1, 0x100, &[0, 0, 0, 0]));
        }
        // sentinel: 3 additional groups remain, starting with this one's real count
        data.extend_from_slice(&3u32.to_le_bytes());
        data.extend_from_slice(&single_item_group(1, 0x100, &[0, 0, 0, 0]));
        for _ in 0..2 {
            data.extend_from_slice(&single_item_group(1, 0x100, &[0, 0, 0, 0]));
        }
        let mut groups_seen = std::collections::BTreeSet::new();
        walk_print(&data, |group, _, _| {
            groups_seen.insert(group);
            Ok(())
        })
        .unwrap();
        assert_eq!(groups_seen.len(), 8);
    }

    #[test]
    fn walk_scrub_mirrors_non_phi_item_unchanged() {
        let data = {
            let mut v = Vec::new();
            for _ in 0..6 {
                v.extend_from_slice(&single_item_group(1, 0x100, &[7, 0, 0, 0]));
            }
            v
        };
        let out = walk_scrub(&data, |_, _, _| Ok(None)).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn walk_scrub_applies_replacement() {
        let data = {
            let mut v = Vec::new();
            for _ in 0..6 {
                v.extend_from_slice(&single_item_group(1, 0x100, &[7, 0, 0, 0]));
            }
            v
        };
        let out = walk_scrub(&data, |_, _, _| Ok(Some(vec![0x20, 0x20, 0x20, 0x20]))).unwrap();
        assert_eq!(out.len(), data.len());
        // first group: count(4 bytes) + item 0's header(32 bytes) == 36;
        // item 0's 4-byte payload follows immediately.
        assert_eq!(&out[36..40], &[0x20, 0x20, 0x20, 0x20]);
        assert_eq!(&out[0..36], &data[0..36]);
    }
}
