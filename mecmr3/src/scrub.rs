//! PHI-preserving scrubber.
//!
//! Every byte mirrors from input to output unchanged, except inside a
//! PHI item's designated sub-region, which this module overwrites with
//! spaces while leaving the surrounding structure (length, header,
//! separator) untouched.

use crate::dict;
use crate::error::{MecMr3Error, Result};
use crate::item::{self, ItemHeader};

const SPACE: u8 = 0x20;

/// Scrub `input`, returning an output buffer of identical length with
/// PHI sub-regions redacted.
pub fn scrub(input: &[u8]) -> Result<Vec<u8>> {
    dict::self_check()?;

    let output = item::walk_scrub(input, |group, header, payload| {
        let (expected_type, _name) = dict::lookup(group, header.key).ok_or(MecMr3Error::UnknownKey {
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

        if !dict::is_phi_key(header.key) {
            return Ok(None);
        }
        redact(header, payload).map(Some)
    })?;

    if output.len() != input.len() {
        return Err(MecMr3Error::OutputLengthMismatch {
            input_len: input.len(),
            output_len: output.len(),
        });
    }
    Ok(output)
}

fn strnlen(bytes: &[u8]) -> usize {
    bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len())
}

/// Compute the redacted payload for a PHI item, per the variant-specific
/// variant-specific rewrite rules. Errors on any PHI-keyed type with no defined
/// rule.
fn redact(header: ItemHeader, payload: &[u8]) -> Result<Vec<u8>> {
    let mut out = payload.to_vec();
    match header.type_code {
        0x0000_0300 => {
            const MARKER: [u8; 3] = [0xDF, 0xFF, 0x79];
            if payload.len() < 19 || payload[0..3] != MARKER {
                return Err(unscrubbable(header));
            }
            for b in out.iter_mut().skip(19) {
                *b = SPACE;
            }
        }
        0xFF00_2C00 => {
            let n = strnlen(payload);
            for b in out.iter_mut().take(n) {
                *b = SPACE;
            }
        }
        0x001F_4300 => {
            let phi_start = 4 + 0x45;
            let phi_end = phi_start + 0x100;
            if payload.len() < phi_end {
                return Err(unscrubbable(header));
            }
            let n = strnlen(&payload[phi_start..phi_end]);
            for b in out[phi_start..phi_start + n].iter_mut() {
                *b = SPACE;
            }
        }
        0x001F_4400 => {
            let phi_start = 65 + 0x15;
            let phi_end = phi_start + 0x100;
            if payload.len() < phi_end {
                return Err(unscrubbable(header));
            }
            let n = strnlen(&payload[phi_start..phi_end]);
            for b in out[phi_start..phi_start + n].iter_mut() {
                *b = SPACE;
            }
        }
        0x001F_4600 => {
            if payload.len() != 325 {
                return Err(unscrubbable(header));
            }
            for i in 0..5 {
                let start = i * 65;
                let end = start + 65;
                let n = strnlen(&payload[start..end]);
                for b in out[start..start + n].iter_mut() {
                    *b = SPACE;
                }
            }
        }
        _ => return Err(unscrubbable(header)),
    }
    Ok(out)
}

fn unscrubbable(header: ItemHeader) -> MecMr3Error {
    MecMr3Error::UnscrubbablePhi {
        offset: 0,
        key: header.key,
        type_code: header.type_code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::SEPARATOR;

    fn header_bytes(key: u32, type_code: u32, len: u32) -> Vec<u8> {
        let mut v = Vec::with_capacity(32);
        v.extend_from_slice(&key.to_le_bytes());
        v.extend_from_slice(&type_code.to_le_bytes());
        v.extend_from_slice(&len.to_le_bytes());
        v.extend_from_slice(&SEPARATOR);
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

    /// Builds a 6-group stream with the given PHI item (repeated 4 times,
    /// to keep group 5's item count above the tail-sentinel threshold) in
    /// group 5. Returns `(data, offset_of_first_phi_payload, offset_just_past_group_5)`.
    fn minimal_six_groups(phi_key: u32, phi_type: u32, payload: &[u8]) -> (Vec<u8>, usize, usize) {
        let mut data = Vec::new();
        let mut phi_payload_offset = 0;
        let mut group5_end = 0;
        for g in 1..=6u32 {
            if g == 5 {
                data.extend_from_slice(&4u32.to_le_bytes());
                let header = header_bytes(phi_key, phi_type, payload.len() as u32);
                data.extend_from_slice(&header);
                phi_payload_offset = data.len();
                data.extend_from_slice(payload);
                for _ in 0..3 {
                    data.extend_from_slice(&header);
                    data.extend_from_slice(payload);
                }
                group5_end = data.len();
            } else {
                let (key, type_code, p): (u32, u32, &[u8]) = match g {
                    1 => (0x17F2, 0xFF00_2300, b"ASCI"),
                    2 => (0x17E3, 0xFF00_2400, &[0, 0, 0, 0]),
                    3 => (0xA965, 0x000B_C100, &[b'A', b'B', b'C', 0, 1, 0x41]),
                    4 => (0x3A5E, 0xFF00_2100, &[0u8; 16]),
                    6 => (0x1005, 0x0000_0500, &[0u8; 8]),
                    _ => unreachable!(),
                };
                data.extend_from_slice(&group_of(key, type_code, p, 4));
            }
        }
        (data, phi_payload_offset, group5_end)
    }

    #[test]
    fn scrub_redacts_iso_stringlet_phi() {
        let mut payload = vec![0xDF, 0xFF, 0x79, 0x17, 0x01, 0x09, 0x00];
        payload.extend_from_slice(b"ISO8859-1");
        payload.push(0x02);
        payload.push(8);
        payload.push(0x00);
        payload.extend_from_slice(b"Doe John");
        let (data, payload_start, group5_end) = minimal_six_groups(0x55F2, 0x0000_0300, &payload);
        let out = scrub(&data).unwrap();
        assert_eq!(out.len(), data.len());
        assert!(out[payload_start + 19..payload_start + payload.len()]
            .iter()
            .all(|&b| b == SPACE));
        assert_eq!(&out[..payload_start + 19], &data[..payload_start + 19]);
        // bytes after all of group 5 (its other 3 PHI copies included) are untouched
        assert_eq!(&out[group5_end..], &data[group5_end..]);
    }

    #[test]
    fn scrub_redacts_sjis_string_up_to_nul() {
        let mut payload = b"Yamada Taro".to_vec();
        payload.push(0);
        payload.extend_from_slice(&[0xAA; 4]); // bytes after the NUL must survive untouched
        let (data, payload_start, _group5_end) = minimal_six_groups(0x55FC, 0xFF00_2C00, &payload);
        let out = scrub(&data).unwrap();
        assert!(out[payload_start..payload_start + 11].iter().all(|&b| b == SPACE));
        assert_eq!(
            &out[payload_start + 12..payload_start + payload.len()],
            &[0xAA; 4]
        );
    }

    #[test]
    fn scrub_rejects_unscrubbable_phi_type() {
        // a genuine PHI key (§4.2) whose iso-stringlet payload is too
        // short to carry the `DF FF 79` marker structure the redact rule
        // for this type expects.
        let (data, _, _) = minimal_six_groups(0x55F2, 0x0000_0300, b"short");
        assert!(matches!(scrub(&data), Err(MecMr3Error::UnscrubbablePhi { .. })));
    }

    #[test]
    fn scrub_is_identity_with_no_phi_keys() {
        let mut data = Vec::new();
        let groups: [(u32, u32, Vec<u8>); 6] = [
            (0x17F2, 0xFF00_2300, b"ASCI".to_vec()),
            (0x17E3, 0xFF00_2400, vec![0, 0, 0, 0]),
            (0xA965, 0x000B_C100, vec![b'A', b'B', b'C', 0, 1, 0x41]),
            (0x3A5E, 0xFF00_2100, vec![0u8; 16]),
            (0x0A5, 0x000B_B800, vec![0u8; 36]),
            (0x1005, 0x0000_0500, vec![0u8; 8]),
        ];
        for (key, type_code, payload) in &groups {
            data.extend_from_slice(&group_of(*key, *type_code, payload, 4));
        }
        let out = scrub(&data).unwrap();
        assert_eq!(out, data);
    }
}
