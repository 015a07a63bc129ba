//! Typed payload decoders.
//!
//! Every observed type code gets its own `Value` variant, each carrying
//! its already-decoded fields, instead of a dispatch threaded through
//! many call sites. Length contracts live in `decode`, right next to
//! the variant they guard.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{MecMr3Error, Result};

/// A decoded item payload. Borrows from the original input slice where
/// the representation is just "a run of numbers"; owns its bytes where
/// the decoder derives a `String` or picks sub-slices apart.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    U32Scalar(u32),
    I32Array(Vec<i32>),
    IsoStringlet(IsoStringlet<'a>),
    F32Vec2([f32; 2]),
    F32Vec2Wide([f32; 10]),
    F32Vec3(Vec<[f32; 3]>),
    I32Triple([i32; 3]),
    AsciiDatetime(&'a str),
    I32Fixed156([i32; 39]),
    U32Array(Vec<u32>),
    I16Array(Vec<i16>),
    U64ZeroArray(usize),
    U32Pair([u32; 2]),
    U8Array(&'a [u8]),
    StrC1Group(Vec<StrTriplet>),
    U16Array(Vec<u16>),
    StrBc3Group(Vec<StrBc3Record>),
    Usan48 { value: f64 },
    Usan60 { a: f64, b: f64, c: f64 },
    Usan68 { samples: [i32; 10] },
    Str40Record(Vec<Str40Entry>),
    Uid41Record { uid1: &'a str, uid2: &'a str },
    Struct436(Struct436<'a>),
    Struct516(Struct516<'a>),
    Struct325(Struct325<'a>),
    U32Bool(bool),
    F32Scalar(f32),
    CharsetLabel(&'a [u8]),
    F32Array(Vec<f32>),
    F64Scalar(f64),
    SjisString(&'a [u8]),
    U64Array(Vec<u64>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IsoStringlet<'a> {
    pub label: &'a str,
    pub bytes: &'a [u8],
    /// Offset within the payload where `bytes` starts, if the payload
    /// carried the `DF FF 79` marker. `None` means the raw-byte path.
    pub text_start: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrTriplet {
    pub chars: [u8; 3],
    pub count: u8,
    pub marker: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrBc3Record {
    pub chars: [u8; 3],
    pub marker: u8,
    pub count: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Str40Entry {
    pub strings: [[u8; 0x30]; 7],
}

#[derive(Debug, Clone, PartialEq)]
pub struct Struct436<'a> {
    pub iver: &'a str,
    pub phi: &'a [u8],
    pub buf4: &'a str,
    pub buf5: &'a str,
    pub modality: &'a str,
    pub val: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Struct516<'a> {
    pub buf2: &'a [u8],
    pub phi: &'a [u8],
    pub buf4: &'a [u8],
    pub buf5: &'a [u8],
    pub buf6: &'a [u8],
    pub bools: [u32; 6],
}

#[derive(Debug, Clone, PartialEq)]
pub struct Struct325<'a> {
    pub fields: [&'a [u8]; 5],
}

const USAN_PREFIX: [u8; 8] = [0x55, 0x53, 0x41, 0x4E, 0x00, 0x50, 0x03, 0x00];

fn bad_len(type_code: u32, len: usize, detail: impl Into<String>) -> MecMr3Error {
    MecMr3Error::BadLength {
        offset: 0,
        type_code,
        len,
        detail: detail.into(),
    }
}

fn bad_variant(type_code: u32, detail: impl Into<String>) -> MecMr3Error {
    MecMr3Error::BadVariantPayload {
        offset: 0,
        type_code,
        detail: detail.into(),
    }
}

fn cstr(type_code: u32, bytes: &[u8]) -> Result<&str> {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    std::str::from_utf8(&bytes[..end])
        .map_err(|_| bad_variant(type_code, "NUL-terminated field is not valid UTF-8"))
}

/// Decode `payload` according to `type_code`. Offsets in returned
/// errors are relative to `payload`, not the file; callers rebase them
/// onto the item's absolute position.
pub fn decode<'a>(type_code: u32, payload: &'a [u8]) -> Result<Value<'a>> {
    let len = payload.len();
    match type_code {
        0x0000_0100 => {
            if len != 4 {
                return Err(bad_len(type_code, len, "u32 scalar requires len=4"));
            }
            Ok(Value::U32Scalar(LittleEndian::read_u32(payload)))
        }
        0x0000_0200 | 0x0000_0400 | 0xFF00_2400 | 0xFFF0_0200 => {
            if len % 4 != 0 {
                return Err(bad_len(type_code, len, "i32 array requires len % 4 = 0"));
            }
            Ok(Value::I32Array(read_i32_array(payload)))
        }
        0x0000_0300 => Ok(Value::IsoStringlet(decode_iso_stringlet(payload)?)),
        0x0000_0500 => {
            if len == 8 {
                let mut v = [0f32; 2];
                v[0] = LittleEndian::read_f32(&payload[0..4]);
                v[1] = LittleEndian::read_f32(&payload[4..8]);
                Ok(Value::F32Vec2(v))
            } else if len == 40 {
                let mut v = [0f32; 10];
                for (i, slot) in v.iter_mut().enumerate() {
                    *slot = LittleEndian::read_f32(&payload[i * 4..i * 4 + 4]);
                }
                Ok(Value::F32Vec2Wide(v))
            } else {
                Err(bad_len(type_code, len, "f32 vec2 requires len=8 or len=40"))
            }
        }
        0x0000_0600 => {
            if len % 12 != 0 {
                return Err(bad_len(type_code, len, "f32 vec3 requires len % 12 = 0"));
            }
            let mut vecs = Vec::with_capacity(len / 12);
            for chunk in payload.chunks_exact(12) {
                vecs.push([
                    LittleEndian::read_f32(&chunk[0..4]),
                    LittleEndian::read_f32(&chunk[4..8]),
                    LittleEndian::read_f32(&chunk[8..12]),
                ]);
            }
            Ok(Value::F32Vec3(vecs))
        }
        0x0000_0B00 => {
            if len != 12 {
                return Err(bad_len(type_code, len, "i32 triple requires len=12"));
            }
            Ok(Value::I32Triple([
                LittleEndian::read_i32(&payload[0..4]),
                LittleEndian::read_i32(&payload[4..8]),
                LittleEndian::read_i32(&payload[8..12]),
            ]))
        }
        0x0000_0E00 => {
            if len != 19 && len != 20 {
                return Err(bad_len(type_code, len, "ascii datetime requires len=19 or len=20"));
            }
            let text = std::str::from_utf8(payload)
                .map_err(|_| bad_variant(type_code, "datetime is not valid ASCII/UTF-8"))?;
            if !text.bytes().all(|b| b.is_ascii_graphic() || b == b' ') {
                return Err(bad_variant(type_code, "datetime contains non-printable byte"));
            }
            Ok(Value::AsciiDatetime(text))
        }
        0x0000_0F00 => {
            if len != 156 {
                return Err(bad_len(type_code, len, "i32 fixed-156 requires len=156"));
            }
            let arr = read_i32_array(payload);
            let mut out = [0i32; 39];
            out.copy_from_slice(&arr);
            Ok(Value::I32Fixed156(out))
        }
        0x0007_D000 => {
            if len % 4 != 0 {
                return Err(bad_len(type_code, len, "u32 array requires len % 4 = 0"));
            }
            Ok(Value::U32Array(read_u32_array(payload)))
        }
        0x000B_B800 => {
            if len != 36 {
                return Err(bad_len(type_code, len, "i16 array requires len=36"));
            }
            Ok(Value::I16Array(read_i16_array(payload)))
        }
        0x000B_B900 => {
            if len != 24 {
                return Err(bad_len(type_code, len, "u64-zero array requires len=24"));
            }
            if payload.iter().any(|&b| b != 0) {
                return Err(bad_variant(type_code, "expected all-zero payload"));
            }
            Ok(Value::U64ZeroArray(len / 8))
        }
        0x000B_BA00 => {
            if len != 8 {
                return Err(bad_len(type_code, len, "u32 pair requires len=8"));
            }
            Ok(Value::U32Pair([
                LittleEndian::read_u32(&payload[0..4]),
                LittleEndian::read_u32(&payload[4..8]),
            ]))
        }
        0x000B_BB00 => {
            if len != 68 {
                return Err(bad_len(type_code, len, "u8 array requires len=68"));
            }
            Ok(Value::U8Array(payload))
        }
        0x000B_C100 => {
            if len % 6 != 0 {
                return Err(bad_len(type_code, len, "str-C1 group requires len % 6 = 0"));
            }
            Ok(Value::StrC1Group(decode_str_c1(payload, type_code)?))
        }
        0x000B_C200 => {
            if len % 11 != 0 || len % 6 != 0 {
                return Err(bad_len(type_code, len, "u16 array requires len % 11 = 0 and len % 6 = 0"));
            }
            Ok(Value::U16Array(read_u16_array(payload)))
        }
        0x000B_C300 => {
            if len != 100 {
                return Err(bad_len(type_code, len, "str-BC3 group requires len=100"));
            }
            Ok(Value::StrBc3Group(decode_str_bc3(payload, type_code)?))
        }
        0x0017_7000 => {
            if len != 24 {
                return Err(bad_len(type_code, len, "u32 array requires len=24"));
            }
            Ok(Value::U32Array(read_u32_array(payload)))
        }
        0x0017_7200 => {
            if len != 12 {
                return Err(bad_len(type_code, len, "u16 array requires len=12"));
            }
            Ok(Value::U16Array(read_u16_array(payload)))
        }
        0x001B_5E00 => {
            if len != 48 {
                return Err(bad_len(type_code, len, "usan-48 requires len=48"));
            }
            decode_usan48(payload, type_code)
        }
        0x001B_5F00 => {
            if len != 60 {
                return Err(bad_len(type_code, len, "usan-60 requires len=60"));
            }
            decode_usan60(payload, type_code)
        }
        0xFF00_2000 => {
            if len != 68 {
                return Err(bad_len(type_code, len, "usan-68 requires len=68"));
            }
            decode_usan68(payload, type_code)
        }
        0x001F_4000 => {
            if len % 340 != 0 || len == 0 {
                return Err(bad_len(type_code, len, "str40 record requires len % 340 = 0, len > 0"));
            }
            Ok(Value::Str40Record(decode_str40(payload, type_code)?))
        }
        0x001F_4100 => {
            if len != 136 {
                return Err(bad_len(type_code, len, "uid41 record requires len=136"));
            }
            decode_uid41(payload, type_code)
        }
        0x001F_4300 => {
            if len != 436 {
                return Err(bad_len(type_code, len, "struct-436 requires len=436"));
            }
            decode_struct436(payload, type_code)
        }
        0x001F_4400 => {
            if len != 516 {
                return Err(bad_len(type_code, len, "struct-516 requires len=516"));
            }
            decode_struct516(payload, type_code)
        }
        0x001F_4600 => {
            if len != 325 {
                return Err(bad_len(type_code, len, "struct-325 requires len=325"));
            }
            Ok(Value::Struct325(Struct325 {
                fields: [
                    &payload[0..65],
                    &payload[65..130],
                    &payload[130..195],
                    &payload[195..260],
                    &payload[260..325],
                ],
            }))
        }
        0xFF00_0400 | 0xFF00_2A00 => {
            if len != 4 {
                return Err(bad_len(type_code, len, "u32 bool requires len=4"));
            }
            let raw = LittleEndian::read_u32(payload);
            if raw > 1 {
                return Err(bad_variant(type_code, format!("bool value {raw} is neither 0 nor 1")));
            }
            Ok(Value::U32Bool(raw == 1))
        }
        0xFF00_0800 => {
            if len != 4 {
                return Err(bad_len(type_code, len, "f32 scalar requires len=4"));
            }
            Ok(Value::F32Scalar(LittleEndian::read_f32(payload)))
        }
        0xFF00_2100 => {
            if ![16, 20, 24, 28, 88].contains(&len) {
                return Err(bad_len(type_code, len, "i32 array requires len in {16,20,24,28,88}"));
            }
            Ok(Value::I32Array(read_i32_array(payload)))
        }
        0xFF00_2200 => {
            if len % 2 != 0 {
                return Err(bad_len(type_code, len, "u16 array requires even len"));
            }
            Ok(Value::U16Array(read_u16_array(payload)))
        }
        0xFF00_2300 => Ok(Value::CharsetLabel(payload)),
        0xFF00_2500 => {
            if len != 4 && len != 512 {
                return Err(bad_len(type_code, len, "u32 array requires len in {4,512}"));
            }
            Ok(Value::U32Array(read_u32_array(payload)))
        }
        0xFF00_2800 => {
            if len % 4 != 0 {
                return Err(bad_len(type_code, len, "f32 array requires len % 4 = 0"));
            }
            let mut v = Vec::with_capacity(len / 4);
            for chunk in payload.chunks_exact(4) {
                v.push(LittleEndian::read_f32(chunk));
            }
            Ok(Value::F32Array(v))
        }
        0xFF00_2900 => {
            if len != 8 {
                return Err(bad_len(type_code, len, "f64 scalar requires len=8"));
            }
            Ok(Value::F64Scalar(LittleEndian::read_f64(payload)))
        }
        0xFF00_2C00 => Ok(Value::SjisString(payload)),
        0xFF00_3100 => {
            if len != 8 && len != 16 {
                return Err(bad_len(type_code, len, "u64 array requires len in {8,16}"));
            }
            Ok(Value::U64Array(read_u64_array(payload)))
        }
        0xFF00_3200 => {
            if len % 4 != 0 {
                return Err(bad_len(type_code, len, "u32 array requires len % 4 = 0"));
            }
            Ok(Value::U32Array(read_u32_array(payload)))
        }
        other => Err(bad_variant(other, "unrecognized type code")),
    }
}

fn read_i32_array(payload: &[u8]) -> Vec<i32> {
    payload.chunks_exact(4).map(LittleEndian::read_i32).collect()
}

fn read_u32_array(payload: &[u8]) -> Vec<u32> {
    payload.chunks_exact(4).map(LittleEndian::read_u32).collect()
}

fn read_i16_array(payload: &[u8]) -> Vec<i16> {
    payload.chunks_exact(2).map(LittleEndian::read_i16).collect()
}

fn read_u16_array(payload: &[u8]) -> Vec<u16> {
    payload.chunks_exact(2).map(LittleEndian::read_u16).collect()
}

fn read_u64_array(payload: &[u8]) -> Vec<u64> {
    payload.chunks_exact(8).map(LittleEndian::read_u64).collect()
}

fn decode_iso_stringlet(payload: &[u8]) -> Result<IsoStringlet<'_>> {
    const MARKER: [u8; 3] = [0xDF, 0xFF, 0x79];
    if payload.len() >= 19 && payload[0..3] == MARKER {
        if payload[4] != 0x01 || payload[5] != 0x09 || payload[6] != 0x00 {
            return Err(bad_variant(0x300, "iso-stringlet header mismatch"));
        }
        let label = &payload[7..16];
        if label != b"ISO8859-1" {
            return Err(bad_variant(0x300, "iso-stringlet label is not ISO8859-1"));
        }
        if payload[16] != 0x02 {
            return Err(bad_variant(0x300, "iso-stringlet text-length marker mismatch"));
        }
        let text_len = payload[17] as usize;
        if payload.len() < 19 + text_len {
            return Err(bad_variant(0x300, "iso-stringlet text region runs past payload end"));
        }
        Ok(IsoStringlet {
            label: "ISO8859-1",
            bytes: &payload[19..19 + text_len],
            text_start: Some(19),
        })
    } else {
        Ok(IsoStringlet {
            label: "",
            bytes: payload,
            text_start: None,
        })
    }
}

fn decode_str_c1(payload: &[u8], type_code: u32) -> Result<Vec<StrTriplet>> {
    let mut out = Vec::with_capacity(payload.len() / 6);
    for chunk in payload.chunks_exact(6) {
        if chunk[3] != 0 {
            return Err(bad_variant(type_code, "str-C1 triplet separator byte not zero"));
        }
        let count = chunk[4];
        let marker = chunk[5];
        if count > 5 {
            return Err(bad_variant(type_code, format!("str-C1 count {count} exceeds 5")));
        }
        if !matches!(marker, 0x41 | 0x43 | 0x45) {
            return Err(bad_variant(type_code, format!("str-C1 marker 0x{marker:02X} not in {{0x41,0x43,0x45}}")));
        }
        out.push(StrTriplet {
            chars: [chunk[0], chunk[1], chunk[2]],
            count,
            marker,
        });
    }
    Ok(out)
}

fn decode_str_bc3(payload: &[u8], type_code: u32) -> Result<Vec<StrBc3Record>> {
    let n = LittleEndian::read_u32(&payload[0..4]) as usize;
    if n >= 6 {
        return Err(bad_variant(type_code, format!("str-BC3 count {n} must be < 6")));
    }
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let base = 4 + 8 * i;
        let rec = &payload[base..base + 8];
        if rec[3] != 0 {
            return Err(bad_variant(type_code, "str-BC3 record separator byte not zero"));
        }
        let marker = rec[4];
        let count = rec[5];
        if !matches!(marker, 0x41 | 0x43 | 0x45) {
            return Err(bad_variant(type_code, format!("str-BC3 marker 0x{marker:02X} not in {{0x41,0x43,0x45}}")));
        }
        if count > 10 {
            return Err(bad_variant(type_code, format!("str-BC3 count {count} exceeds 10")));
        }
        out.push(StrBc3Record {
            chars: [rec[0], rec[1], rec[2]],
            marker,
            count,
        });
    }
    Ok(out)
}

fn check_usan_prefix(payload: &[u8], type_code: u32) -> Result<()> {
    if payload[0..8] != USAN_PREFIX {
        return Err(bad_variant(type_code, "missing USAN magic prefix"));
    }
    Ok(())
}

fn decode_usan48(payload: &[u8], type_code: u32) -> Result<Value<'_>> {
    check_usan_prefix(payload, type_code)?;
    if payload[8..16] != [0u8; 8] {
        return Err(bad_variant(type_code, "usan-48 expects 8 zero bytes after prefix"));
    }
    Ok(Value::Usan48 {
        value: LittleEndian::read_f64(&payload[40..48]),
    })
}

fn decode_usan60(payload: &[u8], type_code: u32) -> Result<Value<'_>> {
    check_usan_prefix(payload, type_code)?;
    const TAIL: [u8; 8] = [0x01, 0x00, 0x00, 0x00, 0x28, 0x00, 0x00, 0x00];
    if payload[8..16] != TAIL {
        return Err(bad_variant(type_code, "usan-60 tail mismatch"));
    }
    if &payload[16..20] != b"NLTL" {
        return Err(bad_variant(type_code, "usan-60 missing NLTL tag"));
    }
    Ok(Value::Usan60 {
        a: LittleEndian::read_f64(&payload[20..28]),
        b: LittleEndian::read_f64(&payload[28..36]),
        c: LittleEndian::read_f64(&payload[36..44]),
    })
}

fn decode_usan68(payload: &[u8], type_code: u32) -> Result<Value<'_>> {
    check_usan_prefix(payload, type_code)?;
    const TAIL: [u8; 8] = [0x01, 0x00, 0x00, 0x00, b'N', b'K', b'N', b'U'];
    if payload[8..16] != TAIL {
        return Err(bad_variant(type_code, "usan-68 tail mismatch"));
    }
    let mut samples = [0i32; 10];
    for (i, slot) in samples.iter_mut().enumerate() {
        let base = 20 + i * 4;
        *slot = LittleEndian::read_i32(&payload[base..base + 4]);
    }
    Ok(Value::Usan68 { samples })
}

fn decode_str40(payload: &[u8], type_code: u32) -> Result<Vec<Str40Entry>> {
    let mut out = Vec::with_capacity(payload.len() / 340);
    for chunk in payload.chunks_exact(340) {
        if LittleEndian::read_u32(&chunk[0..4]) != 0 {
            return Err(bad_variant(type_code, "str40 record leading u32 must be zero"));
        }
        let mut strings = [[0u8; 0x30]; 7];
        for (i, slot) in strings.iter_mut().enumerate() {
            let base = 4 + i * 0x30;
            slot.copy_from_slice(&chunk[base..base + 0x30]);
        }
        out.push(Str40Entry { strings });
    }
    Ok(out)
}

fn decode_uid41(payload: &[u8], type_code: u32) -> Result<Value<'_>> {
    if LittleEndian::read_u32(&payload[0..4]) != 0 {
        return Err(bad_variant(type_code, "uid41 leading zero field is nonzero"));
    }
    if LittleEndian::read_u16(&payload[134..136]) != 0 {
        return Err(bad_variant(type_code, "uid41 trailing zero field is nonzero"));
    }
    let uid1 = cstr(type_code, &payload[4..69])?;
    let uid2 = cstr(type_code, &payload[69..134])?;
    Ok(Value::Uid41Record { uid1, uid2 })
}

const IVER_VALUES: [&str; 4] = [
    "TM_MR_DCM_V1.0",
    "TM_MR_DCM_V2.0",
    "TM_MR_DCM_V1.0_3",
    "TM_MR1_DCM_V1.0",
];

fn decode_struct436(payload: &[u8], type_code: u32) -> Result<Value<'_>> {
    if LittleEndian::read_u32(&payload[0..4]) != 0 {
        return Err(bad_variant(type_code, "struct-436 leading zero field is nonzero"));
    }
    let iver = cstr(type_code, &payload[4..4 + 0x45])?;
    if !IVER_VALUES.contains(&iver) {
        return Err(bad_variant(type_code, format!("unrecognized iver string {iver:?}")));
    }
    let phi_start = 4 + 0x45;
    let phi = &payload[phi_start..phi_start + 0x100];
    let buf4_start = phi_start + 0x100;
    let buf4 = cstr(type_code, &payload[buf4_start..buf4_start + 65])?;
    let buf5_start = buf4_start + 65;
    let buf5 = cstr(type_code, &payload[buf5_start..buf5_start + 17])?;
    let modality_start = buf5_start + 17;
    let modality = cstr(type_code, &payload[modality_start..modality_start + 0x15])?;
    if modality != "MR" {
        return Err(bad_variant(type_code, format!("modality {modality:?} is not \"MR\"")));
    }
    let val_start = modality_start + 0x15;
    let val = LittleEndian::read_u32(&payload[val_start..val_start + 4]);
    if val != 1 && val != 3 {
        return Err(bad_variant(type_code, format!("val {val} is neither 1 nor 3")));
    }
    Ok(Value::Struct436(Struct436 {
        iver,
        phi,
        buf4,
        buf5,
        modality,
        val,
    }))
}

fn decode_struct516(payload: &[u8], type_code: u32) -> Result<Value<'_>> {
    if payload[0..65].iter().any(|&b| b != 0) {
        return Err(bad_variant(type_code, "struct-516 leading zero field is nonzero"));
    }
    let buf2 = &payload[65..65 + 0x15];
    let phi_start = 65 + 0x15;
    let phi = &payload[phi_start..phi_start + 0x100];
    let buf4_start = phi_start + 0x100;
    let buf4 = &payload[buf4_start..buf4_start + 17];
    let buf5_start = buf4_start + 17;
    let buf5 = &payload[buf5_start..buf5_start + 65];
    let buf6_start = buf5_start + 65;
    let buf6 = &payload[buf6_start..buf6_start + 65];
    // named fields sum to 513; 3 reserved/padding bytes close the gap to 516.
    let bools_start = buf6_start + 65 + 3;
    let mut bools = [0u32; 6];
    for (i, slot) in bools.iter_mut().enumerate() {
        let base = bools_start + i * 4;
        *slot = LittleEndian::read_u32(&payload[base..base + 4]);
        let expected = (i % 2) as u32;
        if *slot != expected {
            return Err(bad_variant(
                type_code,
                format!("struct-516 bools[{i}] = {slot}, expected {expected}"),
            ));
        }
    }
    Ok(Value::Struct516(Struct516 {
        buf2,
        phi,
        buf4,
        buf5,
        buf6,
        bools,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_u32_scalar() {
        let payload = [7, 0, 0, 0];
        assert_eq!(decode(0x100, &payload).unwrap(), Value::U32Scalar(7));
    }

    #[test]
    fn rejects_bad_length_u32_scalar() {
        let payload = [0u8; 3];
        assert!(matches!(decode(0x100, &payload), Err(MecMr3Error::BadLength { .. })));
    }

    #[test]
    fn decodes_f32_bool_style_u32_bool() {
        let payload = [1, 0, 0, 0];
        assert_eq!(decode(0xFF00_2A00, &payload).unwrap(), Value::U32Bool(true));
        let bad = [2, 0, 0, 0];
        assert!(matches!(decode(0xFF00_2A00, &bad), Err(MecMr3Error::BadVariantPayload { .. })));
    }

    #[test]
    fn decodes_iso_stringlet_with_marker() {
        let mut payload = vec![0xDF, 0xFF, 0x79, 0x17, 0x01, 0x09, 0x00];
        payload.extend_from_slice(b"ISO8859-1");
        payload.push(0x02);
        payload.push(8);
        payload.push(0x00);
        payload.extend_from_slice(b"00000000");
        let Value::IsoStringlet(s) = decode(0x300, &payload).unwrap() else {
            panic!("expected IsoStringlet");
        };
        assert_eq!(s.label, "ISO8859-1");
        assert_eq!(s.bytes, b"00000000");
        assert_eq!(s.text_start, Some(19));
    }

    #[test]
    fn decodes_iso_stringlet_raw_path() {
        let payload = b"plain text, no marker".to_vec();
        let Value::IsoStringlet(s) = decode(0x300, &payload).unwrap() else {
            panic!("expected IsoStringlet");
        };
        assert_eq!(s.text_start, None);
        assert_eq!(s.bytes, payload.as_slice());
    }

    #[test]
    fn decodes_usan48() {
        let mut payload = USAN_PREFIX.to_vec();
        payload.extend_from_slice(&[0u8; 8]);
        payload.extend_from_slice(&[0u8; 24]);
        payload.extend_from_slice(&100.0f64.to_le_bytes());
        assert_eq!(payload.len(), 48);
        match decode(0x001B5E00, &payload).unwrap() {
            Value::Usan48 { value } => assert_eq!(value, 100.0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejects_usan48_bad_prefix() {
        let mut payload = vec![0u8; 48];
        payload[0] = 0xAA;
        assert!(matches!(
            decode(0x001B5E00, &payload),
            Err(MecMr3Error::BadVariantPayload { .. })
        ));
    }

    #[test]
    fn decodes_str_c1_group() {
        let payload = [b'A', b'B', b'C', 0x00, 0x02, 0x41];
        let Value::StrC1Group(triplets) = decode(0x000BC100, &payload).unwrap() else {
            panic!("expected StrC1Group");
        };
        assert_eq!(triplets.len(), 1);
        assert_eq!(triplets[0].chars, [b'A', b'B', b'C']);
        assert_eq!(triplets[0].count, 2);
        assert_eq!(triplets[0].marker, 0x41);
    }

    #[test]
    fn rejects_str_c1_bad_marker() {
        let payload = [b'A', b'B', b'C', 0x00, 0x02, 0x99];
        assert!(matches!(
            decode(0x000BC100, &payload),
            Err(MecMr3Error::BadVariantPayload { .. })
        ));
    }

    #[test]
    fn decodes_struct516_bool_progression() {
        let mut payload = vec![0u8; 516];
        let bools_start = 65 + 0x15 + 0x100 + 17 + 65 + 65 + 3;
        for i in 0..6u32 {
            let base = bools_start + (i as usize) * 4;
            payload[base..base + 4].copy_from_slice(&(i % 2).to_le_bytes());
        }
        assert!(decode(0x001F4400, &payload).is_ok());
    }

    #[test]
    fn decodes_struct325_five_fields() {
        let payload = vec![0u8; 325];
        let Value::Struct325(s) = decode(0x001F4600, &payload).unwrap() else {
            panic!("expected Struct325");
        };
        assert_eq!(s.fields.len(), 5);
        assert_eq!(s.fields[4].len(), 65);
    }
}
