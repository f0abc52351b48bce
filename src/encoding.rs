//! Utility functions and types for encoding and decoding the Protobuf wire
//! format.
//!
//! These are the primitives everything else is layered on: base-128 varints,
//! zig-zag signed mappings, little-endian fixed-width codecs, and the
//! length-delimited framing shared by strings, byte blobs, nested messages
//! and packed repeated fields.

use std::ops::RangeInclusive;

use bytes::{Buf, BufMut, Bytes};

use crate::error::{DecodeError, FieldValidationError};

/// The smallest permitted field number.
pub const MIN_FIELD_NUMBER: u32 = 1;
/// The largest permitted field number.
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;
/// Field numbers reserved for the protobuf implementation.
pub const RESERVED_FIELD_NUMBERS: RangeInclusive<u32> = 19_000..=19_999;

/// Checks that a field number is in `[1, 2^29 - 1]` and outside the reserved
/// range.
pub fn check_field_number(number: u32) -> Result<(), FieldValidationError> {
    if number < MIN_FIELD_NUMBER
        || number > MAX_FIELD_NUMBER
        || RESERVED_FIELD_NUMBERS.contains(&number)
    {
        return Err(FieldValidationError::InvalidFieldNumber(number));
    }
    Ok(())
}

/// Encodes an integer value into LEB128 variable length format, and writes it
/// to the buffer.
#[inline]
pub fn encode_varint<B>(mut value: u64, buf: &mut B)
where
    B: BufMut,
{
    loop {
        if value < 0x80 {
            buf.put_u8(value as u8);
            break;
        }
        buf.put_u8(((value & 0x7f) | 0x80) as u8);
        value >>= 7;
    }
}

/// Decodes a LEB128-encoded variable length integer from the buffer.
#[inline]
pub fn decode_varint<B>(buf: &mut B) -> Result<u64, DecodeError>
where
    B: Buf,
{
    let mut value = 0u64;
    for count in 0..10 {
        if !buf.has_remaining() {
            return Err(DecodeError::TruncatedVarint);
        }
        let byte = buf.get_u8();
        value |= u64::from(byte & 0x7f) << (count * 7);
        if byte <= 0x7f {
            return Ok(value);
        }
    }
    Err(DecodeError::VarintOverflow)
}

/// Returns the encoded length of the value in LEB128 variable length format.
/// The returned value will be between 1 and 10, inclusive.
#[inline]
pub fn encoded_len_varint(value: u64) -> usize {
    if value < 1 << 7 {
        1
    } else if value < 1 << 14 {
        2
    } else if value < 1 << 21 {
        3
    } else if value < 1 << 28 {
        4
    } else if value < 1 << 35 {
        5
    } else if value < 1 << 42 {
        6
    } else if value < 1 << 49 {
        7
    } else if value < 1 << 56 {
        8
    } else if value < 1 << 63 {
        9
    } else {
        10
    }
}

/// Maps a signed 32-bit integer to an unsigned integer so that small
/// negatives encode compactly.
#[inline]
pub fn encode_zigzag32(value: i32) -> u64 {
    u64::from(((value << 1) ^ (value >> 31)) as u32)
}

/// Maps a signed 64-bit integer to an unsigned integer so that small
/// negatives encode compactly.
#[inline]
pub fn encode_zigzag64(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Reverses [`encode_zigzag32`]/[`encode_zigzag64`].
#[inline]
pub fn decode_zigzag(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

fn check_remaining<B>(buf: &B, expected: usize) -> Result<(), DecodeError>
where
    B: Buf,
{
    if buf.remaining() < expected {
        return Err(DecodeError::UnexpectedEof {
            expected,
            actual: buf.remaining(),
        });
    }
    Ok(())
}

/// Writes a 32-bit fixed-width little-endian integer.
#[inline]
pub fn encode_fixed32<B>(value: u32, buf: &mut B)
where
    B: BufMut,
{
    buf.put_u32_le(value);
}

/// Reads a 32-bit fixed-width little-endian integer.
#[inline]
pub fn decode_fixed32<B>(buf: &mut B) -> Result<u32, DecodeError>
where
    B: Buf,
{
    check_remaining(buf, 4)?;
    Ok(buf.get_u32_le())
}

/// Writes a 64-bit fixed-width little-endian integer.
#[inline]
pub fn encode_fixed64<B>(value: u64, buf: &mut B)
where
    B: BufMut,
{
    buf.put_u64_le(value);
}

/// Reads a 64-bit fixed-width little-endian integer.
#[inline]
pub fn decode_fixed64<B>(buf: &mut B) -> Result<u64, DecodeError>
where
    B: Buf,
{
    check_remaining(buf, 8)?;
    Ok(buf.get_u64_le())
}

/// Reads a little-endian IEEE-754 single-precision float.
#[inline]
pub fn decode_float<B>(buf: &mut B) -> Result<f32, DecodeError>
where
    B: Buf,
{
    check_remaining(buf, 4)?;
    Ok(buf.get_f32_le())
}

/// Reads a little-endian IEEE-754 double-precision float.
#[inline]
pub fn decode_double<B>(buf: &mut B) -> Result<f64, DecodeError>
where
    B: Buf,
{
    check_remaining(buf, 8)?;
    Ok(buf.get_f64_le())
}

/// Writes a varint length prefix followed by the payload.
#[inline]
pub fn encode_bytes<B>(data: &[u8], buf: &mut B)
where
    B: BufMut,
{
    encode_varint(data.len() as u64, buf);
    buf.put_slice(data);
}

/// Reads a length-delimited payload. The returned `Bytes` is a zero-copy
/// slice of the input buffer.
#[inline]
pub fn decode_bytes(buf: &mut Bytes) -> Result<Bytes, DecodeError> {
    let len = decode_varint(buf)?;
    if len > buf.remaining() as u64 {
        return Err(DecodeError::UnexpectedEof {
            expected: len as usize,
            actual: buf.remaining(),
        });
    }
    Ok(buf.split_to(len as usize))
}

/// The shape of the payload following a field key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    StartGroup = 3,
    EndGroup = 4,
    Fixed32 = 5,
}

impl WireType {
    /// Converts the low three bits of a field key into a `WireType`.
    #[inline]
    pub fn try_from(value: u8) -> Result<WireType, DecodeError> {
        match value {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::LengthDelimited),
            3 => Ok(WireType::StartGroup),
            4 => Ok(WireType::EndGroup),
            5 => Ok(WireType::Fixed32),
            _ => Err(DecodeError::InvalidWireType(value)),
        }
    }
}

/// Encodes a Protobuf field key, which consists of the field number and a
/// wire type designator.
#[inline]
pub fn encode_key<B>(number: u32, wire_type: WireType, buf: &mut B)
where
    B: BufMut,
{
    debug_assert!((MIN_FIELD_NUMBER..=MAX_FIELD_NUMBER).contains(&number));
    encode_varint(u64::from(number << 3 | wire_type as u32), buf);
}

/// Decodes a Protobuf field key into the field number and wire type.
#[inline]
pub fn decode_key<B>(buf: &mut B) -> Result<(u32, WireType), DecodeError>
where
    B: Buf,
{
    let key = decode_varint(buf)?;
    if key > u64::from(u32::MAX) {
        return Err(DecodeError::TagOverflow);
    }
    let wire_type = WireType::try_from(key as u8 & 0x07)?;
    Ok((key as u32 >> 3, wire_type))
}

/// Discards a field payload of the given wire type. This is how unknown
/// fields are skipped without knowing their shape.
pub fn skip_field(wire_type: WireType, buf: &mut Bytes) -> Result<(), DecodeError> {
    match wire_type {
        WireType::Varint => {
            decode_varint(buf)?;
        }
        WireType::Fixed64 => {
            check_remaining(buf, 8)?;
            buf.advance(8);
        }
        WireType::LengthDelimited => {
            decode_bytes(buf)?;
        }
        WireType::StartGroup | WireType::EndGroup => {
            return Err(DecodeError::GroupWireTypeUnsupported);
        }
        WireType::Fixed32 => {
            check_remaining(buf, 4)?;
            buf.advance(4);
        }
    }
    Ok(())
}
