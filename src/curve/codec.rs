//! Text wire format for group elements.
//!
//! Tokens are separated by a single [`OUTPUT_SEPARATOR`]; coordinates are
//! decimal integers below the modulus.
//!
//! * compressed: `flag X ybit`, where `flag` is `1` for the point at infinity
//!   and `ybit` is the low bit of the affine ordinate;
//! * uncompressed: `flag X Y` with affine coordinates.
//!
//! The point at infinity is written with the coordinates of its affine form
//! `(0, 1)`, so it encodes as `1 0 1` either way. Decoders do not check
//! subgroup membership; callers handling untrusted input should call
//! [`G1::validate`].

use std::io::{self, BufRead, Write};

use super::g1::G1;
use super::CurveParams;
use crate::arithmetic::bigint::BigInteger;
use crate::arithmetic::traits::PrimeField;
use crate::field::FieldError;

pub const OUTPUT_SEPARATOR: u8 = b' ';

/// Errors from reading an encoded point.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error("Expected a separator, found {found:?}")]
    MissingSeparator { found: char },

    #[error("Invalid zero flag {0:?}")]
    InvalidFlag(char),

    #[error("Invalid y bit {0:?}")]
    InvalidYBit(char),

    #[error("Expected a decimal coordinate")]
    ExpectedDigits,

    #[error("Trailing data after encoded point")]
    TrailingData,

    #[error("Compressed x-coordinate has no point on the curve")]
    NoSquareRoot,

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type CodecResult<T> = Result<T, CodecError>;

/// Encoding and decoding of points in both wire forms.
pub trait PointCodec: Sized {
    fn encode_compressed(&self) -> String;

    fn encode_uncompressed(&self) -> String;

    /// Reads one compressed point, leaving any following bytes unread.
    fn read_compressed<R: BufRead>(reader: &mut R) -> CodecResult<Self>;

    /// Reads one uncompressed point, leaving any following bytes unread.
    fn read_uncompressed<R: BufRead>(reader: &mut R) -> CodecResult<Self>;

    fn write_compressed<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.encode_compressed().as_bytes())
    }

    fn write_uncompressed<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.encode_uncompressed().as_bytes())
    }

    /// Decodes a string holding exactly one compressed point.
    fn decode_compressed(input: &str) -> CodecResult<Self> {
        let mut reader = input.as_bytes();
        let point = Self::read_compressed(&mut reader)?;
        expect_end(&mut reader)?;
        Ok(point)
    }

    /// Decodes a string holding exactly one uncompressed point.
    fn decode_uncompressed(input: &str) -> CodecResult<Self> {
        let mut reader = input.as_bytes();
        let point = Self::read_uncompressed(&mut reader)?;
        expect_end(&mut reader)?;
        Ok(point)
    }
}

impl<C: CurveParams> PointCodec for G1<C> {
    fn encode_compressed(&self) -> String {
        let affine = self.to_affine();
        let sep = OUTPUT_SEPARATOR as char;
        format!(
            "{}{}{}{}{}",
            flag(self.is_zero()),
            sep,
            affine.x,
            sep,
            affine.y.into_bigint().is_odd() as u8
        )
    }

    fn encode_uncompressed(&self) -> String {
        let affine = self.to_affine();
        let sep = OUTPUT_SEPARATOR as char;
        format!(
            "{}{}{}{}{}",
            flag(self.is_zero()),
            sep,
            affine.x,
            sep,
            affine.y
        )
    }

    fn read_compressed<R: BufRead>(reader: &mut R) -> CodecResult<Self> {
        let is_zero = read_flag(reader)?;
        expect_separator(reader)?;
        let x = read_field::<C::BaseField, _>(reader)?;
        expect_separator(reader)?;
        let y_is_odd = match read_byte(reader)? {
            b'0' => false,
            b'1' => true,
            other => return Err(CodecError::InvalidYBit(other as char)),
        };

        if is_zero {
            return Ok(Self::zero());
        }
        Self::from_x(x, y_is_odd).ok_or(CodecError::NoSquareRoot)
    }

    fn read_uncompressed<R: BufRead>(reader: &mut R) -> CodecResult<Self> {
        let is_zero = read_flag(reader)?;
        expect_separator(reader)?;
        let x = read_field::<C::BaseField, _>(reader)?;
        expect_separator(reader)?;
        let y = read_field::<C::BaseField, _>(reader)?;

        if is_zero {
            return Ok(Self::zero());
        }
        Ok(Self::from_affine(x, y))
    }
}

fn flag(is_zero: bool) -> char {
    if is_zero {
        '1'
    } else {
        '0'
    }
}

fn peek<R: BufRead>(reader: &mut R) -> CodecResult<Option<u8>> {
    Ok(reader.fill_buf()?.first().copied())
}

fn read_byte<R: BufRead>(reader: &mut R) -> CodecResult<u8> {
    let byte = peek(reader)?.ok_or(CodecError::UnexpectedEof)?;
    reader.consume(1);
    Ok(byte)
}

fn expect_separator<R: BufRead>(reader: &mut R) -> CodecResult<()> {
    match read_byte(reader)? {
        OUTPUT_SEPARATOR => Ok(()),
        other => Err(CodecError::MissingSeparator {
            found: other as char,
        }),
    }
}

fn expect_end<R: BufRead>(reader: &mut R) -> CodecResult<()> {
    match peek(reader)? {
        None => Ok(()),
        Some(_) => Err(CodecError::TrailingData),
    }
}

fn read_flag<R: BufRead>(reader: &mut R) -> CodecResult<bool> {
    match read_byte(reader)? {
        b'0' => Ok(false),
        b'1' => Ok(true),
        other => Err(CodecError::InvalidFlag(other as char)),
    }
}

/// Reads a run of ASCII digits, giving up once it is longer than `max_len`.
fn read_decimal<R: BufRead>(reader: &mut R, max_len: usize) -> CodecResult<String> {
    let mut digits = String::new();
    while let Some(byte) = peek(reader)? {
        if !byte.is_ascii_digit() {
            break;
        }
        if digits.len() == max_len {
            return Err(FieldError::InvalidElement.into());
        }
        digits.push(byte as char);
        reader.consume(1);
    }
    if digits.is_empty() {
        return Err(CodecError::ExpectedDigits);
    }
    Ok(digits)
}

// A canonical coordinate has no more digits than the modulus.
fn read_field<F: PrimeField, R: BufRead>(reader: &mut R) -> CodecResult<F> {
    let max_len = F::modulus().to_string().len();
    let digits = read_decimal(reader, max_len)?;
    Ok(digits.parse::<F>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic::traits::Field;
    use crate::curve::bn254::{Fq, G1};
    use num_traits::One;
    use std::io::{BufReader, Cursor};

    #[test]
    fn test_generator_encodings() {
        let g = G1::one();
        assert_eq!(g.encode_compressed(), "0 1 0");
        assert_eq!(g.encode_uncompressed(), "0 1 2");
        assert_eq!(G1::decode_compressed("0 1 0").unwrap(), g);
        assert_eq!(G1::decode_compressed("0 1 1").unwrap(), -g);
        assert_eq!(G1::decode_uncompressed("0 1 2").unwrap(), g);
    }

    #[test]
    fn test_zero_encoding() {
        assert_eq!(G1::zero().encode_compressed(), "1 0 1");
        assert_eq!(G1::zero().encode_uncompressed(), "1 0 1");
        assert!(G1::decode_compressed("1 0 1").unwrap().is_zero());
        assert!(G1::decode_uncompressed("1 0 1").unwrap().is_zero());
    }

    #[test]
    fn test_projective_input_is_normalized() {
        let p = G1::one().dbl();
        assert!(!p.z.is_one());
        let decoded = G1::decode_uncompressed(&p.encode_uncompressed()).unwrap();
        assert!(decoded.z.is_one());
        assert_eq!(decoded, p);
    }

    #[test]
    fn test_reader_stops_after_point() {
        let g = G1::one();
        let mut buf = Vec::new();
        g.write_compressed(&mut buf).unwrap();
        buf.push(b'\n');
        g.dbl().write_uncompressed(&mut buf).unwrap();

        let mut reader = BufReader::new(Cursor::new(buf));
        assert_eq!(G1::read_compressed(&mut reader).unwrap(), g);
        assert_eq!(read_byte(&mut reader).unwrap(), b'\n');
        assert_eq!(G1::read_uncompressed(&mut reader).unwrap(), g.dbl());
        assert!(peek(&mut reader).unwrap().is_none());
    }

    #[test]
    fn test_malformed_inputs() {
        assert!(matches!(G1::decode_compressed(""), Err(CodecError::UnexpectedEof)));
        assert!(matches!(G1::decode_compressed("2 1 0"), Err(CodecError::InvalidFlag('2'))));
        assert!(matches!(
            G1::decode_compressed("0,1 0"),
            Err(CodecError::MissingSeparator { found: ',' })
        ));
        assert!(matches!(G1::decode_compressed("0 x 0"), Err(CodecError::ExpectedDigits)));
        assert!(matches!(G1::decode_compressed("0 1 7"), Err(CodecError::InvalidYBit('7'))));
        assert!(matches!(G1::decode_compressed("0 1 0 "), Err(CodecError::TrailingData)));
        assert!(matches!(G1::decode_compressed("0 1"), Err(CodecError::UnexpectedEof)));
    }

    #[test]
    fn test_non_canonical_coordinate_rejected() {
        let input = format!("0 {} 2", Fq::modulus());
        assert!(matches!(
            G1::decode_uncompressed(&input),
            Err(CodecError::Field(FieldError::InvalidElement))
        ));
    }

    #[test]
    fn test_overlong_coordinate_stops_early() {
        let modulus_len = Fq::modulus().to_string().len();
        let input = format!("0 {} 0", "9".repeat(modulus_len + 1));
        let mut reader = input.as_bytes();
        assert!(matches!(
            G1::read_compressed(&mut reader),
            Err(CodecError::Field(FieldError::InvalidElement))
        ));
        // Only the allowed digits were consumed.
        assert_eq!(reader, b"9 0");

        // An endless digit stream is rejected without reading it all.
        let mut endless = std::io::repeat(b'7');
        let mut endless = BufReader::new(&mut endless);
        assert!(matches!(
            read_field::<Fq, _>(&mut endless),
            Err(CodecError::Field(FieldError::InvalidElement))
        ));
    }

    #[test]
    fn test_x_without_curve_point() {
        // x^3 + 3 is not a square for x = 4 in BN254 Fq.
        assert!(!Fq::from(67u64).is_square());
        assert!(matches!(G1::decode_compressed("0 4 0"), Err(CodecError::NoSquareRoot)));
    }

    #[test]
    fn test_uncompressed_does_not_validate() {
        let p = G1::decode_uncompressed("0 1 3").unwrap();
        assert!(!p.is_well_formed());
        assert!(p.validate(false).is_err());
    }
}
