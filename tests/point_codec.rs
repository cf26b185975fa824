use std::io::BufReader;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use zkalgebra::curve::{bls12_381, bn254, CodecError, PointCodec};

fn flip_y_bit(encoded: &str) -> String {
    let mut bytes = encoded.as_bytes().to_vec();
    if let Some(last) = bytes.last_mut() {
        *last = if *last == b'0' { b'1' } else { b'0' };
    }
    String::from_utf8(bytes).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn test_compressed_round_trip(seed in any::<u64>()) {
        let p = bls12_381::G1::random(&mut StdRng::seed_from_u64(seed)).dbl();
        let encoded = p.encode_compressed();
        let decoded = bls12_381::G1::decode_compressed(&encoded).unwrap();
        prop_assert_eq!(decoded, p);
        prop_assert!(decoded.is_special());
        prop_assert_eq!(decoded.y, p.to_affine().y);
    }

    #[test]
    fn test_flipped_y_bit_negates(seed in any::<u64>()) {
        let p = bn254::G1::random(&mut StdRng::seed_from_u64(seed));
        let flipped = flip_y_bit(&p.encode_compressed());
        prop_assert_eq!(bn254::G1::decode_compressed(&flipped).unwrap(), -p);
    }

    #[test]
    fn test_uncompressed_round_trip(seed in any::<u64>()) {
        let p = bn254::G1::random(&mut StdRng::seed_from_u64(seed));
        let encoded = p.encode_uncompressed();
        let decoded = bn254::G1::decode_uncompressed(&encoded).unwrap();
        prop_assert_eq!(decoded, p);
        // Equal points give identical bytes once normalized.
        prop_assert_eq!(p.to_affine().encode_uncompressed(), encoded);
    }
}

#[test]
fn test_zero_round_trip() {
    let zero = bls12_381::G1::zero();
    assert_eq!(zero.encode_compressed(), "1 0 1");
    assert!(bls12_381::G1::decode_compressed(&zero.encode_compressed())
        .unwrap()
        .is_zero());
    assert!(bls12_381::G1::decode_uncompressed(&zero.encode_uncompressed())
        .unwrap()
        .is_zero());
}

/// Points written back to back, one per line, read from a single stream.
#[test]
fn test_stream_of_points() {
    let mut rng = StdRng::seed_from_u64(99);
    let points: Vec<bn254::G1> = (0..5).map(|_| bn254::G1::random(&mut rng)).collect();

    let mut framed = Vec::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            framed.push(b'\n');
        }
        p.write_compressed(&mut framed).unwrap();
    }

    let mut reader = BufReader::new(framed.as_slice());
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            let mut newline = [0u8; 1];
            std::io::Read::read_exact(&mut reader, &mut newline).unwrap();
            assert_eq!(newline[0], b'\n');
        }
        assert_eq!(bn254::G1::read_compressed(&mut reader).unwrap(), *p);
    }
}

#[test]
fn test_rejects_malformed_input() {
    assert!(matches!(
        bn254::G1::decode_compressed("0 1 2"),
        Err(CodecError::InvalidYBit('2'))
    ));
    assert!(matches!(
        bn254::G1::decode_uncompressed("0 1"),
        Err(CodecError::UnexpectedEof)
    ));
    assert!(matches!(
        bn254::G1::decode_uncompressed("0 1  2"),
        Err(CodecError::ExpectedDigits)
    ));
    assert!(matches!(
        bn254::G1::decode_uncompressed("0 1 2\n"),
        Err(CodecError::TrailingData)
    ));
}

#[test]
fn test_decoded_points_need_validation() {
    // Uncompressed decoding takes coordinates as given.
    let p = bn254::G1::decode_uncompressed("0 5 5").unwrap();
    assert!(p.validate(false).is_err());
}
