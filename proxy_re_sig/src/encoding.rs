//! Compressed wire codec for G1 and G2 points and for scalars.
//!
//! A point is encoded as a 1-byte parity prefix (0x02 for even y, 0x03 for odd y) followed by the
//! big-endian x-coordinate. For G2 the x-coordinate is an Fp2 element and its coefficients go on
//! the wire in c1 ‖ c0 order; the parity of an Fp2 element is the sgn0 rule of RFC 9380 (odd iff
//! c0 is odd, or c0 is zero and c1 is odd). Neither the point at infinity nor uncompressed points
//! have an encoding.

use crate::error::PrsError;
use ark_ec::{
    bls12::{Bls12Config, G1Affine, G2Affine},
    short_weierstrass::SWCurveConfig,
    AffineRepr,
};
use ark_ff::{BigInteger, Field, Fp2, Fp2Config, PrimeField, Zero};
use ark_std::vec::Vec;

const EVEN_Y_PREFIX: u8 = 0x02;
const ODD_Y_PREFIX: u8 = 0x03;

/// Canonical big-endian byte size of a prime field element
pub fn field_size_in_bytes<F: PrimeField>() -> usize {
    <F::BigInt as BigInteger>::NUM_LIMBS * 8
}

/// Byte size of a compressed G1 point, prefix included
pub fn g1_serialized_size<P: Bls12Config>() -> usize {
    1 + field_size_in_bytes::<P::Fp>()
}

/// Byte size of a compressed G2 point, prefix included
pub fn g2_serialized_size<P: Bls12Config>() -> usize {
    1 + 2 * field_size_in_bytes::<P::Fp>()
}

pub fn encode_g1<P: Bls12Config>(point: &G1Affine<P>) -> Result<Vec<u8>, PrsError> {
    let (x, y) = point.xy().ok_or(PrsError::InvalidPoint)?;
    let mut out = Vec::with_capacity(g1_serialized_size::<P>());
    out.push(prefix_for_parity(fp_is_odd(y)));
    out.extend_from_slice(&x.into_bigint().to_bytes_be());
    Ok(out)
}

pub fn decode_g1<P: Bls12Config>(bytes: &[u8]) -> Result<G1Affine<P>, PrsError> {
    let expected = g1_serialized_size::<P>();
    if bytes.len() != expected {
        return Err(PrsError::InvalidLength(expected, bytes.len()));
    }
    let odd = parity_for_prefix(bytes[0])?;
    let x = fp_from_be_bytes::<P::Fp>(&bytes[1..])?;
    // y² = x³ + b
    let rhs = x.square() * x + <P::G1Config as SWCurveConfig>::COEFF_B;
    let mut y = rhs.sqrt().ok_or(PrsError::InvalidPoint)?;
    if fp_is_odd(&y) != odd {
        y = -y;
    }
    Ok(G1Affine::<P>::new_unchecked(x, y))
}

pub fn encode_g2<P: Bls12Config>(point: &G2Affine<P>) -> Result<Vec<u8>, PrsError> {
    let (x, y) = point.xy().ok_or(PrsError::InvalidPoint)?;
    let mut out = Vec::with_capacity(g2_serialized_size::<P>());
    out.push(prefix_for_parity(fp2_is_odd(y)));
    out.extend_from_slice(&x.c1.into_bigint().to_bytes_be());
    out.extend_from_slice(&x.c0.into_bigint().to_bytes_be());
    Ok(out)
}

pub fn decode_g2<P: Bls12Config>(bytes: &[u8]) -> Result<G2Affine<P>, PrsError> {
    let expected = g2_serialized_size::<P>();
    if bytes.len() != expected {
        return Err(PrsError::InvalidLength(expected, bytes.len()));
    }
    let odd = parity_for_prefix(bytes[0])?;
    let n = field_size_in_bytes::<P::Fp>();
    let c1 = fp_from_be_bytes::<P::Fp>(&bytes[1..1 + n])?;
    let c0 = fp_from_be_bytes::<P::Fp>(&bytes[1 + n..1 + 2 * n])?;
    let x = Fp2::<P::Fp2Config>::new(c0, c1);
    // y² = x³ + b, with b the twist's curve constant
    let rhs = x.square() * x + <P::G2Config as SWCurveConfig>::COEFF_B;
    let mut y = rhs.sqrt().ok_or(PrsError::InvalidPoint)?;
    if fp2_is_odd(&y) != odd {
        y = -y;
    }
    Ok(G2Affine::<P>::new_unchecked(x, y))
}

/// Canonical big-endian bytes of a scalar
pub fn encode_scalar<F: PrimeField>(scalar: &F) -> Vec<u8> {
    scalar.into_bigint().to_bytes_be()
}

/// Reads a big-endian scalar, reducing modulo the field order
pub fn decode_scalar<F: PrimeField>(bytes: &[u8]) -> Result<F, PrsError> {
    let expected = field_size_in_bytes::<F>();
    if bytes.len() != expected {
        return Err(PrsError::InvalidLength(expected, bytes.len()));
    }
    Ok(F::from_be_bytes_mod_order(bytes))
}

fn prefix_for_parity(odd: bool) -> u8 {
    if odd {
        ODD_Y_PREFIX
    } else {
        EVEN_Y_PREFIX
    }
}

fn parity_for_prefix(prefix: u8) -> Result<bool, PrsError> {
    match prefix {
        EVEN_Y_PREFIX => Ok(false),
        ODD_Y_PREFIX => Ok(true),
        other => Err(PrsError::InvalidPrefix(other)),
    }
}

fn fp_is_odd<F: PrimeField>(elem: &F) -> bool {
    elem.into_bigint().is_odd()
}

// sgn0 over Fp2, matching RFC 9380 section 4.1 with m = 2
fn fp2_is_odd<C: Fp2Config>(elem: &Fp2<C>) -> bool {
    elem.c0.into_bigint().is_odd() || (elem.c0.is_zero() && elem.c1.into_bigint().is_odd())
}

/// Rejects byte strings which are not the canonical representative of a field element
fn fp_from_be_bytes<F: PrimeField>(bytes: &[u8]) -> Result<F, PrsError> {
    let elem = F::from_be_bytes_mod_order(bytes);
    if elem.into_bigint().to_bytes_be() != bytes {
        return Err(PrsError::InvalidPoint);
    }
    Ok(elem)
}
