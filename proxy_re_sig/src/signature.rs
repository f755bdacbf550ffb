//! The four protocol operations: re-signature key generation, first-stage signing, re-signing
//! and verification of both signature shapes.
//!
//! For delegator scalar `a`, delegatee scalar `b`, message hash `h` and ephemeral scalar `k`, a
//! first-stage signature is `(R, s) = (k·G2, (k + h)/a)` and verifies as
//! `e(a·G1, s·G2) == z^h · e(G1, R)` with `z = e(G1, G2)`. The re-signature key `(a/b)·G2` turns
//! it into `(R, S) = (R, ((k + h)/b)·G2)`, which satisfies the same equation with `b·G1` in place
//! of `a·G1`. Verification reports a mismatch as `false`; only malformed byte input errors.

use crate::{
    encoding::{
        decode_g2, decode_scalar, encode_g2, encode_scalar, field_size_in_bytes,
        g2_serialized_size,
    },
    error::PrsError,
    serde_utils::ArkObjectBytes,
    setup::{PublicKeyG1, PublicKeyG2, SecretKey, SetupParams},
};
use ark_ec::{
    bls12::{Bls12, Bls12Config},
    pairing::Pairing,
    CurveGroup,
};
use ark_ff::{Field, PrimeField};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{rand::RngCore, vec::Vec};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use sha2::{Digest, Sha256};

/// Bytes drawn for the ephemeral scalar of a first-stage signature
const EPHEMERAL_SCALAR_SIZE: usize = 32;

/// SHA-256 digest of the message reduced into the scalar field. No domain separation is applied,
/// so this hash must not be reused for purposes outside this protocol.
pub fn hash_to_scalar<F: PrimeField>(message: &[u8]) -> F {
    F::from_be_bytes_mod_order(&Sha256::digest(message))
}

/// Re-signature key `delegator_pk / b` for delegatee scalar `b`. Created by the delegatee (its
/// secret scalar is needed), used by the proxy, reveals neither secret.
#[serde_as]
#[derive(Clone, PartialEq, Eq, Debug, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ReSignKey<E: Pairing>(
    #[serde_as(as = "ArkObjectBytes")] pub E::G2Affine,
);

impl<E: Pairing> ReSignKey<E> {
    pub fn new(
        delegator_public_key: &PublicKeyG2<E>,
        delegatee_scalar: &E::ScalarField,
    ) -> Result<Self, PrsError> {
        let inverse = delegatee_scalar.inverse().ok_or(PrsError::ZeroScalar)?;
        Ok(Self((delegator_public_key.0 * inverse).into_affine()))
    }
}

impl<E: Pairing> AsRef<E::G2Affine> for ReSignKey<E> {
    fn as_ref(&self) -> &E::G2Affine {
        &self.0
    }
}

impl<P: Bls12Config> ReSignKey<Bls12<P>> {
    pub fn to_bytes(&self) -> Result<Vec<u8>, PrsError> {
        encode_g2::<P>(&self.0)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrsError> {
        Ok(Self(decode_g2::<P>(bytes)?))
    }
}

/// Signature produced by the delegator, verifying under its G1 public key
#[serde_as]
#[derive(Clone, PartialEq, Eq, Debug, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct FirstSignature<E: Pairing> {
    /// Ephemeral commitment `k·G2`
    #[serde_as(as = "ArkObjectBytes")]
    pub r: E::G2Affine,
    /// Signature scalar `(k + h)/a`
    #[serde_as(as = "ArkObjectBytes")]
    pub s: E::ScalarField,
}

impl<E: Pairing> FirstSignature<E> {
    /// Signs with a fresh ephemeral scalar. Reusing the ephemeral scalar across messages leaks
    /// the secret scalar through the verification equation, hence it is drawn here and never
    /// taken as input.
    pub fn new<R: RngCore>(
        rng: &mut R,
        message: &[u8],
        secret_key: &SecretKey<E::ScalarField>,
        params: &SetupParams<E>,
    ) -> Result<Self, PrsError> {
        let mut buf = [0u8; EPHEMERAL_SCALAR_SIZE];
        rng.fill_bytes(&mut buf);
        let k = E::ScalarField::from_be_bytes_mod_order(&buf);
        let h = hash_to_scalar::<E::ScalarField>(message);
        let a_inverse = secret_key.scalar().inverse().ok_or(PrsError::ZeroScalar)?;
        Ok(Self {
            r: (params.g2 * k).into_affine(),
            s: a_inverse * (k + h),
        })
    }

    /// Checks `e(pk, s·G2) == z^h · e(G1, R)`
    pub fn verify(
        &self,
        message: &[u8],
        public_key: &PublicKeyG1<E>,
        params: &SetupParams<E>,
    ) -> bool {
        let h = hash_to_scalar::<E::ScalarField>(message);
        E::pairing(public_key.0, params.g2 * self.s)
            == params.z * h + E::pairing(params.g1, self.r)
    }
}

impl<P: Bls12Config> FirstSignature<Bls12<P>> {
    pub fn to_bytes(&self) -> Result<Vec<u8>, PrsError> {
        let mut out = encode_g2::<P>(&self.r)?;
        out.extend_from_slice(&encode_scalar(&self.s));
        Ok(out)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrsError> {
        let point_size = g2_serialized_size::<P>();
        let expected = point_size + field_size_in_bytes::<<Bls12<P> as Pairing>::ScalarField>();
        if bytes.len() != expected {
            return Err(PrsError::InvalidLength(expected, bytes.len()));
        }
        Ok(Self {
            r: decode_g2::<P>(&bytes[..point_size])?,
            s: decode_scalar(&bytes[point_size..])?,
        })
    }
}

/// Signature transformed by the proxy, verifying under the delegatee's G1 public key. The
/// commitment stays the one of the first stage; the scalar becomes a G2 point.
#[serde_as]
#[derive(Clone, PartialEq, Eq, Debug, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ReSignature<E: Pairing> {
    /// Ephemeral commitment, unchanged from the first stage
    #[serde_as(as = "ArkObjectBytes")]
    pub r: E::G2Affine,
    /// Re-signed value `s·re_sign_key`
    #[serde_as(as = "ArkObjectBytes")]
    pub s: E::G2Affine,
}

impl<E: Pairing> ReSignature<E> {
    /// Needs no secret and cannot be reversed to recover one
    pub fn new(re_sign_key: &ReSignKey<E>, signature: &FirstSignature<E>) -> Self {
        Self {
            r: signature.r,
            s: (re_sign_key.0 * signature.s).into_affine(),
        }
    }

    /// Checks `e(pk, S) == z^h · e(G1, R)`
    pub fn verify(
        &self,
        message: &[u8],
        public_key: &PublicKeyG1<E>,
        params: &SetupParams<E>,
    ) -> bool {
        let h = hash_to_scalar::<E::ScalarField>(message);
        E::pairing(public_key.0, self.s) == params.z * h + E::pairing(params.g1, self.r)
    }
}

impl<P: Bls12Config> ReSignature<Bls12<P>> {
    pub fn to_bytes(&self) -> Result<Vec<u8>, PrsError> {
        let mut out = encode_g2::<P>(&self.r)?;
        out.extend_from_slice(&encode_g2::<P>(&self.s)?);
        Ok(out)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrsError> {
        let point_size = g2_serialized_size::<P>();
        let expected = 2 * point_size;
        if bytes.len() != expected {
            return Err(PrsError::InvalidLength(expected, bytes.len()));
        }
        Ok(Self {
            r: decode_g2::<P>(&bytes[..point_size])?,
            s: decode_g2::<P>(&bytes[point_size..])?,
        })
    }
}
