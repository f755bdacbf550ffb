//! Setup parameters and key material.
//!
//! [`SetupParams`] fixes the two group generators and precomputes the pairing of the generators,
//! which both verification equations exponentiate. It is created once and passed by reference to
//! every operation; nothing in it changes after construction.
//!
//! A [`SecretKey`] is a 32-byte seed together with the scalar derived from it. The seed is kept
//! because it is the external representation of the key; the derived scalar is the seed read as a
//! big-endian integer and reduced modulo the group order, so for seeds above the order the two
//! differ. [`SecretKey::from_scalar`] stores the canonical bytes of the scalar as the seed and
//! applies no further reduction.

use crate::{
    encoding::{decode_g1, decode_g2, encode_g1, encode_g2},
    error::PrsError,
    serde_utils::ArkObjectBytes,
};
use ark_ec::{
    bls12::{Bls12, Bls12Config},
    pairing::{Pairing, PairingOutput},
    AffineRepr, CurveGroup,
};
use ark_ff::{BigInteger, PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{rand::RngCore, vec::Vec};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Byte length of a secret key seed
pub const SECRET_KEY_SEED_SIZE: usize = 32;

/// Generators of both groups and their pairing, computed once
#[serde_as]
#[derive(Clone, PartialEq, Eq, Debug, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct SetupParams<E: Pairing> {
    #[serde_as(as = "ArkObjectBytes")]
    pub g1: E::G1Affine,
    #[serde_as(as = "ArkObjectBytes")]
    pub g2: E::G2Affine,
    /// e(g1, g2)
    #[serde_as(as = "ArkObjectBytes")]
    pub z: PairingOutput<E>,
}

impl<E: Pairing> SetupParams<E> {
    pub fn new() -> Self {
        let g1 = E::G1Affine::generator();
        let g2 = E::G2Affine::generator();
        let z = E::pairing(g1, g2);
        Self { g1, g2, z }
    }
}

impl<E: Pairing> Default for SetupParams<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Secret key of either party. The delegator signs with it, the delegatee derives the
/// re-signature key from it.
#[serde_as]
#[derive(
    Clone,
    PartialEq,
    Eq,
    Debug,
    CanonicalSerialize,
    CanonicalDeserialize,
    Serialize,
    Deserialize,
    Zeroize,
    ZeroizeOnDrop,
)]
#[serde(bound = "")]
pub struct SecretKey<F: PrimeField> {
    seed: Vec<u8>,
    #[serde_as(as = "ArkObjectBytes")]
    scalar: F,
}

impl<F: PrimeField> SecretKey<F> {
    /// Derives the scalar from a 32-byte seed read as a big-endian integer modulo the group
    /// order. Rejects seeds reducing to zero.
    pub fn from_seed(seed: &[u8]) -> Result<Self, PrsError> {
        if seed.len() != SECRET_KEY_SEED_SIZE {
            return Err(PrsError::InvalidLength(SECRET_KEY_SEED_SIZE, seed.len()));
        }
        let scalar = F::from_be_bytes_mod_order(seed);
        if scalar.is_zero() {
            return Err(PrsError::ZeroScalar);
        }
        Ok(Self {
            seed: seed.to_vec(),
            scalar,
        })
    }

    /// Uses the scalar as-is, with its canonical bytes as the seed
    pub fn from_scalar(scalar: F) -> Self {
        Self {
            seed: scalar.into_bigint().to_bytes_be(),
            scalar,
        }
    }

    pub fn generate<R: RngCore>(rng: &mut R) -> Self {
        loop {
            let mut seed = [0u8; SECRET_KEY_SEED_SIZE];
            rng.fill_bytes(&mut seed);
            if let Ok(secret_key) = Self::from_seed(&seed) {
                return secret_key;
            }
        }
    }

    pub fn seed(&self) -> &[u8] {
        &self.seed
    }

    pub fn scalar(&self) -> &F {
        &self.scalar
    }

    pub fn public_key_g1<E: Pairing<ScalarField = F>>(
        &self,
        params: &SetupParams<E>,
    ) -> PublicKeyG1<E> {
        PublicKeyG1::new(self, params)
    }

    pub fn public_key_g2<E: Pairing<ScalarField = F>>(
        &self,
        params: &SetupParams<E>,
    ) -> PublicKeyG2<E> {
        PublicKeyG2::new(self, params)
    }
}

impl<F: PrimeField> AsRef<F> for SecretKey<F> {
    fn as_ref(&self) -> &F {
        &self.scalar
    }
}

/// Public key in G1, the identity signatures are verified against
#[serde_as]
#[derive(Clone, PartialEq, Eq, Debug, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PublicKeyG1<E: Pairing>(
    #[serde_as(as = "ArkObjectBytes")] pub E::G1Affine,
);

impl<E: Pairing> PublicKeyG1<E> {
    pub fn new(secret_key: &SecretKey<E::ScalarField>, params: &SetupParams<E>) -> Self {
        Self((params.g1 * secret_key.scalar).into_affine())
    }

    /// Public key shouldn't be 0. A verifier on receiving this must check it before any use.
    pub fn is_valid(&self) -> bool {
        !self.0.is_zero()
    }
}

impl<E: Pairing> AsRef<E::G1Affine> for PublicKeyG1<E> {
    fn as_ref(&self) -> &E::G1Affine {
        &self.0
    }
}

impl<P: Bls12Config> PublicKeyG1<Bls12<P>> {
    pub fn to_bytes(&self) -> Result<Vec<u8>, PrsError> {
        encode_g1::<P>(&self.0)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrsError> {
        Ok(Self(decode_g1::<P>(bytes)?))
    }
}

/// Public key in G2, the identity a re-signature key delegates from
#[serde_as]
#[derive(Clone, PartialEq, Eq, Debug, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PublicKeyG2<E: Pairing>(
    #[serde_as(as = "ArkObjectBytes")] pub E::G2Affine,
);

impl<E: Pairing> PublicKeyG2<E> {
    pub fn new(secret_key: &SecretKey<E::ScalarField>, params: &SetupParams<E>) -> Self {
        Self((params.g2 * secret_key.scalar).into_affine())
    }

    pub fn is_valid(&self) -> bool {
        !self.0.is_zero()
    }
}

impl<E: Pairing> AsRef<E::G2Affine> for PublicKeyG2<E> {
    fn as_ref(&self) -> &E::G2Affine {
        &self.0
    }
}

impl<P: Bls12Config> PublicKeyG2<Bls12<P>> {
    pub fn to_bytes(&self) -> Result<Vec<u8>, PrsError> {
        encode_g2::<P>(&self.0)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrsError> {
        Ok(Self(decode_g2::<P>(bytes)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_381::{Bls12_381, Fr};
    use ark_std::{
        rand::{rngs::StdRng, SeedableRng},
        UniformRand,
    };

    #[test]
    fn seed_below_order_reads_as_its_integer() {
        let seed =
            hex::decode("06f8aabf9c48b7ae375e2fb5f5207c2ed2c62e8a9ddc6f4cdd7201babc7e091e")
                .unwrap();
        let secret_key = SecretKey::<Fr>::from_seed(&seed).unwrap();
        assert_eq!(secret_key.seed(), seed.as_slice());
        assert_eq!(
            *secret_key.scalar(),
            Fr::from_be_bytes_mod_order(&seed)
        );
        assert_eq!(
            crate::encoding::encode_scalar(secret_key.scalar()),
            seed
        );
    }

    #[test]
    fn seed_above_order_is_reduced() {
        let secret_key = SecretKey::<Fr>::from_seed(&[0xffu8; 32]).unwrap();
        assert_eq!(
            crate::encoding::encode_scalar(secret_key.scalar()),
            hex::decode("1824b159acc5056f998c4fefecbc4ff55884b7fa0003480200000001fffffffd")
                .unwrap()
        );
    }

    #[test]
    fn from_scalar_applies_no_reduction() {
        let mut rng = StdRng::seed_from_u64(0u64);
        for _ in 0..10 {
            let scalar = Fr::rand(&mut rng);
            let secret_key = SecretKey::from_scalar(scalar);
            assert_eq!(*secret_key.scalar(), scalar);
            assert_eq!(
                SecretKey::<Fr>::from_seed(secret_key.seed()).unwrap(),
                secret_key
            );
        }
    }

    #[test]
    fn degenerate_seeds_rejected() {
        assert!(matches!(
            SecretKey::<Fr>::from_seed(&[0u8; 32]),
            Err(PrsError::ZeroScalar)
        ));
        assert!(matches!(
            SecretKey::<Fr>::from_seed(&[1u8; 16]),
            Err(PrsError::InvalidLength(32, 16))
        ));
    }

    #[test]
    fn fixed_public_key_vectors() {
        let params = SetupParams::<Bls12_381>::new();
        let seed =
            hex::decode("06f8aabf9c48b7ae375e2fb5f5207c2ed2c62e8a9ddc6f4cdd7201babc7e091e")
                .unwrap();
        let secret_key = SecretKey::<Fr>::from_seed(&seed).unwrap();
        assert_eq!(
            hex::encode(secret_key.public_key_g1(&params).to_bytes().unwrap()),
            "0306e50ce24f93cd9d36db6f8f73bea8fe2c916d46662800f7148ca6b137e23afce41d0c3fcc27dbfb2bd6d3c297e3eb95"
        );
        assert_eq!(
            hex::encode(secret_key.public_key_g2(&params).to_bytes().unwrap()),
            "0310a1c1bea6fc02ed9448520f88575108f26fa4d40b88645c5c3479d4fc30b5c7f4121e61dbf95fd5477e8fa2d02449d5068bda9acae70ae6d7bc98694cf5edb13869a449b4a8d48dfef9199fbea4f5fd0d80381b967e497956672b3f4fa868ee"
        );
    }

    #[test]
    fn public_key_wire_round_trip() {
        let mut rng = StdRng::seed_from_u64(1u64);
        let params = SetupParams::<Bls12_381>::new();
        let secret_key = SecretKey::<Fr>::generate(&mut rng);
        let pk1 = secret_key.public_key_g1(&params);
        let pk2 = secret_key.public_key_g2(&params);
        assert!(pk1.is_valid());
        assert!(pk2.is_valid());
        assert_eq!(
            PublicKeyG1::from_bytes(&pk1.to_bytes().unwrap()).unwrap(),
            pk1
        );
        assert_eq!(
            PublicKeyG2::from_bytes(&pk2.to_bytes().unwrap()).unwrap(),
            pk2
        );
    }
}
