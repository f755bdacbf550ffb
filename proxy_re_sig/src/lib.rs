#![cfg_attr(not(feature = "std"), no_std)]

//! Implements a unidirectional proxy re-signature scheme over pairing-friendly curves, following
//! the delegation model of [Proxy Re-Signatures: New Definitions, Algorithms, and Applications](https://eprint.iacr.org/2005/433).
//!
//! A delegator signs a message to get a first-stage signature. A proxy holding a re-signature key
//! transforms that signature into one verifying under the delegatee's public key. The proxy learns
//! neither party's secret scalar and the delegator is not involved in the transformation. The
//! re-signature key is created from the delegator's G2 public key and the delegatee's secret
//! scalar, so the delegation is delegatee-initiated and needs no interaction with the delegator.
//!
//! Provides
//! - key generation from a 32-byte seed, a scalar or an RNG - [`setup`]
//! - re-signature key generation, signing, re-signing and both verifications - [`signature`]
//! - the compressed point and scalar codec used on the wire - [`encoding`]
//!
//! The protocol operations are generic over the pairing, the wire codec over the BLS12 curve
//! family. Tests instantiate both with BLS12-381.
//!
//! [`setup`]: crate::setup
//! [`signature`]: crate::signature
//! [`encoding`]: crate::encoding

extern crate alloc;

pub mod encoding;
pub mod error;
pub mod serde_utils;
pub mod setup;
pub mod signature;

pub mod prelude {
    pub use crate::{
        error::PrsError,
        setup::{PublicKeyG1, PublicKeyG2, SecretKey, SetupParams},
        signature::{FirstSignature, ReSignKey, ReSignature},
    };
}
