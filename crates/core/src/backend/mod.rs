// Copyright 2024-2025 Irreducible Inc.

//! The seam to the external proving system.

mod error;
pub mod groth16;

use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
pub use error::Error;
pub use groth16::Groth16Backend;
use r1cs_bridge_utils::serialization::{decode_hex, encode_hex};
use rand::{
	rngs::{OsRng, StdRng},
	CryptoRng, RngCore, SeedableRng,
};

use crate::{
	constraint_system::ConstraintSystem,
	witness::{PublicWitness, Witness},
};

/// A zero-knowledge proving system for compiled constraint systems.
///
/// `verify` returns `Ok(false)` for a proof that does not check out. `Err` is reserved for
/// requests the backend cannot process at all, such as keys of the wrong size.
pub trait Backend<F: PrimeField> {
	type ProvingKey: CanonicalSerialize + CanonicalDeserialize;
	type VerifyingKey: CanonicalSerialize + CanonicalDeserialize;
	type Proof: CanonicalSerialize + CanonicalDeserialize;

	fn setup(
		&self,
		cs: &ConstraintSystem<F>,
	) -> Result<(Self::ProvingKey, Self::VerifyingKey), Error>;

	fn prove(
		&self,
		cs: &ConstraintSystem<F>,
		proving_key: &Self::ProvingKey,
		witness: &Witness<F>,
	) -> Result<Self::Proof, Error>;

	fn verify(
		&self,
		proof: &Self::Proof,
		verifying_key: &Self::VerifyingKey,
		public_witness: &PublicWitness<F>,
	) -> Result<bool, Error>;
}

/// Canonical compressed encoding of a key or proof, as hex text.
pub fn to_hex<T: CanonicalSerialize>(item: &T) -> Result<String, Error> {
	let mut bytes = Vec::with_capacity(item.compressed_size());
	item.serialize_compressed(&mut bytes)?;
	Ok(encode_hex(bytes))
}

/// Inverse of [`to_hex`]. Curve points are checked to be on the curve and in the right subgroup.
pub fn from_hex<T: CanonicalDeserialize>(text: &str) -> Result<T, Error> {
	let bytes = decode_hex(text)?;
	let mut reader = bytes.as_slice();
	let item = T::deserialize_compressed(&mut reader)?;
	if !reader.is_empty() {
		return Err(Error::TrailingBytes {
			count: reader.len(),
		});
	}
	Ok(item)
}

/// Where setup randomness comes from. Proof blinding always comes from the operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Randomness {
	#[default]
	Os,
	/// Every setup draws from a fresh generator seeded with this value, so the same circuit
	/// always gets the same keys. Such keys are insecure; this exists for tests and reproducible
	/// fixtures.
	Seeded(u64),
}

impl Randomness {
	pub(crate) fn setup_rng(self) -> BackendRng {
		match self {
			Self::Os => BackendRng::Os(OsRng),
			Self::Seeded(seed) => BackendRng::Seeded(StdRng::seed_from_u64(seed)),
		}
	}
}

pub(crate) enum BackendRng {
	Os(OsRng),
	Seeded(StdRng),
}

impl RngCore for BackendRng {
	fn next_u32(&mut self) -> u32 {
		match self {
			Self::Os(rng) => rng.next_u32(),
			Self::Seeded(rng) => rng.next_u32(),
		}
	}

	fn next_u64(&mut self) -> u64 {
		match self {
			Self::Os(rng) => rng.next_u64(),
			Self::Seeded(rng) => rng.next_u64(),
		}
	}

	fn fill_bytes(&mut self, dest: &mut [u8]) {
		match self {
			Self::Os(rng) => rng.fill_bytes(dest),
			Self::Seeded(rng) => rng.fill_bytes(dest),
		}
	}

	fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
		match self {
			Self::Os(rng) => rng.try_fill_bytes(dest),
			Self::Seeded(rng) => rng.try_fill_bytes(dest),
		}
	}
}

impl CryptoRng for BackendRng {}
