// Copyright 2024-2025 Irreducible Inc.

//! The setup, prove and verify flows, generic over the proving backend.
//!
//! Every flow starts from a [`RawCircuit`] and compiles it afresh, so a flow run twice on the
//! same inputs sees the same constraint system and the same witness.

use ark_ff::PrimeField;
use tracing::instrument;

use crate::{
	backend::Backend,
	constraint_system::{compile, CompileOptions, CompiledCircuit},
	raw::RawCircuit,
	witness::Witness,
	Error,
};

/// Where a flow takes its key from.
#[derive(Debug)]
pub enum KeySource<'a, K> {
	/// Run the backend setup on the compiled system. Keys made this way are throwaway; a proof
	/// is only meaningful to someone who trusts the party that ran the setup.
	Generate,
	Supplied(&'a K),
}

impl<K> Clone for KeySource<'_, K> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<K> Copy for KeySource<'_, K> {}

/// Compiles `raw` and runs the backend setup on it.
#[instrument(skip_all, name = "pipeline::setup")]
pub fn setup<F, B>(
	backend: &B,
	raw: &RawCircuit<F>,
	options: CompileOptions,
) -> Result<(B::ProvingKey, B::VerifyingKey), Error>
where
	F: PrimeField,
	B: Backend<F>,
{
	let compiled = compile(raw, options)?;
	Ok(backend.setup(&compiled.constraint_system)?)
}

/// Compiles `raw`, assembles its witness and proves it.
#[instrument(skip_all, name = "pipeline::prove")]
pub fn prove<F, B>(
	backend: &B,
	raw: &RawCircuit<F>,
	options: CompileOptions,
	proving_key: KeySource<'_, B::ProvingKey>,
) -> Result<B::Proof, Error>
where
	F: PrimeField,
	B: Backend<F>,
{
	let CompiledCircuit {
		constraint_system,
		partition,
	} = compile(raw, options)?;
	let witness = Witness::assemble(&partition);

	let proof = match proving_key {
		KeySource::Generate => {
			let (proving_key, _) = backend.setup(&constraint_system)?;
			backend.prove(&constraint_system, &proving_key, &witness)?
		}
		KeySource::Supplied(proving_key) => {
			backend.prove(&constraint_system, proving_key, &witness)?
		}
	};
	Ok(proof)
}

/// Compiles `raw`, takes the public half of its witness and checks `proof` against it.
///
/// Returns `Ok(false)` when the proof is rejected.
#[instrument(skip_all, name = "pipeline::verify")]
pub fn verify<F, B>(
	backend: &B,
	raw: &RawCircuit<F>,
	options: CompileOptions,
	proof: &B::Proof,
	verifying_key: KeySource<'_, B::VerifyingKey>,
) -> Result<bool, Error>
where
	F: PrimeField,
	B: Backend<F>,
{
	let compiled = compile(raw, options)?;
	let public_witness = compiled.witness().public();

	let verified = match verifying_key {
		KeySource::Generate => {
			let (_, verifying_key) = backend.setup(&compiled.constraint_system)?;
			backend.verify(proof, &verifying_key, &public_witness)?
		}
		KeySource::Supplied(verifying_key) => {
			backend.verify(proof, verifying_key, &public_witness)?
		}
	};
	Ok(verified)
}

#[cfg(test)]
mod tests {
	use ark_bn254::{Bn254, Fr};
	use assert_matches::assert_matches;

	use super::*;
	use crate::{
		backend::{self, Groth16Backend, Randomness},
		constraint_system::{self, IndexRole},
	};

	const LINEAR: &str = include_str!("../tests/fixtures/linear.json");
	const LINEAR_TAMPERED: &str = include_str!("../tests/fixtures/linear_tampered.json");

	fn linear() -> RawCircuit<Fr> {
		RawCircuit::from_json(LINEAR).unwrap()
	}

	#[test]
	fn test_generated_keys_differ_per_setup_with_os_randomness() {
		let backend = Groth16Backend::<Bn254>::default();
		let (_, vk_a) = setup(&backend, &linear(), CompileOptions::default()).unwrap();
		let (_, vk_b) = setup(&backend, &linear(), CompileOptions::default()).unwrap();
		assert_ne!(vk_a, vk_b);
	}

	#[test]
	fn test_supplied_keys() {
		let backend = Groth16Backend::<Bn254>::default();
		let options = CompileOptions::default();
		let (pk, vk) = setup(&backend, &linear(), options).unwrap();

		let proof = prove(&backend, &linear(), options, KeySource::Supplied(&pk)).unwrap();
		assert!(verify(&backend, &linear(), options, &proof, KeySource::Supplied(&vk)).unwrap());

		let tampered = RawCircuit::from_json(LINEAR_TAMPERED).unwrap();
		assert!(!verify(&backend, &tampered, options, &proof, KeySource::Supplied(&vk)).unwrap());
	}

	#[test]
	fn test_generated_keys_need_a_fixed_seed() {
		let seeded = Groth16Backend::<Bn254>::new(Randomness::Seeded(42));
		let options = CompileOptions::default();
		let proof = prove(&seeded, &linear(), options, KeySource::Generate).unwrap();
		assert!(verify(&seeded, &linear(), options, &proof, KeySource::Generate).unwrap());

		let other = Groth16Backend::<Bn254>::new(Randomness::Seeded(43));
		assert!(!verify(&other, &linear(), options, &proof, KeySource::Generate).unwrap());
	}

	#[test]
	fn test_compile_errors_surface_before_setup() {
		let mut raw = linear();
		raw.public_inputs.insert(9);
		assert_matches!(
			prove(&Groth16Backend::<Bn254>::default(), &raw, CompileOptions::default(), KeySource::Generate),
			Err(Error::ConstraintSystem(constraint_system::Error::IndexOutOfRange {
				role: IndexRole::PublicInput,
				index: 9,
				..
			}))
		);
	}

	#[test]
	fn test_unsatisfied_circuit_is_not_proven() {
		let backend = Groth16Backend::<Bn254>::new(Randomness::Seeded(3));
		let options = CompileOptions::default();
		let (pk, _) = setup(&backend, &linear(), options).unwrap();

		let tampered = RawCircuit::from_json(LINEAR_TAMPERED).unwrap();
		assert_matches!(
			prove(&backend, &tampered, options, KeySource::Supplied(&pk)),
			Err(Error::Backend(backend::Error::Unsatisfied(_)))
		);
	}
}
