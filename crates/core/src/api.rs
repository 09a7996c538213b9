// Copyright 2024-2025 Irreducible Inc.

//! Text-in, text-out entry points over BN254.
//!
//! Circuits are raw-circuit JSON, keys and proofs are hex of their compressed arkworks encoding.
//! Nothing here aborts on bad input; every failure comes back as an [`Error`].

use ark_bn254::{Bn254, Fr};
use ark_groth16::{Proof, ProvingKey, VerifyingKey};
use tracing::{info, instrument};

use crate::{
	backend::{from_hex, to_hex, Groth16Backend},
	config::{self, Config},
	constraint_system::{self, CompileOptions},
	pipeline::{self, KeySource},
	raw::RawCircuit,
	Error,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Api {
	backend: Groth16Backend<Bn254>,
	options: CompileOptions,
}

impl Api {
	pub const fn new(config: Config) -> Self {
		Self {
			backend: Groth16Backend::new(config.randomness()),
			options: config.compile,
		}
	}

	pub fn from_env() -> Result<Self, config::Error> {
		Ok(Self::new(Config::from_env()?))
	}

	pub const fn compile_options(&self) -> CompileOptions {
		self.options
	}

	/// Proves with a proving key generated on the spot. For testing only.
	#[instrument(skip_all, name = "api::prove_with_meta")]
	pub fn prove_with_meta(&self, circuit: &str) -> Result<String, Error> {
		let raw = decode_circuit(circuit)?;
		let proof = pipeline::prove(&self.backend, &raw, self.options, KeySource::Generate)?;
		Ok(to_hex(&proof)?)
	}

	#[instrument(skip_all, name = "api::prove_with_pk")]
	pub fn prove_with_pk(&self, circuit: &str, proving_key: &str) -> Result<String, Error> {
		let raw = decode_circuit(circuit)?;
		let proving_key = from_hex::<ProvingKey<Bn254>>(proving_key)?;
		let proof =
			pipeline::prove(&self.backend, &raw, self.options, KeySource::Supplied(&proving_key))?;
		Ok(to_hex(&proof)?)
	}

	/// Verifies against a verifying key generated on the spot. Only accepts proofs made with
	/// [`Self::prove_with_meta`] under the same fixed seed. For testing only.
	#[instrument(skip_all, name = "api::verify_with_meta")]
	pub fn verify_with_meta(&self, circuit: &str, proof: &str) -> Result<bool, Error> {
		let raw = decode_circuit(circuit)?;
		let proof = from_hex::<Proof<Bn254>>(proof)?;
		let verified =
			pipeline::verify(&self.backend, &raw, self.options, &proof, KeySource::Generate)?;
		info!(verified);
		Ok(verified)
	}

	#[instrument(skip_all, name = "api::verify_with_vk")]
	pub fn verify_with_vk(
		&self,
		circuit: &str,
		proof: &str,
		verifying_key: &str,
	) -> Result<bool, Error> {
		let raw = decode_circuit(circuit)?;
		let proof = from_hex::<Proof<Bn254>>(proof)?;
		let verifying_key = from_hex::<VerifyingKey<Bn254>>(verifying_key)?;
		let verified = pipeline::verify(
			&self.backend,
			&raw,
			self.options,
			&proof,
			KeySource::Supplied(&verifying_key),
		)?;
		info!(verified);
		Ok(verified)
	}

	/// Runs the setup and returns the hex proving key and verifying key.
	#[instrument(skip_all, name = "api::preprocess")]
	pub fn preprocess(&self, circuit: &str) -> Result<(String, String), Error> {
		let raw = decode_circuit(circuit)?;
		let (proving_key, verifying_key) = pipeline::setup(&self.backend, &raw, self.options)?;
		Ok((to_hex(&proving_key)?, to_hex(&verifying_key)?))
	}

	/// Number of constraints the circuit compiles to.
	pub fn exact_circuit_size(&self, circuit: &str) -> Result<usize, Error> {
		let raw = decode_circuit(circuit)?;
		Ok(constraint_system::exact_circuit_size(&raw, self.options)?)
	}
}

fn decode_circuit(circuit: &str) -> Result<RawCircuit<Fr>, Error> {
	Ok(RawCircuit::from_json(circuit)?)
}
