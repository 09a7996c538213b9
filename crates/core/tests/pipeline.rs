// Copyright 2024-2025 Irreducible Inc.

use assert_matches::assert_matches;
use r1cs_bridge_core::{
	backend, constraint_system, Api, CompileOptions, Config, DecodeError, Error,
};

const PRODUCT: &str = include_str!("fixtures/product.json");
const PRODUCT_TAMPERED: &str = include_str!("fixtures/product_tampered.json");
const LINEAR: &str = include_str!("fixtures/linear.json");
const LINEAR_TAMPERED: &str = include_str!("fixtures/linear_tampered.json");
const SAMPLE: &str = include_str!("fixtures/acir_sample.json");
const SAMPLE_TAMPERED: &str = include_str!("fixtures/acir_sample_tampered.json");

fn seeded(seed: u64) -> Api {
	Api::new(Config {
		compile: CompileOptions::default(),
		rng_seed: Some(seed),
	})
}

#[test]
fn test_preprocess_prove_verify_round_trip() {
	let api = Api::default();
	for circuit in [PRODUCT, LINEAR] {
		let (proving_key, verifying_key) = api.preprocess(circuit).unwrap();
		let proof = api.prove_with_pk(circuit, &proving_key).unwrap();
		assert!(api.verify_with_vk(circuit, &proof, &verifying_key).unwrap());
	}
}

#[test]
fn test_changed_public_values_are_rejected() {
	let api = Api::default();
	for (circuit, tampered) in [(PRODUCT, PRODUCT_TAMPERED), (LINEAR, LINEAR_TAMPERED)] {
		let (proving_key, verifying_key) = api.preprocess(circuit).unwrap();
		let proof = api.prove_with_pk(circuit, &proving_key).unwrap();
		assert!(!api.verify_with_vk(tampered, &proof, &verifying_key).unwrap());
	}
}

#[test]
fn test_proof_is_bound_to_its_keys() {
	let api = Api::default();
	let (proving_key, _) = api.preprocess(LINEAR).unwrap();
	let (_, other_verifying_key) = api.preprocess(LINEAR).unwrap();
	let proof = api.prove_with_pk(LINEAR, &proving_key).unwrap();
	assert!(!api.verify_with_vk(LINEAR, &proof, &other_verifying_key).unwrap());
}

#[test]
fn test_meta_flows_agree_under_a_fixed_seed() {
	let api = seeded(11);
	let proof = api.prove_with_meta(PRODUCT).unwrap();
	assert!(api.verify_with_meta(PRODUCT, &proof).unwrap());
	assert!(!api.verify_with_meta(PRODUCT_TAMPERED, &proof).unwrap());

	// The regenerated keys are the ones preprocess hands out under the same seed.
	let (_, verifying_key) = api.preprocess(PRODUCT).unwrap();
	assert!(api.verify_with_vk(PRODUCT, &proof, &verifying_key).unwrap());

	assert!(!seeded(12).verify_with_meta(PRODUCT, &proof).unwrap());
}

#[test]
fn test_seed_does_not_fix_proof_blinding() {
	let api = seeded(9);
	let (proving_key, verifying_key) = api.preprocess(LINEAR).unwrap();
	let proof_a = api.prove_with_pk(LINEAR, &proving_key).unwrap();
	let proof_b = api.prove_with_pk(LINEAR, &proving_key).unwrap();

	assert_ne!(proof_a, proof_b);
	assert!(api.verify_with_vk(LINEAR, &proof_a, &verifying_key).unwrap());
	assert!(api.verify_with_vk(LINEAR, &proof_b, &verifying_key).unwrap());
}

#[test]
fn test_verifying_key_from_another_circuit_is_rejected() {
	let api = Api::default();
	let (_, product_vk) = api.preprocess(PRODUCT).unwrap();
	let (linear_pk, _) = api.preprocess(LINEAR).unwrap();

	// The public input counts differ, so this is a malformed request rather than a rejection.
	let proof = api.prove_with_pk(LINEAR, &linear_pk).unwrap();
	assert_matches!(
		api.verify_with_vk(LINEAR, &proof, &product_vk),
		Err(Error::Backend(backend::Error::Synthesis(_)))
	);
}

#[test]
fn test_legacy_options_accept_unconstrained_circuits() {
	let legacy = Api::new(Config {
		compile: CompileOptions::legacy(),
		rng_seed: None,
	});
	assert_eq!(legacy.exact_circuit_size(SAMPLE).unwrap(), 4);
	assert_eq!(Api::default().exact_circuit_size(SAMPLE).unwrap(), 6);

	// The second product gate holds only once its constant is folded in.
	assert_matches!(
		legacy.preprocess(PRODUCT).and_then(|(pk, _)| legacy.prove_with_pk(PRODUCT, &pk)),
		Err(Error::Backend(backend::Error::Unsatisfied(
			constraint_system::Error::Unsatisfied { index: 1 }
		)))
	);
	let (proving_key, verifying_key) = legacy.preprocess(LINEAR).unwrap();
	let proof = legacy.prove_with_pk(LINEAR, &proving_key).unwrap();
	assert!(legacy.verify_with_vk(LINEAR, &proof, &verifying_key).unwrap());
}

#[test]
fn test_sample_values_do_not_satisfy_the_sample() {
	let api = seeded(0);
	for circuit in [SAMPLE, SAMPLE_TAMPERED] {
		assert_matches!(
			api.prove_with_meta(circuit),
			Err(Error::Backend(backend::Error::Unsatisfied(
				constraint_system::Error::Unsatisfied { index: 0 }
			)))
		);
	}
}

#[test]
fn test_malformed_requests() {
	let api = seeded(5);
	assert_matches!(api.preprocess("{"), Err(Error::Decode(DecodeError::Json(_))));

	let (proving_key, verifying_key) = api.preprocess(PRODUCT).unwrap();
	let proof = api.prove_with_pk(PRODUCT, &proving_key).unwrap();

	assert_matches!(
		api.prove_with_pk(PRODUCT, "not hex"),
		Err(Error::Backend(backend::Error::Encoding(_)))
	);
	assert_matches!(
		api.verify_with_vk(PRODUCT, &proof[..proof.len() - 2], &verifying_key),
		Err(Error::Backend(backend::Error::Serialization(_)))
	);
	assert_matches!(
		api.verify_with_vk(PRODUCT, &format!("{proof}00"), &verifying_key),
		Err(Error::Backend(backend::Error::TrailingBytes { count: 1 }))
	);
	assert_matches!(
		api.verify_with_vk(PRODUCT, &proof, &proving_key),
		Err(Error::Backend(_))
	);

	let out_of_range = PRODUCT.replacen("\"sum\": 2", "\"sum\": 3", 1);
	assert_matches!(
		api.exact_circuit_size(&out_of_range),
		Err(Error::ConstraintSystem(constraint_system::Error::IndexOutOfRange { index: 3, .. }))
	);
}
