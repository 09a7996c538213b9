// Copyright 2024-2025 Irreducible Inc.

//! The serialized circuit description consumed by the compiler.
//!
//! A [`RawCircuit`] arrives as JSON. Its field elements are hex text: gate coefficients are single
//! big-endian elements, and `values` is a hex-encoded, length-prefixed element vector.

use std::collections::BTreeSet;

use ark_ff::PrimeField;
use serde::{Deserialize, Serialize};

use crate::field::{self, decode_field_element_hex, decode_values, encode_field_element_hex};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
	#[error("malformed circuit JSON: {0}")]
	Json(#[from] serde_json::Error),

	#[error("invalid field element at {location}: {source}")]
	FieldElement {
		location: String,
		#[source]
		source: field::Error,
	},

	#[error("invalid values vector: {0}")]
	Values(#[source] field::Error),
}

/// `coefficient · values[multiplicand] · values[multiplier]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MulTerm<F> {
	pub coefficient: F,
	pub multiplicand: usize,
	pub multiplier: usize,
}

/// `coefficient · variable[sum]`, indexing the allocated-variable table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTerm<F> {
	pub coefficient: F,
	pub sum: usize,
}

/// One source-level constraint. Compiles to a single row asserting that its terms sum to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawGate<F> {
	pub mul_terms: Vec<MulTerm<F>>,
	pub add_terms: Vec<AddTerm<F>>,
	pub constant_term: F,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCircuit<F> {
	pub gates: Vec<RawGate<F>>,
	/// 1-based positions into `values` that are revealed to the verifier.
	pub public_inputs: BTreeSet<usize>,
	/// `values[i]` assigns logical variable `i + 1`.
	pub values: Vec<F>,
	/// Capacity hint, not checked against `values`.
	pub num_variables: usize,
	/// Capacity hint, not checked against the compiled system.
	pub num_constraints: usize,
}

impl<F: PrimeField> RawCircuit<F> {
	pub fn from_json(text: &str) -> Result<Self, DecodeError> {
		let wire: RawCircuitJson = serde_json::from_str(text)?;
		wire.try_into()
	}

	pub fn to_json(&self) -> Result<String, DecodeError> {
		let wire = RawCircuitJson {
			gates: self.gates.iter().map(RawGateJson::from).collect(),
			public_inputs: self.public_inputs.iter().copied().collect(),
			values: field::encode_values(&self.values).map_err(DecodeError::Values)?,
			num_variables: self.num_variables,
			num_constraints: self.num_constraints,
		};
		Ok(serde_json::to_string(&wire)?)
	}

	pub fn is_public(&self, index: usize) -> bool {
		self.public_inputs.contains(&(index + 1))
	}
}

#[derive(Serialize, Deserialize)]
struct MulTermJson {
	coefficient: String,
	multiplicand: usize,
	multiplier: usize,
}

#[derive(Serialize, Deserialize)]
struct AddTermJson {
	coefficient: String,
	sum: usize,
}

#[derive(Serialize, Deserialize)]
struct RawGateJson {
	mul_terms: Vec<MulTermJson>,
	add_terms: Vec<AddTermJson>,
	constant_term: String,
}

#[derive(Serialize, Deserialize)]
struct RawCircuitJson {
	gates: Vec<RawGateJson>,
	public_inputs: Vec<usize>,
	values: String,
	num_variables: usize,
	num_constraints: usize,
}

fn element_at<F: PrimeField>(
	text: &str,
	location: impl FnOnce() -> String,
) -> Result<F, DecodeError> {
	decode_field_element_hex(text).map_err(|source| DecodeError::FieldElement {
		location: location(),
		source,
	})
}

impl<F: PrimeField> TryFrom<RawCircuitJson> for RawCircuit<F> {
	type Error = DecodeError;

	fn try_from(wire: RawCircuitJson) -> Result<Self, Self::Error> {
		let gates = wire
			.gates
			.into_iter()
			.enumerate()
			.map(|(gate, raw_gate)| {
				let mul_terms = raw_gate
					.mul_terms
					.into_iter()
					.enumerate()
					.map(|(term, mul)| {
						Ok(MulTerm {
							coefficient: element_at(&mul.coefficient, || {
								format!("gates[{gate}].mul_terms[{term}].coefficient")
							})?,
							multiplicand: mul.multiplicand,
							multiplier: mul.multiplier,
						})
					})
					.collect::<Result<_, DecodeError>>()?;
				let add_terms = raw_gate
					.add_terms
					.into_iter()
					.enumerate()
					.map(|(term, add)| {
						Ok(AddTerm {
							coefficient: element_at(&add.coefficient, || {
								format!("gates[{gate}].add_terms[{term}].coefficient")
							})?,
							sum: add.sum,
						})
					})
					.collect::<Result<_, DecodeError>>()?;
				let constant_term = element_at(&raw_gate.constant_term, || {
					format!("gates[{gate}].constant_term")
				})?;
				Ok(RawGate {
					mul_terms,
					add_terms,
					constant_term,
				})
			})
			.collect::<Result<_, DecodeError>>()?;

		Ok(Self {
			gates,
			public_inputs: wire.public_inputs.into_iter().collect(),
			values: decode_values(&wire.values).map_err(DecodeError::Values)?,
			num_variables: wire.num_variables,
			num_constraints: wire.num_constraints,
		})
	}
}

impl<F: PrimeField> From<&RawGate<F>> for RawGateJson {
	fn from(gate: &RawGate<F>) -> Self {
		Self {
			mul_terms: gate
				.mul_terms
				.iter()
				.map(|mul| MulTermJson {
					coefficient: encode_field_element_hex(&mul.coefficient),
					multiplicand: mul.multiplicand,
					multiplier: mul.multiplier,
				})
				.collect(),
			add_terms: gate
				.add_terms
				.iter()
				.map(|add| AddTermJson {
					coefficient: encode_field_element_hex(&add.coefficient),
					sum: add.sum,
				})
				.collect(),
			constant_term: encode_field_element_hex(&gate.constant_term),
		}
	}
}

#[cfg(test)]
mod tests {
	use ark_bn254::Fr;
	use ark_ff::{One, Zero};
	use assert_matches::assert_matches;

	use super::*;

	const SAMPLE: &str = include_str!("../tests/fixtures/acir_sample.json");

	#[test]
	fn test_decode_sample() {
		let circuit = RawCircuit::<Fr>::from_json(SAMPLE).unwrap();

		assert_eq!(circuit.gates.len(), 4);
		assert_eq!(circuit.public_inputs, BTreeSet::from([2]));
		assert_eq!(circuit.num_variables, 7);
		assert_eq!(circuit.num_constraints, 11);
		assert_eq!(
			circuit.values,
			[1u64, 2, 0, 0, 0, 0]
				.into_iter()
				.map(Fr::from)
				.collect::<Vec<_>>()
		);

		let gate = &circuit.gates[1];
		assert_eq!(
			gate.mul_terms,
			vec![MulTerm {
				coefficient: Fr::one(),
				multiplicand: 3,
				multiplier: 4,
			}]
		);
		assert_eq!(
			gate.add_terms,
			vec![AddTerm {
				coefficient: -Fr::one(),
				sum: 5,
			}]
		);
		assert!(gate.constant_term.is_zero());
		assert_eq!(circuit.gates[3].constant_term, Fr::one());

		assert!(circuit.is_public(1));
		assert!(!circuit.is_public(0));
	}

	#[test]
	fn test_json_reencoding_is_stable() {
		let circuit = RawCircuit::<Fr>::from_json(SAMPLE).unwrap();
		let reencoded = RawCircuit::<Fr>::from_json(&circuit.to_json().unwrap()).unwrap();
		assert_eq!(reencoded, circuit);
	}

	#[test]
	fn test_decode_errors() {
		assert_matches!(RawCircuit::<Fr>::from_json("{\"gates\": ["), Err(DecodeError::Json(_)));

		let unreduced = SAMPLE.replacen(
			"30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000000",
			"30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001",
			1,
		);
		assert_matches!(
			RawCircuit::<Fr>::from_json(&unreduced),
			Err(DecodeError::FieldElement { location, source: field::Error::OutOfRange { .. } })
				if location == "gates[0].add_terms[1].coefficient"
		);

		// Only the values blob starts with this prefix; the announced count exceeds the body.
		let truncated_values = SAMPLE.replacen("\"00000006", "\"00000007", 1);
		assert_matches!(RawCircuit::<Fr>::from_json(&truncated_values), Err(DecodeError::Values(_)));
	}
}
