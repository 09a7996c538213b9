// Copyright 2024-2025 Irreducible Inc.

use ark_relations::r1cs::SynthesisError;
use ark_serialize::SerializationError;
use r1cs_bridge_utils::serialization;

use crate::constraint_system;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("witness rejected before proving: {0}")]
	Unsatisfied(#[from] constraint_system::Error),

	#[error("synthesis error: {0}")]
	Synthesis(#[from] SynthesisError),

	#[error("malformed key or proof: {0}")]
	Serialization(#[from] SerializationError),

	#[error("malformed key or proof text: {0}")]
	Encoding(#[from] serialization::Error),

	#[error("{count} trailing bytes after key or proof")]
	TrailingBytes { count: usize },
}
