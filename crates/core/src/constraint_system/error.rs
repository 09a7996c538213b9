// Copyright 2024-2025 Irreducible Inc.

use std::fmt;

/// Which raw-circuit field carried an out-of-range index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexRole {
	Multiplicand,
	Multiplier,
	Sum,
	PublicInput,
}

impl fmt::Display for IndexRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Multiplicand => "multiplicand",
			Self::Multiplier => "multiplier",
			Self::Sum => "add-term sum",
			Self::PublicInput => "public input position",
		};
		f.write_str(name)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("{role} index {index} is out of range for {len} values{}", gate_suffix(.gate))]
	IndexOutOfRange {
		role: IndexRole,
		gate: Option<usize>,
		index: usize,
		len: usize,
	},

	#[error(
		"witness has {got_public} public and {got_secret} secret values, expected {expected_public} and {expected_secret}"
	)]
	WitnessSizeMismatch {
		expected_public: usize,
		expected_secret: usize,
		got_public: usize,
		got_secret: usize,
	},

	#[error("constraint {index} is not satisfied by the witness")]
	Unsatisfied { index: usize },
}

fn gate_suffix(gate: &Option<usize>) -> String {
	gate.map(|gate| format!(" (gate {gate})"))
		.unwrap_or_default()
}
