// Copyright 2024-2025 Irreducible Inc.

use crate::{backend, constraint_system, raw::DecodeError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("decode error: {0}")]
	Decode(#[from] DecodeError),

	#[error("constraint system error: {0}")]
	ConstraintSystem(#[from] constraint_system::Error),

	#[error("backend error: {0}")]
	Backend(#[from] backend::Error),
}
