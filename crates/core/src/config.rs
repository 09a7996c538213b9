// Copyright 2024-2025 Irreducible Inc.

use r1cs_bridge_utils::env::{self, boolean_env_flag_set, parse_env_var};
use tracing::warn;

use crate::{backend::Randomness, constraint_system::CompileOptions};

pub const SEED_VAR: &str = "R1CS_BRIDGE_SEED";
pub const IGNORE_CONSTANT_TERM_VAR: &str = "R1CS_BRIDGE_IGNORE_CONSTANT_TERM";
pub const UNCONSTRAINED_PRODUCTS_VAR: &str = "R1CS_BRIDGE_UNCONSTRAINED_PRODUCTS";

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Env(#[from] env::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
	pub compile: CompileOptions,
	/// Seed for setup randomness. Unset means the operating system generator.
	pub rng_seed: Option<u64>,
}

impl Config {
	/// Reads the configuration from `R1CS_BRIDGE_*` environment variables.
	pub fn from_env() -> Result<Self, Error> {
		let config = Self {
			compile: CompileOptions {
				fold_constant_term: !boolean_env_flag_set(IGNORE_CONSTANT_TERM_VAR),
				constrain_products: !boolean_env_flag_set(UNCONSTRAINED_PRODUCTS_VAR),
			},
			rng_seed: parse_env_var(SEED_VAR)?,
		};
		if config.compile != CompileOptions::default() {
			warn!(options = ?config.compile, "compiling without the full set of constraints");
		}
		if config.rng_seed.is_some() {
			warn!("setup randomness is seeded, keys are not secure");
		}
		Ok(config)
	}

	pub const fn randomness(&self) -> Randomness {
		match self.rng_seed {
			Some(seed) => Randomness::Seeded(seed),
			None => Randomness::Os,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::env::{remove_var, set_var};

	use assert_matches::assert_matches;

	use super::*;

	// The only test touching these variables, so nothing races on them.
	#[test]
	fn test_from_env() {
		for name in [SEED_VAR, IGNORE_CONSTANT_TERM_VAR, UNCONSTRAINED_PRODUCTS_VAR] {
			remove_var(name);
		}
		let config = Config::from_env().unwrap();
		assert_eq!(config, Config::default());
		assert_eq!(config.randomness(), Randomness::Os);

		set_var(SEED_VAR, "17");
		set_var(IGNORE_CONSTANT_TERM_VAR, "1");
		set_var(UNCONSTRAINED_PRODUCTS_VAR, "true");
		let config = Config::from_env().unwrap();
		assert_eq!(config.compile, CompileOptions::legacy());
		assert_eq!(config.randomness(), Randomness::Seeded(17));

		set_var(SEED_VAR, "-1");
		assert_matches!(
			Config::from_env(),
			Err(Error::Env(env::Error::InvalidValue { .. }))
		);

		for name in [SEED_VAR, IGNORE_CONSTANT_TERM_VAR, UNCONSTRAINED_PRODUCTS_VAR] {
			remove_var(name);
		}
	}
}
