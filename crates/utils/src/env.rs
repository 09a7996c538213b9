// Copyright 2024-2025 Irreducible Inc.

use std::{env, str::FromStr};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("environment variable {name} has invalid value {value:?}")]
	InvalidValue { name: String, value: String },
	#[error("environment variable {name} is not valid unicode")]
	NotUnicode { name: String },
}

/// Read boolean flag from the environment variable.
pub fn boolean_env_flag_set(flag: &str) -> bool {
	match env::var(flag) {
		Ok(val) => ["1", "on", "ON", "true", "TRUE", "yes", "YES"].contains(&val.as_str()),
		Err(_) => false,
	}
}

/// Parses an optional environment variable.
///
/// An unset variable yields `Ok(None)`, a set one that fails to parse is an error.
pub fn parse_env_var<T: FromStr>(name: &str) -> Result<Option<T>, Error> {
	match env::var(name) {
		Ok(value) => value
			.trim()
			.parse::<T>()
			.map(Some)
			.map_err(|_| Error::InvalidValue {
				name: name.to_string(),
				value,
			}),
		Err(env::VarError::NotPresent) => Ok(None),
		Err(env::VarError::NotUnicode(_)) => Err(Error::NotUnicode {
			name: name.to_string(),
		}),
	}
}
