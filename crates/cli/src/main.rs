// Copyright 2024-2025 Irreducible Inc.

use std::{
	fs,
	path::{Path, PathBuf},
	process::ExitCode,
};

use anyhow::{Context, Result};
use ark_bn254::Fr;
use clap::{Parser, Subcommand};
use r1cs_bridge_core::{compile, Api, CompileOptions, Config, RawCircuit};
use r1cs_bridge_utils::tracing::init_tracing;
use tracing::{info, warn};

/// Compile raw R1CS circuits and prove or verify them with Groth16 over BN254.
///
/// Keys and proofs are read and written as hex text.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
	/// Seed the setup randomness. Keys made this way are insecure.
	#[arg(long, global = true)]
	seed: Option<u64>,
	/// One constraint per gate, constant terms ignored, products left unconstrained.
	#[arg(long, global = true)]
	legacy: bool,
	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Generate a proving key and a verifying key.
	Preprocess {
		circuit: PathBuf,
		#[arg(long)]
		proving_key: PathBuf,
		#[arg(long)]
		verifying_key: PathBuf,
	},
	/// Prove the circuit's own values. Without a proving key a throwaway one is generated.
	Prove {
		circuit: PathBuf,
		#[arg(long)]
		proving_key: Option<PathBuf>,
		/// Where to write the proof. Printed to stdout otherwise.
		#[arg(short, long)]
		output: Option<PathBuf>,
	},
	/// Check a proof against the circuit's public values. Exits with 1 when it is rejected.
	Verify {
		circuit: PathBuf,
		proof: PathBuf,
		/// Without a verifying key it is regenerated, which only matches under the same --seed.
		#[arg(long)]
		verifying_key: Option<PathBuf>,
	},
	/// Print the number of constraints the circuit compiles to.
	Size { circuit: PathBuf },
	/// Print the shape of the compiled circuit as JSON.
	Inspect { circuit: PathBuf },
}

impl Args {
	fn config(&self) -> Result<Config> {
		let mut config = Config::from_env()?;
		if let Some(seed) = self.seed {
			config.rng_seed = Some(seed);
		}
		if self.legacy {
			config.compile = CompileOptions::legacy();
		}
		Ok(config)
	}
}

fn read_text(path: &Path) -> Result<String> {
	let text =
		fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
	Ok(text.trim().to_string())
}

fn write_text(path: &Path, text: &str) -> Result<()> {
	fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

fn inspect(circuit: &str, options: CompileOptions) -> Result<serde_json::Value> {
	let raw = RawCircuit::<Fr>::from_json(circuit)?;
	let compiled = compile(&raw, options)?;
	let cs = &compiled.constraint_system;
	Ok(serde_json::json!({
		"gates": raw.gates.len(),
		"values": raw.values.len(),
		"declared_variables": raw.num_variables,
		"declared_constraints": raw.num_constraints,
		"public_variables": cs.num_public_variables(),
		"secret_variables": cs.num_secret_variables(),
		"internal_variables": cs.num_internal_variables(),
		"constraints": cs.num_constraints(),
	}))
}

fn main() -> Result<ExitCode> {
	let args = Args::parse();
	init_tracing();

	let config = args.config()?;
	if args.seed.is_some() {
		warn!("randomness is seeded, do not use these keys outside of tests");
	}
	let api = Api::new(config);

	match &args.command {
		Command::Preprocess {
			circuit,
			proving_key,
			verifying_key,
		} => {
			let (pk, vk) = api.preprocess(&read_text(circuit)?)?;
			write_text(proving_key, &pk)?;
			write_text(verifying_key, &vk)?;
			info!(proving_key = %proving_key.display(), verifying_key = %verifying_key.display(), "wrote keys");
		}
		Command::Prove {
			circuit,
			proving_key,
			output,
		} => {
			let circuit = read_text(circuit)?;
			let proof = match proving_key {
				Some(path) => api.prove_with_pk(&circuit, &read_text(path)?)?,
				None => {
					warn!("proving with a throwaway key");
					api.prove_with_meta(&circuit)?
				}
			};
			match output {
				Some(path) => write_text(path, &proof)?,
				None => println!("{proof}"),
			}
		}
		Command::Verify {
			circuit,
			proof,
			verifying_key,
		} => {
			let circuit = read_text(circuit)?;
			let proof = read_text(proof)?;
			let verified = match verifying_key {
				Some(path) => api.verify_with_vk(&circuit, &proof, &read_text(path)?)?,
				None => api.verify_with_meta(&circuit, &proof)?,
			};
			println!("{}", if verified { "valid" } else { "invalid" });
			if !verified {
				return Ok(ExitCode::FAILURE);
			}
		}
		Command::Size { circuit } => {
			println!("{}", api.exact_circuit_size(&read_text(circuit)?)?);
		}
		Command::Inspect { circuit } => {
			let shape = inspect(&read_text(circuit)?, api.compile_options())?;
			println!("{}", serde_json::to_string_pretty(&shape)?);
		}
	}
	Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	const SAMPLE: &str = include_str!("../../core/tests/fixtures/acir_sample.json");

	#[test]
	fn test_args() {
		Args::command().debug_assert();

		let args = Args::try_parse_from(["r1cs-bridge", "size", "circuit.json", "--legacy", "--seed", "3"])
			.unwrap();
		assert!(args.legacy);
		assert_eq!(args.seed, Some(3));
		assert!(matches!(args.command, Command::Size { .. }));
	}

	#[test]
	fn test_inspect_sample() {
		let shape = inspect(SAMPLE, CompileOptions::legacy()).unwrap();
		assert_eq!(shape["public_variables"], 2);
		assert_eq!(shape["secret_variables"], 5);
		assert_eq!(shape["constraints"], 4);
		assert_eq!(shape["declared_constraints"], 11);

		let shape = inspect(SAMPLE, CompileOptions::default()).unwrap();
		assert_eq!(shape["constraints"], 6);
	}
}
