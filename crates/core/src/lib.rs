// Copyright 2024-2025 Irreducible Inc.

//! Compiles serialized "raw R1CS" circuits into indexed rank-1 constraint systems, assembles the
//! matching witnesses, and drives a Groth16 backend through the setup, prove and verify flows.
//!
//! The compiler and the witness assembler agree on one ordering: every raw value is allocated in
//! input order, public values first in the witness, then the secret ones. [`CompiledCircuit`]
//! carries the partition produced during allocation so the witness can only be built from it.

pub mod api;
pub mod backend;
pub mod config;
pub mod constraint_system;
mod error;
pub mod field;
pub mod pipeline;
pub mod raw;
pub mod witness;

pub use api::Api;
pub use config::Config;
pub use constraint_system::{compile, CompileOptions, CompiledCircuit, ConstraintSystem};
pub use error::Error;
pub use raw::{AddTerm, DecodeError, MulTerm, RawCircuit, RawGate};
pub use witness::{Partition, PublicWitness, Witness};
