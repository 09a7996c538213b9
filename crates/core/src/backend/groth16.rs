// Copyright 2024-2025 Irreducible Inc.

use std::marker::PhantomData;

use ark_bn254::Bn254;
use ark_ec::pairing::Pairing;
use ark_ff::PrimeField;
use ark_groth16::{Groth16, Proof, ProvingKey, VerifyingKey};
use ark_relations::r1cs::{
	ConstraintSynthesizer, ConstraintSystemRef, LinearCombination, SynthesisError,
	Variable as ArkVariable,
};
use ark_snark::SNARK;
use rand::rngs::OsRng;
use tracing::{debug, instrument};

use super::{Backend, Error, Randomness};
use crate::{
	constraint_system::{validate_witness, Assignment, ConstraintSystem, Term, Variable},
	witness::{PublicWitness, Witness},
};

/// Groth16 over the pairing `E`, as implemented by arkworks.
#[derive(Debug, Clone, Copy)]
pub struct Groth16Backend<E: Pairing = Bn254> {
	randomness: Randomness,
	_marker: PhantomData<E>,
}

impl<E: Pairing> Default for Groth16Backend<E> {
	fn default() -> Self {
		Self::new(Randomness::default())
	}
}

impl<E: Pairing> Groth16Backend<E> {
	pub const fn new(randomness: Randomness) -> Self {
		Self {
			randomness,
			_marker: PhantomData,
		}
	}

	pub const fn randomness(&self) -> Randomness {
		self.randomness
	}
}

impl<E: Pairing> Backend<E::ScalarField> for Groth16Backend<E> {
	type ProvingKey = ProvingKey<E>;
	type VerifyingKey = VerifyingKey<E>;
	type Proof = Proof<E>;

	#[instrument(skip_all, name = "groth16::setup")]
	fn setup(
		&self,
		cs: &ConstraintSystem<E::ScalarField>,
	) -> Result<(Self::ProvingKey, Self::VerifyingKey), Error> {
		let keys = Groth16::<E>::circuit_specific_setup(
			Synthesizer::setup(cs),
			&mut self.randomness.setup_rng(),
		)?;
		debug!(public_inputs = keys.1.gamma_abc_g1.len() - 1, "generated keys");
		Ok(keys)
	}

	#[instrument(skip_all, name = "groth16::prove")]
	fn prove(
		&self,
		cs: &ConstraintSystem<E::ScalarField>,
		proving_key: &Self::ProvingKey,
		witness: &Witness<E::ScalarField>,
	) -> Result<Self::Proof, Error> {
		// arkworks would only notice an unsatisfied system through a debug assertion.
		validate_witness(cs, witness)?;
		let assignment = Assignment::solve(cs, witness)?;
		// Blinding always comes from the OS, whatever the setup randomness.
		let proof =
			Groth16::<E>::prove(proving_key, Synthesizer::prove(cs, &assignment), &mut OsRng)?;
		Ok(proof)
	}

	#[instrument(skip_all, name = "groth16::verify")]
	fn verify(
		&self,
		proof: &Self::Proof,
		verifying_key: &Self::VerifyingKey,
		public_witness: &PublicWitness<E::ScalarField>,
	) -> Result<bool, Error> {
		let verified = Groth16::<E>::verify(verifying_key, public_witness.values(), proof)?;
		debug!(verified, "verified proof");
		Ok(verified)
	}
}

/// Replays a [`ConstraintSystem`] into an arkworks constraint system.
///
/// Variables are allocated public first, then secret, then internal, each group in index order,
/// which is the layout [`Witness`] uses. Without an assignment only the shape is synthesized.
struct Synthesizer<'a, F: PrimeField> {
	cs: &'a ConstraintSystem<F>,
	assignment: Option<&'a Assignment<'a, F>>,
}

impl<'a, F: PrimeField> Synthesizer<'a, F> {
	const fn setup(cs: &'a ConstraintSystem<F>) -> Self {
		Self {
			cs,
			assignment: None,
		}
	}

	const fn prove(cs: &'a ConstraintSystem<F>, assignment: &'a Assignment<'a, F>) -> Self {
		Self {
			cs,
			assignment: Some(assignment),
		}
	}
}

impl<F: PrimeField> ConstraintSynthesizer<F> for Synthesizer<'_, F> {
	fn generate_constraints(self, target: ConstraintSystemRef<F>) -> Result<(), SynthesisError> {
		let assignment = self.assignment;
		let value = |variable: Variable| {
			move || {
				assignment
					.map(|assignment| assignment.value(variable))
					.ok_or(SynthesisError::AssignmentMissing)
			}
		};

		let public = (0..self.cs.num_public_inputs())
			.map(|index| target.new_input_variable(value(Variable::Public(index))))
			.collect::<Result<Vec<_>, _>>()?;
		let secret = (0..self.cs.num_secret_variables())
			.map(|index| target.new_witness_variable(value(Variable::Secret(index))))
			.collect::<Result<Vec<_>, _>>()?;
		let internal = (0..self.cs.num_internal_variables())
			.map(|index| target.new_witness_variable(value(Variable::Internal(index))))
			.collect::<Result<Vec<_>, _>>()?;

		let to_ark = |variable: Variable| match variable {
			Variable::One => ArkVariable::One,
			Variable::Public(index) => public[index],
			Variable::Secret(index) => secret[index],
			Variable::Internal(index) => internal[index],
		};
		let linear_combination = |expression: &[Term<F>]| {
			expression
				.iter()
				.fold(LinearCombination::zero(), |lc, term| {
					lc + (term.coefficient, to_ark(term.variable))
				})
		};

		for constraint in self.cs.constraints() {
			target.enforce_constraint(
				linear_combination(&constraint.l),
				linear_combination(&constraint.r),
				linear_combination(&constraint.o),
			)?;
		}
		Ok(())
	}
}
