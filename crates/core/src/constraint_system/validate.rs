// Copyright 2024-2025 Irreducible Inc.

use ark_ff::Field;
use r1cs_bridge_utils::ensure;
use tracing::instrument;

use super::{ConstraintSystem, Error, Term, Variable};
use crate::witness::Witness;

/// Values of every variable of a constraint system: the witness plus the solved products.
#[derive(Debug, Clone)]
pub struct Assignment<'a, F> {
	witness: &'a Witness<F>,
	internal: Vec<F>,
}

impl<'a, F: Field> Assignment<'a, F> {
	/// Checks the witness shape against `cs` and solves the internal product variables.
	pub fn solve(cs: &ConstraintSystem<F>, witness: &'a Witness<F>) -> Result<Self, Error> {
		ensure!(
			witness.n_public() == cs.num_public_inputs()
				&& witness.n_secret() == cs.num_secret_variables(),
			Error::WitnessSizeMismatch {
				expected_public: cs.num_public_inputs(),
				expected_secret: cs.num_secret_variables(),
				got_public: witness.n_public(),
				got_secret: witness.n_secret(),
			}
		);

		let mut assignment = Self {
			witness,
			internal: Vec::with_capacity(cs.num_internal_variables()),
		};
		for product in cs.products() {
			let value = assignment.value(product.left) * assignment.value(product.right);
			assignment.internal.push(value);
		}
		Ok(assignment)
	}

	pub fn value(&self, variable: Variable) -> F {
		match variable {
			Variable::One => F::one(),
			Variable::Public(index) => self.witness.public_values()[index],
			Variable::Secret(index) => self.witness.secret_values()[index],
			Variable::Internal(index) => self.internal[index],
		}
	}

	pub fn evaluate(&self, expression: &[Term<F>]) -> F {
		expression.iter().fold(F::zero(), |acc, term| {
			acc + term.coefficient * self.value(term.variable)
		})
	}

	pub fn internal_values(&self) -> &[F] {
		&self.internal
	}
}

/// Checks that `witness` satisfies every row of `cs`, reporting the first row that fails.
#[instrument(skip_all, name = "constraint_system::validate_witness", level = "debug")]
pub fn validate_witness<F: Field>(cs: &ConstraintSystem<F>, witness: &Witness<F>) -> Result<(), Error> {
	let assignment = Assignment::solve(cs, witness)?;
	for (index, constraint) in cs.constraints().iter().enumerate() {
		let l = assignment.evaluate(&constraint.l);
		let r = assignment.evaluate(&constraint.r);
		let o = assignment.evaluate(&constraint.o);
		ensure!(l * r == o, Error::Unsatisfied { index });
	}
	Ok(())
}
