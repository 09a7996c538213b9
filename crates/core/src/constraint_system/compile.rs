// Copyright 2024-2025 Irreducible Inc.

use ark_ff::PrimeField;
use r1cs_bridge_utils::{bail, ensure};
use tracing::{debug, instrument};

use super::{ConstraintSystem, Error, IndexRole, Product, Term, Variable, R1C};
use crate::{
	raw::RawCircuit,
	witness::{Partition, Witness},
};

/// Switches between sound compilation and the historical one-row-per-gate behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
	/// Append each gate's constant term as `constant · ONE` to its row.
	pub fold_constant_term: bool,
	/// Emit `multiplicand · multiplier = product` for every multiplication term.
	pub constrain_products: bool,
}

impl Default for CompileOptions {
	fn default() -> Self {
		Self {
			fold_constant_term: true,
			constrain_products: true,
		}
	}
}

impl CompileOptions {
	/// Exactly one row per gate, constant terms ignored, products left unconstrained.
	///
	/// Such systems accept witnesses that do not satisfy the source circuit. Only useful to
	/// reproduce keys and proofs made by earlier wrappers.
	pub const fn legacy() -> Self {
		Self {
			fold_constant_term: false,
			constrain_products: false,
		}
	}
}

/// A compiled constraint system together with the value partition made while allocating it.
///
/// The partition is the only way to build a [`Witness`] in the order the system expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledCircuit<F> {
	pub constraint_system: ConstraintSystem<F>,
	pub partition: Partition<F>,
}

impl<F: PrimeField> CompiledCircuit<F> {
	pub fn witness(&self) -> Witness<F> {
		Witness::assemble(&self.partition)
	}
}

fn lookup(
	table: &[Variable],
	index: usize,
	role: IndexRole,
	gate: usize,
) -> Result<Variable, Error> {
	match table.get(index) {
		Some(&variable) => Ok(variable),
		None => bail!(Error::IndexOutOfRange {
			role,
			gate: Some(gate),
			index,
			len: table.len(),
		}),
	}
}

/// Compiles a raw circuit into a rank-1 constraint system.
///
/// Every raw value gets one input variable, allocated in input order: public when its 1-based
/// position is listed in `public_inputs`, secret otherwise. Each gate then becomes one row
/// `1 · ONE = Σ terms` with an empty output, i.e. it asserts that its terms sum to zero.
/// Multiplication terms go through a fresh internal variable holding the product.
#[instrument(
	skip_all,
	name = "constraint_system::compile",
	fields(gates = raw.gates.len(), values = raw.values.len())
)]
pub fn compile<F: PrimeField>(
	raw: &RawCircuit<F>,
	options: CompileOptions,
) -> Result<CompiledCircuit<F>, Error> {
	let n_values = raw.values.len();
	for &position in &raw.public_inputs {
		ensure!(
			(1..=n_values).contains(&position),
			Error::IndexOutOfRange {
				role: IndexRole::PublicInput,
				gate: None,
				index: position,
				len: n_values,
			}
		);
	}

	// Declared counts are hints only.
	let n_products = raw.gates.iter().map(|gate| gate.mul_terms.len()).sum::<usize>();
	let n_rows = raw.gates.len() + if options.constrain_products { n_products } else { 0 };
	let mut cs = ConstraintSystem::with_capacity(n_values, n_rows);
	let mut partition = Partition::with_capacity(n_values);
	for (index, &value) in raw.values.iter().enumerate() {
		if raw.is_public(index) {
			cs.add_public_variable();
			partition.push_public(value);
		} else {
			cs.add_secret_variable();
			partition.push_private(value);
		}
	}
	let table = cs.input_variables().to_vec();

	for (gate_index, gate) in raw.gates.iter().enumerate() {
		let mut terms = Vec::with_capacity(gate.mul_terms.len() + gate.add_terms.len() + 1);

		for mul_term in &gate.mul_terms {
			let left = lookup(&table, mul_term.multiplicand, IndexRole::Multiplicand, gate_index)?;
			let right = lookup(&table, mul_term.multiplier, IndexRole::Multiplier, gate_index)?;
			let product = cs.add_internal_variable(Product { left, right });
			if options.constrain_products {
				cs.add_constraint(R1C {
					l: vec![Term::unit(left)],
					r: vec![Term::unit(right)],
					o: vec![Term::unit(product)],
				});
			}
			terms.push(Term {
				coefficient: mul_term.coefficient,
				variable: product,
			});
		}

		for add_term in &gate.add_terms {
			terms.push(Term {
				coefficient: add_term.coefficient,
				variable: lookup(&table, add_term.sum, IndexRole::Sum, gate_index)?,
			});
		}

		if options.fold_constant_term && !gate.constant_term.is_zero() {
			terms.push(Term {
				coefficient: gate.constant_term,
				variable: Variable::One,
			});
		}

		cs.add_constraint(R1C {
			l: vec![Term::unit(Variable::One)],
			r: terms,
			o: Vec::new(),
		});
	}

	debug!(
		public = cs.num_public_variables(),
		secret = cs.num_secret_variables(),
		internal = cs.num_internal_variables(),
		constraints = cs.num_constraints(),
		"compiled constraint system"
	);
	if raw.num_variables != n_values + 1 {
		debug!(
			declared = raw.num_variables,
			actual = n_values + 1,
			"declared variable count differs"
		);
	}
	if cs.num_constraints() != raw.num_constraints {
		debug!(
			declared = raw.num_constraints,
			actual = cs.num_constraints(),
			"declared constraint count differs"
		);
	}

	Ok(CompiledCircuit {
		constraint_system: cs,
		partition,
	})
}

/// Number of rows the compiled system has under `options`.
pub fn exact_circuit_size<F: PrimeField>(
	raw: &RawCircuit<F>,
	options: CompileOptions,
) -> Result<usize, Error> {
	Ok(compile(raw, options)?.constraint_system.num_constraints())
}
