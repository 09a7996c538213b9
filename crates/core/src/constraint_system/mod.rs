// Copyright 2024-2025 Irreducible Inc.

mod compile;
pub mod error;
pub mod validate;


use ark_ff::Field;
pub use compile::{compile, exact_circuit_size, CompileOptions, CompiledCircuit};
pub use error::{Error, IndexRole};
pub use validate::{validate_witness, Assignment};

/// Handle to a constraint system variable.
///
/// Public and secret handles index the public and secret sub-vectors of the witness. Internal
/// handles index the product definitions, whose values are solved from the assignment rather
/// than supplied by the witness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
	/// The constant `1`, always the first public wire.
	One,
	Public(usize),
	Secret(usize),
	Internal(usize),
}

impl Variable {
	pub const fn is_public(&self) -> bool {
		matches!(self, Self::One | Self::Public(_))
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term<F> {
	pub coefficient: F,
	pub variable: Variable,
}

impl<F: Field> Term<F> {
	pub fn unit(variable: Variable) -> Self {
		Self {
			coefficient: F::one(),
			variable,
		}
	}
}

pub type LinearExpression<F> = Vec<Term<F>>;

/// A rank-1 constraint `L · R = O`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct R1C<F> {
	pub l: LinearExpression<F>,
	pub r: LinearExpression<F>,
	pub o: LinearExpression<F>,
}

/// Definition of an internal variable: its value is `left · right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
	pub left: Variable,
	pub right: Variable,
}

/// An indexed rank-1 constraint system.
///
/// `inputs` is the allocated-variable table: entry `i` is the handle of raw value `i`, in input
/// order. It is append-only while compiling and never reordered afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintSystem<F> {
	inputs: Vec<Variable>,
	n_public: usize,
	n_secret: usize,
	products: Vec<Product>,
	constraints: Vec<R1C<F>>,
}

impl<F: Field> ConstraintSystem<F> {
	pub(crate) fn with_capacity(n_inputs: usize, n_constraints: usize) -> Self {
		Self {
			inputs: Vec::with_capacity(n_inputs),
			n_public: 0,
			n_secret: 0,
			products: Vec::new(),
			constraints: Vec::with_capacity(n_constraints),
		}
	}

	pub(crate) fn add_public_variable(&mut self) -> Variable {
		let variable = Variable::Public(self.n_public);
		self.n_public += 1;
		self.inputs.push(variable);
		variable
	}

	pub(crate) fn add_secret_variable(&mut self) -> Variable {
		let variable = Variable::Secret(self.n_secret);
		self.n_secret += 1;
		self.inputs.push(variable);
		variable
	}

	pub(crate) fn add_internal_variable(&mut self, product: Product) -> Variable {
		let variable = Variable::Internal(self.products.len());
		self.products.push(product);
		variable
	}

	pub(crate) fn add_constraint(&mut self, constraint: R1C<F>) {
		self.constraints.push(constraint);
	}

	/// Handle of the raw value at 0-based `index`.
	pub fn input_variable(&self, index: usize) -> Option<Variable> {
		self.inputs.get(index).copied()
	}

	pub fn input_variables(&self) -> &[Variable] {
		&self.inputs
	}

	/// Public inputs supplied by the witness, excluding the constant wire.
	pub const fn num_public_inputs(&self) -> usize {
		self.n_public
	}

	/// All public wires, including the constant `1`.
	pub const fn num_public_variables(&self) -> usize {
		self.n_public + 1
	}

	pub const fn num_secret_variables(&self) -> usize {
		self.n_secret
	}

	pub fn num_internal_variables(&self) -> usize {
		self.products.len()
	}

	pub fn num_constraints(&self) -> usize {
		self.constraints.len()
	}

	pub fn products(&self) -> &[Product] {
		&self.products
	}

	pub fn constraints(&self) -> &[R1C<F>] {
		&self.constraints
	}
}
