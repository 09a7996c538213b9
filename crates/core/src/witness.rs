// Copyright 2024-2025 Irreducible Inc.

use r1cs_bridge_utils::ensure;
use tracing::{debug, instrument};

use crate::constraint_system::Error;

/// The raw values split by visibility, each half in the order its variables were allocated.
///
/// Only the compiler creates partitions, so a witness assembled from one always lines up with
/// the constraint system compiled alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<F> {
	public: Vec<F>,
	private: Vec<F>,
}

impl<F> Partition<F> {
	pub(crate) fn with_capacity(capacity: usize) -> Self {
		Self {
			public: Vec::new(),
			private: Vec::with_capacity(capacity),
		}
	}

	pub(crate) fn push_public(&mut self, value: F) {
		self.public.push(value);
	}

	pub(crate) fn push_private(&mut self, value: F) {
		self.private.push(value);
	}

	pub fn public(&self) -> &[F] {
		&self.public
	}

	pub fn private(&self) -> &[F] {
		&self.private
	}

	pub fn n_public(&self) -> usize {
		self.public.len()
	}

	pub fn n_private(&self) -> usize {
		self.private.len()
	}

	pub fn len(&self) -> usize {
		self.public.len() + self.private.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Full assignment handed to the prover: the public values, then the secret ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Witness<F> {
	values: Vec<F>,
	n_public: usize,
}

impl<F: Clone> Witness<F> {
	#[instrument(skip_all, name = "witness::assemble", level = "debug")]
	pub fn assemble(partition: &Partition<F>) -> Self {
		let values = partition
			.public
			.iter()
			.chain(&partition.private)
			.cloned()
			.collect::<Vec<_>>();
		debug!(public = partition.n_public(), secret = partition.n_private(), "assembled witness");

		Self {
			values,
			n_public: partition.n_public(),
		}
	}

	/// Builds a witness from separately supplied halves, checking them against the expected
	/// counts.
	pub fn from_parts(
		public: Vec<F>,
		private: Vec<F>,
		n_public: usize,
		n_private: usize,
	) -> Result<Self, Error> {
		ensure!(
			public.len() == n_public && private.len() == n_private,
			Error::WitnessSizeMismatch {
				expected_public: n_public,
				expected_secret: n_private,
				got_public: public.len(),
				got_secret: private.len(),
			}
		);
		let mut values = public;
		values.extend(private);
		Ok(Self { values, n_public })
	}

	/// The sub-vector a verifier sees.
	pub fn public(&self) -> PublicWitness<F> {
		PublicWitness(self.public_values().to_vec())
	}
}

impl<F> Witness<F> {
	pub fn public_values(&self) -> &[F] {
		&self.values[..self.n_public]
	}

	pub fn secret_values(&self) -> &[F] {
		&self.values[self.n_public..]
	}

	/// Every value, public ones first.
	pub fn vector(&self) -> &[F] {
		&self.values
	}

	pub const fn n_public(&self) -> usize {
		self.n_public
	}

	pub fn n_secret(&self) -> usize {
		self.values.len() - self.n_public
	}
}

/// Public sub-vector of a [`Witness`], excluding the constant wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicWitness<F>(Vec<F>);

impl<F> PublicWitness<F> {
	pub fn values(&self) -> &[F] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn into_inner(self) -> Vec<F> {
		self.0
	}
}
