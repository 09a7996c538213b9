// Copyright 2024-2025 Irreducible Inc.

//! Fixed-width big-endian codecs for prime field elements.

use ark_ff::{BigInteger, PrimeField};
use r1cs_bridge_utils::{
	ensure,
	serialization::{self, decode_hex, encode_hex, read_length_prefixed, write_length_prefixed},
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error("field element has {got} bytes, expected {expected}")]
	WidthMismatch { expected: usize, got: usize },

	#[error("0x{value} is not below the field modulus")]
	OutOfRange { value: String },

	#[error("{0}")]
	Serialization(#[from] serialization::Error),
}

/// Number of bytes in the encoding of one element of `F`.
pub fn byte_width<F: PrimeField>() -> usize {
	(F::MODULUS_BIT_SIZE as usize).div_ceil(8)
}

/// Canonical big-endian encoding, exactly [`byte_width`] bytes long.
pub fn encode_field_element<F: PrimeField>(element: &F) -> Vec<u8> {
	let width = byte_width::<F>();
	let mut bytes = element.into_bigint().to_bytes_be();
	// The limb representation may be wider than the modulus needs; the excess is always zero.
	bytes.drain(..bytes.len() - width);
	bytes
}

/// Decodes a big-endian element, rejecting anything that is not already reduced.
pub fn decode_field_element<F: PrimeField>(bytes: &[u8]) -> Result<F, Error> {
	let width = byte_width::<F>();
	ensure!(
		bytes.len() == width,
		Error::WidthMismatch {
			expected: width,
			got: bytes.len(),
		}
	);

	let element = F::from_be_bytes_mod_order(bytes);
	ensure!(
		encode_field_element(&element) == bytes,
		Error::OutOfRange {
			value: encode_hex(bytes),
		}
	);
	Ok(element)
}

pub fn decode_field_element_hex<F: PrimeField>(text: &str) -> Result<F, Error> {
	decode_field_element(&decode_hex(text)?)
}

pub fn encode_field_element_hex<F: PrimeField>(element: &F) -> String {
	encode_hex(encode_field_element(element))
}

/// Decodes a hex-encoded, length-prefixed vector of elements.
pub fn decode_values<F: PrimeField>(text: &str) -> Result<Vec<F>, Error> {
	let bytes = decode_hex(text)?;
	read_length_prefixed(bytes.as_slice(), byte_width::<F>())?
		.iter()
		.map(|chunk| decode_field_element(chunk))
		.collect()
}

pub fn encode_values<F: PrimeField>(values: &[F]) -> Result<String, Error> {
	let chunks = values.iter().map(encode_field_element).collect::<Vec<_>>();
	let mut bytes = Vec::new();
	write_length_prefixed(&mut bytes, byte_width::<F>(), chunks.iter().map(Vec::as_slice))?;
	Ok(encode_hex(bytes))
}
