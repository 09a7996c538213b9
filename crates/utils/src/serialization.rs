// Copyright 2024-2025 Irreducible Inc.

//! Byte-level codecs shared by the circuit wire format.
//!
//! Field-element vectors travel as a 4-byte big-endian element count followed by the elements,
//! each padded to the same fixed width. The whole blob is then hex-encoded for transport as text.

use bytes::{Buf, BufMut};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error("Write buffer is full")]
	WriteBufferFull,
	#[error("Not enough data in read buffer to deserialize")]
	NotEnoughBytes,
	#[error("{count} trailing bytes after the last element")]
	TrailingBytes { count: usize },
	#[error("chunk has width {got}, expected {expected}")]
	ChunkWidthMismatch { expected: usize, got: usize },
	#[error("{count} elements do not fit a u32 length prefix")]
	LengthOverflow { count: usize },
	#[error("invalid hex: {0}")]
	Hex(#[from] hex::FromHexError),
}

const LENGTH_PREFIX_BYTES: usize = 4;

/// Reads a length-prefixed vector of `width`-byte chunks.
///
/// The buffer must hold exactly the announced number of chunks; leftovers are rejected.
pub fn read_length_prefixed(mut read_buf: impl Buf, width: usize) -> Result<Vec<Vec<u8>>, Error> {
	if read_buf.remaining() < LENGTH_PREFIX_BYTES {
		return Err(Error::NotEnoughBytes);
	}
	let count = read_buf.get_u32() as usize;

	// Checked so a hostile prefix cannot request a huge allocation.
	let needed = count.checked_mul(width).ok_or(Error::NotEnoughBytes)?;
	if read_buf.remaining() < needed {
		return Err(Error::NotEnoughBytes);
	}

	let chunks = (0..count)
		.map(|_| {
			let mut chunk = vec![0u8; width];
			read_buf.copy_to_slice(&mut chunk);
			chunk
		})
		.collect();

	if read_buf.has_remaining() {
		return Err(Error::TrailingBytes {
			count: read_buf.remaining(),
		});
	}
	Ok(chunks)
}

/// Writes `chunks` behind a 4-byte big-endian count. Every chunk must be `width` bytes long.
pub fn write_length_prefixed<'a>(
	mut write_buf: impl BufMut,
	width: usize,
	chunks: impl ExactSizeIterator<Item = &'a [u8]>,
) -> Result<(), Error> {
	let count = chunks.len();
	let prefix = u32::try_from(count).map_err(|_| Error::LengthOverflow { count })?;
	if write_buf.remaining_mut() < count.saturating_mul(width).saturating_add(LENGTH_PREFIX_BYTES) {
		return Err(Error::WriteBufferFull);
	}

	write_buf.put_u32(prefix);
	for chunk in chunks {
		if chunk.len() != width {
			return Err(Error::ChunkWidthMismatch {
				expected: width,
				got: chunk.len(),
			});
		}
		write_buf.put_slice(chunk);
	}
	Ok(())
}

/// Decodes hex text, tolerating an optional `0x` prefix and surrounding whitespace.
pub fn decode_hex(text: &str) -> Result<Vec<u8>, Error> {
	let text = text.trim();
	let text = text.strip_prefix("0x").unwrap_or(text);
	Ok(hex::decode(text)?)
}

pub fn encode_hex(bytes: impl AsRef<[u8]>) -> String {
	hex::encode(bytes)
}
