// Copyright 2023-2025 Irreducible Inc.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber: a fmt layer on stderr filtered by `RUST_LOG`.
///
/// Defaults to `info` when `RUST_LOG` is unset. Calling it more than once is harmless.
pub fn init_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().with_writer(std::io::stderr))
		.try_init();
}
