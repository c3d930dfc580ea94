//! Cache configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or field types.
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Tunables for [`crate::SovereigntyCache`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
	/// Forward every applied mutation to the store.
	pub persist_writes: bool,
	/// Pre-sized capacity of the claim table and system index.
	pub initial_capacity: usize,
	/// Emit an index summary after a successful bulk load.
	pub log_info_on_init: bool,
}

impl Default for CacheConfig {
	fn default() -> Self {
		Self {
			persist_writes: true,
			initial_capacity: 1024,
			log_info_on_init: true,
		}
	}
}

impl CacheConfig {
	pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(content)?)
	}

	/// Reads and parses a TOML config file. Missing keys take their defaults.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&content)
	}
}
