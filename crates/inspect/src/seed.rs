//! Seed file parsing.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use sov_primitives::SovereigntyRecord;

/// Rows to preload into the in-memory store, as `[[claims]]` tables.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedFile {
	#[serde(default)]
	pub claims: Vec<SovereigntyRecord>,
}

impl SeedFile {
	pub fn parse(content: &str) -> anyhow::Result<Self> {
		toml::from_str(content).context("invalid seed file")
	}

	pub fn load(path: &Path) -> anyhow::Result<Self> {
		let content = std::fs::read_to_string(path).with_context(|| format!("reading seed {}", path.display()))?;
		Self::parse(&content).with_context(|| format!("parsing seed {}", path.display()))
	}
}
