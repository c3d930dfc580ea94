use std::fmt;

use serde::Serialize;

/// Diagnostic snapshot of cache contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SovInfo {
	/// Live claims.
	pub records: usize,
	/// Distinct keys in the system index.
	pub systems: usize,
	/// Distinct keys in the constellation index.
	pub constellations: usize,
	/// Distinct keys in the region index.
	pub regions: usize,
	/// Alliances holding at least one claim.
	pub alliances: usize,
	/// Live claims flagged as contested.
	pub contested: usize,
	/// Systems whose geography has been recorded since the last reset.
	pub known_systems: usize,
}

impl fmt::Display for SovInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} claims ({} contested) across {} systems, {} constellations, {} regions; {} alliances",
			self.records, self.contested, self.systems, self.constellations, self.regions, self.alliances
		)
	}
}
