//! Classification of raw location identifiers.
//!
//! Static universe data allocates identifiers in fixed bands, so the band alone tells
//! whether a raw identifier names a region, a constellation, or a solar system.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::{ConstellationId, RegionId, SystemId};

const REGION_BAND: RangeInclusive<u32> = 10_000_000..=19_999_999;
const CONSTELLATION_BAND: RangeInclusive<u32> = 20_000_000..=29_999_999;
const SYSTEM_BAND: RangeInclusive<u32> = 30_000_000..=39_999_999;

/// A location that sovereignty can be queried for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Location {
	Region(RegionId),
	Constellation(ConstellationId),
	System(SystemId),
}

impl Location {
	/// Classifies a raw location identifier by its numeric band.
	///
	/// Returns `None` for identifiers outside the region, constellation, and solar
	/// system bands (stations, items, characters).
	pub fn classify(raw: u32) -> Option<Self> {
		if SYSTEM_BAND.contains(&raw) {
			Some(Self::System(SystemId(raw)))
		} else if CONSTELLATION_BAND.contains(&raw) {
			Some(Self::Constellation(ConstellationId(raw)))
		} else if REGION_BAND.contains(&raw) {
			Some(Self::Region(RegionId(raw)))
		} else {
			None
		}
	}

	/// Returns the raw identifier.
	pub fn raw(self) -> u32 {
		match self {
			Self::Region(id) => id.get(),
			Self::Constellation(id) => id.get(),
			Self::System(id) => id.get(),
		}
	}
}
