use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(pub u32);

		impl $name {
			/// Returns the raw numeric identifier.
			#[inline]
			pub const fn get(self) -> u32 {
				self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<u32> for $name {
			fn from(raw: u32) -> Self {
				Self(raw)
			}
		}
	};
}

id_type!(
	/// Primary key of a sovereignty claim. Unique across all live records.
	ClaimId
);
id_type!(
	/// Solar system covered by a claim.
	SystemId
);
id_type!(
	/// Constellation containing a solar system.
	ConstellationId
);
id_type!(
	/// Region containing a constellation.
	RegionId
);
id_type!(
	/// Organization holding sovereignty.
	AllianceId
);
id_type!(
	/// Item identifier of a hub, jammer, or beacon structure.
	StructureId
);
