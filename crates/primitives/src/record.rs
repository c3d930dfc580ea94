//! The sovereignty record entity.

use serde::{Deserialize, Serialize};

use crate::{AllianceId, ClaimId, ConstellationId, RegionId, StructureId, SystemId};

/// Geographic ancestors of a solar system.
///
/// Copied from static universe data when a record is created and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Geography {
	pub constellation_id: ConstellationId,
	pub region_id: RegionId,
}

/// Auxiliary structure attached to a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureSlot {
	/// Infrastructure hub.
	Hub,
	/// Cynosural jammer.
	Jammer,
	/// Cynosural beacon.
	Beacon,
}

/// Current sovereignty state of one solar system.
///
/// `claim_id` is the primary key. `constellation_id` and `region_id` are denormalized
/// copies of static topology; everything else may change over the life of the claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SovereigntyRecord {
	pub claim_id: ClaimId,
	pub system_id: SystemId,
	pub constellation_id: ConstellationId,
	pub region_id: RegionId,
	/// Holding alliance; `None` while unclaimed or NPC-held.
	#[serde(default)]
	pub alliance_id: Option<AllianceId>,
	#[serde(default)]
	pub contested: bool,
	#[serde(default)]
	pub hub_id: Option<StructureId>,
	#[serde(default)]
	pub jammer_id: Option<StructureId>,
	#[serde(default)]
	pub beacon_id: Option<StructureId>,
}

impl SovereigntyRecord {
	/// Creates an unclaimed, uncontested record with no structures.
	pub fn new(claim_id: ClaimId, system_id: SystemId, geography: Geography) -> Self {
		Self {
			claim_id,
			system_id,
			constellation_id: geography.constellation_id,
			region_id: geography.region_id,
			alliance_id: None,
			contested: false,
			hub_id: None,
			jammer_id: None,
			beacon_id: None,
		}
	}

	/// Sets the holding alliance.
	pub fn with_alliance(mut self, alliance_id: AllianceId) -> Self {
		self.alliance_id = Some(alliance_id);
		self
	}

	/// Attaches a structure to the given slot.
	pub fn with_structure(mut self, slot: StructureSlot, id: StructureId) -> Self {
		self.set_structure(slot, Some(id));
		self
	}

	pub fn geography(&self) -> Geography {
		Geography {
			constellation_id: self.constellation_id,
			region_id: self.region_id,
		}
	}

	pub fn structure(&self, slot: StructureSlot) -> Option<StructureId> {
		match slot {
			StructureSlot::Hub => self.hub_id,
			StructureSlot::Jammer => self.jammer_id,
			StructureSlot::Beacon => self.beacon_id,
		}
	}

	/// Writes one structure slot. Other slots are untouched.
	pub fn set_structure(&mut self, slot: StructureSlot, id: Option<StructureId>) {
		match slot {
			StructureSlot::Hub => self.hub_id = id,
			StructureSlot::Jammer => self.jammer_id = id,
			StructureSlot::Beacon => self.beacon_id = id,
		}
	}

	/// Projects the record into the per-system view handed to query callers.
	pub fn to_system_view(&self) -> SystemSovereignty {
		SystemSovereignty {
			claim_id: self.claim_id,
			system_id: self.system_id,
			alliance_id: self.alliance_id,
			contested: self.contested,
			hub_id: self.hub_id,
			jammer_id: self.jammer_id,
			beacon_id: self.beacon_id,
		}
	}
}

/// Per-system sovereignty view without the denormalized geography.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSovereignty {
	pub claim_id: ClaimId,
	pub system_id: SystemId,
	pub alliance_id: Option<AllianceId>,
	pub contested: bool,
	pub hub_id: Option<StructureId>,
	pub jammer_id: Option<StructureId>,
	pub beacon_id: Option<StructureId>,
}
