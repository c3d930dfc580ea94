//! Durable store collaborator.
//!
//! The cache treats the store as a remote, fallible dependency: it is read in full at
//! startup, re-read per system by [`crate::SovereigntyCache::update_claim`], and sent one
//! write per applied mutation. Write failures never roll back cached state.

mod memory;

pub use memory::MemoryStore;
use sov_primitives::{AllianceId, ClaimId, SovereigntyRecord, StructureId, StructureSlot, SystemId};

/// Errors reported by a [`SovereigntyStore`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
	/// The store could not be reached.
	#[error("store unavailable: {0}")]
	Unavailable(String),
	/// The store returned a row that could not be interpreted.
	#[error("malformed row: {0}")]
	Malformed(String),
}

/// A single-field change forwarded to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUpdate {
	Contested(bool),
	Structure(StructureSlot, Option<StructureId>),
	Alliance(Option<AllianceId>),
}

impl FieldUpdate {
	/// Applies the change to a record in place.
	pub fn apply(self, record: &mut SovereigntyRecord) {
		match self {
			FieldUpdate::Contested(contested) => record.contested = contested,
			FieldUpdate::Structure(slot, id) => record.set_structure(slot, id),
			FieldUpdate::Alliance(alliance) => record.alliance_id = alliance,
		}
	}
}

/// Durable source of truth for sovereignty rows.
pub trait SovereigntyStore: Send + Sync {
	/// Returns every current row.
	fn load_all(&self) -> Result<Vec<SovereigntyRecord>, StoreError>;

	/// Returns the current row for one system, if any.
	fn load_system(&self, system: SystemId) -> Result<Option<SovereigntyRecord>, StoreError>;

	/// Writes a newly established claim, replacing any row for the same system.
	fn persist_claim(&self, record: &SovereigntyRecord) -> Result<(), StoreError>;

	/// Deletes a released claim.
	fn persist_release(&self, system: SystemId, claim: ClaimId) -> Result<(), StoreError>;

	/// Writes one changed field of a live claim.
	fn persist_field_update(&self, system: SystemId, update: FieldUpdate) -> Result<(), StoreError>;
}
