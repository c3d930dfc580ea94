#![cfg_attr(doc, allow(rustdoc::private_intra_doc_links))]
//! Multi-key sovereignty index.
//!
//! # Purpose
//!
//! [`SovIndex`] owns every live [`SovereigntyRecord`] and answers lookups along five keys:
//! claim, system, constellation, region, and alliance. It is a plain single-threaded
//! structure; [`crate::SovereigntyCache`] wraps it in a lock.
//!
//! # Layout
//!
//! | Map | Key | Value |
//! |-----|-----|-------|
//! | `claims` | [`ClaimId`] | the record (primary table) |
//! | `by_system` | [`SystemId`] | one [`ClaimId`] |
//! | `by_constellation` | [`ConstellationId`] | set of [`ClaimId`] |
//! | `by_region` | [`RegionId`] | set of [`ClaimId`] |
//! | `by_alliance` | [`AllianceId`] | set of [`ClaimId`] |
//!
//! Secondary sets are pruned when they become empty. `geography` remembers the
//! ancestors of every system seen since the last reset, including released ones.
//!
//! # Invariants
//!
//! - Claim ids are unique; at most one live record per system.
//!   - Enforced in: [`SovIndex::insert`], [`SovIndex::replace`], [`SovIndex::from_records`].
//!   - Tested by: `invariants::test_supersede_leaves_no_trace`
//! - Every record is reachable from exactly the secondary sets its fields name.
//!   - Enforced in: `SovIndex::link`, `SovIndex::unlink`, [`SovIndex::update`].
//!   - Tested by: `invariants::test_alliance_rekey_old_then_new`
//! - A rejected mutation changes nothing.
//!   - Enforced in: `SovIndex::supersede` (all checks run before the first write).
//!   - Tested by: `invariants::test_rejected_insert_is_atomic`
//! - A system's geography never changes while cached.
//!   - Enforced in: `SovIndex::check_geography`.
//!   - Tested by: `invariants::test_geography_fixed_across_release`

use std::collections::TryReserveError;
use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};
use sov_primitives::{
	AllianceId, ClaimId, ConstellationId, Geography, RegionId, SovereigntyRecord, SystemId,
};

use crate::error::{InitError, SovError};
use crate::info::SovInfo;
use crate::store::FieldUpdate;

/// Five-way index over the live record set.
#[derive(Debug, Default)]
pub(crate) struct SovIndex {
	claims: FxHashMap<ClaimId, SovereigntyRecord>,
	by_system: FxHashMap<SystemId, ClaimId>,
	by_constellation: FxHashMap<ConstellationId, FxHashSet<ClaimId>>,
	by_region: FxHashMap<RegionId, FxHashSet<ClaimId>>,
	by_alliance: FxHashMap<AllianceId, FxHashSet<ClaimId>>,
	geography: FxHashMap<SystemId, Geography>,
}

impl SovIndex {
	/// Creates an empty index with room for `capacity` claims in the per-claim maps.
	///
	/// Fails instead of aborting when the hint cannot be allocated.
	pub(crate) fn with_capacity(capacity: usize) -> Result<Self, InitError> {
		let mut index = Self::default();
		let reserve = |result: Result<(), TryReserveError>| {
			result.map_err(|source| InitError::Capacity { requested: capacity, source })
		};
		reserve(index.claims.try_reserve(capacity))?;
		reserve(index.by_system.try_reserve(capacity))?;
		reserve(index.geography.try_reserve(capacity))?;
		Ok(index)
	}

	/// Builds an index from a bulk load.
	///
	/// Unlike [`SovIndex::insert`], a second row for an already-loaded system is an error
	/// rather than a supersede: the store must not hold two live claims for one system.
	pub(crate) fn from_records(
		records: impl IntoIterator<Item = SovereigntyRecord>,
		capacity: usize,
	) -> Result<Self, InitError> {
		let mut index = Self::with_capacity(capacity)?;
		for record in records {
			if index.claims.contains_key(&record.claim_id) {
				return Err(InitError::DuplicateClaim(record.claim_id));
			}
			if let Some(&first) = index.by_system.get(&record.system_id) {
				return Err(InitError::DuplicateSystem {
					system: record.system_id,
					first,
					second: record.claim_id,
				});
			}
			index.link(record);
		}
		Ok(index)
	}

	pub(crate) fn len(&self) -> usize {
		self.claims.len()
	}

	pub(crate) fn clear(&mut self) {
		self.claims.clear();
		self.by_system.clear();
		self.by_constellation.clear();
		self.by_region.clear();
		self.by_alliance.clear();
		self.geography.clear();
	}

	pub(crate) fn get_by_system(&self, system: SystemId) -> Option<&SovereigntyRecord> {
		let claim = self.by_system.get(&system)?;
		self.claims.get(claim)
	}

	pub(crate) fn get_by_claim(&self, claim: ClaimId) -> Option<&SovereigntyRecord> {
		self.claims.get(&claim)
	}

	pub(crate) fn by_constellation(
		&self,
		constellation: ConstellationId,
	) -> impl Iterator<Item = &SovereigntyRecord> + '_ {
		self.resolve(self.by_constellation.get(&constellation))
	}

	pub(crate) fn by_region(&self, region: RegionId) -> impl Iterator<Item = &SovereigntyRecord> + '_ {
		self.resolve(self.by_region.get(&region))
	}

	pub(crate) fn by_alliance(
		&self,
		alliance: AllianceId,
	) -> impl Iterator<Item = &SovereigntyRecord> + '_ {
		self.resolve(self.by_alliance.get(&alliance))
	}

	/// Returns every alliance holding at least one claim.
	pub(crate) fn alliances(&self) -> impl Iterator<Item = AllianceId> + '_ {
		self.by_alliance.keys().copied()
	}

	/// Inserts a new claim, superseding any live claim on the same system.
	///
	/// Fails with [`SovError::DuplicateClaim`] if the claim id is already live anywhere.
	/// Returns the superseded record.
	pub(crate) fn insert(
		&mut self,
		record: SovereigntyRecord,
	) -> Result<Option<SovereigntyRecord>, SovError> {
		self.supersede(record, false)
	}

	/// Like [`SovIndex::insert`], but the incoming claim id may already be live on the
	/// same system (a refresh of that claim).
	pub(crate) fn replace(
		&mut self,
		record: SovereigntyRecord,
	) -> Result<Option<SovereigntyRecord>, SovError> {
		self.supersede(record, true)
	}

	/// Removes the live claim for a system from every map.
	pub(crate) fn remove_system(&mut self, system: SystemId) -> Option<SovereigntyRecord> {
		let claim = *self.by_system.get(&system)?;
		self.unlink(claim)
	}

	/// Applies a single-field change to the live claim for `system`.
	///
	/// Alliance changes re-key the alliance index: the old key is unlinked before the
	/// field is written, the new key is linked after.
	pub(crate) fn update(
		&mut self,
		system: SystemId,
		update: FieldUpdate,
	) -> Result<&SovereigntyRecord, SovError> {
		let claim = *self.by_system.get(&system).ok_or(SovError::NotFound(system))?;
		let record = self
			.claims
			.get_mut(&claim)
			.ok_or(SovError::NotFound(system))?;

		if let FieldUpdate::Alliance(new) = update {
			if let Some(old) = record.alliance_id {
				unlink_key(&mut self.by_alliance, old, claim);
			}
			record.alliance_id = new;
			if let Some(new) = new {
				link_key(&mut self.by_alliance, new, claim);
			}
		} else {
			update.apply(record);
		}
		Ok(record)
	}

	pub(crate) fn info(&self) -> SovInfo {
		SovInfo {
			records: self.claims.len(),
			systems: self.by_system.len(),
			constellations: self.by_constellation.len(),
			regions: self.by_region.len(),
			alliances: self.by_alliance.len(),
			contested: self.claims.values().filter(|r| r.contested).count(),
			known_systems: self.geography.len(),
		}
	}

	fn supersede(
		&mut self,
		record: SovereigntyRecord,
		allow_refresh: bool,
	) -> Result<Option<SovereigntyRecord>, SovError> {
		if let Some(existing) = self.claims.get(&record.claim_id)
			&& !(allow_refresh && existing.system_id == record.system_id)
		{
			return Err(SovError::DuplicateClaim(record.claim_id));
		}
		self.check_geography(&record)?;

		let superseded = self.remove_system(record.system_id);
		self.link(record);
		Ok(superseded)
	}

	fn check_geography(&self, record: &SovereigntyRecord) -> Result<(), SovError> {
		match self.geography.get(&record.system_id) {
			Some(&cached) if cached != record.geography() => Err(SovError::GeographyMismatch {
				system: record.system_id,
				cached,
				incoming: record.geography(),
			}),
			_ => Ok(()),
		}
	}

	fn link(&mut self, record: SovereigntyRecord) {
		let claim = record.claim_id;
		self.by_system.insert(record.system_id, claim);
		link_key(&mut self.by_constellation, record.constellation_id, claim);
		link_key(&mut self.by_region, record.region_id, claim);
		if let Some(alliance) = record.alliance_id {
			link_key(&mut self.by_alliance, alliance, claim);
		}
		self.geography
			.entry(record.system_id)
			.or_insert_with(|| record.geography());
		self.claims.insert(claim, record);
	}

	fn unlink(&mut self, claim: ClaimId) -> Option<SovereigntyRecord> {
		let record = self.claims.remove(&claim)?;
		if self.by_system.get(&record.system_id) == Some(&claim) {
			self.by_system.remove(&record.system_id);
		}
		unlink_key(&mut self.by_constellation, record.constellation_id, claim);
		unlink_key(&mut self.by_region, record.region_id, claim);
		if let Some(alliance) = record.alliance_id {
			unlink_key(&mut self.by_alliance, alliance, claim);
		}
		Some(record)
	}

	fn resolve<'a>(
		&'a self,
		set: Option<&'a FxHashSet<ClaimId>>,
	) -> impl Iterator<Item = &'a SovereigntyRecord> + 'a {
		set.into_iter()
			.flatten()
			.filter_map(|claim| self.claims.get(claim))
	}
}

fn link_key<K: Hash + Eq>(map: &mut FxHashMap<K, FxHashSet<ClaimId>>, key: K, claim: ClaimId) {
	map.entry(key).or_default().insert(claim);
}

fn unlink_key<K: Hash + Eq>(map: &mut FxHashMap<K, FxHashSet<ClaimId>>, key: K, claim: ClaimId) {
	if let Some(set) = map.get_mut(&key) {
		set.remove(&claim);
		if set.is_empty() {
			map.remove(&key);
		}
	}
}

#[cfg(test)]
pub(crate) mod invariants;
