#![allow(dead_code)]

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};
use sov_primitives::{
	AllianceId, ClaimId, ConstellationId, Geography, RegionId, SovereigntyRecord, SystemId,
};

use super::SovIndex;
use crate::error::SovError;
use crate::store::FieldUpdate;

impl SovIndex {
	/// Cross-checks every map against the primary table.
	pub(crate) fn check_consistency(&self) -> Result<(), String> {
		if self.by_system.len() != self.claims.len() {
			return Err(format!(
				"system index has {} keys for {} claims",
				self.by_system.len(),
				self.claims.len()
			));
		}
		for (claim, record) in &self.claims {
			if record.claim_id != *claim {
				return Err(format!("claim {claim} stored under wrong key"));
			}
			if self.by_system.get(&record.system_id) != Some(claim) {
				return Err(format!("system {} does not point at claim {claim}", record.system_id));
			}
			if self.geography.get(&record.system_id) != Some(&record.geography()) {
				return Err(format!("system {} geography drifted", record.system_id));
			}
		}
		check_sets(&self.by_constellation, &self.claims, "constellation", |r| {
			Some(r.constellation_id)
		})?;
		check_sets(&self.by_region, &self.claims, "region", |r| Some(r.region_id))?;
		check_sets(&self.by_alliance, &self.claims, "alliance", |r| r.alliance_id)?;
		Ok(())
	}
}

/// Every set member must name a live claim carrying that key, and every live claim with a
/// key must be in exactly that set.
fn check_sets<K: Hash + Eq + Copy + Debug>(
	map: &FxHashMap<K, FxHashSet<ClaimId>>,
	claims: &FxHashMap<ClaimId, SovereigntyRecord>,
	label: &str,
	key_of: impl Fn(&SovereigntyRecord) -> Option<K>,
) -> Result<(), String> {
	let mut members = 0;
	for (key, set) in map {
		if set.is_empty() {
			return Err(format!("{label} index keeps empty set for {key:?}"));
		}
		for claim in set {
			let Some(record) = claims.get(claim) else {
				return Err(format!("{label} index references dead claim {claim}"));
			};
			if key_of(record) != Some(*key) {
				return Err(format!("{label} index files claim {claim} under stale key {key:?}"));
			}
		}
		members += set.len();
	}
	let keyed = claims.values().filter(|r| key_of(r).is_some()).count();
	if members != keyed {
		return Err(format!("{label} index holds {members} entries for {keyed} keyed claims"));
	}
	Ok(())
}

pub(crate) fn geo(constellation: u32, region: u32) -> Geography {
	Geography {
		constellation_id: ConstellationId(constellation),
		region_id: RegionId(region),
	}
}

pub(crate) fn claim(claim: u32, system: u32, alliance: Option<u32>) -> SovereigntyRecord {
	let mut record = SovereigntyRecord::new(ClaimId(claim), SystemId(system), geo(system / 10, system / 100));
	record.alliance_id = alliance.map(AllianceId);
	record
}

/// Invariant: superseding a system's claim removes the old claim from every map.
pub(crate) fn inv_supersede_leaves_no_trace() {
	let mut index = SovIndex::default();
	index.insert(claim(5, 20, Some(1))).unwrap();

	let superseded = index.insert(claim(6, 20, Some(2))).unwrap();
	assert_eq!(superseded.map(|r| r.claim_id), Some(ClaimId(5)));

	assert!(index.get_by_claim(ClaimId(5)).is_none());
	assert_eq!(index.get_by_system(SystemId(20)).map(|r| r.claim_id), Some(ClaimId(6)));
	assert_eq!(index.by_alliance(AllianceId(1)).count(), 0);
	assert_eq!(index.by_alliance(AllianceId(2)).count(), 1);
	assert_eq!(index.by_constellation(ConstellationId(2)).count(), 1);
	assert_eq!(index.len(), 1);
	index.check_consistency().unwrap();
}

#[cfg_attr(test, test)]
pub(crate) fn test_supersede_leaves_no_trace() {
	inv_supersede_leaves_no_trace()
}

/// Invariant: alliance re-keying unlinks the old key before the write and links the new
/// key after.
pub(crate) fn inv_alliance_rekey_old_then_new() {
	let mut index = SovIndex::default();
	index.insert(claim(1, 10, Some(7))).unwrap();
	index.insert(claim(2, 11, Some(7))).unwrap();

	index.update(SystemId(10), FieldUpdate::Alliance(Some(AllianceId(8)))).unwrap();
	assert_eq!(index.by_alliance(AllianceId(7)).map(|r| r.claim_id).collect::<Vec<_>>(), vec![ClaimId(2)]);
	assert_eq!(index.by_alliance(AllianceId(8)).map(|r| r.claim_id).collect::<Vec<_>>(), vec![ClaimId(1)]);
	index.check_consistency().unwrap();

	index.update(SystemId(11), FieldUpdate::Alliance(None)).unwrap();
	assert_eq!(index.by_alliance(AllianceId(7)).count(), 0);
	assert_eq!(index.alliances().collect::<Vec<_>>(), vec![AllianceId(8)]);
	index.check_consistency().unwrap();
}

#[cfg_attr(test, test)]
pub(crate) fn test_alliance_rekey_old_then_new() {
	inv_alliance_rekey_old_then_new()
}

/// Invariant: a rejected insert leaves every map untouched, including the superseded
/// record it would have displaced.
pub(crate) fn inv_rejected_insert_is_atomic() {
	let mut index = SovIndex::default();
	index.insert(claim(1, 10, Some(7))).unwrap();
	index.insert(claim(2, 20, Some(8))).unwrap();
	let before = index.info();

	// Claim 1 is live on system 10; reusing it on system 20 must not evict claim 2.
	let err = index.insert(claim(1, 20, Some(9))).unwrap_err();
	assert!(matches!(err, SovError::DuplicateClaim(ClaimId(1))));
	assert_eq!(index.get_by_system(SystemId(20)).map(|r| r.claim_id), Some(ClaimId(2)));
	assert_eq!(index.info(), before);

	let mut drifted = claim(3, 20, None);
	drifted.region_id = RegionId(999);
	let err = index.insert(drifted).unwrap_err();
	assert!(matches!(err, SovError::GeographyMismatch { .. }));
	assert_eq!(index.get_by_system(SystemId(20)).map(|r| r.claim_id), Some(ClaimId(2)));
	index.check_consistency().unwrap();
}

#[cfg_attr(test, test)]
pub(crate) fn test_rejected_insert_is_atomic() {
	inv_rejected_insert_is_atomic()
}

/// Invariant: a released system keeps its geography until the index is reset.
pub(crate) fn inv_geography_fixed_across_release() {
	let mut index = SovIndex::default();
	index.insert(claim(1, 10, None)).unwrap();
	index.remove_system(SystemId(10)).unwrap();

	let mut drifted = claim(2, 10, None);
	drifted.constellation_id = ConstellationId(42);
	assert!(matches!(
		index.insert(drifted),
		Err(SovError::GeographyMismatch { system: SystemId(10), .. })
	));
	assert_eq!(index.info().known_systems, 1);

	index.clear();
	let mut relocated = claim(2, 10, None);
	relocated.constellation_id = ConstellationId(42);
	index.insert(relocated).unwrap();
	index.check_consistency().unwrap();
}

#[cfg_attr(test, test)]
pub(crate) fn test_geography_fixed_across_release() {
	inv_geography_fixed_across_release()
}
