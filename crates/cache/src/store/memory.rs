use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use sov_primitives::{ClaimId, SovereigntyRecord, SystemId};

use super::{FieldUpdate, SovereigntyStore, StoreError};

/// In-process [`SovereigntyStore`] keyed by system.
///
/// Backs the inspect tool and tests. [`MemoryStore::set_offline`] makes every call fail
/// with [`StoreError::Unavailable`] to simulate an unreachable database.
#[derive(Default)]
pub struct MemoryStore {
	rows: Mutex<FxHashMap<SystemId, SovereigntyRecord>>,
	offline: AtomicBool,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a store holding the given rows. Later rows for the same system win.
	pub fn from_records(records: impl IntoIterator<Item = SovereigntyRecord>) -> Self {
		let rows = records.into_iter().map(|r| (r.system_id, r)).collect();
		Self {
			rows: Mutex::new(rows),
			offline: AtomicBool::new(false),
		}
	}

	pub fn set_offline(&self, offline: bool) {
		self.offline.store(offline, Ordering::SeqCst);
	}

	/// Overwrites a row directly, bypassing the cache.
	pub fn put(&self, record: SovereigntyRecord) {
		self.rows.lock().insert(record.system_id, record);
	}

	/// Deletes a row directly, bypassing the cache.
	pub fn delete(&self, system: SystemId) -> Option<SovereigntyRecord> {
		self.rows.lock().remove(&system)
	}

	pub fn get(&self, system: SystemId) -> Option<SovereigntyRecord> {
		self.rows.lock().get(&system).cloned()
	}

	pub fn len(&self) -> usize {
		self.rows.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn check_online(&self) -> Result<(), StoreError> {
		if self.offline.load(Ordering::SeqCst) {
			return Err(StoreError::Unavailable("memory store offline".into()));
		}
		Ok(())
	}
}

impl SovereigntyStore for MemoryStore {
	fn load_all(&self) -> Result<Vec<SovereigntyRecord>, StoreError> {
		self.check_online()?;
		let mut rows: Vec<_> = self.rows.lock().values().cloned().collect();
		rows.sort_by_key(|r| r.claim_id);
		Ok(rows)
	}

	fn load_system(&self, system: SystemId) -> Result<Option<SovereigntyRecord>, StoreError> {
		self.check_online()?;
		Ok(self.get(system))
	}

	fn persist_claim(&self, record: &SovereigntyRecord) -> Result<(), StoreError> {
		self.check_online()?;
		self.put(record.clone());
		Ok(())
	}

	fn persist_release(&self, system: SystemId, claim: ClaimId) -> Result<(), StoreError> {
		self.check_online()?;
		let mut rows = self.rows.lock();
		if rows.get(&system).is_some_and(|r| r.claim_id == claim) {
			rows.remove(&system);
		}
		Ok(())
	}

	fn persist_field_update(&self, system: SystemId, update: FieldUpdate) -> Result<(), StoreError> {
		self.check_online()?;
		let mut rows = self.rows.lock();
		let row = rows
			.get_mut(&system)
			.ok_or_else(|| StoreError::Malformed(format!("no row for system {system}")))?;
		update.apply(row);
		Ok(())
	}
}
