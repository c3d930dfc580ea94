//! Process-wide sovereignty cache.
//!
//! # Concurrency
//!
//! - **Reads:** shared lock; any number run in parallel and return owned copies.
//! - **Writes:** exclusive lock held for the whole multi-index update, so no reader sees
//!   indices that disagree.
//! - **Store I/O:** never under the state lock. Write-through happens after the guard
//!   drops; [`SovereigntyCache::update_claim`] reads the store before taking it.
//! - **Write order:** each mutation holds the write-order mutex from before it takes the
//!   state lock until its write-through returns, so the store sees writes in the order
//!   they were applied. Writers queue on that mutex without holding the state lock, so
//!   readers never wait on store I/O.
//!
//! # Lifecycle
//!
//! Construct once at startup, call [`SovereigntyCache::initialize`], then share by
//! `Arc`. [`SovereigntyCache::clear`] and [`SovereigntyCache::close`] are meant for
//! controlled reload and shutdown windows.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use sov_primitives::{
	AllianceId, ClaimId, Location, SovereigntyRecord, StructureId, StructureSlot, SystemId,
	SystemSovereignty,
};
use tracing::{debug, error, info, trace, warn};

use crate::config::CacheConfig;
use crate::error::{InitError, Result, SovError};
use crate::index::SovIndex;
use crate::info::SovInfo;
use crate::store::{FieldUpdate, SovereigntyStore, StoreError};

/// Index plus lifecycle flag, guarded together.
#[derive(Default)]
struct CacheState {
	index: SovIndex,
	initialized: bool,
}

/// Concurrent multi-index mirror of sovereignty records.
///
/// Thread-safe; share across workers via `Arc<SovereigntyCache>`.
pub struct SovereigntyCache {
	state: RwLock<CacheState>,
	/// Serializes apply + write-through. Always taken before `state`.
	write_order: Mutex<()>,
	store: Arc<dyn SovereigntyStore>,
	config: CacheConfig,
}

impl SovereigntyCache {
	/// Creates an empty cache over `store` with default configuration.
	pub fn new(store: Arc<dyn SovereigntyStore>) -> Self {
		Self::with_config(store, CacheConfig::default())
	}

	pub fn with_config(store: Arc<dyn SovereigntyStore>, config: CacheConfig) -> Self {
		Self {
			state: RwLock::new(CacheState::default()),
			write_order: Mutex::new(()),
			store,
			config,
		}
	}

	/// Returns true once a bulk load has succeeded and no clear has followed.
	pub fn is_initialized(&self) -> bool {
		self.state.read().initialized
	}

	/// Bulk-loads every row from the store, replacing current contents.
	///
	/// The new index is built and validated before the lock is taken. On error the
	/// previous contents stay in place untouched.
	pub fn initialize(&self) -> Result<usize> {
		let _order = self.write_order.lock();
		let index = self
			.load_index()
			.inspect_err(|error| error!(%error, "sovereignty cache initialization failed"))?;
		let count = index.len();

		{
			let mut state = self.state.write();
			state.index = index;
			state.initialized = true;
		}

		info!(claims = count, "sovereignty cache initialized");
		if self.config.log_info_on_init {
			self.log_info();
		}
		Ok(count)
	}

	fn load_index(&self) -> std::result::Result<SovIndex, InitError> {
		let rows = self.store.load_all().map_err(InitError::Store)?;
		SovIndex::from_records(rows, self.config.initial_capacity)
	}

	/// Empties every index.
	pub fn clear(&self) {
		let mut state = self.state.write();
		state.index.clear();
		state.initialized = false;
	}

	/// Logs final contents and clears. Called at shutdown.
	pub fn close(&self) {
		info!(info = %self.info(), "closing sovereignty cache");
		self.clear();
	}

	/// Returns the sovereignty view for a system.
	pub fn get_system_sovereignty(&self, system: SystemId) -> Result<SystemSovereignty> {
		let state = self.state.read();
		state
			.index
			.get_by_system(system)
			.map(SovereigntyRecord::to_system_view)
			.ok_or(SovError::NotFound(system))
	}

	/// Returns the full record for a system.
	pub fn get_sovereignty_data(&self, system: SystemId) -> Result<SovereigntyRecord> {
		let state = self.state.read();
		state
			.index
			.get_by_system(system)
			.cloned()
			.ok_or(SovError::NotFound(system))
	}

	/// Returns the record for a claim id.
	pub fn get_claim(&self, claim: ClaimId) -> Result<SovereigntyRecord> {
		let state = self.state.read();
		state
			.index
			.get_by_claim(claim)
			.cloned()
			.ok_or(SovError::ClaimNotFound(claim))
	}

	/// Returns the holding alliance, or `None` for unclaimed and uncached systems.
	pub fn get_system_alliance_id(&self, system: SystemId) -> Option<AllianceId> {
		self.state.read().index.get_by_system(system)?.alliance_id
	}

	/// Returns the systems held by an alliance, sorted. Empty if it holds none.
	pub fn get_alliance_systems(&self, alliance: AllianceId) -> Vec<SystemId> {
		let mut systems: Vec<_> = {
			let state = self.state.read();
			state.index.by_alliance(alliance).map(|r| r.system_id).collect()
		};
		systems.sort_unstable();
		systems
	}

	/// Returns every holding alliance with its systems.
	pub fn alliance_holdings(&self) -> BTreeMap<AllianceId, Vec<SystemId>> {
		let state = self.state.read();
		state
			.index
			.alliances()
			.map(|alliance| {
				let mut systems: Vec<_> = state.index.by_alliance(alliance).map(|r| r.system_id).collect();
				systems.sort_unstable();
				(alliance, systems)
			})
			.collect()
	}

	/// Returns the beacons attached to an alliance's claims, sorted. Claims without a
	/// beacon contribute nothing.
	pub fn get_alliance_beacons(&self, alliance: AllianceId) -> Vec<StructureId> {
		let mut beacons: Vec<_> = {
			let state = self.state.read();
			state.index.by_alliance(alliance).filter_map(|r| r.beacon_id).collect()
		};
		beacons.sort_unstable();
		beacons.dedup();
		beacons
	}

	/// Returns the records under a raw location identifier.
	///
	/// The identifier's band selects the index: a system yields at most one record, a
	/// constellation or region every record inside it. Unrecognized identifiers yield
	/// nothing.
	pub fn get_current_sov_data(&self, location_id: u32) -> Vec<SovereigntyRecord> {
		match Location::classify(location_id) {
			Some(location) => self.sovereignty_at(location),
			None => {
				trace!(location_id, "sovereignty lookup for unclassified location");
				Vec::new()
			}
		}
	}

	/// Returns the records under a location, sorted by system.
	pub fn sovereignty_at(&self, location: Location) -> Vec<SovereigntyRecord> {
		let mut records: Vec<_> = {
			let state = self.state.read();
			match location {
				Location::System(system) => state.index.get_by_system(system).cloned().into_iter().collect(),
				Location::Constellation(c) => state.index.by_constellation(c).cloned().collect(),
				Location::Region(r) => state.index.by_region(r).cloned().collect(),
			}
		};
		records.sort_unstable_by_key(|r| r.system_id);
		records
	}

	/// Inserts a new claim.
	///
	/// A live claim on the same system is superseded in the same critical section and
	/// returned. Fails with [`SovError::DuplicateClaim`] if the claim id is already live.
	pub fn add_sov_claim(&self, record: SovereigntyRecord) -> Result<Option<SovereigntyRecord>> {
		let _order = self.write_order.lock();
		let superseded = self.state.write().index.insert(record.clone())?;

		if let Some(prev) = &superseded {
			debug!(
				system = %record.system_id,
				old_claim = %prev.claim_id,
				new_claim = %record.claim_id,
				"superseded sovereignty claim"
			);
			self.persist("release", record.system_id, |store| {
				store.persist_release(prev.system_id, prev.claim_id)
			});
		}
		self.persist("claim", record.system_id, |store| store.persist_claim(&record));
		Ok(superseded)
	}

	/// Releases the claim on a system. Releasing an unclaimed system is a no-op.
	pub fn remove_sov_claim(&self, system: SystemId) -> Option<SovereigntyRecord> {
		let _order = self.write_order.lock();
		let removed = self.state.write().index.remove_system(system);
		match &removed {
			Some(record) => {
				debug!(%system, claim = %record.claim_id, "released sovereignty claim");
				self.persist("release", system, |store| store.persist_release(system, record.claim_id));
			}
			None => trace!(%system, "release of unclaimed system"),
		}
		removed
	}

	pub fn mark_contested(&self, system: SystemId, contested: bool) -> Result<()> {
		self.apply_field(system, FieldUpdate::Contested(contested))
	}

	pub fn update_system_hub_id(&self, system: SystemId, hub: Option<StructureId>) -> Result<()> {
		self.apply_field(system, FieldUpdate::Structure(StructureSlot::Hub, hub))
	}

	pub fn update_system_jammer_id(&self, system: SystemId, jammer: Option<StructureId>) -> Result<()> {
		self.apply_field(system, FieldUpdate::Structure(StructureSlot::Jammer, jammer))
	}

	pub fn update_system_beacon_id(&self, system: SystemId, beacon: Option<StructureId>) -> Result<()> {
		self.apply_field(system, FieldUpdate::Structure(StructureSlot::Beacon, beacon))
	}

	/// Transfers a claim to another alliance (or to none) without changing its claim id.
	pub fn update_system_alliance_id(&self, system: SystemId, alliance: Option<AllianceId>) -> Result<()> {
		self.apply_field(system, FieldUpdate::Alliance(alliance))
	}

	/// Re-reads one system from the store and makes the cache match it.
	///
	/// If the store has no row, the cached claim (if any) is dropped and
	/// [`SovError::NotFound`] is returned.
	pub fn update_claim(&self, system: SystemId) -> Result<SovereigntyRecord> {
		// Held across the read so it sees every write-through applied before it.
		let _order = self.write_order.lock();
		let fresh = self.store.load_system(system)?;
		if let Some(record) = &fresh
			&& record.system_id != system
		{
			return Err(StoreError::Malformed(format!(
				"row for system {system} names system {}",
				record.system_id
			))
			.into());
		}

		let mut state = self.state.write();
		match fresh {
			Some(record) => {
				let previous = state.index.replace(record.clone())?;
				drop(state);
				let changed = previous.as_ref() != Some(&record);
				debug!(%system, claim = %record.claim_id, changed, "resynchronized sovereignty claim");
				Ok(record)
			}
			None => {
				let removed = state.index.remove_system(system);
				drop(state);
				if let Some(record) = removed {
					debug!(%system, claim = %record.claim_id, "dropped claim missing from store");
				}
				Err(SovError::NotFound(system))
			}
		}
	}

	/// Returns the number of live claims.
	pub fn len(&self) -> usize {
		self.state.read().index.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns a diagnostic snapshot of index sizes.
	pub fn info(&self) -> SovInfo {
		self.state.read().index.info()
	}

	/// Emits [`SovereigntyCache::info`] at info level.
	pub fn log_info(&self) {
		let info = self.info();
		info!(
			records = info.records,
			systems = info.systems,
			constellations = info.constellations,
			regions = info.regions,
			alliances = info.alliances,
			contested = info.contested,
			known_systems = info.known_systems,
			"sovereignty cache info"
		);
	}

	fn apply_field(&self, system: SystemId, update: FieldUpdate) -> Result<()> {
		let _order = self.write_order.lock();
		{
			let mut state = self.state.write();
			state.index.update(system, update)?;
		}
		trace!(%system, ?update, "updated sovereignty field");
		self.persist("field", system, |store| store.persist_field_update(system, update));
		Ok(())
	}

	fn persist(
		&self,
		op: &'static str,
		system: SystemId,
		write: impl FnOnce(&dyn SovereigntyStore) -> std::result::Result<(), StoreError>,
	) {
		if !self.config.persist_writes {
			return;
		}
		if let Err(error) = write(self.store.as_ref()) {
			warn!(op, %system, %error, "sovereignty write-through failed; cached state kept");
		}
	}
}
