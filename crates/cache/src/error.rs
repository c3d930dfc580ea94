use sov_primitives::{ClaimId, Geography, SystemId};

use crate::store::StoreError;

/// Errors returned by cache queries and mutations.
#[derive(Debug, thiserror::Error)]
pub enum SovError {
	/// No live claim for the system.
	#[error("no sovereignty claim for system {0}")]
	NotFound(SystemId),

	/// No live record with this claim id.
	#[error("no sovereignty claim with id {0}")]
	ClaimNotFound(ClaimId),

	/// Insert collided with an existing primary key.
	#[error("claim {0} already exists")]
	DuplicateClaim(ClaimId),

	/// A claim carried different geographic ancestors than the cache already holds
	/// for its system.
	#[error("system {system} geography mismatch: cached {cached:?}, incoming {incoming:?}")]
	GeographyMismatch {
		system: SystemId,
		cached: Geography,
		incoming: Geography,
	},

	#[error("initialization failed: {0}")]
	Initialization(#[from] InitError),

	#[error("store error: {0}")]
	Store(#[from] StoreError),
}

/// Fatal bulk-load errors. The cache keeps its previous contents when one is returned.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
	#[error("store unavailable during load: {0}")]
	Store(#[source] StoreError),

	#[error("store returned claim {0} twice")]
	DuplicateClaim(ClaimId),

	#[error("store bound system {system} to claims {first} and {second}")]
	DuplicateSystem {
		system: SystemId,
		first: ClaimId,
		second: ClaimId,
	},

	#[error("cannot reserve room for {requested} claims")]
	Capacity {
		requested: usize,
		#[source]
		source: std::collections::TryReserveError,
	},
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, SovError>;
