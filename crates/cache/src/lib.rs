#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Concurrent, multi-indexed sovereignty cache.
//!
//! [`SovereigntyCache`] mirrors the durable sovereignty table in memory and answers
//! lookups by system, constellation, region, alliance, and claim. Mutations keep all
//! indices coherent under one lock and are written through to a [`SovereigntyStore`]
//! after the lock is released.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use sov_cache::{MemoryStore, SovereigntyCache};
//! use sov_primitives::AllianceId;
//!
//! let cache = SovereigntyCache::new(Arc::new(MemoryStore::new()));
//! cache.initialize()?;
//! let held = cache.get_alliance_systems(AllianceId(99_000_001));
//! # let _ = held;
//! # Ok::<(), sov_cache::SovError>(())
//! ```

mod cache;
mod config;
mod error;
mod index;
mod info;
mod store;

pub use cache::SovereigntyCache;
pub use config::{CacheConfig, ConfigError};
pub use error::{InitError, Result, SovError};
pub use info::SovInfo;
pub use store::{FieldUpdate, MemoryStore, SovereigntyStore, StoreError};
