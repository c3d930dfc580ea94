//! Basic sovereignty primitives.
//!
//! Identifier newtypes, the [`SovereigntyRecord`] entity, and classification of raw
//! location identifiers into regions, constellations, and solar systems.

mod ids;
mod location;
mod record;

pub use ids::{AllianceId, ClaimId, ConstellationId, RegionId, StructureId, SystemId};
pub use location::Location;
pub use record::{Geography, SovereigntyRecord, StructureSlot, SystemSovereignty};
