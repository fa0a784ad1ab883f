//! World data model for Wayfarer: kingdoms, points of interest, and the
//! geometry that travel durations and danger tiers derive from.
//!
//! This crate is read-only from the engine's point of view. A [`WorldAtlas`]
//! is built once from externally supplied world data (or deserialized from an
//! [`AtlasDoc`]) and never mutated afterwards — the travel engine only queries
//! it.

/// The world atlas: kingdoms indexed for lookup by id and name.
pub mod atlas;
/// Biomes and the danger-tier classification derived from them.
pub mod danger;
/// Error types used throughout the crate.
pub mod error;
/// Positions, distance-to-days scaling, and travel cost.
pub mod geometry;
/// Kingdom identifiers and the kingdom aggregate.
pub mod kingdom;
/// Location identifiers and points of interest.
pub mod location;

/// Re-export atlas types.
pub use atlas::{AtlasDoc, WorldAtlas};
/// Re-export danger classification types.
pub use danger::{Biome, DangerTier, classify_danger};
/// Re-export error types.
pub use error::{WorldError, WorldResult};
/// Re-export geometry types.
pub use geometry::{MAX_TRAVEL_DAYS, MIN_TRAVEL_DAYS, Position, cost_for_travel, days_for_distance};
/// Re-export kingdom types.
pub use kingdom::{Kingdom, KingdomId};
/// Re-export location types.
pub use location::{LocationId, Poi};
