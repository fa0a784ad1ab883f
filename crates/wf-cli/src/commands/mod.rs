pub mod paths;
pub mod play;
pub mod routes;
pub mod sample;

use std::fs;
use std::path::Path;

use wf_world::{AtlasDoc, LocationId, WorldAtlas};

/// Load a world from a JSON file, or fall back to the built-in sample.
fn load_world(path: Option<&Path>) -> Result<WorldAtlas, String> {
    let doc = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            serde_json::from_str::<AtlasDoc>(&raw)
                .map_err(|e| format!("invalid world file {}: {e}", path.display()))?
        }
        None => sample::sample_doc(sample::DEFAULT_SEED),
    };
    WorldAtlas::from_doc(doc).map_err(|e| e.to_string())
}

/// Resolve a location argument by exact id, then case-insensitive name.
fn resolve_location(atlas: &WorldAtlas, raw: &str) -> Result<LocationId, String> {
    let trimmed = raw.trim();
    let id = LocationId::from(trimmed);
    if atlas.poi(&id).is_some() {
        return Ok(id);
    }
    atlas
        .find_by_name(trimmed)
        .map(|poi| poi.id.clone())
        .ok_or_else(|| format!("unknown location '{raw}'"))
}
