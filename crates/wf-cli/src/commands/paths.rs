use std::path::Path;

use wf_engine::{TravelState, project_paths};

pub fn run(location: &str, world: Option<&Path>) -> Result<(), String> {
    let atlas = super::load_world(world)?;
    let origin = super::resolve_location(&atlas, location)?;
    let Some(origin_poi) = atlas.poi(&origin).cloned() else {
        return Err(format!("unknown location '{location}'"));
    };

    let state = TravelState::at(&origin_poi);
    let segments = project_paths(&origin, &atlas, &state, false);
    let json = serde_json::to_string_pretty(&segments).map_err(|e| e.to_string())?;
    println!("{json}");

    Ok(())
}
