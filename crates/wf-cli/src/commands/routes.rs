use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use wf_engine::{TravelState, routes_from_location, routes_within_kingdom};

pub fn run(location: &str, world: Option<&Path>, kingdom_only: bool) -> Result<(), String> {
    let atlas = super::load_world(world)?;
    let origin = super::resolve_location(&atlas, location)?;
    let Some(origin_poi) = atlas.poi(&origin).cloned() else {
        return Err(format!("unknown location '{location}'"));
    };

    let state = TravelState::at(&origin_poi);
    let routes = if kingdom_only {
        routes_within_kingdom(&origin, &atlas)
    } else {
        routes_from_location(&origin, &atlas, &state)
    };

    if routes.is_empty() {
        println!("  No routes from {}.", origin_poi.name);
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Destination", "Days", "Cost", "Danger", "Access"]);

    for route in &routes {
        let destination = atlas
            .poi(&route.to)
            .map(|poi| poi.name.clone())
            .unwrap_or_else(|| route.to.to_string());
        let access = if route.is_unlocked {
            "open".to_string()
        } else {
            match &route.requires_quest {
                Some(quest) => format!("locked ({quest})"),
                None => "locked".to_string(),
            }
        };
        table.add_row(vec![
            destination,
            route.distance_days.to_string(),
            route.cost.to_string(),
            route.danger.to_string(),
            access,
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} route(s) from {}",
        routes.len(),
        origin_poi.name.bold()
    );

    Ok(())
}
