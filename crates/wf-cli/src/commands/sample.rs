use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wf_world::{AtlasDoc, Biome, Kingdom, Poi, Position, WorldAtlas};

/// Seed used when a command runs without a world file.
pub const DEFAULT_SEED: u64 = 42;

const WORLD_WIDTH: f64 = 1000.0;
const KINGDOM_COUNT: usize = 3;

const KINGDOM_NAMES: [&str; 6] = [
    "Valdora", "Norren", "Eskarion", "Thalmere", "Caldus", "Ymbra",
];
const CAPITAL_NAMES: [&str; 6] = [
    "Goldenhall",
    "Frosthold",
    "Starfall Keep",
    "Tidewatch",
    "Emberrest",
    "Duskmoor",
];
const CITY_NAMES: [&str; 18] = [
    "Saltmere",
    "Pinewatch",
    "Deepdelve",
    "Ashford",
    "Briarglen",
    "Coldspring",
    "Dunmarch",
    "Elderbrook",
    "Foxhollow",
    "Gravenport",
    "Harrowgate",
    "Ivorydown",
    "Kestrel Rock",
    "Larkspur",
    "Mirrowell",
    "Netherfield",
    "Oakhaven",
    "Quernsby",
];
const BIOMES: [Biome; 8] = [
    Biome::Plains,
    Biome::Coast,
    Biome::Desert,
    Biome::Swamp,
    Biome::Forest,
    Biome::Hills,
    Biome::Mountain,
    Biome::Snow,
];

fn slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn poi_at(rng: &mut StdRng, name: &str, kingdom: &str) -> Poi {
    let position = Position::new(
        rng.random_range(0.0..WORLD_WIDTH),
        rng.random_range(0.0..WORLD_WIDTH),
    );
    let biome = BIOMES[rng.random_range(0..BIOMES.len())];
    Poi::new(slug(name), name, position, biome, kingdom)
}

/// Build the sample world document for `seed`. Same seed, same world.
pub fn sample_doc(seed: u64) -> AtlasDoc {
    let mut rng = StdRng::seed_from_u64(seed);
    let name_offset = rng.random_range(0..KINGDOM_NAMES.len());
    // City names are consumed sequentially from a random start, so ids stay
    // distinct as long as fewer than the whole pool is used.
    let mut city_cursor = rng.random_range(0..CITY_NAMES.len());

    let mut kingdoms = Vec::with_capacity(KINGDOM_COUNT);
    for k in 0..KINGDOM_COUNT {
        let idx = (name_offset + k) % KINGDOM_NAMES.len();
        let kingdom_id = slug(KINGDOM_NAMES[idx]);
        let capital = poi_at(&mut rng, CAPITAL_NAMES[idx], &kingdom_id);

        let city_count = rng.random_range(2..=3);
        let mut cities = Vec::with_capacity(city_count);
        for _ in 0..city_count {
            let city_name = CITY_NAMES[city_cursor % CITY_NAMES.len()];
            city_cursor += 1;
            cities.push(poi_at(&mut rng, city_name, &kingdom_id));
        }

        kingdoms.push(Kingdom::new(
            kingdom_id.clone(),
            KINGDOM_NAMES[idx],
            capital,
            cities,
        ));
    }

    AtlasDoc {
        name: "The Sundered Realms".to_string(),
        width: WORLD_WIDTH,
        kingdoms,
    }
}

pub fn run(seed: u64, out: Option<&Path>) -> Result<(), String> {
    let doc = sample_doc(seed);
    // Validate before handing the file to anyone.
    WorldAtlas::from_doc(doc.clone()).map_err(|e| e.to_string())?;

    let json = serde_json::to_string_pretty(&doc).map_err(|e| e.to_string())?;
    match out {
        Some(path) => {
            fs::write(path, json).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
            println!("Wrote sample world '{}' to {}", doc.name, path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
