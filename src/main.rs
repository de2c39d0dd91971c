// Headless driver: builds a tile map as two stacked layers for a fixed number
// of rounds, once through the immediate path and once through the cache, and
// reports how many builds per second each path sustains.
//
// Usage: tilequad [config.json]

use std::process::ExitCode;
use std::time::{Duration, Instant};

use glam::Vec3;

use tilequad::{
    GeometryConfig, Quad, TileGeometryCache, TileMap, TileSheet, build_quads, triangulate,
};

/// Rounds between tile edits in the cached run.
const EDIT_INTERVAL: u32 = 30;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> tilequad::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => GeometryConfig::load(path)?,
        None => GeometryConfig::default(),
    };

    let sheet = config.resolve_sheet()?;
    let mut map = config.resolve_map()?;
    let rounds = config.iterations.max(1);

    log::info!(
        "map {}x{}, sheet {}x{} cells of {}px, {} rounds",
        map.width(),
        map.height(),
        sheet.columns(),
        sheet.rows(),
        sheet.tile_size(),
        rounds
    );

    let immediate = run_immediate(&config, &map, &sheet, rounds)?;
    report("immediate", rounds, immediate);

    let cached = run_cached(&config, &mut map, &sheet, rounds)?;
    report("cached", rounds, cached);

    Ok(())
}

/// Second layer drifts around the first, drawn slightly in front of it.
fn layer_offset(round: u32) -> Vec3 {
    let t = round as f32;
    Vec3::new(50.0 * (t * 0.05).sin(), 50.0 * (t * 0.08).cos(), 0.2)
}

fn run_immediate(
    config: &GeometryConfig,
    map: &TileMap,
    sheet: &TileSheet,
    rounds: u32,
) -> tilequad::Result<Duration> {
    let start = Instant::now();
    let mut vertices = 0usize;

    for round in 0..rounds {
        let base = build_quads(map, sheet, config.tile_size, &config.options)?;
        let offset = layer_offset(round);
        let layer: Vec<Quad> = base.iter().map(|q| q.translated(offset)).collect();
        vertices += triangulate(&base).len() + triangulate(&layer).len();
    }

    log::info!("immediate: emitted {} vertices", vertices);
    Ok(start.elapsed())
}

fn run_cached(
    config: &GeometryConfig,
    map: &mut TileMap,
    sheet: &TileSheet,
    rounds: u32,
) -> tilequad::Result<Duration> {
    let mut cache = TileGeometryCache::for_map(map, sheet, config.tile_size, config.options)?;
    let original = map.get(0, 0).unwrap_or(0);
    let alternate = original.wrapping_add(1).rem_euclid(sheet.capacity() as i32);

    let start = Instant::now();
    let mut rebuilds = 0u32;
    let mut vertices = 0usize;

    for round in 0..rounds {
        if round % EDIT_INTERVAL == 0 {
            let tile = if (round / EDIT_INTERVAL) % 2 == 0 { alternate } else { original };
            map.set(0, 0, tile);
        }
        if cache.put_map(map, sheet)? {
            rebuilds += 1;
        }
        vertices += cache.interleaved().len() * 2;
    }

    log::info!(
        "cached: {} uv rebuilds, {} vertices, {} indices per layer",
        rebuilds,
        vertices,
        cache.index_count()
    );
    Ok(start.elapsed())
}

fn report(label: &str, rounds: u32, elapsed: Duration) {
    let secs = elapsed.as_secs_f64();
    let rate = if secs > 0.0 { rounds as f64 / secs } else { f64::INFINITY };
    println!("{label}: {rate:.1} builds/s");
}
