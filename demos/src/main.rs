//! Headless floodpath runner: load an ASCII map, search from every start,
//! print the routed map.
//!
//! ```text
//! floodpath [--astar] [--octile] [--trials N] [--seed N] [MAP]
//! ```
//!
//! Without `MAP` a built-in map is used.

use std::error::Error;
use std::fs;

use floodpath_core::GridMap;
use floodpath_engine::{Engine, EngineConfig, EngineEvent, Strategy};
use floodpath_paths::Adjacency;

const DEFAULT_MAP: &str = include_str!("../maps/rooms.txt");

struct Args {
    config: EngineConfig,
    map: Option<String>,
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut config = EngineConfig::default();
    let mut map = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--astar" => config = config.with_strategy(Strategy::AStar),
            "--octile" => config = config.with_adjacency(Adjacency::Octile),
            "--trials" => {
                let n = args.next().ok_or("--trials needs a value")?;
                config = config.with_max_trials(n.parse()?);
            }
            "--seed" => {
                let n = args.next().ok_or("--seed needs a value")?;
                config = config.with_seed(n.parse()?);
            }
            flag if flag.starts_with("--") => return Err(format!("unknown flag {flag}").into()),
            path => map = Some(path.to_string()),
        }
    }
    Ok(Args { config, map })
}

fn main() -> Result<(), Box<dyn Error>> {
    let Args { config, map } = parse_args()?;
    let text = match &map {
        Some(path) => fs::read_to_string(path)?,
        None => DEFAULT_MAP.to_string(),
    };
    let grid = GridMap::from_ascii(&text)?;
    log::info!("loaded {}x{} map", grid.width(), grid.height());

    let (mut engine, events) = Engine::with_channel(config);
    engine.load(grid)?;
    if !engine.request_search() {
        return Err("the map needs at least one S and an E".into());
    }
    engine.wait();

    for event in events.try_iter() {
        match event {
            EngineEvent::PathFound { id, start, path } => {
                println!("path {id} from {start}: {} cells", path.len());
            }
            EngineEvent::Unreachable { id, start } => {
                println!("path {id} from {start}: unreachable");
            }
            EngineEvent::GridChanged(_) | EngineEvent::SearchFinished(_) => {}
        }
    }
    println!();
    println!("{}", engine.snapshot().to_ascii());

    engine.shutdown();
    Ok(())
}
