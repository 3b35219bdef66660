#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives a headless Tower Defence run.

mod input;
mod scenario;

use std::{
    io::{self, Write},
    path::PathBuf,
    thread,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tower_defence_core::{Command, Event, WELCOME_BANNER};
use tower_defence_rendering::{
    FrameControl, Presentation, RenderingBackend, Scene, TextBackend, FRAME_DELTA,
};
use tower_defence_system_waves::{default_waves, test_waves};
use tower_defence_world::{apply, query, GameConfig, GameState};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    input::{BuildOrder, Key},
    scenario::Scenario,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum WaveTable {
    /// Ten-wave campaign
    Default,
    /// Short batched run ending with a boss
    Test,
}

#[derive(Parser, Debug)]
#[command(name = "tower-defence")]
#[command(about = "Headless Tower Defence simulation")]
struct Args {
    /// TOML scenario overriding board, path, resources and waves
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Built-in wave table, replaced by the scenario's own waves
    #[arg(long, value_enum, default_value = "default")]
    waves: WaveTable,

    /// Seed for enemy jitter, overriding the scenario
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of ticks to simulate
    #[arg(long, default_value = "20000")]
    ticks: u64,

    /// Tower to buy before the run starts (repeatable)
    #[arg(long = "build", value_name = "KIND@COLUMN,ROW")]
    builds: Vec<BuildOrder>,

    /// Draw every Nth tick
    #[arg(long, default_value = "30")]
    render_every: u64,

    /// Print JSON snapshots instead of the text board
    #[arg(long)]
    json: bool,

    /// Throttle the simulation to the real tick rate
    #[arg(long)]
    realtime: bool,

    /// Color enemies with terminal escape codes
    #[arg(long)]
    color: bool,
}

#[derive(Debug, Default)]
struct Tally {
    kills: u32,
    leaks: u32,
    shots: u32,
}

impl Tally {
    fn record(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::EnemyKilled { .. } => self.kills += 1,
                Event::EnemyPassed { .. } => self.leaks += 1,
                Event::ProjectileFired { .. } => self.shots += 1,
                _ => {}
            }
        }
    }
}

/// Entry point for the Tower Defence command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;
    let mut state = GameState::new(config).context("invalid game configuration")?;
    place_towers(&mut state, &args.builds)?;
    begin_run(&mut state);

    let mut tally = Tally::default();
    if args.json {
        run_json(&mut state, &args, &mut tally)?;
    } else {
        run_text(&mut state, &args, &mut tally)?;
    }

    info!(
        outcome = ?query::outcome(&state),
        tick = query::tick_index(&state),
        health = query::health(&state),
        gold = query::gold(&state),
        kills = tally.kills,
        leaks = tally.leaks,
        shots = tally.shots,
        "run finished"
    );
    Ok(())
}

fn build_config(args: &Args) -> Result<GameConfig> {
    let waves = match args.waves {
        WaveTable::Default => default_waves(),
        WaveTable::Test => test_waves(),
    };
    let mut config = GameConfig {
        waves,
        ..GameConfig::default()
    };
    if let Some(path) = &args.scenario {
        config = Scenario::load(path)?.apply_to(config);
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn place_towers(state: &mut GameState, orders: &[BuildOrder]) -> Result<()> {
    let (columns, rows) = query::dimensions(state);

    for order in orders {
        let column = u32::try_from(order.cell.column()).ok();
        let row = u32::try_from(order.cell.row()).ok();
        if !column.is_some_and(|column| column < columns) || !row.is_some_and(|row| row < rows) {
            bail!(
                "build order at ({}, {}) lies outside the {columns}x{rows} board",
                order.cell.column(),
                order.cell.row()
            );
        }

        let mut events = Vec::new();
        for key in order.keys(query::cursor(state)) {
            let command = key.to_command(query::selected(state));
            apply(state, command, &mut events);
        }
        for event in &events {
            match event {
                Event::TowerPlaced { tower, kind, cell } => {
                    info!(tower = tower.get(), ?kind, ?cell, "scripted tower built");
                }
                Event::TowerPurchaseRejected { reason } => {
                    warn!(?reason, kind = ?order.kind, cell = ?order.cell, "scripted build rejected");
                }
                _ => {}
            }
        }
        if query::selected(state).is_some() {
            apply(state, Command::ClearSelection, &mut events);
        }
    }
    Ok(())
}

/// Releases the pause the game starts in, exactly as the `P` key would.
fn begin_run(state: &mut GameState) {
    if !query::is_paused(state) {
        return;
    }
    let mut events = Vec::new();
    let unpause = Key::Pause.to_command(query::selected(state));
    apply(state, unpause, &mut events);
}

fn run_json(state: &mut GameState, args: &Args, tally: &mut Tally) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let render_every = args.render_every.max(1);
    let mut events = Vec::new();

    for _ in 0..args.ticks {
        if !query::is_running(state) {
            break;
        }
        apply(state, Command::Tick, &mut events);
        tally.record(&events);
        events.clear();

        if query::tick_index(state) % render_every == 0 {
            write_snapshot(&mut out, state)?;
        }
        if args.realtime {
            thread::sleep(FRAME_DELTA);
        }
    }

    write_snapshot(&mut out, state)?;
    out.flush().context("failed to flush snapshots")?;
    Ok(())
}

fn write_snapshot(out: &mut impl Write, state: &GameState) -> Result<()> {
    serde_json::to_writer(&mut *out, &query::snapshot(state))
        .context("failed to serialize snapshot")?;
    writeln!(out).context("failed to write snapshot")?;
    Ok(())
}

fn run_text(state: &mut GameState, args: &Args, tally: &mut Tally) -> Result<()> {
    let backend = TextBackend::new(io::stdout().lock())
        .with_render_every(args.render_every)
        .with_ansi_colors(args.color);
    let scene = Scene::from_snapshot(&query::snapshot(state));
    let mut remaining = args.ticks;
    let mut events = Vec::new();

    backend.run(
        Presentation::new(WELCOME_BANNER, scene),
        |delta, scene| {
            if remaining == 0 || !query::is_running(state) {
                return FrameControl::Exit;
            }

            apply(state, Command::Tick, &mut events);
            tally.record(&events);
            events.clear();
            remaining -= 1;
            *scene = Scene::from_snapshot(&query::snapshot(state));

            if args.realtime {
                thread::sleep(delta);
            }
            if remaining == 0 || !query::is_running(state) {
                FrameControl::Exit
            } else {
                FrameControl::Continue
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_parse_repeated_builds() {
        let args = Args::try_parse_from([
            "tower-defence",
            "--waves",
            "test",
            "--build",
            "normal@1,1",
            "--build",
            "sniper@10,0",
            "--seed",
            "9",
        ])
        .expect("valid arguments");

        assert_eq!(args.waves, WaveTable::Test);
        assert_eq!(args.builds.len(), 2);
        assert_eq!(args.seed, Some(9));
        assert!(!args.json);
    }

    #[test]
    fn config_prefers_the_seed_flag() {
        let args = Args::try_parse_from(["tower-defence", "--waves", "test", "--seed", "3"])
            .expect("valid arguments");
        let config = build_config(&args).expect("config builds");

        assert_eq!(config.seed, 3);
        assert_eq!(config.waves.len(), 2);
    }

    #[test]
    fn builds_outside_the_board_are_refused() {
        let mut state = GameState::new(GameConfig::default()).expect("valid config");
        let order: BuildOrder = "normal@12,0".parse().expect("valid order");

        assert!(place_towers(&mut state, &[order]).is_err());
        assert_eq!(query::gold(&state), 150);
    }

    #[test]
    fn rejected_build_does_not_leak_its_selection() {
        let mut state = GameState::new(GameConfig::default()).expect("valid config");
        let orders: Vec<BuildOrder> = ["normal@3,1", "heavy@1,1"]
            .iter()
            .map(|order| order.parse().expect("valid order"))
            .collect();

        place_towers(&mut state, &orders).expect("orders are on the board");

        assert_eq!(query::gold(&state), 50);
        assert_eq!(query::selected(&state), None);
        assert_eq!(query::tower_view(&state).len(), 1);
    }

    #[test]
    fn scripted_builds_happen_while_paused_then_the_run_starts() {
        let mut state = GameState::new(GameConfig::default()).expect("valid config");
        let order: BuildOrder = "heavy@1,1".parse().expect("valid order");

        place_towers(&mut state, &[order]).expect("order is on the board");
        assert!(query::is_paused(&state));
        assert_eq!(query::tick_index(&state), 0);

        begin_run(&mut state);
        assert!(!query::is_paused(&state));

        let mut events = Vec::new();
        apply(&mut state, Command::Tick, &mut events);
        assert_eq!(query::tick_index(&state), 1);
        assert_eq!(query::gold(&state), 50);
    }
}
