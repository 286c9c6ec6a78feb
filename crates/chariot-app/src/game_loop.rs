//! Game loop thread: runs the simulation engine at 60Hz and publishes snapshots.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. The latest snapshot is stored in shared
//! state for polling; the thread returns a `RunReport` when the game ends, the
//! tick budget runs out, or it is told to shut down.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use chariot_core::commands::PlayerCommand;
use chariot_core::constants::TICK_RATE;
use chariot_core::enums::GamePhase;
use chariot_core::state::{GameStateSnapshot, GameSummary};
use chariot_sim::engine::{SimConfig, SimulationEngine};
use chariot_sim::score::game_summary;

use crate::autopilot::Autopilot;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Nominal duration of one tick at 1x speed.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub sim: SimConfig,
    pub max_ticks: u64,
    /// Sleep between ticks to hold wall-clock pace.
    pub realtime: bool,
    /// Progress log interval in ticks (0 = never).
    pub snapshot_every: u64,
    /// Let the autopilot answer every snapshot.
    pub autopilot: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            max_ticks: 10 * 60 * TICK_RATE as u64,
            realtime: false,
            snapshot_every: 0,
            autopilot: true,
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Loop iterations executed, including ones where the game was paused.
    pub loop_ticks: u64,
    pub phase: GamePhase,
    /// Final result, or the score so far when the run was cut short.
    pub summary: GameSummary,
    /// True when the player actually died.
    pub game_over: bool,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle that yields the run report.
pub fn spawn_game_loop(
    config: LoopConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<RunReport>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("chariot-game-loop".into())
        .spawn(move || run_game_loop(config, cmd_rx, &latest_snapshot))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until game over, the tick budget, a Shutdown command
/// or channel disconnect.
pub fn run_game_loop(
    config: LoopConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> RunReport {
    let mut engine = SimulationEngine::new(config.sim.clone());
    engine.queue_command(PlayerCommand::StartGame);
    let mut autopilot = Autopilot::new();
    let mut next_tick_time = Instant::now();
    let mut loop_ticks = 0;
    info!(seed = config.sim.seed, max_ticks = config.max_ticks, "game loop started");

    'run: while loop_ticks < config.max_ticks {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => break 'run,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => break 'run,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();
        loop_ticks += 1;

        // 3. Let the autopilot react
        if config.autopilot {
            engine.queue_commands(autopilot.decide(&snapshot));
        }

        if config.snapshot_every > 0 && loop_ticks % config.snapshot_every == 0 {
            debug!(
                tick = snapshot.time.tick,
                round = snapshot.round.round,
                killed = snapshot.round.total_killed,
                health = snapshot.player.health,
                level = snapshot.player.level,
                "progress"
            );
        }
        let finished = snapshot.phase == GamePhase::GameOver;

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }
        if finished {
            break;
        }

        // 5. Sleep until next tick, adjusting for time_scale
        if config.realtime {
            let time_scale = engine.time_scale();
            let effective_tick_duration = if time_scale > 0.001 {
                TICK_DURATION.div_f64(time_scale)
            } else {
                TICK_DURATION
            };

            next_tick_time += effective_tick_duration;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > effective_tick_duration * 2 {
                // Too far behind: reset to avoid catch-up spiral
                next_tick_time = now;
            }
        }
    }

    report(&engine, loop_ticks)
}

fn report(engine: &SimulationEngine, loop_ticks: u64) -> RunReport {
    let summary = engine.game_over().unwrap_or_else(|| {
        game_summary(
            engine.round().total_killed(),
            engine.player().level,
            engine.round().current_round(),
            engine.time().elapsed_ms,
        )
    });
    RunReport {
        loop_ticks,
        phase: engine.phase(),
        summary,
        game_over: engine.game_over().is_some(),
    }
}
