use snake_common::{MoveOutcome, log, log_error};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

use crate::config::Config;
use crate::state::{ClientCommand, SessionPhase, SharedState};

pub const COUNTDOWN_FROM: u8 = 3;

#[derive(Debug, Clone, Copy)]
pub struct SessionTimings {
    pub countdown_step: Duration,
    pub game_over_pause: Duration,
}

impl From<&Config> for SessionTimings {
    fn from(config: &Config) -> Self {
        Self {
            countdown_step: config.countdown_step(),
            game_over_pause: config.game_over_pause(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Restart,
    Quit,
}

/// Owns the game clock. Runs until the client quits or drops its sender.
pub async fn local_game_task(
    shared_state: SharedState,
    timings: SessionTimings,
    mut command_rx: mpsc::UnboundedReceiver<ClientCommand>,
) {
    loop {
        let Some(command) = command_rx.recv().await else {
            break;
        };

        match command {
            ClientCommand::StartNewGame => loop {
                match run_session(&shared_state, timings, &mut command_rx).await {
                    Flow::Continue => break,
                    Flow::Restart => continue,
                    Flow::Quit => {
                        log!("Session task stopped");
                        return;
                    }
                }
            },
            ClientCommand::ChangeDirection(_) => {}
            ClientCommand::Quit => break,
        }
    }

    log!("Session task stopped");
}

async fn run_session(
    shared_state: &SharedState,
    timings: SessionTimings,
    command_rx: &mut mpsc::UnboundedReceiver<ClientCommand>,
) -> Flow {
    shared_state.with_game(|game| game.reinitialize());

    for step in (1..=COUNTDOWN_FROM).rev() {
        shared_state.set_phase(SessionPhase::Countdown(step));
        let deadline = Instant::now() + timings.countdown_step;
        if wait_until(shared_state, deadline, command_rx, false).await == Flow::Quit {
            return Flow::Quit;
        }
    }

    shared_state.set_phase(SessionPhase::Running);
    let mut next_tick = Instant::now() + shared_state.with_game(|game| game.tick_interval());

    loop {
        if wait_until(shared_state, next_tick, command_rx, false).await == Flow::Quit {
            return Flow::Quit;
        }

        let (outcome, tick_interval) =
            shared_state.with_game(|game| (game.move_snake(), game.tick_interval()));
        shared_state.request_repaint();

        match outcome {
            Ok(MoveOutcome::Moved | MoveOutcome::Ate) => {}
            Ok(MoveOutcome::Died(_)) => break,
            Err(e) => {
                log_error!("Tick failed: {}", e);
                break;
            }
        }

        // Fixed deadlines keep input from delaying ticks; a stalled runtime does not replay missed ones.
        next_tick = (next_tick + tick_interval).max(Instant::now());
    }

    shared_state.set_phase(SessionPhase::GameOver);
    let deadline = Instant::now() + timings.game_over_pause;
    let flow = wait_until(shared_state, deadline, command_rx, true).await;
    if flow == Flow::Continue {
        shared_state.set_phase(SessionPhase::Waiting);
    }
    flow
}

/// Applies incoming turns until `deadline`. Start requests only cut the wait short when
/// `allow_restart` is set.
async fn wait_until(
    shared_state: &SharedState,
    deadline: Instant,
    command_rx: &mut mpsc::UnboundedReceiver<ClientCommand>,
    allow_restart: bool,
) -> Flow {
    loop {
        tokio::select! {
            _ = sleep_until(deadline) => return Flow::Continue,
            command = command_rx.recv() => match command {
                Some(ClientCommand::ChangeDirection(direction)) => {
                    shared_state.with_game(|game| {
                        if !game.is_game_over() {
                            game.change_direction(direction);
                        }
                    });
                }
                Some(ClientCommand::StartNewGame) if allow_restart => return Flow::Restart,
                Some(ClientCommand::StartNewGame) => {}
                Some(ClientCommand::Quit) | None => return Flow::Quit,
            },
        }
    }
}
