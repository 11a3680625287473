use std::time::Duration;

use tokio::{
    sync::mpsc::{unbounded_channel, UnboundedReceiver},
    task::JoinHandle,
    time::sleep,
};
use types::{Action, DistanceUnit, GameStatus, Guesser, RoundResult, Summary};

use crate::{
    error::GameError,
    game::GameState,
    timer::{RoundTimer, TimerEvent},
};

type GuesserTask = JoinHandle<(Box<dyn Guesser>, Action)>;

/// Plays a whole game with `guesser`, racing each decision against the
/// round timer when one is enabled. `delay_ms` pauses before every move.
/// A game already resumed at some round carries on from there. Returns the
/// session summary.
pub async fn run_game(
    game_state: &mut GameState,
    mut guesser: Box<dyn Guesser>,
    delay_ms: Option<u64>,
) -> Result<Summary, GameError> {
    if game_state.status() != GameStatus::InProgress {
        game_state.start()?;
    }
    while game_state.status() != GameStatus::Finished {
        log::debug!("{game_state}");
        let (seat, result) = play_round(game_state, guesser, delay_ms).await?;
        report_round(&result, game_state.settings().distance_unit);
        guesser = seat.reclaim().await;
        game_state.next_round()?;
    }
    let summary = game_state.summary();
    println!("\n{summary}");
    Ok(summary)
}

/// Where the guesser is once a round has been scored.
enum GuesserSeat {
    Idle(Box<dyn Guesser>),
    /// Still deciding a move for a round that timed out.
    Late(GuesserTask),
}

impl GuesserSeat {
    async fn reclaim(self) -> Box<dyn Guesser> {
        match self {
            GuesserSeat::Idle(guesser) => guesser,
            GuesserSeat::Late(task) => {
                let (guesser, late) = join_guesser(task).await;
                log::debug!("Discarding late action: {late}");
                guesser
            }
        }
    }
}

async fn play_round(
    game_state: &mut GameState,
    mut guesser: Box<dyn Guesser>,
    delay_ms: Option<u64>,
) -> Result<(GuesserSeat, RoundResult), GameError> {
    let round = game_state.current_round();
    let (timer_tx, mut timer_rx) = unbounded_channel();
    let timer = game_state
        .timer_remaining()
        .map(|seconds| RoundTimer::spawn(round, seconds, timer_tx));

    loop {
        let Some(prompt) = game_state.prompt() else {
            return Err(GameError::InvalidTransition {
                from: game_state.status(),
                action: "ask for a guess",
            });
        };
        let permitted = game_state.permitted_actions();
        if let Some(ms) = delay_ms {
            sleep(Duration::from_millis(ms)).await;
        }
        let mut task: GuesserTask = tokio::task::spawn_blocking(move || {
            let action = guesser.select_action(&prompt, &permitted);
            (guesser, action)
        });

        let (returned, action) = match timer.as_ref() {
            Some(_) => match race_timer(game_state, &mut task, &mut timer_rx).await {
                RoundOutcome::Decided(returned, action) => (returned, action),
                RoundOutcome::TimedOut(result) => {
                    println!("Time's up! Any move still being typed is ignored.");
                    return Ok((GuesserSeat::Late(task), result));
                }
            },
            None => join_guesser(task).await,
        };
        guesser = returned;

        match game_state.perform_action(&action) {
            Ok(Some(result)) => {
                if let Some(timer) = timer {
                    timer.cancel();
                }
                return Ok((GuesserSeat::Idle(guesser), result));
            }
            Ok(None) => {}
            Err(err @ (GameError::Hint(_)
            | GameError::MissingLocation
            | GameError::InvalidLocation { .. })) => {
                log::warn!("{err}");
                println!("{err}");
            }
            Err(err) => return Err(err),
        }
    }
}

enum RoundOutcome {
    Decided(Box<dyn Guesser>, Action),
    TimedOut(RoundResult),
}

async fn race_timer(
    game_state: &mut GameState,
    task: &mut GuesserTask,
    timer_rx: &mut UnboundedReceiver<TimerEvent>,
) -> RoundOutcome {
    loop {
        tokio::select! {
            joined = &mut *task => {
                let (guesser, action) = joined.expect("Guesser thread panicked");
                return RoundOutcome::Decided(guesser, action);
            }
            Some(event) = timer_rx.recv() => {
                let result = match event {
                    TimerEvent::Tick { round, remaining } => game_state.reconcile_timer(round, remaining),
                    TimerEvent::Expired { round } => game_state.time_up(round),
                };
                if let Some(result) = result {
                    return RoundOutcome::TimedOut(result);
                }
            }
        }
    }
}

async fn join_guesser(task: GuesserTask) -> (Box<dyn Guesser>, Action) {
    task.await.expect("Guesser thread panicked")
}

fn report_round(result: &RoundResult, unit: DistanceUnit) {
    println!("{}", result.describe(unit));
    println!(
        "Answer: {} in {}",
        result.event.location_name,
        result.event.year()
    );
    if result.achievements.perfect {
        println!("Perfect round!");
    } else if result.achievements.perfect_location {
        println!("Perfect location!");
    } else if result.achievements.perfect_time {
        println!("Perfect year!");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use chrono::NaiveDate;
    use std::sync::mpsc::{channel, Receiver};
    use types::{Coordinates, HistoricalEvent, RoundPrompt};

    /// Blocks on its first move until released, like a player who has not
    /// pressed Enter yet.
    #[derive(Debug)]
    struct WaitingGuesser {
        release: Receiver<()>,
    }

    impl Guesser for WaitingGuesser {
        fn select_action(&mut self, prompt: &RoundPrompt, _permitted_actions: &[Action]) -> Action {
            let _ = self.release.recv();
            Action::SetYear {
                year: prompt.year_bounds.max,
            }
        }
    }

    fn timed_game() -> GameState {
        let mut config = GameConfig {
            total_rounds: 1,
            ..GameConfig::default()
        };
        config.settings.timer_enabled = true;
        config.settings.timer_duration_minutes = 1;
        let event = HistoricalEvent::new(
            "Moon landing",
            NaiveDate::from_ymd_opt(1969, 7, 20).unwrap(),
            Coordinates::new(28.5729, -80.649),
            "Cape Canaveral",
        );
        let mut game = GameState::new(&config, vec![event]).unwrap();
        game.start().unwrap();
        game
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_round_returns_before_the_guesser_does() {
        let mut game = timed_game();
        let (release_tx, release_rx) = channel();
        let guesser = Box::new(WaitingGuesser {
            release: release_rx,
        });

        // the pause before the first move outlasts the whole countdown
        let (seat, result) = play_round(&mut game, guesser, Some(61_000))
            .await
            .unwrap();

        assert_eq!(result.round, 1);
        assert_eq!(result.guess.year, None);
        assert_eq!(game.status(), GameStatus::RoundResult);
        assert!(matches!(seat, GuesserSeat::Late(_)));

        release_tx.send(()).unwrap();
        let _guesser = seat.reclaim().await;
        // the late year move was dropped
        assert_eq!(game.results().len(), 1);
        assert_eq!(game.current_guess().year, None);
    }

    #[tokio::test(start_paused = true)]
    async fn submitted_round_keeps_the_guesser() {
        let mut game = timed_game();
        let event = game.current_event().clone();
        let guesser = Box::new(Answering { event });

        let (seat, result) = play_round(&mut game, guesser, None).await.unwrap();

        assert!(matches!(seat, GuesserSeat::Idle(_)));
        assert!(result.achievements.perfect);
        assert_eq!(game.results().len(), 1);
    }

    /// Places the answer, sets its year, then submits.
    #[derive(Debug)]
    struct Answering {
        event: HistoricalEvent,
    }

    impl Guesser for Answering {
        fn select_action(&mut self, prompt: &RoundPrompt, permitted_actions: &[Action]) -> Action {
            if prompt.current_guess.location.is_none() {
                Action::PlaceMarker {
                    location: self.event.location(),
                }
            } else if prompt.current_guess.year.is_none() {
                Action::SetYear {
                    year: self.event.year(),
                }
            } else {
                assert!(permitted_actions.contains(&Action::Submit));
                Action::Submit
            }
        }
    }
}
