use std::fmt::Display;

use chrono::{DateTime, Utc};
use types::{
    Action, Coordinates, GameSettings, GameStatus, Guess, HintKind, HintState, HintsUsed,
    HistoricalEvent, RoundPrompt, RoundResult, SettingUpdate, Summary, YearBounds,
};

use crate::{
    aggregate::aggregate,
    config::GameConfig,
    error::GameError,
    hints,
    scoring::{score_round, year_or_default, ScoringRules},
    timer::{TickOutcome, TimerState},
};

/// The single owner of a game session. Every change goes through one of
/// the transition methods below.
#[derive(Debug)]
pub struct GameState {
    current_round: u32,
    total_rounds: u32,
    status: GameStatus,
    current_guess: Guess,
    hints: HintState,
    timer: TimerState,
    timer_started_at: Option<DateTime<Utc>>,
    events: Vec<HistoricalEvent>,
    settings: GameSettings,
    rules: ScoringRules,
    year_bounds: YearBounds,
    results: Vec<RoundResult>,
}

impl GameState {
    pub fn new(config: &GameConfig, mut events: Vec<HistoricalEvent>) -> Result<Self, GameError> {
        config.validate()?;
        if events.is_empty() {
            return Err(GameError::NoEvents);
        }
        if let Some(event) = events.iter().find(|e| !e.location().is_valid()) {
            return Err(GameError::InvalidEvent {
                description: event.description.clone(),
                latitude: event.latitude,
                longitude: event.longitude,
            });
        }
        let total_rounds = config.total_rounds.min(events.len() as u32);
        if total_rounds < config.total_rounds {
            log::warn!(
                "Only {} events available, shortening game from {} rounds",
                events.len(),
                config.total_rounds
            );
        }
        events.truncate(total_rounds as usize);
        log::info!("New game: {total_rounds} rounds, settings: {:?}", config.settings);

        Ok(Self {
            current_round: 1,
            total_rounds,
            status: GameStatus::NotStarted,
            current_guess: Guess::default(),
            hints: HintState::default(),
            timer: TimerState::Idle,
            timer_started_at: None,
            events,
            settings: config.settings,
            rules: config.rules,
            year_bounds: config.year_bounds,
            results: Vec::new(),
        })
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn current_guess(&self) -> Guess {
        self.current_guess
    }

    pub fn hints(&self) -> &HintState {
        &self.hints
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn rules(&self) -> &ScoringRules {
        &self.rules
    }

    pub fn year_bounds(&self) -> &YearBounds {
        &self.year_bounds
    }

    pub fn events(&self) -> &[HistoricalEvent] {
        &self.events
    }

    pub fn results(&self) -> &[RoundResult] {
        &self.results
    }

    pub fn timer_remaining(&self) -> Option<u32> {
        self.timer.remaining()
    }

    pub fn timer_started_at(&self) -> Option<DateTime<Utc>> {
        self.timer_started_at
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn current_event(&self) -> &HistoricalEvent {
        &self.events[(self.current_round - 1) as usize]
    }

    /// What the player sees for the open round.
    pub fn prompt(&self) -> Option<RoundPrompt> {
        if self.status != GameStatus::InProgress {
            return None;
        }
        let event = self.current_event();
        Some(RoundPrompt {
            round: self.current_round,
            total_rounds: self.total_rounds,
            event_id: event.id,
            description: event.description.clone(),
            image_url: event.image_url.clone(),
            current_guess: self.current_guess,
            hints: self.hints.clone(),
            hints_enabled: self.settings.hints_enabled,
            year_bounds: self.year_bounds,
            timer_remaining: self.timer.remaining(),
        })
    }

    pub fn start(&mut self) -> Result<(), GameError> {
        match self.status {
            GameStatus::NotStarted | GameStatus::Finished => {}
            from => {
                return Err(GameError::InvalidTransition {
                    from,
                    action: "start a game",
                })
            }
        }
        self.results.clear();
        self.current_round = 1;
        self.begin_round();
        log::info!("Game started");
        Ok(())
    }

    /// Resumes at a round read back from persisted UI state. Out of range
    /// values are clamped to the rounds this game has.
    pub fn resume_at(&mut self, round: u32) -> Result<u32, GameError> {
        if self.status != GameStatus::NotStarted {
            return Err(GameError::InvalidTransition {
                from: self.status,
                action: "resume a round",
            });
        }
        self.results.clear();
        self.current_round = round.clamp(1, self.total_rounds);
        self.begin_round();
        log::info!("Resumed at round {}", self.current_round);
        Ok(self.current_round)
    }

    fn begin_round(&mut self) {
        self.status = GameStatus::InProgress;
        self.current_guess = Guess::default();
        hints::reset(&mut self.hints);
        if self.settings.timer_enabled {
            self.timer.start(self.settings.timer_duration_seconds());
            self.timer_started_at = Some(Utc::now());
        } else {
            self.timer = TimerState::Idle;
            self.timer_started_at = None;
        }
    }

    fn require_in_progress(&self, action: &'static str) -> Result<(), GameError> {
        if self.status == GameStatus::InProgress {
            Ok(())
        } else {
            Err(GameError::InvalidTransition {
                from: self.status,
                action,
            })
        }
    }

    /// The discrete actions available right now.
    pub fn permitted_actions(&self) -> Vec<Action> {
        if self.status != GameStatus::InProgress {
            return vec![];
        }
        let mut actions = Vec::with_capacity(3);
        if self.settings.hints_enabled && self.hints.available > 0 {
            actions.extend(
                self.hints
                    .unused_kinds()
                    .into_iter()
                    .map(|kind| Action::UseHint { kind }),
            );
        }
        if self.current_guess.location.is_some() {
            actions.push(Action::Submit);
        }
        actions
    }

    /// Applies one player action. Returns the round result when the action
    /// ended the round.
    pub fn perform_action(&mut self, action: &Action) -> Result<Option<RoundResult>, GameError> {
        log::debug!("Round {}: {action}", self.current_round);
        match *action {
            Action::PlaceMarker { location } => {
                self.set_guess_location(location)?;
                Ok(None)
            }
            Action::SetYear { year } => {
                self.set_guess_year(year)?;
                Ok(None)
            }
            Action::UseHint { kind } => {
                self.use_hint(kind)?;
                Ok(None)
            }
            Action::Submit => self.submit_guess().map(Some),
        }
    }

    pub fn set_guess_location(&mut self, location: Coordinates) -> Result<(), GameError> {
        self.require_in_progress("place a marker")?;
        if !location.is_valid() {
            return Err(GameError::InvalidLocation {
                latitude: location.latitude,
                longitude: location.longitude,
            });
        }
        self.current_guess.location = Some(location);
        Ok(())
    }

    /// Sets the year guess, clamped to the guessable range.
    pub fn set_guess_year(&mut self, year: i32) -> Result<i32, GameError> {
        self.require_in_progress("set a year")?;
        let year = self.year_bounds.clamp(year);
        self.current_guess.year = Some(year);
        Ok(year)
    }

    pub fn use_hint(&mut self, kind: HintKind) -> Result<(), GameError> {
        self.require_in_progress("use a hint")?;
        let event = &self.events[(self.current_round - 1) as usize];
        hints::use_hint(
            &mut self.hints,
            kind,
            event,
            &self.year_bounds,
            self.settings.hints_enabled,
        )?;
        Ok(())
    }

    pub fn submit_guess(&mut self) -> Result<RoundResult, GameError> {
        self.require_in_progress("submit a guess")?;
        if self.current_guess.location.is_none() {
            return Err(GameError::MissingLocation);
        }
        let guess = year_or_default(self.current_guess, &self.year_bounds);
        Ok(self.finish_round(guess))
    }

    /// Handles the countdown reaching zero for `round`. A signal for a round
    /// that is no longer open is stale and ignored.
    pub fn time_up(&mut self, round: u32) -> Option<RoundResult> {
        if self.status != GameStatus::InProgress || round != self.current_round {
            log::debug!("Ignoring stale time-up for round {round}");
            return None;
        }
        log::info!("Time ran out on round {round}");
        Some(self.finish_round(self.current_guess))
    }

    /// Advances the local countdown by one second.
    pub fn tick(&mut self, round: u32) -> Option<RoundResult> {
        if round != self.current_round || self.status != GameStatus::InProgress {
            return None;
        }
        match self.timer.tick() {
            TickOutcome::Expired => self.time_up(round),
            TickOutcome::Ticked(_) | TickOutcome::Ignored => None,
        }
    }

    /// Overrides the countdown with a value from outside, such as a
    /// background timer or restored state.
    pub fn reconcile_timer(&mut self, round: u32, remaining: u32) -> Option<RoundResult> {
        if round != self.current_round || self.status != GameStatus::InProgress {
            return None;
        }
        match self.timer.reconcile(remaining) {
            TickOutcome::Expired => self.time_up(round),
            TickOutcome::Ticked(_) | TickOutcome::Ignored => None,
        }
    }

    fn finish_round(&mut self, guess: Guess) -> RoundResult {
        self.timer.stop();
        let hints_used = HintsUsed {
            time: self.hints.time_hint_used,
            location: self.hints.location_hint_used,
        };
        let result = score_round(
            self.current_round,
            self.current_event(),
            guess,
            hints_used,
            &self.rules,
        );
        log::info!("{}", result.describe(self.settings.distance_unit));
        self.results.push(result.clone());
        self.status = GameStatus::RoundResult;
        result
    }

    pub fn next_round(&mut self) -> Result<GameStatus, GameError> {
        if self.status != GameStatus::RoundResult {
            return Err(GameError::InvalidTransition {
                from: self.status,
                action: "advance to the next round",
            });
        }
        if self.current_round >= self.total_rounds {
            self.status = GameStatus::Finished;
            self.timer = TimerState::Idle;
            self.timer_started_at = None;
            log::info!("Game over!\n{}", self.summary());
        } else {
            self.current_round += 1;
            self.begin_round();
        }
        Ok(self.status)
    }

    pub fn apply_setting(&mut self, update: SettingUpdate) -> Result<(), GameError> {
        match self.status {
            GameStatus::NotStarted | GameStatus::Finished => {
                log::info!("Setting changed: {update}");
                self.settings.apply(update);
                Ok(())
            }
            GameStatus::InProgress | GameStatus::RoundResult => Err(GameError::SettingsLocked),
        }
    }

    pub fn summary(&self) -> Summary {
        aggregate(&self.results, &self.rules)
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Round {}/{} [{}] score so far: {}",
            self.current_round,
            self.total_rounds,
            self.status,
            self.results.iter().map(|r| r.total_score).sum::<u32>()
        )
    }
}
