pub mod aggregate;
pub mod config;
pub mod error;
pub mod game;
pub mod gameplay;
pub mod hints;
pub mod round_query;
pub mod samples;
pub mod scoring;
pub mod timer;

pub use aggregate::aggregate;
pub use config::{ConfigOverrides, GameConfig};
pub use error::{ConfigError, GameError};
pub use game::GameState;
pub use gameplay::run_game;
pub use hints::HintError;
pub use round_query::RoundQuery;
pub use samples::sample_events;
pub use scoring::{distance_km, score_round, ScoringRules};
pub use timer::{RoundTimer, TickOutcome, TimerEvent, TimerState};
