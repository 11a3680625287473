pub mod action;
pub mod event;
pub mod game_state;
pub mod guesser;
pub mod hint;
pub mod round_result;
pub mod settings;
pub mod year_input;

pub use action::Action;
pub use event::{Coordinates, HistoricalEvent};
pub use game_state::{GameStatus, RoundPrompt};
pub use guesser::Guesser;
pub use hint::{HintKind, HintState, Region, HINTS_PER_ROUND};
pub use round_result::{Achievements, Guess, HintsUsed, RoundResult, Summary};
pub use settings::{DistanceUnit, GameSettings, SettingUpdate, YearBounds, MAX_TIMER_MINUTES};
pub use year_input::parse_year_input;
