use std::fmt::Debug;

use crate::{Action, RoundPrompt};

/// Decides the next move for a round. `permitted_actions` lists the
/// discrete actions currently allowed; marker and year moves are always
/// allowed while the round is open.
pub trait Guesser: Debug + Send {
    fn select_action(&mut self, prompt: &RoundPrompt, permitted_actions: &[Action]) -> Action;
}
