use std::time::Duration;

use tokio::{
    sync::mpsc::{unbounded_channel, UnboundedSender},
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TimerState {
    #[default]
    Idle,
    Running {
        remaining: u32,
    },
    Expired,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running.
    Ignored,
    Ticked(u32),
    /// Reported once, on the transition into `Expired`.
    Expired,
}

impl TimerState {
    pub fn start(&mut self, seconds: u32) {
        *self = if seconds == 0 {
            TimerState::Expired
        } else {
            TimerState::Running { remaining: seconds }
        };
    }

    pub fn tick(&mut self) -> TickOutcome {
        match *self {
            TimerState::Running { remaining } if remaining > 1 => {
                *self = TimerState::Running {
                    remaining: remaining - 1,
                };
                TickOutcome::Ticked(remaining - 1)
            }
            TimerState::Running { .. } => {
                *self = TimerState::Expired;
                TickOutcome::Expired
            }
            TimerState::Idle | TimerState::Expired => TickOutcome::Ignored,
        }
    }

    pub fn stop(&mut self) {
        if matches!(self, TimerState::Running { .. }) {
            *self = TimerState::Idle;
        }
    }

    /// Replaces the local countdown with an externally known value, e.g.
    /// one restored from persisted state.
    pub fn reconcile(&mut self, remaining: u32) -> TickOutcome {
        match self {
            TimerState::Running { .. } if remaining == 0 => {
                *self = TimerState::Expired;
                TickOutcome::Expired
            }
            TimerState::Running { .. } => {
                *self = TimerState::Running { remaining };
                TickOutcome::Ticked(remaining)
            }
            TimerState::Idle | TimerState::Expired => TickOutcome::Ignored,
        }
    }

    pub fn remaining(&self) -> Option<u32> {
        match self {
            TimerState::Idle => None,
            TimerState::Running { remaining } => Some(*remaining),
            TimerState::Expired => Some(0),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, TimerState::Running { .. })
    }
}

/// Messages sent by a running [`RoundTimer`]. Each carries the round it was
/// started for so the owner can drop signals from a round that already ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    Tick { round: u32, remaining: u32 },
    Expired { round: u32 },
}

#[derive(Debug)]
enum TimerCommand {
    Reconcile(u32),
}

/// One-second countdown running on the tokio runtime. The task is aborted
/// when the handle is cancelled or dropped.
#[derive(Debug)]
pub struct RoundTimer {
    round: u32,
    commands: UnboundedSender<TimerCommand>,
    task: JoinHandle<()>,
}

impl RoundTimer {
    pub fn spawn(round: u32, seconds: u32, events: UnboundedSender<TimerEvent>) -> Self {
        let (commands, mut command_rx) = unbounded_channel();
        let task = tokio::spawn(async move {
            let mut state = TimerState::Idle;
            state.start(seconds);
            if state == TimerState::Expired {
                let _ = events.send(TimerEvent::Expired { round });
                return;
            }

            let mut ticker = interval(Duration::from_secs(1));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately
            ticker.tick().await;

            loop {
                let outcome = tokio::select! {
                    _ = ticker.tick() => state.tick(),
                    command = command_rx.recv() => match command {
                        Some(TimerCommand::Reconcile(remaining)) => state.reconcile(remaining),
                        None => break,
                    },
                };
                match outcome {
                    TickOutcome::Ticked(remaining) => {
                        if events.send(TimerEvent::Tick { round, remaining }).is_err() {
                            log::debug!("Timer listener for round {round} went away");
                            break;
                        }
                    }
                    TickOutcome::Expired => {
                        log::info!("Time is up for round {round}");
                        let _ = events.send(TimerEvent::Expired { round });
                        break;
                    }
                    TickOutcome::Ignored => {}
                }
            }
        });

        Self {
            round,
            commands,
            task,
        }
    }

    pub fn reconcile(&self, remaining: u32) {
        if self.commands.send(TimerCommand::Reconcile(remaining)).is_err() {
            log::debug!("Reconcile for round {} after timer finished", self.round);
        }
    }

    pub fn cancel(self) {
        log::debug!("Cancelling timer for round {}", self.round);
    }
}

impl Drop for RoundTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
