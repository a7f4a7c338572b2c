//! Sequence execution
//!
//! Runs a grab script one action at a time, tracking elapsed time per
//! action and exposing the current drive/claw/arm commands. The
//! controller feeds it ticks and the latest proximity reading.

use super::script::{Action, Script};
use crate::chassis::DrivePower;
use crate::state::{ErrorKind, Event};
use crate::traits::{ArmPosition, ClawState};

/// Executor phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExecutionPhase {
    /// No script loaded
    Idle,
    /// Executing actions
    Running,
    /// Script ran to completion
    Complete,
    /// Approach timed out
    Faulted(ErrorKind),
}

/// Grab sequence executor
///
/// Tick-driven: call [`SequenceExecutor::tick`] with the elapsed time
/// and the current proximity state. Commands are only live while the
/// phase is `Running`; in every other phase the chassis command reads
/// as stopped.
#[derive(Debug)]
pub struct SequenceExecutor {
    script: Script,
    phase: ExecutionPhase,
    /// Index of the action currently executing
    index: usize,
    /// Time spent in the current action (ms)
    action_elapsed_ms: u32,
    /// Latest claw command issued by the script
    claw: Option<ClawState>,
    /// Latest arm command issued by the script
    arm: Option<ArmPosition>,
}

impl SequenceExecutor {
    /// Create an idle executor
    pub fn new() -> Self {
        Self {
            script: Script::new(),
            phase: ExecutionPhase::Idle,
            index: 0,
            action_elapsed_ms: 0,
            claw: None,
            arm: None,
        }
    }

    /// Get the current phase
    pub fn phase(&self) -> ExecutionPhase {
        self.phase
    }

    /// Check if a script is executing
    pub fn is_running(&self) -> bool {
        self.phase == ExecutionPhase::Running
    }

    /// Start executing a script
    ///
    /// An empty script completes immediately on the next tick.
    pub fn start(&mut self, script: Script) {
        self.script = script;
        self.phase = ExecutionPhase::Running;
        self.index = 0;
        self.action_elapsed_ms = 0;
        self.claw = None;
        self.arm = None;
        self.enter_action();
    }

    /// Abort execution and drop the script
    pub fn abort(&mut self) {
        self.script.clear();
        self.phase = ExecutionPhase::Idle;
        self.index = 0;
        self.action_elapsed_ms = 0;
        self.claw = None;
        self.arm = None;
    }

    /// Current chassis command
    pub fn drive_power(&self) -> DrivePower {
        if self.phase != ExecutionPhase::Running {
            return DrivePower::STOP;
        }

        match self.script.get(self.index) {
            Some(Action::Drive { power, .. }) => *power,
            Some(Action::Approach { power, .. }) => DrivePower::straight(*power),
            _ => DrivePower::STOP,
        }
    }

    /// Latest claw command issued by the script, if any
    pub fn claw_command(&self) -> Option<ClawState> {
        self.claw
    }

    /// Latest arm command issued by the script, if any
    pub fn arm_command(&self) -> Option<ArmPosition> {
        self.arm
    }

    /// Latch actuator commands when an action begins
    fn enter_action(&mut self) {
        match self.script.get(self.index) {
            Some(Action::Claw { state, .. }) => self.claw = Some(*state),
            Some(Action::Arm { position, .. }) => self.arm = Some(*position),
            _ => {}
        }
    }

    /// Advance past the current action
    fn next_action(&mut self) -> Option<Event> {
        self.index += 1;
        self.action_elapsed_ms = 0;

        if self.index >= self.script.len() {
            self.phase = ExecutionPhase::Complete;
            return Some(Event::SequenceFinished);
        }

        self.enter_action();
        None
    }

    /// Update the executor with elapsed time and the proximity reading
    ///
    /// Returns an event when the script completes or faults.
    pub fn tick(&mut self, delta_ms: u32, proximity: bool) -> Option<Event> {
        if self.phase != ExecutionPhase::Running {
            return None;
        }

        let Some(action) = self.script.get(self.index) else {
            self.phase = ExecutionPhase::Complete;
            return Some(Event::SequenceFinished);
        };

        self.action_elapsed_ms = self.action_elapsed_ms.saturating_add(delta_ms);

        match *action {
            Action::Drive { duration_ms, .. } => {
                if self.action_elapsed_ms >= duration_ms {
                    return self.next_action();
                }
            }
            Action::Claw { settle_ms, .. } => {
                if self.action_elapsed_ms >= settle_ms {
                    return self.next_action();
                }
            }
            Action::Arm { settle_ms, .. } => {
                if self.action_elapsed_ms >= settle_ms {
                    return self.next_action();
                }
            }
            Action::Approach { timeout_ms, .. } => {
                if proximity {
                    return self.next_action();
                }
                if self.action_elapsed_ms >= timeout_ms {
                    self.phase = ExecutionPhase::Faulted(ErrorKind::ApproachTimeout);
                    return Some(Event::ErrorDetected(ErrorKind::ApproachTimeout));
                }
            }
        }

        None
    }
}

impl Default for SequenceExecutor {
    fn default() -> Self {
        Self::new()
    }
}
