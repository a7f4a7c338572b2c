//! State machine definition
//!
//! All motor, claw, and link behavior is a function of the current
//! state and an event.

use super::events::Event;

/// Robot operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Power-on initialization, gyro wake, sensor checks
    Boot,
    /// Tumblers neutral, outputs released
    Idle,
    /// Grab sequence executing (scripted or sensor-terminated)
    Grabbing,
    /// Chassis under direct Raspberry Pi control
    Remote,
    /// Heading-hold autonomous drive
    Autopilot,
    /// Grab sequence done, waiting for the tumbler to be released
    SequenceComplete,
    /// Fault detected; outputs disabled
    Error(ErrorKind),
}

/// Types of errors that can occur
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Proximity sensor never triggered during approach
    ApproachTimeout,
    /// Gyro stopped responding
    GyroFault,
    /// Raspberry Pi link heartbeat lost
    LinkLost,
    /// Unknown/generic error
    Unknown,
}

impl State {
    /// Check if this state allows chassis motor operation
    pub fn motor_allowed(&self) -> bool {
        matches!(self, State::Grabbing | State::Remote | State::Autopilot)
    }

    /// Check if this state allows claw/arm operation
    ///
    /// Autopilot drives only; the claw stays where the last mode left it.
    pub fn claw_allowed(&self) -> bool {
        matches!(self, State::Grabbing | State::Remote)
    }

    /// Check if this is an error state
    pub fn is_error(&self) -> bool {
        matches!(self, State::Error(_))
    }

    /// Process an event and return the next state
    ///
    /// This is the core state transition logic.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            // Boot transitions
            (Boot, BootComplete) => Idle,
            (Boot, ErrorDetected(kind)) => Error(kind),

            // Idle transitions
            (Idle, GrabSelected) => Grabbing,
            (Idle, RemoteSelected) => Remote,
            (Idle, ErrorDetected(kind)) => Error(kind),

            // Grabbing transitions
            (Grabbing, SequenceFinished) => SequenceComplete,
            (Grabbing, Abort) => Idle,
            (Grabbing, ModeReleased) => Idle,
            (Grabbing, ErrorDetected(kind)) => Error(kind),

            // Remote transitions
            (Remote, AutopilotEngaged) => Autopilot,
            (Remote, ModeReleased) => Idle,
            (Remote, Abort) => Idle,
            (Remote, ErrorDetected(kind)) => Error(kind),

            // Autopilot transitions
            (Autopilot, AutopilotDisengaged) => Remote,
            (Autopilot, ModeReleased) => Idle,
            (Autopilot, Abort) => Idle,
            (Autopilot, ErrorDetected(kind)) => Error(kind),

            // SequenceComplete: require the tumbler to be released
            // before another run can start
            (SequenceComplete, ModeReleased) => Idle,
            (SequenceComplete, Abort) => Idle,
            (SequenceComplete, ErrorDetected(kind)) => Error(kind),

            // Error transitions
            (Error(_), AcknowledgeError) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_to_idle() {
        let state = State::Boot;
        assert_eq!(state.transition(Event::BootComplete), State::Idle);
    }

    #[test]
    fn test_error_from_any_state() {
        let states = [State::Idle, State::Grabbing, State::Remote, State::Autopilot];

        for state in states {
            let next = state.transition(Event::ErrorDetected(ErrorKind::LinkLost));
            assert!(matches!(next, State::Error(ErrorKind::LinkLost)));
        }
    }

    #[test]
    fn test_abort_returns_to_idle() {
        let states = [State::Grabbing, State::Remote, State::Autopilot];

        for state in states {
            assert_eq!(state.transition(Event::Abort), State::Idle);
        }
    }

    #[test]
    fn test_grab_flow() {
        let state = State::Idle.transition(Event::GrabSelected);
        assert_eq!(state, State::Grabbing);

        let state = state.transition(Event::SequenceFinished);
        assert_eq!(state, State::SequenceComplete);

        // Re-running requires releasing the tumbler first
        assert_eq!(state.transition(Event::GrabSelected), state);
        assert_eq!(state.transition(Event::ModeReleased), State::Idle);
    }

    #[test]
    fn test_autopilot_flow() {
        let state = State::Idle.transition(Event::RemoteSelected);
        assert_eq!(state, State::Remote);

        let state = state.transition(Event::AutopilotEngaged);
        assert_eq!(state, State::Autopilot);

        // Disengage returns to direct remote control
        assert_eq!(
            state.transition(Event::AutopilotDisengaged),
            State::Remote
        );

        // Releasing the tumbler exits entirely
        assert_eq!(state.transition(Event::ModeReleased), State::Idle);
    }

    #[test]
    fn test_autopilot_not_from_idle() {
        // Autopilot is a link command, only honored in Remote mode
        assert_eq!(State::Idle.transition(Event::AutopilotEngaged), State::Idle);
    }

    #[test]
    fn test_motor_allowed() {
        assert!(State::Grabbing.motor_allowed());
        assert!(State::Remote.motor_allowed());
        assert!(State::Autopilot.motor_allowed());
        assert!(!State::Idle.motor_allowed());
        assert!(!State::Error(ErrorKind::Unknown).motor_allowed());
    }

    #[test]
    fn test_claw_allowed() {
        assert!(State::Grabbing.claw_allowed());
        assert!(State::Remote.claw_allowed());
        assert!(!State::Autopilot.claw_allowed());
        assert!(!State::Idle.claw_allowed());
    }

    #[test]
    fn test_error_acknowledge() {
        let state = State::Error(ErrorKind::ApproachTimeout);
        assert_eq!(state.transition(Event::AcknowledgeError), State::Idle);

        // Nothing else leaves the error state
        assert_eq!(state.transition(Event::GrabSelected), state);
        assert_eq!(state.transition(Event::Abort), state);
    }
}
