//! Events that trigger state transitions

use super::machine::ErrorKind;

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Lifecycle events
    /// Boot sequence completed successfully
    BootComplete,

    // Tumbler events
    /// Mode tumbler thrown: run the grab sequence
    GrabSelected,
    /// Middle tumbler thrown: hand control to the Raspberry Pi link
    RemoteSelected,
    /// All tumblers back to neutral
    ModeReleased,

    // Link events
    /// Pi commanded heading-hold autopilot on
    AutopilotEngaged,
    /// Pi commanded autopilot off, back to direct remote control
    AutopilotDisengaged,

    // Sequence events
    /// Grab sequence ran to completion
    SequenceFinished,

    // Control events
    /// Abort whatever is running
    Abort,

    // Safety events
    /// Error detected by the safety subsystem
    ErrorDetected(ErrorKind),
    /// Operator acknowledged the error
    AcknowledgeError,
}

impl Event {
    /// Check if this event comes from the tumbler switches
    pub fn is_tumbler_event(&self) -> bool {
        matches!(
            self,
            Event::GrabSelected | Event::RemoteSelected | Event::ModeReleased
        )
    }

    /// Check if this event comes from the sequence executor
    pub fn is_sequence_event(&self) -> bool {
        matches!(self, Event::SequenceFinished)
    }

    /// Check if this event indicates an error
    pub fn is_error_event(&self) -> bool {
        matches!(self, Event::ErrorDetected(_))
    }
}
