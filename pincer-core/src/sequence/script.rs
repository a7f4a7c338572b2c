//! Grab scripts built from timed actions
//!
//! Actions are the atomic units of a sequence. Each action either runs
//! for a fixed duration or, for the approach, until the proximity
//! sensor triggers (bounded by a timeout).

use heapless::Vec;

use crate::chassis::DrivePower;
use crate::config::{GrabConfig, SequenceTimings};
use crate::traits::{ArmPosition, ClawState};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum actions per script
pub const MAX_ACTIONS: usize = 12;

/// A single timed action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Action {
    /// Drive both sides at the given powers for a fixed duration
    Drive {
        power: DrivePower,
        duration_ms: u32,
    },
    /// Command the claw and wait for it to settle
    Claw { state: ClawState, settle_ms: u32 },
    /// Command the arm and wait for it to settle
    Arm {
        position: ArmPosition,
        settle_ms: u32,
    },
    /// Creep forward until the proximity sensor triggers
    ///
    /// Faults the sequence if the sensor stays quiet past the timeout.
    Approach { power: i8, timeout_ms: u32 },
}

/// A sequence of actions
pub type Script = Vec<Action, MAX_ACTIONS>;

/// The fixed grab-and-retreat script
///
/// Open the claw and hold still, run forward to the object, grip,
/// raise the arm, then back away. One-to-one with the original timed
/// routine; only the blocking delays became durations.
pub fn grab_and_retreat(grab: &GrabConfig, timings: &SequenceTimings) -> Script {
    let mut script = Script::new();
    let push = |script: &mut Script, action| {
        // Capacity is static and sized for the builtin scripts
        let _ = script.push(action);
    };

    push(&mut script, Action::Claw {
        state: ClawState::Open,
        settle_ms: timings.prepare_ms,
    });
    push(&mut script, Action::Drive {
        power: DrivePower::straight(grab.approach_power),
        duration_ms: timings.advance_ms,
    });
    push(&mut script, Action::Claw {
        state: ClawState::Closed,
        settle_ms: timings.grip_ms,
    });
    push(&mut script, Action::Arm {
        position: ArmPosition::Carry,
        settle_ms: timings.raise_ms,
    });
    push(&mut script, Action::Drive {
        power: DrivePower::straight(grab.approach_power.saturating_neg()),
        duration_ms: timings.retreat_ms,
    });

    script
}

/// The sensor-terminated approach-grab script
///
/// Lower the arm, creep forward until the capacitive sensor sees the
/// object, grip, and raise.
pub fn approach_grab(grab: &GrabConfig, timings: &SequenceTimings) -> Script {
    let mut script = Script::new();
    let push = |script: &mut Script, action| {
        let _ = script.push(action);
    };

    push(&mut script, Action::Arm {
        position: ArmPosition::Stowed,
        settle_ms: 0,
    });
    push(&mut script, Action::Approach {
        power: grab.approach_power,
        timeout_ms: grab.approach_timeout_ms,
    });
    push(&mut script, Action::Claw {
        state: ClawState::Closed,
        settle_ms: timings.approach_grip_ms,
    });
    push(&mut script, Action::Arm {
        position: ArmPosition::Carry,
        settle_ms: timings.approach_raise_ms,
    });

    script
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grab_and_retreat_shape() {
        let script = grab_and_retreat(&GrabConfig::default(), &SequenceTimings::default());

        assert_eq!(script.len(), 5);
        // Opens before moving, closes after the advance
        assert!(matches!(
            script[0],
            Action::Claw { state: ClawState::Open, settle_ms: 1000 }
        ));
        assert!(matches!(script[1], Action::Drive { duration_ms: 1500, .. }));
        assert!(matches!(
            script[2],
            Action::Claw { state: ClawState::Closed, .. }
        ));

        // Retreat reverses the approach power
        if let Action::Drive { power, duration_ms } = script[4] {
            assert_eq!(power, DrivePower::straight(-16));
            assert_eq!(duration_ms, 1000);
        } else {
            panic!("last action should be the retreat drive");
        }
    }

    #[test]
    fn test_approach_grab_shape() {
        let script = approach_grab(&GrabConfig::default(), &SequenceTimings::default());

        assert_eq!(script.len(), 4);
        assert!(matches!(
            script[0],
            Action::Arm { position: ArmPosition::Stowed, .. }
        ));
        assert!(matches!(
            script[1],
            Action::Approach { power: 16, timeout_ms: 8000 }
        ));
        assert!(matches!(
            script[3],
            Action::Arm { position: ArmPosition::Carry, settle_ms: 1000 }
        ));
    }
}
