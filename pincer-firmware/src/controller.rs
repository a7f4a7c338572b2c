//! Robot controller
//!
//! Owns the state machine, sequence executor, safety monitor, and
//! heading hold. The controller task feeds it mode changes, link
//! commands, and ticks; it answers with the current drive, claw, and
//! arm commands.

use pincer_core::chassis::{self, DrivePower};
use pincer_core::config::RobotConfig;
use pincer_core::safety::{SafetyMonitor, SafetyStatus};
use pincer_core::sequence::{approach_grab, grab_and_retreat, SequenceExecutor};
use pincer_core::state::{ErrorKind, Event, State};
use pincer_core::switches::ModeSelect;
use pincer_core::traits::{ArmPosition, ClawState};
use pincer_drivers::steering::HeadingHold;
use pincer_protocol::{LinkCommand, ReportedMode, Telemetry};

pub struct Controller {
    config: RobotConfig,
    state: State,
    executor: SequenceExecutor,
    safety: SafetyMonitor,
    hold: HeadingHold,
    /// Latest direct drive command from the Pi
    remote_drive: DrivePower,
    /// Latest claw command (remote or sequence)
    claw: ClawState,
    /// Latest arm command (remote or sequence)
    arm: ArmPosition,
}

impl Controller {
    pub fn new(config: RobotConfig) -> Self {
        Self {
            state: State::Boot,
            executor: SequenceExecutor::new(),
            safety: SafetyMonitor::new(config.link),
            hold: HeadingHold::new(config.steering, config.chassis),
            remote_drive: DrivePower::STOP,
            claw: ClawState::Open,
            arm: ArmPosition::Stowed,
            config,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Finish the boot sequence
    pub fn boot_complete(&mut self) {
        self.apply(Event::BootComplete);
    }

    /// Process a debounced tumbler mode change
    pub fn process_mode(&mut self, mode: ModeSelect) -> Option<Event> {
        let event = match mode {
            // Returning the tumblers to neutral also acknowledges a fault
            ModeSelect::Neutral if self.state.is_error() => Event::AcknowledgeError,
            ModeSelect::Neutral => Event::ModeReleased,
            ModeSelect::Grab => Event::GrabSelected,
            ModeSelect::Remote => Event::RemoteSelected,
        };
        self.apply(event)
    }

    /// Process a command from the Pi link
    ///
    /// Commands are only honored in remote/autopilot modes; anything
    /// else is dropped.
    pub fn process_link(&mut self, cmd: LinkCommand, heading_x10: i16) -> Option<Event> {
        match cmd {
            LinkCommand::Drive { left, right } => {
                if self.state == State::Remote && !self.executor.is_running() {
                    self.remote_drive = DrivePower::new(left as i16, right as i16);
                }
                None
            }
            LinkCommand::Steer { angle_deg } => {
                if self.state == State::Remote && !self.executor.is_running() {
                    self.remote_drive = chassis::steer_at_cruise(&self.config.chassis, angle_deg);
                }
                None
            }
            LinkCommand::SetClaw { closed } => {
                if self.state.claw_allowed() {
                    self.claw = ClawState::from_grip(closed);
                }
                None
            }
            LinkCommand::SetArm { raised } => {
                if self.state.claw_allowed() {
                    self.arm = if raised {
                        ArmPosition::Carry
                    } else {
                        ArmPosition::Stowed
                    };
                }
                None
            }
            LinkCommand::EngageAutopilot { base_power } => {
                if self.state == State::Remote && !self.executor.is_running() {
                    self.hold.engage(heading_x10, base_power);
                    self.apply(Event::AutopilotEngaged)
                } else {
                    None
                }
            }
            LinkCommand::DisengageAutopilot => {
                if self.state == State::Autopilot {
                    self.apply(Event::AutopilotDisengaged)
                } else {
                    None
                }
            }
            LinkCommand::StartGrab => {
                // Proximity-guided grab, run inline in remote mode
                if self.state == State::Remote && !self.executor.is_running() {
                    self.executor
                        .start(approach_grab(&self.config.grab, &self.config.timings));
                }
                None
            }
            LinkCommand::Abort => self.apply(Event::Abort),
        }
    }

    /// Note a heartbeat from the Pi
    pub fn heartbeat(&mut self) {
        self.safety.heartbeat_received();
    }

    /// Advance timers, the executor, and safety checks by one tick
    pub fn on_tick(&mut self, delta_ms: u32, proximity: bool, gyro_ok: bool) -> Option<Event> {
        self.safety.update_gyro(gyro_ok);
        self.safety.update_time(delta_ms);

        if !self.state.is_error() {
            match self.safety.check() {
                // The gyro only matters while heading hold is flying
                SafetyStatus::Fault(ErrorKind::GyroFault) if self.state == State::Autopilot => {
                    return self.apply(Event::ErrorDetected(ErrorKind::GyroFault));
                }
                SafetyStatus::Fault(ErrorKind::GyroFault) => {
                    if !self.safety.is_link_healthy() {
                        return self.apply(Event::ErrorDetected(ErrorKind::LinkLost));
                    }
                }
                SafetyStatus::Fault(kind) => {
                    return self.apply(Event::ErrorDetected(kind));
                }
                SafetyStatus::Ok => {}
            }
        }

        if let Some(event) = self.executor.tick(delta_ms, proximity) {
            // Track actuator commands issued by the script
            self.latch_sequence_actuators();
            if event == Event::SequenceFinished && self.state == State::Remote {
                // Inline approach grab finished; drop any stale drive
                // command from before the script took over
                self.remote_drive = DrivePower::STOP;
            }
            return self.apply(event);
        }
        self.latch_sequence_actuators();

        None
    }

    /// Current chassis command
    pub fn drive_command(&mut self, heading_x10: i16) -> DrivePower {
        if !self.state.motor_allowed() {
            return DrivePower::STOP;
        }

        if self.executor.is_running() {
            return self.executor.drive_power();
        }

        match self.state {
            State::Autopilot => self.hold.update(heading_x10),
            State::Remote => self.remote_drive,
            _ => DrivePower::STOP,
        }
    }

    /// Current claw command
    pub fn claw_command(&self) -> ClawState {
        self.claw
    }

    /// Current arm command
    pub fn arm_command(&self) -> ArmPosition {
        self.arm
    }

    /// Status snapshot for the Pi
    pub fn telemetry(&self, heading_x10: i16, proximity: bool) -> Telemetry {
        let mode = match self.state {
            State::Boot => ReportedMode::Boot,
            State::Idle => ReportedMode::Idle,
            State::Grabbing => ReportedMode::Grabbing,
            State::Remote => ReportedMode::Remote,
            State::Autopilot => ReportedMode::Autopilot,
            State::SequenceComplete => ReportedMode::SequenceComplete,
            State::Error(_) => ReportedMode::Error,
        };
        Telemetry {
            mode,
            heading_deg_x10: heading_x10,
            proximity,
        }
    }

    /// Pick up claw/arm commands the running script has issued
    fn latch_sequence_actuators(&mut self) {
        if let Some(claw) = self.executor.claw_command() {
            self.claw = claw;
        }
        if let Some(arm) = self.executor.arm_command() {
            self.arm = arm;
        }
    }

    /// Apply an event to the state machine with entry/exit side effects
    fn apply(&mut self, event: Event) -> Option<Event> {
        let next = self.state.transition(event);
        if next == self.state {
            return None;
        }

        let prev = self.state;
        self.state = next;

        // Exit side effects
        if matches!(prev, State::Remote | State::Autopilot)
            && !matches!(next, State::Remote | State::Autopilot)
        {
            self.safety.set_link_required(false);
            self.remote_drive = DrivePower::STOP;
            self.hold.disengage();
        }
        if prev == State::Autopilot && next == State::Remote {
            self.hold.disengage();
        }

        // Entry side effects
        match next {
            State::Grabbing => {
                self.executor
                    .start(grab_and_retreat(&self.config.grab, &self.config.timings));
            }
            State::Remote if prev == State::Idle => {
                self.safety.set_link_required(true);
                self.remote_drive = DrivePower::STOP;
            }
            State::Idle | State::Error(_) => {
                self.executor.abort();
                self.remote_drive = DrivePower::STOP;
            }
            _ => {}
        }

        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Booted controller sitting in remote mode
    fn remote_controller() -> Controller {
        let mut ctrl = Controller::new(RobotConfig::default());
        ctrl.boot_complete();
        ctrl.process_mode(ModeSelect::Remote);
        assert_eq!(ctrl.state(), State::Remote);
        ctrl
    }

    /// Tick with a healthy gyro and no heartbeats
    fn run(ctrl: &mut Controller, ms: u32, proximity: bool) -> Option<Event> {
        let mut elapsed = 0;
        while elapsed < ms {
            if let Some(event) = ctrl.on_tick(100, proximity, true) {
                return Some(event);
            }
            elapsed += 100;
        }
        None
    }

    /// Tick with a healthy gyro and a heartbeat every tick
    fn run_with_heartbeat(ctrl: &mut Controller, ms: u32, proximity: bool) -> Option<Event> {
        let mut elapsed = 0;
        while elapsed < ms {
            ctrl.heartbeat();
            if let Some(event) = ctrl.on_tick(100, proximity, true) {
                return Some(event);
            }
            elapsed += 100;
        }
        None
    }

    #[test]
    fn test_boot_to_idle() {
        let mut ctrl = Controller::new(RobotConfig::default());
        assert_eq!(ctrl.state(), State::Boot);

        ctrl.boot_complete();
        assert_eq!(ctrl.state(), State::Idle);
        assert_eq!(ctrl.drive_command(0), DrivePower::STOP);
    }

    #[test]
    fn test_grab_tumbler_runs_sequence() {
        let mut ctrl = Controller::new(RobotConfig::default());
        ctrl.boot_complete();

        ctrl.process_mode(ModeSelect::Grab);
        assert_eq!(ctrl.state(), State::Grabbing);

        // Prepare dwell: claw opening, chassis held
        assert_eq!(ctrl.drive_command(0), DrivePower::STOP);
        assert_eq!(run(&mut ctrl, 1000, false), None);

        // Advance toward the object
        assert_eq!(ctrl.drive_command(0), DrivePower::straight(16));

        // Advance + grip + raise + retreat with the default timings
        let event = run(&mut ctrl, 3000, false);
        assert_eq!(event, Some(Event::SequenceFinished));
        assert_eq!(ctrl.state(), State::SequenceComplete);
        assert_eq!(ctrl.claw_command(), ClawState::Closed);
        assert_eq!(ctrl.arm_command(), ArmPosition::Carry);
        assert_eq!(ctrl.drive_command(0), DrivePower::STOP);

        // Releasing the tumbler rearms the sequence
        ctrl.process_mode(ModeSelect::Neutral);
        assert_eq!(ctrl.state(), State::Idle);
    }

    #[test]
    fn test_remote_drive_and_steer() {
        let mut ctrl = remote_controller();

        ctrl.process_link(LinkCommand::Drive { left: 30, right: -30 }, 0);
        assert_eq!(ctrl.drive_command(0), DrivePower::new(30, -30));

        ctrl.process_link(LinkCommand::Steer { angle_deg: 0 }, 0);
        assert_eq!(ctrl.drive_command(0), DrivePower::new(30, 30));

        ctrl.process_link(LinkCommand::SetClaw { closed: true }, 0);
        ctrl.process_link(LinkCommand::SetArm { raised: true }, 0);
        assert_eq!(ctrl.claw_command(), ClawState::Closed);
        assert_eq!(ctrl.arm_command(), ArmPosition::Carry);
    }

    #[test]
    fn test_heartbeats_keep_remote_alive() {
        let mut ctrl = remote_controller();
        assert_eq!(run_with_heartbeat(&mut ctrl, 5000, false), None);
        assert_eq!(ctrl.state(), State::Remote);
    }

    #[test]
    fn test_silent_link_raises_link_lost() {
        let mut ctrl = remote_controller();
        ctrl.process_link(LinkCommand::Drive { left: 40, right: 40 }, 0);

        // Three missed heartbeat windows with the default link config
        let event = run(&mut ctrl, 4000, false);
        assert_eq!(event, Some(Event::ErrorDetected(ErrorKind::LinkLost)));
        assert_eq!(ctrl.state(), State::Error(ErrorKind::LinkLost));
        assert_eq!(ctrl.drive_command(0), DrivePower::STOP);
    }

    #[test]
    fn test_error_disables_outputs_until_acknowledged() {
        let mut ctrl = remote_controller();
        run(&mut ctrl, 4000, false);
        assert!(ctrl.state().is_error());

        // Link commands are dead in an error state
        ctrl.process_link(LinkCommand::Drive { left: 50, right: 50 }, 0);
        ctrl.process_link(LinkCommand::SetClaw { closed: true }, 0);
        assert_eq!(ctrl.drive_command(0), DrivePower::STOP);
        assert_eq!(ctrl.claw_command(), ClawState::Open);

        // Tumblers back to neutral acknowledges the fault
        ctrl.process_mode(ModeSelect::Neutral);
        assert_eq!(ctrl.state(), State::Idle);

        ctrl.process_mode(ModeSelect::Remote);
        assert_eq!(ctrl.state(), State::Remote);
    }

    #[test]
    fn test_gyro_fault_ignored_outside_autopilot() {
        let mut ctrl = remote_controller();

        // Dead gyro with a live link: remote control keeps working
        ctrl.heartbeat();
        assert_eq!(ctrl.on_tick(100, false, false), None);
        assert_eq!(ctrl.state(), State::Remote);

        ctrl.process_link(LinkCommand::EngageAutopilot { base_power: 30 }, 0);
        assert_eq!(ctrl.state(), State::Autopilot);

        // Heading hold cannot fly blind
        ctrl.heartbeat();
        let event = ctrl.on_tick(100, false, false);
        assert_eq!(event, Some(Event::ErrorDetected(ErrorKind::GyroFault)));
        assert_eq!(ctrl.drive_command(0), DrivePower::STOP);
    }

    #[test]
    fn test_autopilot_drives_and_disengages() {
        let mut ctrl = remote_controller();
        ctrl.process_link(LinkCommand::Drive { left: 20, right: 20 }, 0);

        ctrl.process_link(LinkCommand::EngageAutopilot { base_power: 30 }, 0);
        assert_eq!(ctrl.state(), State::Autopilot);
        // On heading: both sides at the engaged base power
        assert_eq!(ctrl.drive_command(0), DrivePower::new(30, 30));

        ctrl.process_link(LinkCommand::DisengageAutopilot, 0);
        assert_eq!(ctrl.state(), State::Remote);
        assert_eq!(ctrl.drive_command(0), DrivePower::new(20, 20));
    }

    #[test]
    fn test_inline_grab_overrides_remote_drive() {
        let mut ctrl = remote_controller();
        ctrl.process_link(LinkCommand::Drive { left: 50, right: 50 }, 0);

        ctrl.process_link(LinkCommand::StartGrab, 0);
        assert_eq!(ctrl.state(), State::Remote);

        // Script owns the chassis; direct commands are dropped
        run_with_heartbeat(&mut ctrl, 100, false);
        ctrl.process_link(LinkCommand::Drive { left: 60, right: 60 }, 0);
        assert_eq!(ctrl.drive_command(0), DrivePower::straight(16));

        // Proximity hit: grip settle + raise, still in remote mode
        run_with_heartbeat(&mut ctrl, 2000, true);
        assert_eq!(ctrl.state(), State::Remote);
        assert_eq!(ctrl.claw_command(), ClawState::Closed);
        assert_eq!(ctrl.arm_command(), ArmPosition::Carry);

        // The stale pre-grab drive command does not come back
        assert_eq!(ctrl.drive_command(0), DrivePower::STOP);
    }

    #[test]
    fn test_inline_grab_timeout_faults() {
        let mut ctrl = remote_controller();
        ctrl.process_link(LinkCommand::StartGrab, 0);

        let event = run_with_heartbeat(&mut ctrl, 8300, false);
        assert_eq!(
            event,
            Some(Event::ErrorDetected(ErrorKind::ApproachTimeout))
        );
        assert_eq!(ctrl.state(), State::Error(ErrorKind::ApproachTimeout));
        assert_eq!(ctrl.drive_command(0), DrivePower::STOP);
    }

    #[test]
    fn test_abort_returns_to_idle() {
        let mut ctrl = remote_controller();
        ctrl.process_link(LinkCommand::Drive { left: 30, right: 30 }, 0);

        ctrl.process_link(LinkCommand::Abort, 0);
        assert_eq!(ctrl.state(), State::Idle);
        assert_eq!(ctrl.drive_command(0), DrivePower::STOP);

        // Link supervision stops with remote mode
        assert_eq!(run(&mut ctrl, 5000, false), None);
        assert_eq!(ctrl.state(), State::Idle);
    }

    #[test]
    fn test_telemetry_reports_mode_and_heading() {
        let mut ctrl = remote_controller();
        let telemetry = ctrl.telemetry(-321, true);
        assert_eq!(telemetry.mode, ReportedMode::Remote);
        assert_eq!(telemetry.heading_deg_x10, -321);
        assert!(telemetry.proximity);

        ctrl.process_mode(ModeSelect::Neutral);
        assert_eq!(ctrl.telemetry(0, false).mode, ReportedMode::Idle);
    }
}
