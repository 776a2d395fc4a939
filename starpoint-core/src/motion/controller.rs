//! Dual-axis motion controller
//!
//! Azimuth is a continuous-rotation stepper with no position sensor, so a
//! move is a signed pulse count relative to the last believed azimuth.
//! Elevation is a position servo (plus an optional mirrored companion), so
//! a move is a single absolute write.
//!
//! Azimuth moves can be driven in one blocking call or pulse by pulse
//! (`begin_azimuth` then `advance`). While a move is in flight the phase
//! is `Moving` and any new move is refused with `MotionError::Busy`.

use crate::config::{AzimuthConfig, AzimuthPath, ElevationConfig};
use crate::traits::{AngleServo, Direction, PulseStepper, ServoError, StepperError};

use super::pointing::{
    AzimuthMove, Axis, ElevationMove, MotionPhase, PointingMove, PointingState,
};

/// Errors that can occur during a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionError {
    /// Another move is still in flight
    Busy,
    /// Target angle is NaN or infinite
    InvalidTarget,
    /// Stepper driver failed
    Stepper(StepperError),
    /// Servo failed
    Servo(ServoError),
}

impl From<StepperError> for MotionError {
    fn from(e: StepperError) -> Self {
        MotionError::Stepper(e)
    }
}

impl From<ServoError> for MotionError {
    fn from(e: ServoError) -> Self {
        MotionError::Servo(e)
    }
}

fn abs(value: f32) -> f32 {
    if value < 0.0 {
        -value
    } else {
        value
    }
}

/// Signed azimuth change from `current` to `target` under `path`
pub fn azimuth_delta(current: f32, target: f32, path: AzimuthPath) -> f32 {
    let delta = target - current;
    match path {
        AzimuthPath::Direct => delta,
        AzimuthPath::Shortest => {
            let wrapped = delta % 360.0;
            if wrapped > 180.0 {
                wrapped - 360.0
            } else if wrapped < -180.0 {
                wrapped + 360.0
            } else {
                wrapped
            }
        }
    }
}

/// Fold a finite azimuth into `[0, 360)`
pub fn wrap_azimuth(target: f32) -> f32 {
    let mut wrapped = target % 360.0;
    if wrapped < 0.0 {
        wrapped += 360.0;
    }
    // -1e-9 + 360.0 rounds up to 360.0
    if wrapped >= 360.0 {
        wrapped -= 360.0;
    }
    wrapped
}

/// Pulses for a `delta` degree move, rounded half away from zero
pub fn step_count(delta: f32, steps_per_degree: f32) -> u32 {
    // Float to int casts saturate
    (abs(delta) * steps_per_degree + 0.5) as u32
}

/// Map a requested elevation onto the mount's range
///
/// Negative angles are shifted by a half turn first, because the mount's
/// zero is 180° away from the "below horizon" convention.
pub fn normalize_elevation(target: f32, min_deg: f32, max_deg: f32) -> f32 {
    let shifted = if target < 0.0 { target + 180.0 } else { target };
    // NaN lands on min_deg
    if !(shifted >= min_deg) {
        min_deg
    } else if shifted > max_deg {
        max_deg
    } else {
        shifted
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingAzimuth {
    start: f32,
    delta: f32,
    steps: u32,
    issued: u32,
}

/// Motion controller owning both axes and the pointing state
pub struct MotionController<S, E> {
    stepper: S,
    servo: E,
    companion: Option<E>,
    azimuth: AzimuthConfig,
    elevation: ElevationConfig,
    state: PointingState,
    phase: MotionPhase,
    commanded_elevation: Option<f32>,
    pending: Option<PendingAzimuth>,
}

impl<S: PulseStepper, E: AngleServo> MotionController<S, E> {
    /// Create a controller; nothing is written until `initialize`
    pub fn new(
        stepper: S,
        servo: E,
        companion: Option<E>,
        azimuth: AzimuthConfig,
        elevation: ElevationConfig,
    ) -> Self {
        let companion = if elevation.mirror_companion {
            companion
        } else {
            None
        };
        Self {
            stepper,
            servo,
            companion,
            azimuth,
            elevation,
            state: PointingState::new(elevation.initial_deg),
            phase: MotionPhase::Idle,
            commanded_elevation: None,
            pending: None,
        }
    }

    /// Enable the stepper and level the elevation servos
    pub fn initialize(&mut self) -> Result<ElevationMove, MotionError> {
        self.ensure_idle()?;
        self.stepper.enable(true)?;
        let angle = normalize_elevation(
            self.elevation.initial_deg,
            self.elevation.min_deg,
            self.elevation.max_deg,
        );
        self.write_elevation(angle)?;
        self.state.current_elevation = angle;
        Ok(ElevationMove {
            angle,
            written: true,
        })
    }

    pub fn state(&self) -> &PointingState {
        &self.state
    }

    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    /// Pulses left in the current azimuth move
    pub fn remaining_steps(&self) -> u32 {
        self.pending.map_or(0, |p| p.steps - p.issued)
    }

    pub fn stepper_mut(&mut self) -> &mut S {
        &mut self.stepper
    }

    fn ensure_idle(&self) -> Result<(), MotionError> {
        if self.phase.is_idle() {
            Ok(())
        } else {
            Err(MotionError::Busy)
        }
    }

    /// Plan an azimuth move and set the direction pin
    ///
    /// No pulse is issued; drive the move with `advance`. The target is
    /// folded into `[0, 360)` first; NaN and infinities are refused and
    /// leave the state untouched.
    pub fn begin_azimuth(&mut self, target: f32) -> Result<AzimuthMove, MotionError> {
        self.ensure_idle()?;
        if !target.is_finite() {
            return Err(MotionError::InvalidTarget);
        }
        let target = wrap_azimuth(target);

        let start = self.state.current_azimuth;
        let delta = azimuth_delta(start, target, self.azimuth.path);
        let steps = step_count(delta, self.azimuth.steps_per_degree());
        let direction = if delta > 0.0 {
            Direction::Forward
        } else {
            Direction::Reverse
        };

        if steps > 0 {
            let pin = if self.azimuth.invert_direction {
                direction.opposite()
            } else {
                direction
            };
            self.stepper.set_direction(pin)?;
        }

        self.state.target_azimuth = target;
        self.state.has_target = true;
        self.pending = Some(PendingAzimuth {
            start,
            delta,
            steps,
            issued: 0,
        });
        self.phase = MotionPhase::Moving(Axis::Azimuth);

        Ok(AzimuthMove { steps, direction })
    }

    /// Issue the next pulse of the current azimuth move
    ///
    /// Returns `Ok(true)` once the move is complete, at which point the
    /// believed azimuth equals the target exactly. On a driver error the
    /// move is abandoned and the azimuth reflects the pulses already issued.
    pub fn advance(&mut self) -> Result<bool, MotionError> {
        let Some(mut pending) = self.pending else {
            return Ok(true);
        };

        if pending.issued < pending.steps {
            if let Err(e) = self
                .stepper
                .pulse(self.azimuth.pulse_high_us, self.azimuth.pulse_low_us)
            {
                let fraction = pending.issued as f32 / pending.steps as f32;
                self.state.current_azimuth = pending.start + pending.delta * fraction;
                self.finish();
                return Err(e.into());
            }
            pending.issued += 1;
            self.pending = Some(pending);
        }

        if pending.issued >= pending.steps {
            // Open loop: the pulse count is the position
            self.state.current_azimuth = self.state.target_azimuth;
            self.finish();
            return Ok(true);
        }
        Ok(false)
    }

    fn finish(&mut self) {
        self.pending = None;
        self.phase = MotionPhase::Idle;
    }

    /// Move the azimuth axis, blocking until all pulses are issued
    pub fn move_to_azimuth(&mut self, target: f32) -> Result<AzimuthMove, MotionError> {
        let planned = self.begin_azimuth(target)?;
        while !self.advance()? {}
        Ok(planned)
    }

    /// Command an elevation angle
    ///
    /// The angle is normalized and clamped; nothing is written when it
    /// equals the previous command.
    pub fn move_to_elevation(&mut self, target: f32) -> Result<ElevationMove, MotionError> {
        self.ensure_idle()?;

        let angle = normalize_elevation(target, self.elevation.min_deg, self.elevation.max_deg);
        self.state.target_elevation = target;
        self.state.has_target = true;

        if self.commanded_elevation == Some(angle) {
            return Ok(ElevationMove {
                angle,
                written: false,
            });
        }

        self.phase = MotionPhase::Moving(Axis::Elevation);
        let result = self.write_elevation(angle);
        self.phase = MotionPhase::Idle;
        result?;

        self.state.current_elevation = angle;
        Ok(ElevationMove {
            angle,
            written: true,
        })
    }

    fn write_elevation(&mut self, angle: f32) -> Result<(), MotionError> {
        self.servo.set_angle(angle)?;
        if let Some(companion) = self.companion.as_mut() {
            companion.set_angle(self.elevation.max_deg + self.elevation.min_deg - angle)?;
        }
        self.commanded_elevation = Some(angle);
        Ok(())
    }

    /// Move azimuth then elevation
    pub fn point_at(&mut self, azimuth: f32, elevation: f32) -> Result<PointingMove, MotionError> {
        let azimuth = self.move_to_azimuth(azimuth)?;
        let elevation = self.move_to_elevation(elevation)?;
        Ok(PointingMove {
            azimuth,
            elevation,
        })
    }

    /// Move to the neutral position
    pub fn home(&mut self) -> Result<PointingMove, MotionError> {
        self.point_at(self.azimuth.home_deg, self.elevation.home_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;
    use proptest::prelude::*;

    #[derive(Default)]
    struct RecordingStepper {
        pulses: u32,
        direction: Option<Direction>,
        enabled: bool,
        fail_at: Option<u32>,
    }

    impl PulseStepper for RecordingStepper {
        fn set_direction(&mut self, dir: Direction) -> Result<(), StepperError> {
            self.direction = Some(dir);
            Ok(())
        }

        fn enable(&mut self, enabled: bool) -> Result<(), StepperError> {
            self.enabled = enabled;
            Ok(())
        }

        fn pulse(&mut self, high_us: u32, low_us: u32) -> Result<(), StepperError> {
            assert_eq!((high_us, low_us), (800, 800));
            if self.fail_at == Some(self.pulses) {
                return Err(StepperError::PinError);
            }
            self.pulses += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingServo {
        angles: Vec<f32, 16>,
    }

    impl AngleServo for RecordingServo {
        fn set_angle(&mut self, degrees: f32) -> Result<(), ServoError> {
            self.angles.push(degrees).map_err(|_| ServoError::PwmError)
        }
    }

    type TestController = MotionController<RecordingStepper, RecordingServo>;

    fn controller_with(azimuth: AzimuthConfig) -> TestController {
        MotionController::new(
            RecordingStepper::default(),
            RecordingServo::default(),
            Some(RecordingServo::default()),
            azimuth,
            ElevationConfig::default(),
        )
    }

    fn controller() -> TestController {
        controller_with(AzimuthConfig::default())
    }

    #[test]
    fn test_initial_state() {
        let motion = controller();
        assert_eq!(motion.state().current_azimuth(), 0.0);
        assert_eq!(motion.state().current_elevation(), 90.0);
        assert!(!motion.state().has_target());
        assert_eq!(motion.phase(), MotionPhase::Idle);
    }

    #[test]
    fn test_initialize_levels_servos() {
        let mut motion = controller();
        let mv = motion.initialize().unwrap();
        assert!(mv.written);
        assert!(motion.stepper.enabled);
        assert_eq!(&motion.servo.angles[..], &[90.0]);
        assert_eq!(&motion.companion.as_ref().unwrap().angles[..], &[90.0]);

        // Same angle again is not rewritten
        assert!(!motion.move_to_elevation(90.0).unwrap().written);
    }

    #[test]
    fn test_azimuth_step_count_and_direction() {
        let mut motion = controller();
        let mv = motion.move_to_azimuth(157.23).unwrap();
        // 157.23 * 3200 / 360 = 1397.6
        assert_eq!(mv.steps, 1398);
        assert_eq!(mv.direction, Direction::Forward);
        assert_eq!(motion.stepper.pulses, 1398);
        assert_eq!(motion.state().current_azimuth(), 157.23);

        let mv = motion.move_to_azimuth(100.0).unwrap();
        assert_eq!(mv.direction, Direction::Reverse);
        assert_eq!(motion.stepper.direction, Some(Direction::Reverse));
        assert_eq!(motion.state().current_azimuth(), 100.0);
    }

    #[test]
    fn test_direct_path_goes_the_long_way() {
        let mut motion = controller();
        motion.move_to_azimuth(350.0).unwrap();
        let mv = motion.move_to_azimuth(10.0).unwrap();
        assert_eq!(mv.direction, Direction::Reverse);
        assert_eq!(mv.steps, step_count(340.0, motion.azimuth.steps_per_degree()));
    }

    #[test]
    fn test_shortest_path_wraps_through_zero() {
        let mut motion = controller_with(AzimuthConfig {
            path: AzimuthPath::Shortest,
            ..AzimuthConfig::default()
        });
        motion.move_to_azimuth(350.0).unwrap();
        let mv = motion.move_to_azimuth(10.0).unwrap();
        assert_eq!(mv.direction, Direction::Forward);
        assert_eq!(mv.steps, step_count(20.0, motion.azimuth.steps_per_degree()));
        assert_eq!(motion.state().current_azimuth(), 10.0);
    }

    #[test]
    fn test_inverted_direction_pin() {
        let mut motion = controller_with(AzimuthConfig {
            invert_direction: true,
            ..AzimuthConfig::default()
        });
        let mv = motion.move_to_azimuth(45.0).unwrap();
        assert_eq!(mv.direction, Direction::Forward);
        assert_eq!(motion.stepper.direction, Some(Direction::Reverse));
    }

    #[test]
    fn test_repeat_target_issues_no_pulses() {
        let mut motion = controller();
        motion.move_to_azimuth(157.23).unwrap();
        let before = motion.stepper.pulses;
        let mv = motion.move_to_azimuth(157.23).unwrap();
        assert_eq!(mv.steps, 0);
        assert_eq!(motion.stepper.pulses, before);
    }

    #[test]
    fn test_busy_while_azimuth_in_flight() {
        let mut motion = controller();
        let mv = motion.begin_azimuth(1.0).unwrap();
        assert_eq!(mv.steps, 9);
        assert_eq!(motion.phase(), MotionPhase::Moving(Axis::Azimuth));
        assert_eq!(motion.move_to_azimuth(2.0), Err(MotionError::Busy));
        assert_eq!(motion.move_to_elevation(10.0), Err(MotionError::Busy));

        let mut done = false;
        for _ in 0..9 {
            done = motion.advance().unwrap();
        }
        assert!(done);
        assert_eq!(motion.phase(), MotionPhase::Idle);
        assert_eq!(motion.remaining_steps(), 0);
        assert_eq!(motion.state().current_azimuth(), 1.0);
    }

    #[test]
    fn test_stepper_failure_keeps_partial_position() {
        let mut motion = controller();
        motion.stepper.fail_at = Some(4);
        // 1.8° = 16 steps
        let err = motion.move_to_azimuth(1.8).unwrap_err();
        assert_eq!(err, MotionError::Stepper(StepperError::PinError));
        assert_eq!(motion.phase(), MotionPhase::Idle);
        let az = motion.state().current_azimuth();
        assert!(az > 0.44 && az < 0.46);
    }

    #[test]
    fn test_non_finite_azimuth_is_refused() {
        let mut motion = controller();
        motion.move_to_azimuth(90.0).unwrap();
        let before = motion.stepper.pulses;

        for target in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN] {
            assert_eq!(motion.begin_azimuth(target), Err(MotionError::InvalidTarget));
            assert_eq!(motion.phase(), MotionPhase::Idle);
            assert_eq!(motion.remaining_steps(), 0);
        }
        assert_eq!(motion.stepper.pulses, before);
        assert_eq!(motion.state().current_azimuth(), 90.0);
        assert_eq!(motion.state().target_azimuth(), 90.0);

        // Later moves still plan from the last good position
        let mv = motion.move_to_azimuth(100.0).unwrap();
        assert_eq!(mv.steps, 89);
        assert_eq!(mv.direction, Direction::Forward);
        assert_eq!(motion.state().current_azimuth(), 100.0);
    }

    #[test]
    fn test_out_of_range_azimuth_wraps() {
        let mut motion = controller();
        let mv = motion.move_to_azimuth(400.0).unwrap();
        assert_eq!(mv.steps, step_count(40.0, motion.azimuth.steps_per_degree()));
        assert_eq!(motion.state().current_azimuth(), 40.0);

        motion.move_to_azimuth(-10.0).unwrap();
        assert_eq!(motion.state().current_azimuth(), 350.0);
        assert_eq!(motion.state().target_azimuth(), 350.0);

        motion.move_to_azimuth(360.0).unwrap();
        assert_eq!(motion.state().current_azimuth(), 0.0);
    }

    #[test]
    fn test_wrap_azimuth() {
        assert_eq!(wrap_azimuth(0.0), 0.0);
        assert_eq!(wrap_azimuth(157.23), 157.23);
        assert_eq!(wrap_azimuth(720.0), 0.0);
        assert_eq!(wrap_azimuth(-90.0), 270.0);
        assert!(wrap_azimuth(-1e-9) < 360.0);
    }

    #[test]
    fn test_negative_elevation_shifts_half_turn() {
        let mut motion = controller();
        let mv = motion.move_to_elevation(-30.0).unwrap();
        assert_eq!(mv.angle, 150.0);
        assert_eq!(motion.state().current_elevation(), 150.0);
        assert_eq!(motion.state().target_elevation(), -30.0);
        assert_eq!(&motion.companion.as_ref().unwrap().angles[..], &[30.0]);
    }

    #[test]
    fn test_elevation_clamps_to_range() {
        assert_eq!(normalize_elevation(200.0, 0.0, 180.0), 180.0);
        assert_eq!(normalize_elevation(-250.0, 0.0, 180.0), 0.0);
        assert_eq!(normalize_elevation(f32::NAN, 0.0, 180.0), 0.0);
        assert_eq!(normalize_elevation(42.15, 0.0, 180.0), 42.15);
    }

    #[test]
    fn test_companion_disabled_by_config() {
        let mut motion = MotionController::new(
            RecordingStepper::default(),
            RecordingServo::default(),
            Some(RecordingServo::default()),
            AzimuthConfig::default(),
            ElevationConfig {
                mirror_companion: false,
                ..ElevationConfig::default()
            },
        );
        motion.move_to_elevation(42.0).unwrap();
        assert!(motion.companion.is_none());
        assert_eq!(&motion.servo.angles[..], &[42.0]);
    }

    #[test]
    fn test_home_moves_to_neutral() {
        let mut motion = controller();
        motion.point_at(157.23, 42.15).unwrap();
        let mv = motion.home().unwrap();
        assert_eq!(mv.azimuth.direction, Direction::Reverse);
        assert_eq!(mv.elevation.angle, 0.0);
        assert_eq!(motion.state().current_azimuth(), 0.0);
        assert_eq!(motion.state().current_elevation(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_step_count_formula(previous in 0.0f32..360.0, target in 0.0f32..360.0) {
            let mut motion = controller();
            motion.move_to_azimuth(previous).unwrap();
            let before = motion.stepper.pulses;
            let mv = motion.move_to_azimuth(target).unwrap();

            let delta = target - previous;
            let magnitude = if delta < 0.0 { -delta } else { delta };
            let expected = (magnitude * (3200.0 / 360.0) + 0.5) as u32;
            prop_assert_eq!(mv.steps, expected);
            prop_assert_eq!(motion.stepper.pulses - before, expected);
            prop_assert_eq!(motion.state().current_azimuth(), target);
        }

        #[test]
        fn prop_negative_elevation_equivalent_to_shifted(target in -180.0f32..0.0) {
            let mut a = controller();
            let mut b = controller();
            let direct = a.move_to_elevation(target).unwrap();
            let shifted = b.move_to_elevation(180.0 + target).unwrap();
            prop_assert_eq!(direct.angle, shifted.angle);
            prop_assert!(direct.angle >= 0.0 && direct.angle <= 180.0);
        }

        #[test]
        fn prop_any_finite_target_lands_in_range(target in -1.0e6f32..1.0e6) {
            let mut motion = controller();
            let mv = motion.begin_azimuth(target).unwrap();
            prop_assert!(mv.steps <= 3200);
            while !motion.advance().unwrap() {}
            let az = motion.state().current_azimuth();
            prop_assert!(az >= 0.0 && az < 360.0);
        }

        #[test]
        fn prop_shortest_delta_never_exceeds_half_turn(current in 0.0f32..360.0, target in 0.0f32..360.0) {
            let delta = azimuth_delta(current, target, AzimuthPath::Shortest);
            prop_assert!(delta >= -180.0 && delta <= 180.0);
        }
    }
}
