//! STEP/DIR stepper driver
//!
//! Drives any step/direction driver board from three GPIOs and a blocking
//! delay. The enable input on most boards is active-low.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use starpoint_core::traits::{Direction, PulseStepper, StepperError};

/// Step/direction stepper
pub struct StepDirStepper<STEP, DIR, EN, D> {
    step: STEP,
    dir: DIR,
    enable: EN,
    delay: D,
    /// If true, driver enabled = pin LOW
    enable_inverted: bool,
    enabled: bool,
}

impl<STEP, DIR, EN, D> StepDirStepper<STEP, DIR, EN, D>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    D: DelayNs,
{
    /// Create a new driver, initially disabled
    pub fn new(
        step: STEP,
        dir: DIR,
        enable: EN,
        delay: D,
        enable_inverted: bool,
    ) -> Result<Self, StepperError> {
        let mut stepper = Self {
            step,
            dir,
            enable,
            delay,
            enable_inverted,
            enabled: false,
        };
        stepper.step.set_low().map_err(|_| StepperError::PinError)?;
        stepper.enable(false)?;
        Ok(stepper)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl<STEP, DIR, EN, D> PulseStepper for StepDirStepper<STEP, DIR, EN, D>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    D: DelayNs,
{
    fn set_direction(&mut self, dir: Direction) -> Result<(), StepperError> {
        match dir {
            Direction::Forward => self.dir.set_high(),
            Direction::Reverse => self.dir.set_low(),
        }
        .map_err(|_| StepperError::PinError)
    }

    fn enable(&mut self, enabled: bool) -> Result<(), StepperError> {
        let result = if enabled != self.enable_inverted {
            self.enable.set_high()
        } else {
            self.enable.set_low()
        };
        result.map_err(|_| StepperError::PinError)?;
        self.enabled = enabled;
        Ok(())
    }

    fn pulse(&mut self, high_us: u32, low_us: u32) -> Result<(), StepperError> {
        if !self.enabled {
            return Err(StepperError::NotEnabled);
        }
        self.step.set_high().map_err(|_| StepperError::PinError)?;
        self.delay.delay_us(high_us);
        self.step.set_low().map_err(|_| StepperError::PinError)?;
        self.delay.delay_us(low_us);
        Ok(())
    }
}
