//! Indicator lighting and the auxiliary status signal.
//!
//! All hardware is optional: the dispatcher only emits [`LightCommand`]s, and
//! the light service applies whichever drivers the board actually wired up.

use embedded_hal::digital::{OutputPin, PinState};

use crate::channel::LIGHT_CHANNEL;

/// Commands sent from the dispatcher to the light service.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightCommand {
    /// Step the backlight and underglow indicators
    Step,
    /// Assert or de-assert the auxiliary status signal
    Signal(bool),
    /// Adjust the underglow
    Underglow(UnderglowCommand),
}

/// Underglow adjustment requests, one per underglow keycode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnderglowCommand {
    Toggle,
    ModeForward,
    ModeReverse,
    HueUp,
    HueDown,
    SatUp,
    SatDown,
    ValUp,
    ValDown,
}

/// A brightness-stepping backlight.
pub trait BacklightDriver {
    type Error;

    /// Advance to the next brightness level, wrapping back to off.
    fn step(&mut self) -> Result<(), Self::Error>;
}

/// An underglow strip with a steppable animation/color state.
pub trait UnderglowDriver {
    type Error;

    /// Advance to the next underglow mode
    fn step(&mut self) -> Result<(), Self::Error>;

    /// Apply a single adjustment
    fn apply(&mut self, command: UnderglowCommand) -> Result<(), Self::Error>;
}

/// A single LED used as the backlight, stepped through on/off brightness
/// levels on a plain GPIO.
pub struct SingleLed<P: OutputPin> {
    /// Current brightness level, 0 is off
    level: u8,
    /// Number of on levels
    levels: u8,
    /// Pin state when turning the LED on
    on_state: PinState,
    /// GPIO for controlling the LED
    pin: P,
}

impl<P: OutputPin> SingleLed<P> {
    pub fn new(pin: P, on_state: PinState) -> Self {
        Self {
            level: 0,
            levels: 3,
            on_state,
            pin,
        }
    }

    pub fn with_levels(mut self, levels: u8) -> Self {
        self.levels = levels;
        self
    }

    pub fn level(&self) -> u8 {
        self.level
    }
}

impl<P: OutputPin> BacklightDriver for SingleLed<P> {
    type Error = P::Error;

    fn step(&mut self) -> Result<(), Self::Error> {
        self.level = (self.level + 1) % (self.levels + 1);
        if self.level == 0 {
            self.pin.set_state(!self.on_state)
        } else {
            // Without PWM all on-levels drive the pin fully on
            self.pin.set_state(self.on_state)
        }
    }
}

/// The auxiliary status signal pin, asserted while the indicator-step key is
/// held. Active-low by default.
pub struct StatusSignal<P: OutputPin> {
    pin: P,
    active_state: PinState,
}

impl<P: OutputPin> StatusSignal<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            active_state: PinState::Low,
        }
    }

    pub fn with_active_state(mut self, active_state: PinState) -> Self {
        self.active_state = active_state;
        self
    }

    fn set(&mut self, active: bool) -> Result<(), P::Error> {
        if active {
            self.pin.set_state(self.active_state)
        } else {
            self.pin.set_state(!self.active_state)
        }
    }
}

/// Bundles the optional light hardware and drains [`LIGHT_CHANNEL`].
pub struct LightService<B: BacklightDriver, U: UnderglowDriver, P: OutputPin> {
    backlight: Option<B>,
    underglow: Option<U>,
    status: Option<StatusSignal<P>>,
}

impl<B: BacklightDriver, U: UnderglowDriver, P: OutputPin> LightService<B, U, P> {
    pub fn new(backlight: Option<B>, underglow: Option<U>, status: Option<StatusSignal<P>>) -> Self {
        Self {
            backlight,
            underglow,
            status,
        }
    }

    pub async fn run(&mut self) -> ! {
        loop {
            let command = LIGHT_CHANNEL.receive().await;
            self.apply(command);
        }
    }

    pub fn apply(&mut self, command: LightCommand) {
        match command {
            LightCommand::Step => {
                if let Some(backlight) = &mut self.backlight {
                    if backlight.step().is_err() {
                        error!("Failed to step the backlight");
                    }
                }
                if let Some(underglow) = &mut self.underglow {
                    if underglow.step().is_err() {
                        error!("Failed to step the underglow");
                    }
                }
            }
            LightCommand::Signal(active) => {
                if let Some(status) = &mut self.status {
                    if status.set(active).is_err() {
                        error!("Failed to drive the status signal");
                    }
                }
            }
            LightCommand::Underglow(adjustment) => {
                if let Some(underglow) = &mut self.underglow {
                    if underglow.apply(adjustment).is_err() {
                        error!("Failed to adjust the underglow");
                    }
                }
            }
        }
    }
}
