//! Dip switch input device: N level inputs, one event per observed change.

use embedded_hal::digital::InputPin;

use super::InputDevice;
use crate::event::{DipSwitchEvent, Event};

/// Polls `N` switch pins and emits a [`DipSwitchEvent`] whenever a level
/// differs from the last observed one. No debounce, no history.
pub struct DipSwitch<P: InputPin, const N: usize> {
    pins: [P; N],
    levels: [bool; N],
    active_low: bool,
}

impl<P: InputPin, const N: usize> DipSwitch<P, N> {
    pub fn new(pins: [P; N]) -> Self {
        Self {
            pins,
            levels: [false; N],
            active_low: false,
        }
    }

    /// Treat a low pin as an active switch (pulled-up wiring)
    pub fn with_active_low(mut self) -> Self {
        self.active_low = true;
        self
    }

    /// Sample all pins and report the first changed switch, if any.
    fn scan(&mut self) -> Option<DipSwitchEvent> {
        for (id, pin) in self.pins.iter_mut().enumerate() {
            let active = match pin.is_high() {
                Ok(level) => level != self.active_low,
                Err(_) => continue,
            };
            if active != self.levels[id] {
                self.levels[id] = active;
                return Some(DipSwitchEvent { id: id as u8, active });
            }
        }
        None
    }
}

impl<P: InputPin, const N: usize> InputDevice for DipSwitch<P, N> {
    async fn read_event(&mut self) -> Event {
        loop {
            if let Some(event) = self.scan() {
                return Event::DipSwitch(event);
            }

            // Wait for 20ms to avoid busy loop
            embassy_time::Timer::after_millis(20).await;
        }
    }
}
