//! Quadrature rotary encoder device.

use embedded_hal::digital::InputPin;

use super::InputDevice;
use crate::event::{Direction, Event, KeyboardEvent};

/// Decode one gray-code state transition. The low two bits are the previous
/// pin sample, the high two bits the current one.
fn phase(s: u8) -> Direction {
    match s {
        0b0001 | 0b0111 | 0b1000 | 0b1110 => Direction::Clockwise,
        0b0010 | 0b0100 | 0b1011 | 0b1101 => Direction::CounterClockwise,
        _ => Direction::None,
    }
}

/// Polls two [`InputPin`]s and emits one press/release event pair per
/// detected transition. No acceleration, one detent in, one event out.
pub struct RotaryEncoder<A, B> {
    pin_a: A,
    pin_b: B,
    state: u8,
    /// The index of the rotary encoder
    id: u8,
    /// The last emitted direction. When it's not `None`, the encoder still
    /// owes the matching release event.
    last_action: Option<Direction>,
}

impl<A, B> RotaryEncoder<A, B>
where
    A: InputPin,
    B: InputPin,
{
    pub fn new(pin_a: A, pin_b: B, id: u8) -> Self {
        Self {
            pin_a,
            pin_b,
            state: 0u8,
            id,
            last_action: None,
        }
    }

    /// Sample both pins and evaluate the next state of the encoder.
    pub fn update(&mut self) -> Direction {
        // use mask to get previous state value
        let mut s = self.state & 0b11;

        let (a_is_low, b_is_low) = (self.pin_a.is_low(), self.pin_b.is_low());

        // move in the new state
        match a_is_low {
            Ok(true) => s |= 0b0100,
            Ok(false) => {}
            Err(_) => return Direction::None,
        }
        match b_is_low {
            Ok(true) => s |= 0b1000,
            Ok(false) => {}
            Err(_) => return Direction::None,
        }

        self.state = s >> 2;

        phase(s)
    }
}

impl<A: InputPin, B: InputPin> InputDevice for RotaryEncoder<A, B> {
    async fn read_event(&mut self) -> Event {
        // A pending press is followed by its release event
        if let Some(last_action) = self.last_action.take() {
            embassy_time::Timer::after_millis(5).await;
            return Event::Key(KeyboardEvent::rotary_encoder(self.id, last_action, false));
        }

        loop {
            let direction = self.update();

            if direction != Direction::None {
                self.last_action = Some(direction);
                return Event::Key(KeyboardEvent::rotary_encoder(self.id, direction, true));
            }

            // Wait for 20ms to avoid busy loop
            embassy_time::Timer::after_millis(20).await;
        }
    }
}
