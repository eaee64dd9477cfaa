use crate::keycode::{KeyCode, ModifierCombination};

/// EncoderAction is the action at an encoder position, stored in the encoder map.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderAction {
    clockwise: KeyAction,
    counter_clockwise: KeyAction,
}

impl Default for EncoderAction {
    fn default() -> Self {
        Self {
            clockwise: KeyAction::No,
            counter_clockwise: KeyAction::No,
        }
    }
}

impl EncoderAction {
    pub const fn new(clockwise: KeyAction, counter_clockwise: KeyAction) -> Self {
        Self {
            clockwise,
            counter_clockwise,
        }
    }

    pub fn clockwise(&self) -> KeyAction {
        self.clockwise
    }

    pub fn counter_clockwise(&self) -> KeyAction {
        self.counter_clockwise
    }
}

/// A KeyAction is the action at a keyboard position, stored in the keymap.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyAction {
    /// No action. The key does nothing on any layer state.
    No,
    /// Transparent action, the next active layer below will be checked.
    Transparent,
    /// A single action, triggered when pressed and cancelled when released.
    Single(Action),
}

/// A single basic action that the keyboard can execute.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// A normal key stroke, used for all keycodes defined in the `KeyCode` enum.
    Key(KeyCode),
    /// Key stroke with a modifier combination triggered alongside it.
    KeyWithModifier(KeyCode, ModifierCombination),
    /// Activate a layer while held
    LayerOn(u8),
    /// Deactivate a layer while held
    LayerOff(u8),
    /// Toggle a layer
    LayerToggle(u8),
    /// Set the default layer and persist the selection
    DefaultLayer(u8),
}
