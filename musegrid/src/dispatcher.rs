//! The layer & keycode dispatcher.
//!
//! The dispatcher drains [`EVENT_CHANNEL`], resolves key events through the
//! keymap and turns them into HID reports, layer transitions, light commands
//! and persistence requests. Every event is processed to completion before
//! the next one is picked up, so layer recomputation always follows the
//! transition that triggered it.

use core::cell::RefCell;

use heapless::Vec;

use crate::action::{Action, KeyAction};
use crate::channel::{EVENT_CHANNEL, FLASH_CHANNEL, KEYBOARD_REPORT_CHANNEL, LIGHT_CHANNEL};
use crate::eeconfig::FlashOperationMessage;
use crate::event::{DipSwitchEvent, Direction, Event, KeyPos, KeyboardEventPos, RotaryEncoderPos};
use crate::hid::{KeyboardReport, MediaKeyboardReport, Report};
use crate::input_device::Runnable;
use crate::keycode::{KeyCode, ModifierCombination};
use crate::keymap::KeyMap;
use crate::light::{LightCommand, UnderglowCommand};
use crate::muse::MuseState;

pub struct Dispatcher<'a, const ROW: usize, const COL: usize, const NUM_LAYER: usize, const NUM_ENCODER: usize = 0> {
    /// Keymap of the keyboard, shared with the host glue that may rewrite it
    keymap: &'a RefCell<KeyMap<'a, ROW, COL, NUM_LAYER, NUM_ENCODER>>,
    /// Muse state, shared with the sequencer task
    muse: &'a RefCell<MuseState>,
    /// Basic keycodes currently held, 6-key rollover
    held_keys: Vec<KeyCode, 6>,
    /// Modifier byte of the keyboard report
    modifiers: u8,
}

impl<'a, const ROW: usize, const COL: usize, const NUM_LAYER: usize, const NUM_ENCODER: usize> Runnable
    for Dispatcher<'a, ROW, COL, NUM_LAYER, NUM_ENCODER>
{
    async fn run(&mut self) {
        loop {
            let event = EVENT_CHANNEL.receive().await;
            self.process(event).await;
        }
    }
}

impl<'a, const ROW: usize, const COL: usize, const NUM_LAYER: usize, const NUM_ENCODER: usize>
    Dispatcher<'a, ROW, COL, NUM_LAYER, NUM_ENCODER>
{
    pub fn new(
        keymap: &'a RefCell<KeyMap<'a, ROW, COL, NUM_LAYER, NUM_ENCODER>>,
        muse: &'a RefCell<MuseState>,
    ) -> Self {
        Self {
            keymap,
            muse,
            held_keys: Vec::new(),
            modifiers: 0,
        }
    }

    /// Process one input event to completion.
    pub async fn process(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => match key_event.pos {
                KeyboardEventPos::Key(pos) => self.process_key(pos, key_event.pressed).await,
                KeyboardEventPos::RotaryEncoder(pos) => self.process_rotary(pos, key_event.pressed).await,
            },
            Event::DipSwitch(dip_switch_event) => self.process_dip_switch(dip_switch_event).await,
        }
    }

    async fn process_key(&mut self, pos: KeyPos, pressed: bool) {
        let action = self.keymap.borrow_mut().get_action_with_layer_cache(pos, pressed);
        self.process_key_action(action, pressed).await;
    }

    async fn process_key_action(&mut self, key_action: KeyAction, pressed: bool) {
        match key_action {
            KeyAction::No | KeyAction::Transparent => (),
            KeyAction::Single(action) => self.process_action(action, pressed).await,
        }
    }

    async fn process_action(&mut self, action: Action, pressed: bool) {
        match action {
            Action::Key(keycode) => {
                if !keycode.is_user() || !self.process_user_key(keycode, pressed).await {
                    self.process_keycode(keycode, pressed).await;
                }
            }
            Action::KeyWithModifier(keycode, modifiers) => {
                self.register_modifiers(modifiers, pressed);
                self.process_keycode(keycode, pressed).await;
            }
            Action::LayerOn(layer) => {
                // Momentary: active while the key is held
                if pressed {
                    self.keymap.borrow_mut().activate_layer(layer);
                } else {
                    self.keymap.borrow_mut().deactivate_layer(layer);
                }
            }
            Action::LayerOff(layer) => {
                if pressed {
                    self.keymap.borrow_mut().deactivate_layer(layer);
                }
            }
            Action::LayerToggle(layer) => {
                if pressed {
                    self.keymap.borrow_mut().toggle_layer(layer);
                }
            }
            Action::DefaultLayer(layer) => {
                if pressed {
                    self.set_and_persist_default_layer(layer).await;
                }
            }
        }
    }

    /// The user keycode block. Returns whether the key was consumed; an
    /// unbound user key falls through to default keycode processing (where it
    /// resolves to nothing).
    async fn process_user_key(&mut self, keycode: KeyCode, pressed: bool) -> bool {
        let user_keys = self.keymap.borrow().behavior().user_keys;
        match keycode {
            KeyCode::User0 | KeyCode::User1 => {
                // Persistent base layer switch, on press only
                if pressed {
                    let base = if keycode == KeyCode::User0 {
                        user_keys.base_layers[0]
                    } else {
                        user_keys.base_layers[1]
                    };
                    self.set_and_persist_default_layer(base).await;
                }
                true
            }
            KeyCode::User2 => {
                // Momentary lower layer; tri-layer recomputation runs inside
                // the keymap on every transition
                if pressed {
                    self.keymap.borrow_mut().activate_layer(user_keys.lower);
                } else {
                    self.keymap.borrow_mut().deactivate_layer(user_keys.lower);
                }
                true
            }
            KeyCode::User3 => {
                // Momentary raise layer
                if pressed {
                    self.keymap.borrow_mut().activate_layer(user_keys.raise);
                } else {
                    self.keymap.borrow_mut().deactivate_layer(user_keys.raise);
                }
                true
            }
            KeyCode::User4 => {
                // Indicator step: step the lights and hold right-shift plus
                // the status signal while the key is down
                if pressed {
                    self.register_key(KeyCode::RShift);
                    self.send_keyboard_report().await;
                    LIGHT_CHANNEL.send(LightCommand::Step).await;
                    LIGHT_CHANNEL.send(LightCommand::Signal(true)).await;
                } else {
                    self.unregister_key(KeyCode::RShift);
                    self.send_keyboard_report().await;
                    LIGHT_CHANNEL.send(LightCommand::Signal(false)).await;
                }
                true
            }
            _ => false,
        }
    }

    /// Default semantics of a resolved keycode.
    async fn process_keycode(&mut self, keycode: KeyCode, pressed: bool) {
        if keycode.is_basic() || keycode.is_modifier() {
            if pressed {
                self.register_key(keycode);
            } else {
                self.unregister_key(keycode);
            }
            self.send_keyboard_report().await;
        } else if keycode.is_consumer() {
            let usage_id = if pressed {
                keycode.as_consumer_control_usage_id()
            } else {
                0
            };
            KEYBOARD_REPORT_CHANNEL
                .send(Report::Media(MediaKeyboardReport { usage_id }))
                .await;
        } else if keycode.is_rgb() {
            if pressed {
                LIGHT_CHANNEL
                    .send(LightCommand::Underglow(underglow_command(keycode)))
                    .await;
            }
        } else if keycode.is_firmware() {
            if pressed {
                info!("Firmware control key {:?} is handled by the host glue", keycode);
            }
        } else if keycode != KeyCode::No {
            debug!("Unhandled keycode {:?}", keycode);
        }
    }

    async fn process_rotary(&mut self, pos: RotaryEncoderPos, pressed: bool) {
        if self.muse.borrow().is_enabled() {
            // Rotation tunes the sequencer: pitch offset with raise held,
            // tempo otherwise. Adjust on the press edge only.
            if !pressed {
                return;
            }
            let raise = self.keymap.borrow().behavior().user_keys.raise;
            let raise_active = self.keymap.borrow().is_layer_active(raise);
            let mut muse = self.muse.borrow_mut();
            match (raise_active, pos.direction) {
                (true, Direction::Clockwise) => muse.offset_up(),
                (true, Direction::CounterClockwise) => muse.offset_down(),
                (false, Direction::Clockwise) => muse.tempo_up(),
                (false, Direction::CounterClockwise) => muse.tempo_down(),
                (_, Direction::None) => (),
            }
        } else {
            let encoder_action = self.keymap.borrow().get_encoder_action(pos);
            if let Some(encoder_action) = encoder_action {
                let action = match pos.direction {
                    Direction::Clockwise => encoder_action.clockwise(),
                    Direction::CounterClockwise => encoder_action.counter_clockwise(),
                    Direction::None => return,
                };
                self.process_key_action(action, pressed).await;
            }
        }
    }

    async fn process_dip_switch(&mut self, event: DipSwitchEvent) {
        match event.id {
            0 => {
                // Manual override of the adjust layer, bypassing the
                // tri-layer derivation
                let adjust = self.keymap.borrow().behavior().tri_layer.map(|layers| layers[2]);
                match adjust {
                    Some(adjust) => self.keymap.borrow_mut().set_layer_state(adjust, event.active),
                    None => warn!("Dip switch 0 flipped but no adjust layer is configured"),
                }
            }
            1 => self.muse.borrow_mut().set_mode(event.active),
            _ => warn!("Unassigned dip switch {}", event.id),
        }
    }

    async fn set_and_persist_default_layer(&mut self, layer: u8) {
        self.keymap.borrow_mut().set_default_layer(layer);
        FLASH_CHANNEL
            .send(FlashOperationMessage::DefaultLayer(layer))
            .await;
    }

    fn register_key(&mut self, keycode: KeyCode) {
        if keycode.is_modifier() {
            self.modifiers |= keycode.as_modifier_bit();
        } else if !self.held_keys.contains(&keycode) && self.held_keys.push(keycode).is_err() {
            warn!("Key rollover overflow, dropping {:?}", keycode);
        }
    }

    fn unregister_key(&mut self, keycode: KeyCode) {
        if keycode.is_modifier() {
            self.modifiers &= !keycode.as_modifier_bit();
        } else if let Some(index) = self.held_keys.iter().position(|held| *held == keycode) {
            self.held_keys.remove(index);
        }
    }

    fn register_modifiers(&mut self, modifiers: ModifierCombination, pressed: bool) {
        if pressed {
            self.modifiers |= modifiers.to_hid_modifier_bits();
        } else {
            self.modifiers &= !modifiers.to_hid_modifier_bits();
        }
    }

    async fn send_keyboard_report(&self) {
        let mut keycodes = [0u8; 6];
        for (slot, keycode) in keycodes.iter_mut().zip(self.held_keys.iter()) {
            *slot = *keycode as u8;
        }
        let report = KeyboardReport {
            modifier: self.modifiers,
            reserved: 0,
            leds: 0,
            keycodes,
        };
        KEYBOARD_REPORT_CHANNEL.send(Report::Keyboard(report)).await;
    }
}

fn underglow_command(keycode: KeyCode) -> UnderglowCommand {
    match keycode {
        KeyCode::RgbTog => UnderglowCommand::Toggle,
        KeyCode::RgbModeForward => UnderglowCommand::ModeForward,
        KeyCode::RgbModeReverse => UnderglowCommand::ModeReverse,
        KeyCode::RgbHui => UnderglowCommand::HueUp,
        KeyCode::RgbHud => UnderglowCommand::HueDown,
        KeyCode::RgbSai => UnderglowCommand::SatUp,
        KeyCode::RgbSad => UnderglowCommand::SatDown,
        KeyCode::RgbVai => UnderglowCommand::ValUp,
        _ => UnderglowCommand::ValDown,
    }
}
