//! Keymap, layer and muse-sequencer engine for a 5x12 ortholinear keyboard.
//!
//! The crate owns the personality of the board: the layer tables, the user
//! keycode behaviors (persistent base-layer switch, momentary lower/raise
//! with a derived adjust layer, indicator stepping), rotary encoder and dip
//! switch handling, and the optional muse demo mode. Matrix scanning and the
//! HID transport live in the host firmware, connected through the channels in
//! [`channel`].
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![no_std]
#![allow(async_fn_in_trait)]

#[cfg(test)]
#[macro_use]
extern crate std;

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

// Re-exported for the macros in `input_device`
pub use embassy_futures;
pub use futures;

pub mod action;
pub mod channel;
pub mod config;
pub mod dispatcher;
pub mod eeconfig;
pub mod event;
pub mod hid;
pub mod input_device;
pub mod keycode;
pub mod keymap;
pub mod layout;
#[macro_use]
pub mod layout_macro;
pub mod light;
pub mod muse;

/// The raw mutex used by all static channels
pub type RawMutex = embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
