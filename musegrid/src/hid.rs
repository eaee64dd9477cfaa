use serde::Serialize;
use usbd_hid::descriptor::generator_prelude::*;

/// KeyboardReport describes a report and its companion descriptor that can be
/// used to send keyboard button presses to a host and receive the status of the
/// keyboard LEDs.
#[gen_hid_descriptor(
    (collection = APPLICATION, usage_page = GENERIC_DESKTOP, usage = KEYBOARD) = {
        (usage_page = KEYBOARD, usage_min = 0xE0, usage_max = 0xE7) = {
            #[packed_bits = 8] #[item_settings(data,variable,absolute)] modifier=input;
        };
        (logical_min = 0,) = {
            #[item_settings(constant,variable,absolute)] reserved=input;
        };
        (usage_page = LEDS, usage_min = 0x01, usage_max = 0x05) = {
            #[packed_bits = 5] #[item_settings(data,variable,absolute)] leds=output;
        };
        (usage_page = KEYBOARD, usage_min = 0x00, usage_max = 0xDD) = {
            #[item_settings(data,array,absolute)] keycodes=input;
        };
    }
)]
#[derive(Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardReport {
    pub modifier: u8,
    pub reserved: u8,
    pub leds: u8,
    pub keycodes: [u8; 6],
}

/// MediaKeyboardReport describes a report and descriptor that can be used to
/// send consumer control commands to the host, used for the volume and
/// launcher keys.
#[gen_hid_descriptor(
    (collection = APPLICATION, usage_page = CONSUMER, usage = CONSUMER_CONTROL) = {
        (usage_page = CONSUMER, usage_min = 0x00, usage_max = 0x514) = {
            #[item_settings(data,array,absolute,not_null)] usage_id=input;
        };
    }
)]
#[derive(Default)]
pub struct MediaKeyboardReport {
    pub usage_id: u16,
}

// `defmt::Format` cannot be derived here: `gen_hid_descriptor` makes this struct
// `#[repr(C, packed)]`, and the derive binds the `u16` field by reference, which
// is unaligned (E0793). Hand-write the impl, copying the field out by value.
#[cfg(feature = "defmt")]
impl defmt::Format for MediaKeyboardReport {
    fn format(&self, f: defmt::Formatter) {
        let usage_id = self.usage_id;
        defmt::write!(f, "MediaKeyboardReport {{ usage_id: {} }}", usage_id)
    }
}

/// HID reports emitted by the dispatcher.
///
/// The transport (USB or wireless) is owned by the host firmware; it drains
/// [`crate::channel::KEYBOARD_REPORT_CHANNEL`] and writes each report to the
/// matching endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Report {
    /// Boot-compatible 6-KRO keyboard report
    Keyboard(KeyboardReport),
    /// Consumer page report, used for media/volume keys
    Media(MediaKeyboardReport),
}
