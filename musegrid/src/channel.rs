//! Static channels connecting input devices, the dispatcher and the service
//! tasks. All channels are multi-producer and drained by exactly one task.

use embassy_sync::channel::Channel;

use crate::RawMutex;
use crate::eeconfig::FlashOperationMessage;
use crate::event::Event;
use crate::hid::Report;
use crate::light::LightCommand;

pub(crate) const EVENT_CHANNEL_SIZE: usize = 16;
pub(crate) const REPORT_CHANNEL_SIZE: usize = 16;

/// Channel from input devices to the dispatcher
pub static EVENT_CHANNEL: Channel<RawMutex, Event, EVENT_CHANNEL_SIZE> = Channel::new();

/// Channel from the dispatcher to the HID report writer
pub static KEYBOARD_REPORT_CHANNEL: Channel<RawMutex, Report, REPORT_CHANNEL_SIZE> = Channel::new();

/// Channel from the dispatcher to the light service
pub static LIGHT_CHANNEL: Channel<RawMutex, LightCommand, 4> = Channel::new();

/// Channel from the dispatcher to the storage task
pub static FLASH_CHANNEL: Channel<RawMutex, FlashOperationMessage, 4> = Channel::new();
