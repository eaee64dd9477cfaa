//! Input device traits and pin-level devices.
//!
//! An [`InputDevice`] produces [`Event`]s from hardware; the `run_devices!`
//! macro forwards the events of any number of devices into a channel, where
//! the dispatcher picks them up.

use crate::event::Event;

pub mod dip_switch;
pub mod rotary_encoder;

/// The trait for input devices.
pub trait InputDevice {
    /// Read the next raw input event
    async fn read_event(&mut self) -> Event;
}

/// A long-running task: the dispatcher and the service tasks implement this.
pub trait Runnable {
    async fn run(&mut self);
}

/// Bind input devices to an event channel and run all of them.
///
/// ```ignore
/// let device_future = run_devices! {
///     (encoder, dip_switch) => musegrid::channel::EVENT_CHANNEL,
/// };
/// ```
#[macro_export]
macro_rules! run_devices {
    ( $( ( $( $dev:ident ),* ) => $channel:expr ),+ $(,)? ) => {{
        use $crate::futures::{self, future::FutureExt, select_biased};
        $crate::join_all!(
            $(
                async {
                    loop {
                        let e = select_biased! {
                            $(
                                e = $dev.read_event().fuse() => e,
                            )*
                        };
                        $channel.send(e).await;
                    }
                }
            ),+
        )
    }};
}

/// Helper macro joining all futures
#[macro_export]
macro_rules! join_all {
    ($fut:expr) => {
        $fut
    };
    ($f1:expr, $f2:expr) => {
        $crate::embassy_futures::join::join($f1, $f2)
    };
    ($f1:expr, $f2:expr, $f3:expr) => {
        $crate::embassy_futures::join::join3($f1, $f2, $f3)
    };
    ($f1:expr, $f2:expr, $f3:expr, $f4:expr) => {
        $crate::embassy_futures::join::join4($f1, $f2, $f3, $f4)
    };
    ($f1:expr, $f2:expr, $f3:expr, $f4:expr, $($rest:expr),+) => {{
        let head = $crate::embassy_futures::join::join4($f1, $f2, $f3, $f4);
        let tail = $crate::join_all!($($rest),+);
        $crate::embassy_futures::join::join(head, tail)
    }};
}
