extern crate musegrid;

/// Feed a key sequence into a dispatcher and compare the emitted keyboard
/// reports against the expected ones.
#[macro_export]
macro_rules! key_sequence_test {
    (dispatcher: $dispatcher:expr, sequence: [$([$row:expr, $col:expr, $pressed:expr]),* $(,)?], expected_reports: [$([$modifier:expr, $keys:expr]),* $(,)?]) => {
        musegrid::embassy_futures::block_on(async {
            let mut dispatcher = $dispatcher;
            $(
                dispatcher.process($crate::common::key($row, $col, $pressed)).await;
            )*
            let reports = $crate::common::drain_keyboard_reports();
            let expected_reports = vec![
                $(
                    musegrid::hid::KeyboardReport {
                        modifier: $modifier,
                        reserved: 0,
                        leds: 0,
                        keycodes: $keys,
                    },
                )*
            ];
            assert_eq!(reports, expected_reports);
        });
    };
}

// a rust macro to map a keycode name to its u8 value in the hid report
#[macro_export]
macro_rules! kc8 {
    ($key: ident) => {
        musegrid::keycode::KeyCode::$key as u8
    };
}
