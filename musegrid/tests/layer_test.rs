pub mod common;

use musegrid::embassy_futures::block_on;
use musegrid::eeconfig::FlashOperationMessage;
use musegrid::layout::{ADJUST_LAYER, QWERTY_LAYER};
use rusty_fork::rusty_fork_test;

use crate::common::{default_dispatcher, dip, key};

rusty_fork_test! {
    #[test]
    fn test_tri_layer_sequence() {
        let (dispatcher, _, _) = default_dispatcher();
        key_sequence_test!(
            dispatcher: dispatcher,
            sequence: [
                [4, 4, true],   // hold lower
                [1, 3, true],   // lower: Home
                [1, 3, false],
                [4, 7, true],   // hold raise as well: adjust derived
                [3, 7, true],   // adjust: F1
                [3, 7, false],
                [4, 7, false],  // release raise: adjust gone
                [1, 3, true],   // back on lower: Home
                [1, 3, false],
                [4, 4, false],  // release lower
                [1, 3, true],   // base: F
                [1, 3, false],
            ],
            expected_reports: [
                [0, [kc8!(Home), 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
                [0, [kc8!(F1), 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
                [0, [kc8!(Home), 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
                [0, [kc8!(F), 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        );
    }

    #[test]
    fn test_adjust_requires_both_momentary_layers() {
        let (mut dispatcher, keymap, _) = default_dispatcher();
        block_on(async {
            dispatcher.process(key(4, 4, true)).await;
            assert!(!keymap.borrow().is_layer_active(ADJUST_LAYER));
            dispatcher.process(key(4, 7, true)).await;
            assert!(keymap.borrow().is_layer_active(ADJUST_LAYER));
            dispatcher.process(key(4, 4, false)).await;
            assert!(!keymap.borrow().is_layer_active(ADJUST_LAYER));
            dispatcher.process(key(4, 7, false)).await;
            assert!(!keymap.borrow().is_layer_active(ADJUST_LAYER));
        });
    }

    #[test]
    fn test_releasing_never_pressed_layer_is_noop() {
        let (dispatcher, _, _) = default_dispatcher();
        key_sequence_test!(
            dispatcher: dispatcher,
            sequence: [
                [4, 7, false],  // release raise that was never pressed
                [1, 3, true],   // still the base layer
                [1, 3, false],
            ],
            expected_reports: [
                [0, [kc8!(F), 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        );
    }

    #[test]
    fn test_default_layer_switch_persists_and_sticks() {
        let (mut dispatcher, keymap, _) = default_dispatcher();
        block_on(async {
            // Reach the adjust layer and hit the qwerty switch key
            dispatcher.process(key(4, 4, true)).await;
            dispatcher.process(key(4, 7, true)).await;
            dispatcher.process(key(0, 2, true)).await;
            assert_eq!(keymap.borrow().get_default_layer(), QWERTY_LAYER);
            assert_eq!(
                common::drain_flash_messages(),
                [FlashOperationMessage::DefaultLayer(QWERTY_LAYER)]
            );

            // The release has no further effect
            dispatcher.process(key(0, 2, false)).await;
            assert_eq!(keymap.borrow().get_default_layer(), QWERTY_LAYER);
            assert!(common::drain_flash_messages().is_empty());

            dispatcher.process(key(4, 7, false)).await;
            dispatcher.process(key(4, 4, false)).await;
        });

        // The base layer is now qwerty: the key below (1, 3) is E
        key_sequence_test!(
            dispatcher: dispatcher,
            sequence: [
                [1, 3, true],
                [1, 3, false],
            ],
            expected_reports: [
                [0, [kc8!(E), 0, 0, 0, 0, 0]],
                [0, [0, 0, 0, 0, 0, 0]],
            ]
        );
    }

    #[test]
    fn test_dip_switch_forces_adjust_layer() {
        let (mut dispatcher, keymap, _) = default_dispatcher();
        block_on(async {
            dispatcher.process(dip(0, true)).await;
            assert!(keymap.borrow().is_layer_active(ADJUST_LAYER));

            // F1 resolves on the forced adjust layer
            dispatcher.process(key(3, 7, true)).await;
            dispatcher.process(key(3, 7, false)).await;

            dispatcher.process(dip(0, false)).await;
            assert!(!keymap.borrow().is_layer_active(ADJUST_LAYER));
        });
        let reports = common::drain_keyboard_reports();
        assert_eq!(reports[0].keycodes[0], kc8!(F1));
    }
}
