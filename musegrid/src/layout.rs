//! The stock layout: a 5x12 ortholinear grid with five layers, one rotary
//! encoder and two dip switches.
//!
//! Two persistent base layers (Colemak and Qwerty) sit below the momentary
//! lower/raise layers; holding both momentary keys derives the adjust layer.

use crate::action::{EncoderAction, KeyAction};
use crate::config::{BehaviorConfig, MuseConfig, UserKeyConfig};
use crate::keycode::{KeyCode, ModifierCombination};
use crate::{encoder, k, layer, shifted, wm};

pub const ROW: usize = 5;
pub const COL: usize = 12;
pub const NUM_LAYER: usize = 5;
pub const NUM_ENCODER: usize = 1;

pub const COLEMAK_LAYER: u8 = 0;
pub const QWERTY_LAYER: u8 = 1;
pub const LOWER_LAYER: u8 = 2;
pub const RAISE_LAYER: u8 = 3;
pub const ADJUST_LAYER: u8 = 4;

// The user keycode block, dispatched in `Dispatcher::process_user_key`
pub const COLEMAK: KeyAction = k!(User0);
pub const QWERTY: KeyAction = k!(User1);
pub const LOWER: KeyAction = k!(User2);
pub const RAISE: KeyAction = k!(User3);
pub const BACKLIT: KeyAction = k!(User4);

// Editing shortcuts on the lower layer
const COMMENT: KeyAction = wm!(Slash, ModifierCombination::LCTRL);
const DEL_WORD: KeyAction = wm!(Backspace, ModifierCombination::LCTRL);
const UNDO: KeyAction = wm!(Z, ModifierCombination::LCTRL);
const REDO: KeyAction = wm!(Y, ModifierCombination::LCTRL);
const SELECT_ALL: KeyAction = wm!(A, ModifierCombination::LCTRL);
const CUT: KeyAction = wm!(X, ModifierCombination::LCTRL);
const COPY: KeyAction = wm!(C, ModifierCombination::LCTRL);
const PASTE: KeyAction = wm!(V, ModifierCombination::LCTRL);
const SAVE: KeyAction = wm!(S, ModifierCombination::LCTRL);
const REFRESH: KeyAction = wm!(R, ModifierCombination::LCTRL);

const ____: KeyAction = KeyAction::Transparent;
const XXXX: KeyAction = KeyAction::No;

#[rustfmt::skip]
pub fn default_keymap() -> [[[KeyAction; COL]; ROW]; NUM_LAYER] {
    [
        // Colemak
        layer!([
            [k!(Escape),    k!(Kc1),  k!(Kc2),  k!(Kc3),   k!(Kc4), k!(Kc5),   k!(Kc6),   k!(Kc7), k!(Kc8),    k!(Kc9),       k!(Kc0),   k!(Delete)],
            [k!(Tab),       k!(Q),    k!(W),    k!(F),     k!(P),   k!(G),     k!(J),     k!(L),   k!(U),      k!(Y),         k!(Minus), k!(Slash)],
            [k!(Backspace), k!(A),    k!(R),    k!(S),     k!(T),   k!(D),     k!(H),     k!(N),   k!(E),      k!(I),         k!(O),     k!(Enter)],
            [k!(LShift),    k!(Z),    k!(X),    k!(C),     k!(V),   k!(B),     k!(K),     k!(M),   k!(Quote),  k!(Semicolon), k!(Up),    shifted!(Kc0)],
            [BACKLIT,       k!(LGui), k!(LAlt), k!(LCtrl), LOWER,   k!(Space), k!(Space), RAISE,   k!(Left),   k!(Left),      k!(Down),  k!(Right)]
        ]),
        // Qwerty
        layer!([
            [k!(Escape),    k!(Kc1),  k!(Kc2),  k!(Kc3),   k!(Kc4), k!(Kc5),   k!(Kc6),   k!(Kc7), k!(Kc8),    k!(Kc9),       k!(Kc0),   k!(Delete)],
            [k!(Tab),       k!(Q),    k!(W),    k!(E),     k!(R),   k!(T),     k!(Y),     k!(U),   k!(I),      k!(O),         k!(P),     k!(Slash)],
            [k!(Backspace), k!(A),    k!(S),    k!(D),     k!(F),   k!(G),     k!(H),     k!(J),   k!(K),      k!(L),         k!(Minus), k!(Enter)],
            [k!(LShift),    k!(Z),    k!(X),    k!(C),     k!(V),   k!(B),     k!(N),     k!(M),   k!(Quote),  k!(Semicolon), k!(Up),    shifted!(Kc0)],
            [BACKLIT,       k!(LGui), k!(LAlt), k!(LCtrl), LOWER,   k!(Space), k!(Space), RAISE,   k!(Left),   k!(Left),      k!(Down),  k!(Right)]
        ]),
        // Lower: editing cluster, brackets and navigation
        layer!([
            [XXXX,     REDO,       XXXX, XXXX,     XXXX,    XXXX,                  XXXX,                   XXXX,     XXXX,    XXXX,     XXXX, XXXX],
            [COMMENT,  UNDO,       XXXX, k!(Home), k!(End), XXXX,                  XXXX,                   XXXX,     k!(Up),  XXXX,     XXXX, XXXX],
            [DEL_WORD, SELECT_ALL, CUT,  COPY,     PASTE,   shifted!(LeftBracket), shifted!(RightBracket), k!(Left), k!(Down), k!(Right), XXXX, XXXX],
            [XXXX,     XXXX,       XXXX, XXXX,     SAVE,    k!(LeftBracket),       k!(RightBracket),       XXXX,     XXXX,    XXXX,     XXXX, XXXX],
            [REFRESH,  XXXX,       XXXX, XXXX,     ____,    XXXX,                  XXXX,                   ____,     XXXX,    XXXX,     XXXX, XXXX]
        ]),
        // Raise: numpad
        layer!([
            [XXXX, XXXX,       XXXX,       XXXX,           XXXX,        XXXX, XXXX, XXXX,    XXXX,    XXXX,    XXXX, XXXX],
            [XXXX, XXXX,       XXXX,       XXXX,           XXXX,        XXXX, XXXX, k!(Kc7), k!(Kc8), k!(Kc9), XXXX, XXXX],
            [XXXX, k!(KpPlus), k!(KpMinus), k!(KpAsterisk), k!(KpSlash), XXXX, XXXX, k!(Kc4), k!(Kc5), k!(Kc6), XXXX, XXXX],
            [XXXX, XXXX,       XXXX,       XXXX,           XXXX,        XXXX, XXXX, k!(Kc1), k!(Kc2), k!(Kc3), XXXX, XXXX],
            [XXXX, XXXX,       XXXX,       XXXX,           ____,        XXXX, XXXX, ____,    k!(Kc0), XXXX,    XXXX, k!(Dot)]
        ]),
        // Adjust (lower + raise): base layer switch, function keys, lights, volume
        layer!([
            [XXXX,       COLEMAK,    QWERTY,     XXXX,           XXXX,            XXXX, XXXX, k!(F10), k!(F11), k!(F12), XXXX,            k!(Bootloader)],
            [XXXX,       XXXX,       XXXX,       XXXX,           k!(PrintScreen), XXXX, XXXX, k!(F7),  k!(F8),  k!(F9),  XXXX,            XXXX],
            [XXXX,       XXXX,       XXXX,       XXXX,           XXXX,            XXXX, XXXX, k!(F4),  k!(F5),  k!(F6),  XXXX,            XXXX],
            [k!(RgbHui), k!(RgbSai), k!(RgbVai), k!(Calculator), XXXX,            XXXX, XXXX, k!(F1),  k!(F2),  k!(F3),  k!(AudioVolUp),  XXXX],
            [k!(RgbHud), k!(RgbSad), k!(RgbVad), XXXX,           ____,            XXXX, XXXX, ____,    XXXX,    XXXX,    k!(AudioVolDown), XXXX]
        ]),
    ]
}

/// The encoder scrolls by page on every layer.
pub fn default_encoder_map() -> [[EncoderAction; NUM_ENCODER]; NUM_LAYER] {
    [[encoder!(k!(PageDown), k!(PageUp))]; NUM_LAYER]
}

pub fn default_behavior() -> BehaviorConfig {
    BehaviorConfig {
        tri_layer: Some([LOWER_LAYER, RAISE_LAYER, ADJUST_LAYER]),
        user_keys: UserKeyConfig {
            base_layers: [COLEMAK_LAYER, QWERTY_LAYER],
            lower: LOWER_LAYER,
            raise: RAISE_LAYER,
        },
        muse: MuseConfig::default(),
    }
}

/// Classification callback for the host's music feature: the momentary layer
/// keys must not sound notes, everything else may.
pub fn music_mask(keycode: KeyCode) -> bool {
    !matches!(keycode, KeyCode::User2 | KeyCode::User3)
}
