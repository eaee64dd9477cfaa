use bitfield_struct::bitfield;
use usbd_hid::descriptor::MediaKey;

/// To represent all combinations of modifiers, at least 5 bits are needed:
/// 1 bit for Left/Right, 4 bits for the modifier type. Represented in LSB format.
///
/// | bit4 | bit3 | bit2 | bit1 | bit0 |
/// | --- | --- | --- | --- | --- |
/// | L/R | GUI | ALT |SHIFT| CTRL|
#[bitfield(u8, order = Lsb, defmt = cfg(feature = "defmt"))]
#[derive(Eq, PartialEq)]
pub struct ModifierCombination {
    #[bits(1)]
    pub ctrl: bool,
    #[bits(1)]
    pub shift: bool,
    #[bits(1)]
    pub alt: bool,
    #[bits(1)]
    pub gui: bool,
    #[bits(1)]
    pub right: bool,
    #[bits(3)]
    _reserved: u8,
}

impl ModifierCombination {
    pub const LCTRL: Self = Self::new().with_ctrl(true);
    pub const LSHIFT: Self = Self::new().with_shift(true);
    pub const LALT: Self = Self::new().with_alt(true);
    pub const LGUI: Self = Self::new().with_gui(true);
    pub const RCTRL: Self = Self::new().with_ctrl(true).with_right(true);
    pub const RSHIFT: Self = Self::new().with_shift(true).with_right(true);

    pub const fn new_from(right: bool, gui: bool, alt: bool, shift: bool, ctrl: bool) -> Self {
        Self::new()
            .with_right(right)
            .with_gui(gui)
            .with_alt(alt)
            .with_shift(shift)
            .with_ctrl(ctrl)
    }

    /// Get the modifier byte of the HID keyboard report for this combination.
    pub(crate) fn to_hid_modifier_bits(self) -> u8 {
        let bits = (self.ctrl() as u8)
            | (self.shift() as u8) << 1
            | (self.alt() as u8) << 2
            | (self.gui() as u8) << 3;
        if self.right() { bits << 4 } else { bits }
    }
}

/// KeyCode is the internal representation of all keycodes.
///
/// Keycodes in the basic block (0x04 ~ 0xE7) use their HID usage id as value,
/// keycodes above 0x600 are firmware-internal operations that never reach the
/// HID report directly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum KeyCode {
    /// Reserved, no-key.
    No = 0x0000,
    A = 0x0004,
    B = 0x0005,
    C = 0x0006,
    D = 0x0007,
    E = 0x0008,
    F = 0x0009,
    G = 0x000A,
    H = 0x000B,
    I = 0x000C,
    J = 0x000D,
    K = 0x000E,
    L = 0x000F,
    M = 0x0010,
    N = 0x0011,
    O = 0x0012,
    P = 0x0013,
    Q = 0x0014,
    R = 0x0015,
    S = 0x0016,
    T = 0x0017,
    U = 0x0018,
    V = 0x0019,
    W = 0x001A,
    X = 0x001B,
    Y = 0x001C,
    Z = 0x001D,
    Kc1 = 0x001E,
    Kc2 = 0x001F,
    Kc3 = 0x0020,
    Kc4 = 0x0021,
    Kc5 = 0x0022,
    Kc6 = 0x0023,
    Kc7 = 0x0024,
    Kc8 = 0x0025,
    Kc9 = 0x0026,
    Kc0 = 0x0027,
    Enter = 0x0028,
    Escape = 0x0029,
    Backspace = 0x002A,
    Tab = 0x002B,
    Space = 0x002C,
    Minus = 0x002D,
    Equal = 0x002E,
    LeftBracket = 0x002F,
    RightBracket = 0x0030,
    Backslash = 0x0031,
    Semicolon = 0x0033,
    Quote = 0x0034,
    Grave = 0x0035,
    Comma = 0x0036,
    Dot = 0x0037,
    Slash = 0x0038,
    CapsLock = 0x0039,
    F1 = 0x003A,
    F2 = 0x003B,
    F3 = 0x003C,
    F4 = 0x003D,
    F5 = 0x003E,
    F6 = 0x003F,
    F7 = 0x0040,
    F8 = 0x0041,
    F9 = 0x0042,
    F10 = 0x0043,
    F11 = 0x0044,
    F12 = 0x0045,
    PrintScreen = 0x0046,
    ScrollLock = 0x0047,
    Pause = 0x0048,
    Insert = 0x0049,
    Home = 0x004A,
    PageUp = 0x004B,
    Delete = 0x004C,
    End = 0x004D,
    PageDown = 0x004E,
    Right = 0x004F,
    Left = 0x0050,
    Down = 0x0051,
    Up = 0x0052,
    NumLock = 0x0053,
    KpSlash = 0x0054,
    KpAsterisk = 0x0055,
    KpMinus = 0x0056,
    KpPlus = 0x0057,
    KpEnter = 0x0058,
    Kp1 = 0x0059,
    Kp2 = 0x005A,
    Kp3 = 0x005B,
    Kp4 = 0x005C,
    Kp5 = 0x005D,
    Kp6 = 0x005E,
    Kp7 = 0x005F,
    Kp8 = 0x0060,
    Kp9 = 0x0061,
    Kp0 = 0x0062,
    KpDot = 0x0063,
    // Consumer control keycodes, translated to the consumer page on report
    AudioMute = 0x00A8,
    AudioVolUp = 0x00A9,
    AudioVolDown = 0x00AA,
    MediaNextTrack = 0x00AB,
    MediaPrevTrack = 0x00AC,
    MediaStop = 0x00AD,
    MediaPlayPause = 0x00AE,
    MediaSelect = 0x00AF,
    MediaEject = 0x00B0,
    Mail = 0x00B1,
    Calculator = 0x00B2,
    LCtrl = 0x00E0,
    LShift = 0x00E1,
    LAlt = 0x00E2,
    LGui = 0x00E3,
    RCtrl = 0x00E4,
    RShift = 0x00E5,
    RAlt = 0x00E6,
    RGui = 0x00E7,
    // Underglow control, 0x620 ~ 0x628
    RgbTog = 0x620,
    RgbModeForward = 0x621,
    RgbModeReverse = 0x622,
    RgbHui = 0x623,
    RgbHud = 0x624,
    RgbSai = 0x625,
    RgbSad = 0x626,
    RgbVai = 0x627,
    RgbVad = 0x628,
    // Firmware control
    Bootloader = 0x700,
    Reboot = 0x701,
    // User keycodes, use 0x840 ~ 0x847
    User0 = 0x840,
    User1 = 0x841,
    User2 = 0x842,
    User3 = 0x843,
    User4 = 0x844,
    User5 = 0x845,
    User6 = 0x846,
    User7 = 0x847,
}

impl KeyCode {
    /// Returns `true` if the keycode is a basic keycode, reported in the
    /// keycode array of the HID keyboard report.
    pub(crate) fn is_basic(self) -> bool {
        KeyCode::A <= self && self <= KeyCode::KpDot
    }

    /// Returns `true` if the keycode is a modifier keycode
    pub(crate) fn is_modifier(self) -> bool {
        KeyCode::LCtrl <= self && self <= KeyCode::RGui
    }

    /// Returns `true` if the keycode is on the consumer page
    pub(crate) fn is_consumer(self) -> bool {
        KeyCode::AudioMute <= self && self <= KeyCode::Calculator
    }

    /// Returns `true` if the keycode is an underglow keycode
    pub(crate) fn is_rgb(self) -> bool {
        KeyCode::RgbTog <= self && self <= KeyCode::RgbVad
    }

    /// Returns `true` if the keycode is a firmware control keycode
    pub(crate) fn is_firmware(self) -> bool {
        KeyCode::Bootloader <= self && self <= KeyCode::Reboot
    }

    /// Returns `true` if the keycode is a user keycode
    pub(crate) fn is_user(self) -> bool {
        KeyCode::User0 <= self && self <= KeyCode::User7
    }

    /// Returns the byte with the corresponding modifier bit set in the HID
    /// keyboard report, or 0 for non-modifier keycodes.
    pub(crate) fn as_modifier_bit(self) -> u8 {
        if self.is_modifier() {
            1 << (self as u16 - KeyCode::LCtrl as u16)
        } else {
            0
        }
    }

    /// Convert a consumer keycode to its usage id on the HID consumer page
    pub(crate) fn as_consumer_control_usage_id(self) -> u16 {
        match self {
            KeyCode::AudioMute => MediaKey::Mute as u16,
            KeyCode::AudioVolUp => MediaKey::VolumeIncrement as u16,
            KeyCode::AudioVolDown => MediaKey::VolumeDecrement as u16,
            KeyCode::MediaNextTrack => MediaKey::NextTrack as u16,
            KeyCode::MediaPrevTrack => MediaKey::PrevTrack as u16,
            KeyCode::MediaStop => MediaKey::Stop as u16,
            KeyCode::MediaPlayPause => MediaKey::PlayPause as u16,
            // AL/AC usages that usbd-hid's MediaKey doesn't name
            KeyCode::MediaSelect => 0x0183,
            KeyCode::MediaEject => 0x00B8,
            KeyCode::Mail => 0x018A,
            KeyCode::Calculator => 0x0192,
            _ => 0,
        }
    }
}
