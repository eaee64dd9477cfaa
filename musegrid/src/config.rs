//! Tunable behavior configuration.
//!
//! The config is plain data handed to [`crate::keymap::KeyMap`] at
//! construction time; nothing here touches hardware.

/// Config for configurable action behavior
#[derive(Clone, Debug, Default)]
pub struct BehaviorConfig {
    /// Layer triple `[lower, raise, adjust]`: whenever the activation of
    /// `lower` or `raise` changes, `adjust` is forced to
    /// `lower && raise`.
    pub tri_layer: Option<[u8; 3]>,
    /// Bindings for the user keycode block
    pub user_keys: UserKeyConfig,
    /// Startup values for the muse sequencer
    pub muse: MuseConfig,
}

/// Assignment of the user keycode block.
///
/// `User0`/`User1` switch the persisted default layer to `base_layers[0]` /
/// `base_layers[1]`. `User2`/`User3` are the momentary lower/raise layers.
/// `User4` is the indicator-step key and needs no layer assignment.
#[derive(Clone, Copy, Debug)]
pub struct UserKeyConfig {
    pub base_layers: [u8; 2],
    pub lower: u8,
    pub raise: u8,
}

impl Default for UserKeyConfig {
    fn default() -> Self {
        Self {
            base_layers: [0, 1],
            lower: 2,
            raise: 3,
        }
    }
}

/// Startup values for the muse sequencer state.
#[derive(Clone, Copy, Debug)]
pub struct MuseConfig {
    /// Initial pitch offset added to the scale table, in midi note numbers
    pub offset: u8,
    /// Initial tempo: number of scan ticks per sequencer step
    pub tempo: u16,
}

impl Default for MuseConfig {
    fn default() -> Self {
        Self {
            offset: 70,
            tempo: 50,
        }
    }
}
