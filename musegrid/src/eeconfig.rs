//! Persisted keyboard configuration.
//!
//! The dispatcher never touches storage directly: it posts a
//! [`FlashOperationMessage`] on [`FLASH_CHANNEL`] and the storage service
//! applies the delta to the packed block. The storage medium and its wear
//! characteristics are the host's concern, behind [`EeconfigStorage`].

use bitfield_struct::bitfield;

use crate::channel::FLASH_CHANNEL;

/// Size of the packed eeconfig block in bytes
pub const EECONFIG_SIZE: usize = 4;

/// First byte of a valid packed block
const EECONFIG_MAGIC: u8 = 0xA6;

#[bitfield(u8, order = Msb, defmt = cfg(feature = "defmt"))]
#[derive(PartialEq, Eq)]
pub struct EeBacklightConfig {
    #[bits(1)]
    pub enable: bool,
    #[bits(1)]
    pub breathing: bool,
    #[bits(1)]
    reserved: bool,
    #[bits(5)]
    pub level: u8,
}

#[bitfield(u8, order = Msb, defmt = cfg(feature = "defmt"))]
#[derive(PartialEq, Eq)]
pub struct EeAudioConfig {
    #[bits(1)]
    pub enable: bool,
    #[bits(1)]
    pub clicky_enable: bool,
    #[bits(6)]
    pub level: u8,
}

/// Keyboard configuration which is saved in non-volatile storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Eeconfig {
    default_layer: u8,
    backlight_config: EeBacklightConfig,
    audio_config: EeAudioConfig,
}

impl Eeconfig {
    pub fn default_layer(&self) -> u8 {
        self.default_layer
    }

    pub fn set_default_layer(&mut self, default_layer: u8) {
        self.default_layer = default_layer;
    }

    pub fn backlight_config(&self) -> EeBacklightConfig {
        self.backlight_config
    }

    pub fn audio_config(&self) -> EeAudioConfig {
        self.audio_config
    }

    pub fn pack(&self) -> [u8; EECONFIG_SIZE] {
        [
            EECONFIG_MAGIC,
            self.default_layer,
            self.backlight_config.into_bits(),
            self.audio_config.into_bits(),
        ]
    }

    /// Unpack a stored block. Returns `None` if the block was never written
    /// or was written by an incompatible layout.
    pub fn unpack(buf: &[u8; EECONFIG_SIZE]) -> Option<Self> {
        if buf[0] != EECONFIG_MAGIC {
            return None;
        }
        Some(Self {
            default_layer: buf[1],
            backlight_config: EeBacklightConfig::from_bits(buf[2]),
            audio_config: EeAudioConfig::from_bits(buf[3]),
        })
    }
}

/// Deltas posted by the dispatcher for persisting.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashOperationMessage {
    /// Persist the default layer selection
    DefaultLayer(u8),
    /// Reset the stored block to defaults
    Reset,
}

/// The non-volatile medium holding the packed eeconfig block.
pub trait EeconfigStorage {
    type Error;

    async fn read(&mut self, buf: &mut [u8; EECONFIG_SIZE]) -> Result<(), Self::Error>;
    async fn write(&mut self, buf: &[u8; EECONFIG_SIZE]) -> Result<(), Self::Error>;
}

/// Owns the in-memory copy of the persisted config and drains
/// [`FLASH_CHANNEL`].
pub struct StorageService<S: EeconfigStorage> {
    storage: S,
    eeconfig: Eeconfig,
}

impl<S: EeconfigStorage> StorageService<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            eeconfig: Eeconfig::default(),
        }
    }

    /// Load the stored block, falling back to defaults if the medium is
    /// unreadable or holds no valid block.
    pub async fn load(&mut self) -> Eeconfig {
        let mut buf = [0u8; EECONFIG_SIZE];
        match self.storage.read(&mut buf).await {
            Ok(()) => match Eeconfig::unpack(&buf) {
                Some(eeconfig) => self.eeconfig = eeconfig,
                None => info!("No stored config found, using defaults"),
            },
            Err(_) => error!("Failed to read stored config, using defaults"),
        }
        self.eeconfig
    }

    pub fn eeconfig(&self) -> &Eeconfig {
        &self.eeconfig
    }

    pub async fn run(&mut self) -> ! {
        loop {
            let message = FLASH_CHANNEL.receive().await;
            self.apply(message).await;
        }
    }

    /// Apply a single delta and write the block back.
    pub async fn apply(&mut self, message: FlashOperationMessage) {
        match message {
            FlashOperationMessage::DefaultLayer(layer) => self.eeconfig.set_default_layer(layer),
            FlashOperationMessage::Reset => self.eeconfig = Eeconfig::default(),
        }
        if self.storage.write(&self.eeconfig.pack()).await.is_err() {
            // Keep running with the in-memory copy, the next write may succeed
            error!("Failed to write config to storage");
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pack_unpack() {
        let mut eeconfig = Eeconfig::default();
        eeconfig.set_default_layer(1);
        let packed = eeconfig.pack();
        assert_eq!(packed[0], EECONFIG_MAGIC);
        assert_eq!(Eeconfig::unpack(&packed), Some(eeconfig));
    }

    #[test]
    fn test_unpack_rejects_unwritten_block() {
        assert_eq!(Eeconfig::unpack(&[0xFF; EECONFIG_SIZE]), None);
        assert_eq!(Eeconfig::unpack(&[0x00; EECONFIG_SIZE]), None);
    }
}
