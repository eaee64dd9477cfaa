pub mod common;

use musegrid::eeconfig::{
    Eeconfig, EeconfigStorage, FlashOperationMessage, StorageService, EECONFIG_SIZE,
};
use musegrid::embassy_futures::block_on;

/// In-memory storage medium, optionally failing every operation.
struct RamStorage {
    block: [u8; EECONFIG_SIZE],
    fail: bool,
}

impl RamStorage {
    fn new() -> Self {
        Self {
            block: [0xFF; EECONFIG_SIZE],
            fail: false,
        }
    }
}

struct RamStorageError;

impl EeconfigStorage for RamStorage {
    type Error = RamStorageError;

    async fn read(&mut self, buf: &mut [u8; EECONFIG_SIZE]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(RamStorageError);
        }
        *buf = self.block;
        Ok(())
    }

    async fn write(&mut self, buf: &[u8; EECONFIG_SIZE]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(RamStorageError);
        }
        self.block = *buf;
        Ok(())
    }
}

#[test]
fn test_default_layer_is_persisted() {
    block_on(async {
        let mut service = StorageService::new(RamStorage::new());
        service.load().await;

        service.apply(FlashOperationMessage::DefaultLayer(1)).await;
        assert_eq!(service.eeconfig().default_layer(), 1);

        // A new service over the written block sees the stored selection
        let packed = service.eeconfig().pack();
        let mut reloaded = StorageService::new(RamStorage {
            block: packed,
            fail: false,
        });
        let eeconfig = reloaded.load().await;
        assert_eq!(eeconfig.default_layer(), 1);
        assert_eq!(Eeconfig::unpack(&packed).map(|c| c.default_layer()), Some(1));
    });
}

#[test]
fn test_unwritten_medium_falls_back_to_defaults() {
    block_on(async {
        let mut service = StorageService::new(RamStorage::new());
        let eeconfig = service.load().await;
        assert_eq!(eeconfig, Eeconfig::default());
        assert_eq!(eeconfig.default_layer(), 0);
    });
}

#[test]
fn test_unreadable_medium_falls_back_to_defaults() {
    block_on(async {
        let mut service = StorageService::new(RamStorage {
            block: [0xFF; EECONFIG_SIZE],
            fail: true,
        });
        let eeconfig = service.load().await;
        assert_eq!(eeconfig, Eeconfig::default());
    });
}

#[test]
fn test_write_failure_keeps_in_memory_copy() {
    block_on(async {
        let mut service = StorageService::new(RamStorage {
            block: [0xFF; EECONFIG_SIZE],
            fail: true,
        });
        service.load().await;
        service.apply(FlashOperationMessage::DefaultLayer(1)).await;
        assert_eq!(service.eeconfig().default_layer(), 1);
    });
}

#[test]
fn test_reset_restores_defaults() {
    block_on(async {
        let mut service = StorageService::new(RamStorage::new());
        service.load().await;
        service.apply(FlashOperationMessage::DefaultLayer(1)).await;
        service.apply(FlashOperationMessage::Reset).await;
        assert_eq!(service.eeconfig(), &Eeconfig::default());
    });
}
