//! Persistence bridge
//!
//! The last color and brightness survive a power cycle through a small
//! key/value store. Writes are fire-and-forget: a failed write is logged and
//! the in-memory state stays authoritative until the next successful one.

use core::fmt;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use heapless::{FnvIndexMap, Vec};

use crate::brightness::Brightness;
use crate::color::{BLACK, ColorRecord, Rgb};
use crate::config::storage::{LAST_BRIGHTNESS_KEY, LAST_COLOR_KEY};

/// Error type for the persistence operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceError {
    /// Nothing stored under the key
    NotFound,
    /// Storage is processing another request
    Busy,
    /// Underlying storage driver failed
    DriverError,
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::Busy => write!(f, "storage busy"),
            Self::DriverError => write!(f, "storage driver error"),
        }
    }
}

/// Non-volatile key/value storage
pub trait KeyValueStore {
    /// Read the value stored under `key` into `buf`
    ///
    /// Returns the number of bytes written to `buf`.
    fn load(&mut self, key: &'static str, buf: &mut [u8]) -> Result<usize, PersistenceError>;

    /// Store `value` under `key`, replacing any previous value
    fn store(&mut self, key: &'static str, value: &[u8]) -> Result<(), PersistenceError>;
}

/// Values the engine is seeded with at boot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSeed {
    pub color: Rgb,
    pub brightness: Brightness,
}

impl LightSeed {
    /// Create a seed from a color and a wire percentage
    pub fn new(color: Rgb, brightness_percent: u16) -> Self {
        Self {
            color,
            brightness: Brightness::from_percent(brightness_percent),
        }
    }
}

impl Default for LightSeed {
    fn default() -> Self {
        Self {
            color: BLACK,
            brightness: Brightness::default(),
        }
    }
}

/// Typed access to the last color and brightness
#[derive(Debug)]
pub struct LightPersistence<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> LightPersistence<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the last color, if one was stored
    pub fn load_color(&mut self) -> Result<Rgb, PersistenceError> {
        let mut buf = [0u8; ColorRecord::SIZE];
        let len = self.store.load(LAST_COLOR_KEY, &mut buf)?;
        ColorRecord::from_bytes(&buf[..len])
            .map(ColorRecord::color)
            .ok_or(PersistenceError::NotFound)
    }

    /// Load the last brightness, if one was stored
    pub fn load_brightness(&mut self) -> Result<Brightness, PersistenceError> {
        let mut buf = [0u8; 4];
        let len = self.store.load(LAST_BRIGHTNESS_KEY, &mut buf)?;
        if len != buf.len() {
            return Err(PersistenceError::NotFound);
        }
        Ok(Brightness::from_factor(f32::from_le_bytes(buf)))
    }

    /// Load the boot seed, falling back to defaults for missing values
    pub fn load_seed(&mut self) -> LightSeed {
        let defaults = LightSeed::default();
        let color = self.load_color().unwrap_or_else(|_err| {
            #[cfg(feature = "esp32-log")]
            println!("[LightPersistence.load_seed] no stored color: {}", _err);
            defaults.color
        });
        let brightness = self.load_brightness().unwrap_or_else(|_err| {
            #[cfg(feature = "esp32-log")]
            println!("[LightPersistence.load_seed] no stored brightness: {}", _err);
            defaults.brightness
        });
        LightSeed { color, brightness }
    }

    pub fn save_color(&mut self, color: Rgb) -> Result<(), PersistenceError> {
        self.store
            .store(LAST_COLOR_KEY, &ColorRecord::from(color).to_bytes())
    }

    pub fn save_brightness(&mut self, brightness: Brightness) -> Result<(), PersistenceError> {
        self.store
            .store(LAST_BRIGHTNESS_KEY, &brightness.factor().to_le_bytes())
    }

    /// Get a reference to the underlying store
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Get a mutable reference to the underlying store
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

/// Largest value [`MemoryStore`] holds per key
pub const MEMORY_STORE_VALUE_SIZE: usize = 8;

/// RAM backed store for host builds and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: FnvIndexMap<&'static str, Vec<u8, MEMORY_STORE_VALUE_SIZE>, 4>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes stored under `key`
    pub fn get(&self, key: &'static str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&mut self, key: &'static str, buf: &mut [u8]) -> Result<usize, PersistenceError> {
        let value = self.entries.get(key).ok_or(PersistenceError::NotFound)?;
        let len = value.len().min(buf.len());
        buf[..len].copy_from_slice(&value[..len]);
        Ok(len)
    }

    fn store(&mut self, key: &'static str, value: &[u8]) -> Result<(), PersistenceError> {
        let value = Vec::from_slice(value).map_err(|()| PersistenceError::DriverError)?;
        self.entries
            .insert(key, value)
            .map(|_| ())
            .map_err(|_| PersistenceError::DriverError)
    }
}
