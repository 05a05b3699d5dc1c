//! Shared test infrastructure for the integration tests

#![allow(dead_code)] // Each test file uses a different subset

use myrtio_ble_light::{
    KeyValueStore, LightConfig, LightEngine, LightSeed, MemoryStore, OutputChannel, OutputDriver,
    OutputLevels, PersistenceError, Rgb,
};

/// Output driver that records every `set_level` call
#[derive(Debug, Default)]
pub struct RecordingDriver {
    pub calls: Vec<(OutputChannel, u8)>,
}

impl RecordingDriver {
    /// Calls grouped into complete frames, red/green/blue
    pub fn frames(&self) -> Vec<OutputLevels> {
        self.calls
            .chunks_exact(3)
            .map(|chunk| {
                assert_eq!(chunk[0].0, OutputChannel::Red);
                assert_eq!(chunk[1].0, OutputChannel::Green);
                assert_eq!(chunk[2].0, OutputChannel::Blue);
                OutputLevels::new(chunk[0].1, chunk[1].1, chunk[2].1)
            })
            .collect()
    }

    pub fn last_frame(&self) -> Option<OutputLevels> {
        self.frames().last().copied()
    }
}

impl OutputDriver for RecordingDriver {
    fn set_level(&mut self, channel: OutputChannel, level: u8) {
        self.calls.push((channel, level));
    }
}

/// Store that fails every operation
#[derive(Debug, Default)]
pub struct FailingStore {
    pub attempted_writes: usize,
}

impl KeyValueStore for FailingStore {
    fn load(&mut self, _key: &'static str, _buf: &mut [u8]) -> Result<usize, PersistenceError> {
        Err(PersistenceError::DriverError)
    }

    fn store(&mut self, _key: &'static str, _value: &[u8]) -> Result<(), PersistenceError> {
        self.attempted_writes += 1;
        Err(PersistenceError::Busy)
    }
}

pub type TestEngine = LightEngine<RecordingDriver, MemoryStore>;

/// Engine resting at `color` with `percent` brightness
pub fn engine_with(color: Rgb, percent: u16) -> TestEngine {
    LightEngine::with_seed(
        RecordingDriver::default(),
        MemoryStore::new(),
        LightConfig::default(),
        LightSeed::new(color, percent),
    )
}
