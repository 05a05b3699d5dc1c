#![no_std]

pub mod brightness;
pub mod channel;
pub mod color;
pub mod config;
pub mod engine;
pub mod event_processor;
pub mod output;
pub mod persistence;
pub mod tick_scheduler;
pub mod transition;

pub use brightness::Brightness;
pub use config::{LightConfig, RetargetPolicy};
pub use engine::{LightEngine, LightSnapshot, Readback};
pub use event_processor::{
    Characteristic, EventEffects, EventMailbox, EventPoster, EventProcessor, LightEvent,
};
pub use output::{OutputChannel, OutputDriver, OutputLevels};
pub use persistence::{KeyValueStore, LightPersistence, LightSeed, MemoryStore, PersistenceError};
pub use tick_scheduler::{TickResult, TickScheduler};
pub use transition::ColorTransition;

pub use color::{BrightnessRecord, ColorRecord, Rgb, interpolate};
pub use embassy_time::{Duration, Instant};
