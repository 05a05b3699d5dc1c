#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::brightness::Brightness;
use crate::color::{BrightnessRecord, ColorRecord, Rgb};
use crate::config::LightConfig;
use crate::output::OutputDriver;
use crate::persistence::{KeyValueStore, LightPersistence, LightSeed};
use crate::transition::ColorTransition;

/// Read-only copy of the engine state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSnapshot {
    pub current: Rgb,
    pub target: Rgb,
    pub brightness: Brightness,
    pub progress: f32,
    pub in_transition: bool,
}

/// Values reported on the readable characteristics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readback {
    pub color: ColorRecord,
    pub brightness: BrightnessRecord,
}

#[derive(Debug, Clone, Copy)]
struct LightState {
    transition: ColorTransition,
    brightness: Brightness,
    /// Brightness as last written, before clamping
    brightness_record: BrightnessRecord,
}

/// Light Engine - owns the transition state and drives the output
///
/// All state changes go through `&mut self`; share it between contexts
/// through the event channel (see [`crate::EventProcessor`]).
pub struct LightEngine<D: OutputDriver, S: KeyValueStore> {
    // External dependencies and configuration
    driver: D,
    persistence: LightPersistence<S>,
    config: LightConfig,

    // Internal state
    state: LightState,
}

impl<D: OutputDriver, S: KeyValueStore> LightEngine<D, S> {
    /// Create a new light engine seeded from the store
    ///
    /// Missing values fall back to black at half brightness.
    pub fn new(driver: D, store: S, config: LightConfig) -> Self {
        let mut persistence = LightPersistence::new(store);
        let seed = persistence.load_seed();
        #[cfg(feature = "esp32-log")]
        println!(
            "[LightEngine.new] initial color: {:?}, brightness: {:?}%",
            seed.color,
            seed.brightness.as_percent()
        );
        Self::from_parts(driver, persistence, config, seed)
    }

    /// Create a new light engine with an explicit seed
    pub fn with_seed(driver: D, store: S, config: LightConfig, seed: LightSeed) -> Self {
        Self::from_parts(driver, LightPersistence::new(store), config, seed)
    }

    fn from_parts(
        driver: D,
        persistence: LightPersistence<S>,
        config: LightConfig,
        seed: LightSeed,
    ) -> Self {
        Self {
            driver,
            persistence,
            config,
            state: LightState {
                transition: ColorTransition::new(seed.color),
                brightness: seed.brightness,
                brightness_record: BrightnessRecord(seed.brightness.as_percent()),
            },
        }
    }

    /// Reset the engine to a resting color and brightness
    ///
    /// Pushes nothing to the output.
    pub fn initialize(&mut self, color: Rgb, brightness_percent: u16) {
        self.state = LightState {
            transition: ColorTransition::new(color),
            brightness: Brightness::from_percent(brightness_percent),
            brightness_record: BrightnessRecord(brightness_percent),
        };
    }

    /// Handle a color write from the peer
    ///
    /// Starts (or redirects) a transition and persists the color. The output
    /// is only updated by the following ticks.
    pub fn on_color_write(&mut self, color: Rgb) {
        #[cfg(feature = "esp32-log")]
        println!("[LightEngine.on_color_write] color: {:?}", color);
        self.state
            .transition
            .retarget(color, self.config.retarget);

        if let Err(_err) = self.persistence.save_color(color) {
            #[cfg(feature = "esp32-log")]
            println!("[LightEngine.on_color_write] failed to persist: {}", _err);
        }
    }

    /// Handle a brightness write from the peer
    ///
    /// Applies instantly to the settled color, even mid-transition, without
    /// touching the transition itself.
    pub fn on_brightness_write(&mut self, percent: u16) {
        let brightness = Brightness::from_percent(percent);
        #[cfg(feature = "esp32-log")]
        println!(
            "[LightEngine.on_brightness_write] brightness: {:?}%",
            brightness.as_percent()
        );
        self.state.brightness = brightness;
        self.state.brightness_record = BrightnessRecord(percent);

        if let Err(_err) = self.persistence.save_brightness(brightness) {
            #[cfg(feature = "esp32-log")]
            println!(
                "[LightEngine.on_brightness_write] failed to persist: {}",
                _err
            );
        }

        let levels = brightness.apply(self.state.transition.current());
        self.driver.write(levels);
    }

    /// Advance the running transition by `step`
    ///
    /// Does nothing while idle or while no peer is connected; progress is
    /// frozen, not reset, until the connection comes back.
    pub fn tick(&mut self, step: f32, connection_active: bool) {
        if !connection_active {
            return;
        }
        let Some(next) = self.state.transition.advance(step) else {
            return;
        };
        self.driver.write(self.state.brightness.apply(next));
    }

    /// Advance by the configured step
    pub fn tick_default(&mut self, connection_active: bool) {
        self.tick(self.config.step, connection_active);
    }

    pub fn snapshot(&self) -> LightSnapshot {
        let transition = &self.state.transition;
        LightSnapshot {
            current: transition.current(),
            target: transition.target(),
            brightness: self.state.brightness,
            progress: transition.progress(),
            in_transition: transition.is_transitioning(),
        }
    }

    /// Values for the readable characteristics
    ///
    /// Both report what the peer last wrote: the requested target color and
    /// the brightness percentage as written, unclamped. After boot the
    /// brightness is the stored factor rounded up to a percentage.
    pub const fn readback(&self) -> Readback {
        Readback {
            color: ColorRecord::from_color(self.state.transition.target()),
            brightness: self.state.brightness_record,
        }
    }

    pub const fn config(&self) -> &LightConfig {
        &self.config
    }

    /// Get a reference to the output driver.
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Get a mutable reference to the output driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Get a reference to the underlying store.
    pub const fn store(&self) -> &S {
        self.persistence.store()
    }
}
