//! Event processing module
//!
//! Transport callbacks post [`LightEvent`]s into a mailbox; the tick loop
//! drains them into the [`LightEngine`]. Every event is applied as a whole
//! between two ticks, so a tick never sees a half-written target.

use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::channel::{Mailbox, Poster};
use crate::color::{BrightnessRecord, ColorRecord};
use crate::config::ADVERTISING_RESTART_DELAY;
use crate::config::profile::{BRIGHTNESS_CHARACTERISTIC_UUID, COLOR_CHARACTERISTIC_UUID};
use crate::engine::LightEngine;
use crate::output::OutputDriver;
use crate::persistence::KeyValueStore;

/// Writable characteristics of the light service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Characteristic {
    Color,
    Brightness,
}

impl Characteristic {
    pub const fn uuid(self) -> &'static str {
        match self {
            Self::Color => COLOR_CHARACTERISTIC_UUID,
            Self::Brightness => BRIGHTNESS_CHARACTERISTIC_UUID,
        }
    }

    /// Look up a characteristic by UUID, case insensitive
    pub fn from_uuid(uuid: &str) -> Option<Self> {
        [Self::Color, Self::Brightness]
            .into_iter()
            .find(|characteristic| characteristic.uuid().eq_ignore_ascii_case(uuid))
    }
}

/// Notification from the transport layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightEvent {
    /// A peer connected
    Connected,
    /// The peer disconnected
    Disconnected,
    /// The peer wrote the color characteristic
    ColorWritten(ColorRecord),
    /// The peer wrote the brightness characteristic
    BrightnessWritten(BrightnessRecord),
}

impl LightEvent {
    /// Build an event from a raw characteristic write
    ///
    /// Returns `None` if the payload is too short for the characteristic.
    pub fn from_write(characteristic: Characteristic, data: &[u8]) -> Option<Self> {
        match characteristic {
            Characteristic::Color => ColorRecord::from_bytes(data).map(Self::ColorWritten),
            Characteristic::Brightness => {
                BrightnessRecord::from_bytes(data).map(Self::BrightnessWritten)
            }
        }
    }
}

/// Type alias for the event mailbox
pub type EventMailbox<const SIZE: usize> = Mailbox<LightEvent, SIZE>;

/// Type alias for the event poster
pub type EventPoster<'a, const SIZE: usize> = Poster<'a, LightEvent, SIZE>;

/// Side effects from processing events that the transport should apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventEffects {
    /// Restart advertising after the given delay
    pub restart_advertising: Option<Duration>,
}

impl EventEffects {
    /// Check if any effects need to be applied
    pub const fn has_effects(&self) -> bool {
        self.restart_advertising.is_some()
    }
}

/// Applies queued events to the engine and tracks the connection state
pub struct EventProcessor<'a, const SIZE: usize> {
    events: &'a EventMailbox<SIZE>,
    connected: bool,
}

impl<'a, const SIZE: usize> EventProcessor<'a, SIZE> {
    /// Create a new event processor, starting disconnected
    pub const fn new(events: &'a EventMailbox<SIZE>) -> Self {
        Self {
            events,
            connected: false,
        }
    }

    /// Whether a peer is currently connected
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// Process all pending events (non-blocking)
    ///
    /// Drains the mailbox, applies writes to the engine and returns the
    /// transport side effects.
    pub fn process_pending<D: OutputDriver, S: KeyValueStore>(
        &mut self,
        engine: &mut LightEngine<D, S>,
    ) -> EventEffects {
        let mut effects = EventEffects::default();

        while let Some(event) = self.events.try_take() {
            match event {
                LightEvent::Connected => {
                    self.connected = true;
                    // Keep advertising so another peer can take over
                    effects.restart_advertising = Some(Duration::from_millis(0));
                }
                LightEvent::Disconnected => {
                    if self.connected {
                        effects.restart_advertising = Some(ADVERTISING_RESTART_DELAY);
                    }
                    self.connected = false;
                }
                LightEvent::ColorWritten(record) => {
                    engine.on_color_write(record.color());
                }
                LightEvent::BrightnessWritten(record) => {
                    engine.on_brightness_write(record.percent());
                }
            }
        }

        #[cfg(feature = "esp32-log")]
        if let Some(delay) = effects.restart_advertising {
            println!(
                "[EventProcessor.process_pending] restart advertising in {:?} ms",
                delay.as_millis()
            );
        }

        effects
    }
}
