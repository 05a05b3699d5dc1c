//! Tick scheduling and timing utilities.
//!
//! Provides portable tick pacing without async/await or platform-specific
//! timers. The caller is responsible for sleeping between ticks and for
//! acting on the returned transport effects.

use embassy_time::{Duration, Instant};

use crate::engine::LightEngine;
use crate::event_processor::{EventEffects, EventMailbox, EventProcessor};
use crate::output::OutputDriver;
use crate::persistence::KeyValueStore;

/// Result of a tick.
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (may be zero if behind schedule).
    pub sleep_duration: Duration,
    /// Transport side effects collected from the drained events.
    pub effects: EventEffects,
}

/// Portable tick scheduler that serializes events and ticks.
///
/// This scheduler:
/// - Drains pending events into the engine
/// - Advances the engine once, gated on the connection state
/// - Tracks tick timing with drift correction
///
/// # Usage
///
/// ```ignore
/// static EVENTS: EventMailbox<8> = EventMailbox::new();
///
/// let engine = LightEngine::new(driver, store, LightConfig::default());
/// let mut scheduler = TickScheduler::new(engine, &EVENTS);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     if let Some(delay) = result.effects.restart_advertising {
///         restart_advertising_after(delay);
///     }
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct TickScheduler<'a, D: OutputDriver, S: KeyValueStore, const EVENT_MAILBOX_SIZE: usize> {
    engine: LightEngine<D, S>,
    events: EventProcessor<'a, EVENT_MAILBOX_SIZE>,
    next_tick: Instant,
    tick_interval: Duration,
}

impl<'a, D: OutputDriver, S: KeyValueStore, const EVENT_MAILBOX_SIZE: usize>
    TickScheduler<'a, D, S, EVENT_MAILBOX_SIZE>
{
    /// Create a new tick scheduler.
    ///
    /// Uses the tick interval from the engine configuration.
    pub fn new(engine: LightEngine<D, S>, events: &'a EventMailbox<EVENT_MAILBOX_SIZE>) -> Self {
        let tick_interval = engine.config().tick_interval;
        Self {
            engine,
            events: EventProcessor::new(events),
            next_tick: Instant::from_millis(0),
            tick_interval,
        }
    }

    /// Process one tick and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Applies all pending events
    /// 3. Advances the transition while a peer is connected
    /// 4. Returns the deadline for the next tick
    pub fn tick(&mut self, now: Instant) -> TickResult {
        // Skip the backlog after a long stall instead of bursting through it
        let max_drift = self.tick_interval.as_millis() * 2;
        if now.as_millis() > self.next_tick.as_millis() + max_drift {
            self.next_tick = now;
        }

        let effects = self.events.process_pending(&mut self.engine);
        let connected = self.events.is_connected();
        self.engine.tick_default(connected);

        self.next_tick += self.tick_interval;

        let sleep_duration = if self.next_tick.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_tick.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        TickResult {
            next_deadline: self.next_tick,
            sleep_duration,
            effects,
        }
    }

    /// Whether a peer is currently connected.
    pub const fn is_connected(&self) -> bool {
        self.events.is_connected()
    }

    /// Get a reference to the engine.
    pub const fn engine(&self) -> &LightEngine<D, S> {
        &self.engine
    }

    /// Get a mutable reference to the engine.
    pub fn engine_mut(&mut self) -> &mut LightEngine<D, S> {
        &mut self.engine
    }
}
