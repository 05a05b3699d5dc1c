use embassy_time::Duration;

/// Brightness used when nothing has been stored yet
pub const DEFAULT_BRIGHTNESS: f32 = 0.5;

/// Progress added on every tick
pub const DEFAULT_STEP: f32 = 0.01;

/// Tick interval (20 Hz)
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Time the BLE stack is given to settle before advertising again after a
/// disconnect
pub const ADVERTISING_RESTART_DELAY: Duration = Duration::from_millis(500);

// Reference board wiring
pub const RED_PIN: u8 = 23;
pub const GREEN_PIN: u8 = 22;
pub const BLUE_PIN: u8 = 21;

/// PWM peripheral settings for the output driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmConfig {
    pub frequency_hz: u32,
    pub resolution_bits: u8,
}

impl PwmConfig {
    /// Highest duty value for the configured resolution
    pub const fn max_duty(self) -> u32 {
        (1 << self.resolution_bits) - 1
    }
}

pub const PWM_CONFIG: PwmConfig = PwmConfig {
    frequency_hz: 5000,
    resolution_bits: 8,
};

/// GATT profile exposed to the remote peer
pub mod profile {
    pub const DEVICE_NAME: &str = "RGB Strip";
    pub const SERVICE_UUID: &str = "be0bae1d-3625-4362-81e3-3b96f709bd66";
    pub const COLOR_CHARACTERISTIC_UUID: &str = "d6d92a13-44a1-4fe9-a868-e9a3ebaeafed";
    pub const BRIGHTNESS_CHARACTERISTIC_UUID: &str = "3ce1e5b3-16fb-473b-85b4-e3389ca4558c";
}

/// Storage namespace and keys
pub mod storage {
    pub const NAMESPACE: &str = "rgbstrip";
    pub const LAST_COLOR_KEY: &str = "lastColor";
    pub const LAST_BRIGHTNESS_KEY: &str = "lastBrightness";
}

/// What happens to the transition progress when a new color arrives while
/// a transition is still running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetargetPolicy {
    /// Keep the progress and continue the line from the starting color
    /// toward the new target
    #[default]
    KeepProgress,
    /// Start a fresh transition from the color currently shown
    Restart,
}

/// Configuration for the light engine
#[derive(Debug, Clone, Copy)]
pub struct LightConfig {
    /// Progress added per tick
    pub step: f32,
    /// Interval between ticks
    pub tick_interval: Duration,
    pub retarget: RetargetPolicy,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            tick_interval: DEFAULT_TICK_INTERVAL,
            retarget: RetargetPolicy::default(),
        }
    }
}
