use std::fmt;
use std::time::Duration;

/// Environment variable overriding [`TrackerConfig::history_capacity`].
pub const ENV_HISTORY: &str = "FPSMETER_HISTORY";
/// Environment variable overriding [`TrackerConfig::sync_interval`], in milliseconds.
pub const ENV_SYNC_MS: &str = "FPSMETER_SYNC_MS";
/// Environment variable overriding [`TrackerConfig::slow_frames`] (`discard` or `count`).
pub const ENV_SLOW_FRAMES: &str = "FPSMETER_SLOW_FRAMES";

/// What to do with a frame that took longer than one second.
///
/// Such a frame truncates to an instantaneous rate of 0 FPS.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum SlowFramePolicy {
    /// Leave the slot empty so the frame does not contribute to the average.
    ///
    /// A 0 FPS sample cannot be told apart from "no sample", so the frame is
    /// dropped. This matches the long-standing behaviour of the tracker.
    #[default]
    Discard,
    /// Record the 0 FPS sample and count it in the average.
    Count,
}

impl SlowFramePolicy {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "discard" => Some(Self::Discard),
            "count" => Some(Self::Count),
            _ => None,
        }
    }
}

/// Tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Number of instantaneous samples averaged into the current FPS.
    pub history_capacity: usize,
    /// Minimum spacing between synced snapshot updates.
    pub sync_interval: Duration,
    pub slow_frames: SlowFramePolicy,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            history_capacity: 60,
            sync_interval: Duration::from_millis(5000),
            slow_frames: SlowFramePolicy::Discard,
        }
    }
}

impl TrackerConfig {
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn with_sync_interval(mut self, interval: Duration) -> Self {
        self.sync_interval = interval;
        self
    }

    pub fn with_slow_frames(mut self, policy: SlowFramePolicy) -> Self {
        self.slow_frames = policy;
        self
    }

    /// Sync interval in whole milliseconds, the resolution the tracker works at.
    pub fn sync_interval_ms(&self) -> u64 {
        u64::try_from(self.sync_interval.as_millis()).unwrap_or(u64::MAX)
    }

    /// Checks the configuration can drive a tracker.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroHistoryCapacity);
        }
        if self.sync_interval < Duration::from_millis(1) {
            return Err(ConfigError::SubMillisecondSyncInterval(self.sync_interval));
        }
        Ok(())
    }

    /// Reads overrides from the process environment on top of the defaults.
    ///
    /// See [`ENV_HISTORY`], [`ENV_SYNC_MS`] and [`ENV_SLOW_FRAMES`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`TrackerConfig::from_env`], reading variables through `lookup`.
    ///
    /// The result is validated before it is returned.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_HISTORY) {
            config.history_capacity = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid_env(ENV_HISTORY, &raw))?;
        }

        if let Some(raw) = lookup(ENV_SYNC_MS) {
            let ms: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid_env(ENV_SYNC_MS, &raw))?;
            config.sync_interval = Duration::from_millis(ms);
        }

        if let Some(raw) = lookup(ENV_SLOW_FRAMES) {
            config.slow_frames = SlowFramePolicy::parse(&raw)
                .ok_or_else(|| ConfigError::invalid_env(ENV_SLOW_FRAMES, &raw))?;
        }

        config.validate()?;
        Ok(config)
    }
}

/// A rejected tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The sample ring must hold at least one sample.
    ZeroHistoryCapacity,
    /// The tracker measures time in whole milliseconds.
    SubMillisecondSyncInterval(Duration),
    /// An environment variable held a value that could not be parsed.
    InvalidEnv { key: &'static str, value: String },
}

impl ConfigError {
    fn invalid_env(key: &'static str, value: &str) -> Self {
        Self::InvalidEnv {
            key,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroHistoryCapacity => write!(f, "history capacity must be at least 1"),
            Self::SubMillisecondSyncInterval(d) => {
                write!(f, "sync interval must be at least 1ms, got {d:?}")
            }
            Self::InvalidEnv { key, value } => write!(f, "invalid value for {key}: {value:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}
