use serde::Deserialize;

use crate::scanner::DEFAULT_LINE_LIMIT;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub sampler: SamplerConfig,
    pub channels: ChannelsConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SamplerConfig {
    #[serde(default = "default_path")]
    pub path: String,
    pub interval_ms: u64,
    /// Upper bound on lines scanned per sample; exceeding it is reported on the error channel.
    #[serde(default = "default_line_limit")]
    pub line_limit: usize,
}

fn default_path() -> String {
    "/proc/meminfo".into()
}

fn default_line_limit() -> usize {
    DEFAULT_LINE_LIMIT
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelsConfig {
    /// Encoded snapshots buffered before the sampler waits on the consumer.
    pub output_capacity: usize,
    pub error_capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    /// How often to log sampler stats (frames and errors received) at INFO level.
    pub stats_log_interval_secs: u64,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.sampler.path.is_empty(),
            "sampler.path must be non-empty"
        );
        anyhow::ensure!(
            self.sampler.interval_ms > 0,
            "sampler.interval_ms must be > 0, got {}",
            self.sampler.interval_ms
        );
        anyhow::ensure!(
            self.sampler.line_limit > 0,
            "sampler.line_limit must be > 0, got {}",
            self.sampler.line_limit
        );
        anyhow::ensure!(
            self.channels.output_capacity > 0,
            "channels.output_capacity must be > 0, got {}",
            self.channels.output_capacity
        );
        anyhow::ensure!(
            self.channels.error_capacity > 0,
            "channels.error_capacity must be > 0, got {}",
            self.channels.error_capacity
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        Ok(())
    }
}
