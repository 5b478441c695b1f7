use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;

use greetbus_core::error::{GreetBusError, Result};
use greetbus_core::greeting::{DelayRange, DEFAULT_MAX_DELAY_MS, DEFAULT_MIN_DELAY_MS};

use crate::obs::metrics::DEFAULT_LATENCY_BUCKETS;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub worker: WorkerSection,

    #[serde(default)]
    pub metrics: MetricsSection,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            gateway: GatewaySection::default(),
            worker: WorkerSection::default(),
            metrics: MetricsSection::default(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(GreetBusError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        self.worker.validate()?;
        self.metrics.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// 0 disables the bound: `/greeting` waits for the reply indefinitely.
    #[serde(default)]
    pub request_timeout_ms: u64,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            request_timeout_ms: 0,
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if self.request_timeout_ms > 3_600_000 {
            return Err(GreetBusError::BadRequest(
                "gateway.request_timeout_ms must be at most 3600000".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            GreetBusError::BadRequest(format!("gateway.listen must be a valid SocketAddr: {e}"))
        })
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_ms > 0).then(|| Duration::from_millis(self.request_timeout_ms))
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkerSection {
    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for WorkerSection {
    fn default() -> Self {
        Self {
            address: default_address(),
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl WorkerSection {
    pub fn validate(&self) -> Result<()> {
        if self.address.trim().is_empty() {
            return Err(GreetBusError::BadRequest(
                "worker.address must not be empty".into(),
            ));
        }
        if self.min_delay_ms == 0 {
            return Err(GreetBusError::BadRequest(
                "worker.min_delay_ms must be at least 1".into(),
            ));
        }
        if self.max_delay_ms > 60_000 {
            return Err(GreetBusError::BadRequest(
                "worker.max_delay_ms must be at most 60000".into(),
            ));
        }
        self.delay_range().map(|_| ())
    }

    pub fn delay_range(&self) -> Result<DelayRange> {
        DelayRange::new(self.min_delay_ms, self.max_delay_ms)
    }
}

fn default_address() -> String {
    "greetings".into()
}
fn default_min_delay_ms() -> u64 {
    DEFAULT_MIN_DELAY_MS
}
fn default_max_delay_ms() -> u64 {
    DEFAULT_MAX_DELAY_MS
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    #[serde(default = "default_latency_buckets")]
    pub latency_buckets_seconds: Vec<f64>,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            latency_buckets_seconds: default_latency_buckets(),
        }
    }
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        let b = &self.latency_buckets_seconds;
        if b.is_empty() {
            return Err(GreetBusError::BadRequest(
                "metrics.latency_buckets_seconds must not be empty".into(),
            ));
        }
        if b.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(GreetBusError::BadRequest(
                "metrics.latency_buckets_seconds must be positive and finite".into(),
            ));
        }
        if b.windows(2).any(|w| w[0] >= w[1]) {
            return Err(GreetBusError::BadRequest(
                "metrics.latency_buckets_seconds must be strictly increasing".into(),
            ));
        }
        Ok(())
    }
}

fn default_latency_buckets() -> Vec<f64> {
    DEFAULT_LATENCY_BUCKETS.to_vec()
}
