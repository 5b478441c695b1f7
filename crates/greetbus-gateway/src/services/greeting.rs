use std::sync::Arc;

use async_trait::async_trait;

use greetbus_core::error::Result;
use greetbus_core::{DelayRange, GreetingCatalog, Randomness, ThreadRandomness};

use crate::bus::{BusMessage, Consumer};
use crate::config::WorkerSection;
use crate::obs::GreetBusMetrics;

/// Replies to every request with a random greeting after a random delay.
///
/// Each request gets its own delay and greeting; concurrent requests share
/// nothing mutable besides the randomness source, which is safe for
/// concurrent use.
pub struct GreetingWorker {
    address: String,
    catalog: GreetingCatalog,
    delay: DelayRange,
    rng: Arc<dyn Randomness>,
    metrics: Arc<GreetBusMetrics>,
}

impl GreetingWorker {
    pub fn new(
        address: impl Into<String>,
        catalog: GreetingCatalog,
        delay: DelayRange,
        metrics: Arc<GreetBusMetrics>,
    ) -> Self {
        Self {
            address: address.into(),
            catalog,
            delay,
            rng: Arc::new(ThreadRandomness),
            metrics,
        }
    }

    pub fn from_config(cfg: &WorkerSection, metrics: Arc<GreetBusMetrics>) -> Result<Self> {
        Ok(Self::new(
            cfg.address.clone(),
            GreetingCatalog::standard(),
            cfg.delay_range()?,
            metrics,
        ))
    }

    /// Swap the random source (seeded runs, tests).
    pub fn with_randomness(mut self, rng: Arc<dyn Randomness>) -> Self {
        self.rng = rng;
        self
    }
}

#[async_trait]
impl Consumer for GreetingWorker {
    fn address(&self) -> &str {
        &self.address
    }

    async fn handle(&self, msg: BusMessage) -> Result<()> {
        let delay = self.delay.sample(self.rng.as_ref());
        self.metrics.worker_delay.observe(delay.as_secs_f64());
        tokio::time::sleep(delay).await;

        let greeting = self.catalog.pick(self.rng.as_ref());
        self.metrics
            .worker_greetings
            .with_label_values(&[greeting.as_str()])
            .inc();
        tracing::debug!(address = %self.address, ?delay, %greeting, "replying");
        msg.reply(greeting.as_str())
    }
}
