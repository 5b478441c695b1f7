use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::oneshot;
use tokio::time::{timeout, Instant};

use greetbus_core::error::{GreetBusError, Result};

use crate::bus::message::BusMessage;
use crate::obs::metrics::{failure, GreetBusMetrics};

/// A consumer bound to one logical address.
#[async_trait]
pub trait Consumer: Send + Sync {
    fn address(&self) -> &str;
    async fn handle(&self, msg: BusMessage) -> Result<()>;
}

/// Registry of consumers plus the request/reply entry point.
pub struct EventBus {
    consumers: DashMap<String, Arc<dyn Consumer>>,
    metrics: Arc<GreetBusMetrics>,
    reply_timeout: Option<Duration>,
}

impl EventBus {
    pub fn new(metrics: Arc<GreetBusMetrics>) -> Self {
        Self {
            consumers: DashMap::new(),
            metrics,
            reply_timeout: None,
        }
    }

    /// Bound the wait for a reply. `None` waits indefinitely.
    pub fn with_reply_timeout(mut self, reply_timeout: Option<Duration>) -> Self {
        self.reply_timeout = reply_timeout;
        self
    }

    /// Register `consumer` as the single consumer of its address.
    /// A consumer already bound to that address is replaced.
    pub fn register(&self, consumer: Arc<dyn Consumer>) {
        let address = consumer.address().to_owned();
        if self.consumers.insert(address.clone(), consumer).is_some() {
            tracing::warn!(%address, "replaced existing consumer");
        } else {
            tracing::debug!(%address, "consumer registered");
        }
    }

    /// Publish a bodiless request on `address` and await its single reply.
    ///
    /// The consumer runs on its own task: dropping this future does not
    /// cancel it. Fails immediately when nobody consumes `address`.
    pub async fn request(&self, address: &str) -> Result<String> {
        let started = Instant::now();
        self.metrics.bus_published.with_label_values(&[address]).inc();

        let consumer = match self.consumers.get(address) {
            Some(c) => c.value().clone(),
            None => {
                self.fail(address, failure::NO_HANDLERS);
                return Err(GreetBusError::NoHandlers(address.to_owned()));
            }
        };

        let (tx, rx) = oneshot::channel();
        let msg = BusMessage::new(Arc::from(address), tx, Arc::clone(&self.metrics));
        let _pending = PendingGuard::new(&self.metrics, address);

        self.metrics.bus_received.with_label_values(&[address]).inc();
        tokio::spawn(async move {
            let address = consumer.address().to_owned();
            match consumer.handle(msg).await {
                Ok(()) => {}
                // Requester timed out or disconnected; already counted.
                Err(e @ GreetBusError::Abandoned(_)) => {
                    tracing::debug!(%address, error = %e, "reply abandoned");
                }
                Err(e) => tracing::warn!(%address, error = %e, "consumer failed"),
            }
        });

        let outcome = match self.reply_timeout {
            Some(limit) => match timeout(limit, rx).await {
                Ok(r) => r,
                Err(_) => {
                    self.fail(address, failure::TIMEOUT);
                    return Err(GreetBusError::Timeout {
                        address: address.to_owned(),
                        after_ms: limit.as_millis() as u64,
                    });
                }
            },
            None => rx.await,
        };

        match outcome {
            Ok(body) => {
                self.metrics
                    .bus_duration
                    .with_label_values(&[address])
                    .observe(started.elapsed().as_secs_f64());
                Ok(body)
            }
            Err(_) => {
                self.fail(address, failure::DROPPED);
                Err(GreetBusError::ReplyDropped(address.to_owned()))
            }
        }
    }

    fn fail(&self, address: &str, kind: &str) {
        self.metrics
            .bus_reply_failures
            .with_label_values(&[address, kind])
            .inc();
    }
}

/// Keeps `bus_pending` accurate even when the requester is dropped mid-wait.
struct PendingGuard<'a> {
    metrics: &'a GreetBusMetrics,
    address: &'a str,
}

impl<'a> PendingGuard<'a> {
    fn new(metrics: &'a GreetBusMetrics, address: &'a str) -> Self {
        metrics.bus_pending.with_label_values(&[address]).inc();
        Self { metrics, address }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.metrics.bus_pending.with_label_values(&[self.address]).dec();
    }
}
