//! Shared application state for the greetbus gateway.
//!
//! Start-up order matters: the metrics registry (with its bucket layout) is
//! built first, then the bus that records into it, then the built-in
//! consumers. The router only sees a fully wired state.

use std::sync::Arc;

use greetbus_core::error::Result;

use crate::bus::EventBus;
use crate::config::GatewayConfig;
use crate::obs::GreetBusMetrics;
use crate::services::GreetingWorker;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    bus: Arc<EventBus>,
    metrics: Arc<GreetBusMetrics>,
}

struct AppStateInner {
    cfg: GatewayConfig,
}

impl AppState {
    /// Build application state with the greeting worker registered.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let state = Self::without_services(cfg)?;

        let worker = GreetingWorker::from_config(&state.cfg().worker, state.metrics())?;
        state.bus.register(Arc::new(worker));

        Ok(state)
    }

    /// Build metrics and bus only; no consumer is registered.
    pub fn without_services(cfg: GatewayConfig) -> Result<Self> {
        cfg.validate()?;

        let metrics = Arc::new(GreetBusMetrics::new(&cfg.metrics)?);
        let bus = EventBus::new(Arc::clone(&metrics))
            .with_reply_timeout(cfg.gateway.request_timeout());

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg }),
            bus: Arc::new(bus),
            metrics,
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn greeting_address(&self) -> &str {
        &self.inner.cfg.worker.address
    }

    pub fn bus(&self) -> Arc<EventBus> {
        Arc::clone(&self.bus)
    }

    pub fn metrics(&self) -> Arc<GreetBusMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn set_draining(&self) {
        self.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }
}
