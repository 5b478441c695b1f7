//! Metrics registry for the gateway.
//!
//! Every latency metric is a bucketed histogram so percentiles can be
//! estimated after the fact (`histogram_quantile`). Buckets come from
//! `metrics.latency_buckets_seconds` and are fixed once the registry is
//! built; there is no way to reconfigure them after traffic starts.

use prometheus::core::Collector;
use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, IntGaugeVec,
    Opts, Registry, TextEncoder,
};

use greetbus_core::error::{GreetBusError, Result};

use crate::config::MetricsSection;

const NAMESPACE: &str = "greetbus";

/// Default latency buckets in seconds. Dense between 10ms and 250ms, where
/// the simulated worker delay lands.
pub const DEFAULT_LATENCY_BUCKETS: [f64; 24] = [
    0.001, 0.0025, 0.005, 0.01, 0.015, 0.02, 0.025, 0.03, 0.04, 0.05, 0.06, 0.07, 0.08, 0.09,
    0.1, 0.125, 0.15, 0.2, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Bus failure label values.
pub mod failure {
    pub const NO_HANDLERS: &str = "no_handlers";
    pub const DROPPED: &str = "dropped";
    pub const TIMEOUT: &str = "timeout";
    pub const ABANDONED: &str = "abandoned";
}

fn prom_err(e: prometheus::Error) -> GreetBusError {
    GreetBusError::Internal(format!("metrics registry: {e}"))
}

fn register<C: Collector + Clone + 'static>(registry: &Registry, c: C) -> Result<C> {
    registry.register(Box::new(c.clone())).map_err(prom_err)?;
    Ok(c)
}

pub struct GreetBusMetrics {
    registry: Registry,

    pub http_requests: IntCounterVec,
    pub http_duration: HistogramVec,
    pub http_active: IntGauge,

    pub bus_published: IntCounterVec,
    pub bus_received: IntCounterVec,
    pub bus_replies: IntCounterVec,
    pub bus_reply_failures: IntCounterVec,
    pub bus_pending: IntGaugeVec,
    pub bus_duration: HistogramVec,

    pub worker_delay: Histogram,
    pub worker_greetings: IntCounterVec,

    draining: IntGauge,
}

impl GreetBusMetrics {
    /// Build and register every family. Bucket layout is applied here.
    pub fn new(cfg: &MetricsSection) -> Result<Self> {
        let registry = Registry::new();
        let buckets = cfg.latency_buckets_seconds.clone();

        let latency = |name: &str, help: &str| {
            HistogramOpts::new(name, help)
                .namespace(NAMESPACE)
                .buckets(buckets.clone())
        };

        let http_requests = register(
            &registry,
            IntCounterVec::new(
                Opts::new("http_requests_total", "HTTP requests served").namespace(NAMESPACE),
                &["method", "route", "status"],
            )
            .map_err(prom_err)?,
        )?;
        let http_duration = register(
            &registry,
            HistogramVec::new(
                latency("http_request_duration_seconds", "HTTP request latency"),
                &["method", "route", "status"],
            )
            .map_err(prom_err)?,
        )?;
        let http_active = register(
            &registry,
            IntGauge::with_opts(
                Opts::new("http_requests_active", "HTTP requests in flight").namespace(NAMESPACE),
            )
            .map_err(prom_err)?,
        )?;

        let bus_published = register(
            &registry,
            IntCounterVec::new(
                Opts::new("bus_published_total", "Requests published on the bus")
                    .namespace(NAMESPACE),
                &["address"],
            )
            .map_err(prom_err)?,
        )?;
        let bus_received = register(
            &registry,
            IntCounterVec::new(
                Opts::new("bus_received_total", "Requests handed to a consumer")
                    .namespace(NAMESPACE),
                &["address"],
            )
            .map_err(prom_err)?,
        )?;
        let bus_replies = register(
            &registry,
            IntCounterVec::new(
                Opts::new("bus_replies_total", "Replies delivered to requesters")
                    .namespace(NAMESPACE),
                &["address"],
            )
            .map_err(prom_err)?,
        )?;
        let bus_reply_failures = register(
            &registry,
            IntCounterVec::new(
                Opts::new("bus_reply_failures_total", "Request/reply exchanges that failed")
                    .namespace(NAMESPACE),
                &["address", "failure"],
            )
            .map_err(prom_err)?,
        )?;
        let bus_pending = register(
            &registry,
            IntGaugeVec::new(
                Opts::new("bus_pending", "Requests awaiting a reply").namespace(NAMESPACE),
                &["address"],
            )
            .map_err(prom_err)?,
        )?;
        let bus_duration = register(
            &registry,
            HistogramVec::new(
                latency(
                    "bus_request_duration_seconds",
                    "Time from publish to reply on the bus",
                ),
                &["address"],
            )
            .map_err(prom_err)?,
        )?;

        let worker_delay = register(
            &registry,
            Histogram::with_opts(latency(
                "worker_delay_seconds",
                "Simulated processing delay chosen by the greeting worker",
            ))
            .map_err(prom_err)?,
        )?;
        let worker_greetings = register(
            &registry,
            IntCounterVec::new(
                Opts::new("worker_greetings_total", "Greetings sent by the worker")
                    .namespace(NAMESPACE),
                &["greeting"],
            )
            .map_err(prom_err)?,
        )?;

        let draining = register(
            &registry,
            IntGauge::with_opts(
                Opts::new("draining", "1 once graceful shutdown has begun").namespace(NAMESPACE),
            )
            .map_err(prom_err)?,
        )?;

        Ok(Self {
            registry,
            http_requests,
            http_duration,
            http_active,
            bus_published,
            bus_received,
            bus_replies,
            bus_reply_failures,
            bus_pending,
            bus_duration,
            worker_delay,
            worker_greetings,
            draining,
        })
    }

    /// Mark draining state.
    pub fn set_draining(&self) {
        self.draining.set(1);
    }

    /// Return whether draining is active.
    pub fn is_draining(&self) -> bool {
        self.draining.get() == 1
    }

    /// Render the whole registry in Prometheus text exposition format.
    pub fn render(&self) -> Result<String> {
        let families = self.registry.gather();
        let mut buf = Vec::new();
        TextEncoder::new()
            .encode(&families, &mut buf)
            .map_err(prom_err)?;
        String::from_utf8(buf).map_err(|e| GreetBusError::Internal(format!("metrics utf8: {e}")))
    }

    /// Content type of [`render`](Self::render) output.
    pub fn content_type(&self) -> String {
        TextEncoder::new().format_type().to_string()
    }
}
