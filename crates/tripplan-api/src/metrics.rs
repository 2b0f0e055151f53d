//! Prometheus counters for the generation path, served at `/metrics`.
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Outcome label for a successful decode
pub const OUTCOME_OK: &str = "ok";
/// Outcome label when the upstream call itself failed
pub const OUTCOME_UPSTREAM: &str = "upstream_error";

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    generations: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let generations = IntCounterVec::new(
            Opts::new(
                "tripplan_generations_total",
                "Generation requests by outcome (ok, upstream_error, or a decode error kind)",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(generations.clone()))?;

        Ok(Self {
            registry,
            generations,
        })
    }

    pub fn record(&self, outcome: &str) {
        self.generations.with_label_values(&[outcome]).inc();
    }

    pub fn count(&self, outcome: &str) -> u64 {
        self.generations.with_label_values(&[outcome]).get()
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
