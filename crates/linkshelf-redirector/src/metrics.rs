use prometheus::{IntCounterVec, Opts, Registry};

pub const NAMESPACE: &str = "linkshelf";

/// Counts redirect requests by the status code they were answered with.
#[derive(Debug, Clone)]
pub struct RedirectMetrics {
    requests_processed: IntCounterVec,
}

impl RedirectMetrics {
    /// Creates the counters and registers them with `registry`.
    pub fn register(registry: &Registry) -> prometheus::Result<Self> {
        let requests_processed = IntCounterVec::new(
            Opts::new(
                "requests_processed_total",
                "Number of total redirect requests processed by response code.",
            )
            .namespace(NAMESPACE),
            &["code"],
        )?;
        registry.register(Box::new(requests_processed.clone()))?;

        Ok(Self { requests_processed })
    }

    pub fn record(&self, status: u16) {
        let code = status.to_string();
        self.requests_processed
            .with_label_values(&[code.as_str()])
            .inc();
    }

    /// Current value of the counter for `status`.
    pub fn processed(&self, status: u16) -> u64 {
        let code = status.to_string();
        self.requests_processed
            .with_label_values(&[code.as_str()])
            .get()
    }
}
