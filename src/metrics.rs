//! Prometheus metrics for item operations and the startup probe.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Items created counter metric name.
pub const METRIC_ITEMS_CREATED: &str = "items_created_total";
/// Items updated counter metric name.
pub const METRIC_ITEMS_UPDATED: &str = "items_updated_total";
/// Items deleted counter metric name.
pub const METRIC_ITEMS_DELETED: &str = "items_deleted_total";
/// Lookups that matched no item.
pub const METRIC_ITEMS_NOT_FOUND: &str = "items_not_found_total";
/// Database probe outcomes, labelled by `outcome`.
pub const METRIC_DB_PROBE: &str = "db_probe_total";
/// Database probe latency metric name.
pub const METRIC_DB_PROBE_LATENCY: &str = "db_probe_latency_ms";

/// Install the Prometheus recorder and describe all metrics.
///
/// Call this once at startup. The returned handle renders the scrape body.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Initialize all metric descriptions.
pub fn init_metrics() {
    describe_counter!(METRIC_ITEMS_CREATED, "Total number of items created");
    describe_counter!(METRIC_ITEMS_UPDATED, "Total number of items updated");
    describe_counter!(METRIC_ITEMS_DELETED, "Total number of items removed");
    describe_counter!(
        METRIC_ITEMS_NOT_FOUND,
        "Total number of item lookups that matched nothing"
    );
    describe_counter!(METRIC_DB_PROBE, "Startup database probe outcomes");
    describe_histogram!(
        METRIC_DB_PROBE_LATENCY,
        "Startup database probe latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Increment items created counter.
pub fn inc_items_created() {
    counter!(METRIC_ITEMS_CREATED).increment(1);
}

/// Increment items updated counter.
pub fn inc_items_updated() {
    counter!(METRIC_ITEMS_UPDATED).increment(1);
}

/// Increment items deleted counter.
pub fn inc_items_deleted() {
    counter!(METRIC_ITEMS_DELETED).increment(1);
}

/// Increment not-found counter.
pub fn inc_items_not_found(operation: &'static str) {
    counter!(METRIC_ITEMS_NOT_FOUND, "operation" => operation).increment(1);
}

/// Record one probe outcome.
pub fn inc_db_probe(outcome: &'static str) {
    counter!(METRIC_DB_PROBE, "outcome" => outcome).increment(1);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(self.metric_name).record(self.elapsed_ms());
    }
}

/// Create a latency timer for the database probe.
pub fn timer_db_probe() -> LatencyTimer {
    LatencyTimer::new(METRIC_DB_PROBE_LATENCY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn latency_timer_measures_time() {
        let timer = timer_db_probe();
        sleep(Duration::from_millis(10));
        assert!(timer.elapsed_ms() >= 9.0);
    }

    #[test]
    fn counters_are_noops_without_recorder() {
        inc_items_created();
        inc_items_not_found("get");
        inc_db_probe("skipped");
    }
}
