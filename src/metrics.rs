//! Counters for CMS traffic and form submissions, exported in Prometheus
//! format when the exporter is installed.

use std::fmt;
use std::net::SocketAddr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    CmsRequests,
    CmsRetries,
    CmsFailures,
    CmsCacheHits,
    RecordsDropped,
    SubmissionsAccepted,
    SubmissionsRejected,
    SubmissionsFailed,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::CmsRequests => "site_cms_requests_total",
            MetricName::CmsRetries => "site_cms_retries_total",
            MetricName::CmsFailures => "site_cms_failures_total",
            MetricName::CmsCacheHits => "site_cms_cache_hits_total",
            MetricName::RecordsDropped => "site_cms_records_dropped_total",
            MetricName::SubmissionsAccepted => "site_submissions_accepted_total",
            MetricName::SubmissionsRejected => "site_submissions_rejected_total",
            MetricName::SubmissionsFailed => "site_submissions_failed_total",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn increment(name: MetricName) {
    ::metrics::counter!(name.as_str()).increment(1);
}

pub fn increment_by(name: MetricName, value: u64) {
    ::metrics::counter!(name.as_str()).increment(value);
}

pub fn increment_labeled(name: MetricName, label: &'static str, value: &str) {
    ::metrics::counter!(name.as_str(), label => value.to_string()).increment(1);
}

/// Installs the Prometheus exporter on its own listener.
pub fn init_metrics(port: u16) {
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!("Prometheus exporter listening on http://{}/metrics", addr),
        Err(e) => tracing::warn!("Prometheus exporter install failed: {}", e),
    }
}
