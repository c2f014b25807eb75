//! Scrape-time collector for Pingdom checks.
//!
//! Each call to [`PingdomExporter::collect`] makes one upstream request and
//! turns the result into a [`Scrape`]. Nothing is cached between calls.

use crate::metrics::schema::{
    self, CHECK_RESOLUTION, CHECK_RESPONSE_TIME, CHECK_STATUS, CheckStatus, Descriptor, Sample,
    UP,
};
use crate::pingdom::{Check, ChecksApi};
use prometheus_client::collector::Collector;
use prometheus_client::encoding::{
    DescriptorEncoder, EncodeLabelValue, EncodeMetric, LabelValueEncoder,
};
use prometheus_client::metrics::MetricType;
use prometheus_client::metrics::gauge::ConstGauge;
use std::fmt::{self, Write};
use std::sync::Arc;
use tracing::{debug, error};

/// Exports Pingdom check health as gauges.
#[derive(Clone)]
pub struct PingdomExporter {
    client: Arc<dyn ChecksApi>,
}

impl PingdomExporter {
    /// Create an exporter backed by the given check source.
    pub fn new(client: Arc<dyn ChecksApi>) -> Self {
        Self { client }
    }

    /// Descriptors of every metric this exporter can emit.
    pub fn describe(&self) -> [&'static Descriptor; 4] {
        schema::describe()
    }

    /// Fetch the check list and capture it for one scrape.
    ///
    /// Upstream failures never escape: they are logged and reported as
    /// `pingdom_up 0` with no per-check samples.
    pub async fn collect(&self) -> Scrape {
        match self.client.list_checks().await {
            Ok(checks) => {
                debug!(checks = checks.len(), "retrieved pingdom checks");
                Scrape::succeeded(checks)
            }
            Err(e) => {
                error!(error = %e, "error retrieving checks");
                Scrape::failed()
            }
        }
    }
}

impl fmt::Debug for PingdomExporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PingdomExporter").finish_non_exhaustive()
    }
}

/// Result of a single upstream fetch.
///
/// `checks` is `None` when the fetch failed; partial data is never kept.
#[derive(Debug, Clone)]
pub struct Scrape {
    checks: Option<Vec<Check>>,
}

impl Scrape {
    pub fn succeeded(checks: Vec<Check>) -> Self {
        Self {
            checks: Some(checks),
        }
    }

    pub fn failed() -> Self {
        Self { checks: None }
    }

    /// Whether the upstream fetch succeeded.
    pub fn is_up(&self) -> bool {
        self.checks.is_some()
    }

    /// Checks captured by this scrape, in upstream order.
    pub fn checks(&self) -> &[Check] {
        self.checks.as_deref().unwrap_or_default()
    }

    /// Lazily produce this scrape's samples.
    ///
    /// `pingdom_up` always comes first. Each check then contributes five
    /// status indicators, its response time and its resolution.
    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        let up = Sample::new(&UP, Vec::new(), if self.is_up() { 1.0 } else { 0.0 });
        std::iter::once(up).chain(self.checks().iter().flat_map(check_samples))
    }
}

/// Samples for one check, in emission order.
fn check_samples(check: &Check) -> impl Iterator<Item = Sample> + '_ {
    let base = [check.id.to_string(), check.name.clone(), check.hostname.clone()];

    let status_base = base.clone();
    let statuses = CheckStatus::ALL.into_iter().map(move |status| {
        let mut labels = status_base.to_vec();
        labels.push(status.as_str().to_string());
        Sample::new(&CHECK_STATUS, labels, status.indicator(&check.status))
    });

    let response_time = Sample::new(
        &CHECK_RESPONSE_TIME,
        base.to_vec(),
        check.last_response_time as f64,
    );
    let resolution = Sample::new(&CHECK_RESOLUTION, base.to_vec(), check.resolution as f64);

    statuses
        .chain(std::iter::once(response_time))
        .chain(std::iter::once(resolution))
}

impl Collector for Scrape {
    /// Families are written in descriptor order, each one contiguous, with
    /// sample order preserved inside a family. Empty families are skipped.
    fn encode(&self, mut encoder: DescriptorEncoder) -> Result<(), fmt::Error> {
        let samples: Vec<Sample> = self.samples().collect();

        for descriptor in schema::describe() {
            let mut family = samples
                .iter()
                .filter(|s| std::ptr::eq(s.descriptor, descriptor))
                .peekable();
            if family.peek().is_none() {
                continue;
            }

            let mut metric_encoder = encoder.encode_descriptor(
                descriptor.name,
                descriptor.help,
                None,
                MetricType::Gauge,
            )?;

            // Unlabelled families hold exactly one sample.
            if descriptor.labels.is_empty() {
                if let Some(sample) = family.next() {
                    ConstGauge::new(sample.value).encode(metric_encoder)?;
                }
                continue;
            }

            for sample in family {
                let labels: Vec<(&str, EscapedLabelValue<'_>)> = sample
                    .labels()
                    .into_iter()
                    .map(|(name, value)| (name, EscapedLabelValue(value)))
                    .collect();
                ConstGauge::new(sample.value).encode(metric_encoder.encode_family(&labels)?)?;
            }
        }

        Ok(())
    }
}

/// Label value written with exposition-format escaping.
///
/// Check names and hostnames are free text; `\`, `"` and newlines must be
/// escaped or the whole exposition becomes unparseable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct EscapedLabelValue<'a>(&'a str);

impl EncodeLabelValue for EscapedLabelValue<'_> {
    fn encode(&self, encoder: &mut LabelValueEncoder) -> Result<(), fmt::Error> {
        for c in self.0.chars() {
            match c {
                '\\' => encoder.write_str("\\\\")?,
                '"' => encoder.write_str("\\\"")?,
                '\n' => encoder.write_str("\\n")?,
                c => encoder.write_char(c)?,
            }
        }
        Ok(())
    }
}
