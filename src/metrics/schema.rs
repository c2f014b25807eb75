//! Static catalog of exported metric families.
//!
//! The four descriptors below are the only metrics the exporter emits.
//! Every [`Sample`] is bound to one of them, and its label values must line
//! up with the descriptor's label names.

use std::fmt;

/// Prefix shared by every exported metric name.
pub const NAMESPACE: &str = "pingdom";

/// Metadata identifying one metric family.
#[derive(Debug, PartialEq, Eq)]
pub struct Descriptor {
    /// Fully qualified metric name.
    pub name: &'static str,
    pub help: &'static str,
    /// Label names, in the order sample label values are given.
    pub labels: &'static [&'static str],
}

pub static UP: Descriptor = Descriptor {
    name: "pingdom_up",
    help: "Whether the last pingdom scrape was successful (1: up, 0: down)",
    labels: &[],
};

pub static CHECK_STATUS: Descriptor = Descriptor {
    name: "pingdom_check_status",
    help: "The current status of the check (1: true, 0: false)",
    labels: &["id", "name", "hostname", "status"],
};

pub static CHECK_RESPONSE_TIME: Descriptor = Descriptor {
    name: "pingdom_check_response_time",
    help: "The response time of the last test in milliseconds",
    labels: &["id", "name", "hostname"],
};

pub static CHECK_RESOLUTION: Descriptor = Descriptor {
    name: "pingdom_check_resolution",
    help: "The resolution of the check in minutes",
    labels: &["id", "name", "hostname"],
};

/// All exported descriptors, in exposition order.
pub fn describe() -> [&'static Descriptor; 4] {
    [&UP, &CHECK_STATUS, &CHECK_RESPONSE_TIME, &CHECK_RESOLUTION]
}

/// Check states reported by Pingdom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckStatus {
    Unknown,
    Paused,
    Up,
    UnconfirmedDown,
    Down,
}

impl CheckStatus {
    /// Every status, in the order status samples are emitted.
    pub const ALL: [CheckStatus; 5] = [
        CheckStatus::Unknown,
        CheckStatus::Paused,
        CheckStatus::Up,
        CheckStatus::UnconfirmedDown,
        CheckStatus::Down,
    ];

    /// The API's string form, also used as the `status` label value.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Unknown => "unknown",
            CheckStatus::Paused => "paused",
            CheckStatus::Up => "up",
            CheckStatus::UnconfirmedDown => "unconfirmed_down",
            CheckStatus::Down => "down",
        }
    }

    /// Indicator value for a raw status string: exact, case-sensitive match.
    pub fn indicator(&self, raw: &str) -> f64 {
        if raw == self.as_str() { 1.0 } else { 0.0 }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One gauge value for a descriptor and a concrete set of label values.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub descriptor: &'static Descriptor,
    pub label_values: Vec<String>,
    pub value: f64,
}

impl Sample {
    /// Create a sample.
    ///
    /// # Panics
    ///
    /// Panics if the number of label values differs from the descriptor's
    /// label names. That is a bug in the caller, not a runtime condition.
    pub fn new(descriptor: &'static Descriptor, label_values: Vec<String>, value: f64) -> Self {
        assert_eq!(
            label_values.len(),
            descriptor.labels.len(),
            "label cardinality mismatch for {}",
            descriptor.name
        );
        Self {
            descriptor,
            label_values,
            value,
        }
    }

    /// Label name/value pairs in descriptor order.
    pub fn labels(&self) -> Vec<(&'static str, &str)> {
        self.descriptor
            .labels
            .iter()
            .copied()
            .zip(self.label_values.iter().map(String::as_str))
            .collect()
    }

    /// Look up a single label value by name.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.descriptor
            .labels
            .iter()
            .position(|l| *l == name)
            .map(|i| self.label_values[i].as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_arities() {
        let arities: Vec<usize> = describe().iter().map(|d| d.labels.len()).collect();
        assert_eq!(arities, vec![0, 4, 3, 3]);
    }

    #[test]
    fn test_describe_order_and_names() {
        let names: Vec<&str> = describe().iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "pingdom_up",
                "pingdom_check_status",
                "pingdom_check_response_time",
                "pingdom_check_resolution",
            ]
        );
        for descriptor in describe() {
            assert!(descriptor.name.starts_with(NAMESPACE));
            assert!(!descriptor.help.is_empty());
        }
    }

    #[test]
    fn test_status_order() {
        let order: Vec<&str> = CheckStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(order, vec!["unknown", "paused", "up", "unconfirmed_down", "down"]);
    }

    #[test]
    fn test_status_indicator_is_exact() {
        assert_eq!(CheckStatus::Up.indicator("up"), 1.0);
        assert_eq!(CheckStatus::Up.indicator("UP"), 0.0);
        assert_eq!(CheckStatus::Down.indicator("unconfirmed_down"), 0.0);
        assert_eq!(CheckStatus::UnconfirmedDown.indicator("unconfirmed_down"), 1.0);
    }

    #[test]
    fn test_sample_labels() {
        let sample = Sample::new(
            &CHECK_RESOLUTION,
            vec!["1".to_string(), "A".to_string(), "a.com".to_string()],
            5.0,
        );
        assert_eq!(
            sample.labels(),
            vec![("id", "1"), ("name", "A"), ("hostname", "a.com")]
        );
        assert_eq!(sample.label("hostname"), Some("a.com"));
        assert_eq!(sample.label("status"), None);
    }

    #[test]
    #[should_panic(expected = "label cardinality mismatch")]
    fn test_sample_arity_mismatch_panics() {
        Sample::new(&CHECK_STATUS, vec!["1".to_string()], 1.0);
    }
}
