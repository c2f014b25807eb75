//! Build information metric.

use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;

/// Labels for the build info gauge.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct BuildInfoLabels {
    pub version: String,
    pub os: String,
    pub arch: String,
}

impl BuildInfoLabels {
    /// Labels describing the running binary.
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }
}

/// Register `pingdom_exporter_build_info`, a constant 1 labelled with the
/// exporter's version and platform.
pub fn register_build_info(registry: &mut Registry) {
    let build_info = Family::<BuildInfoLabels, Gauge>::default();
    build_info.get_or_create(&BuildInfoLabels::current()).set(1);

    registry.register(
        "pingdom_exporter_build_info",
        "A metric with a constant '1' value labeled by version, os and arch from which pingdom_exporter was built",
        build_info,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus_client::encoding::text::encode;

    #[test]
    fn test_build_info_encoding() {
        let mut registry = Registry::default();
        register_build_info(&mut registry);

        let mut buffer = String::new();
        encode(&mut buffer, &registry).unwrap();

        assert!(buffer.contains("# TYPE pingdom_exporter_build_info gauge"));
        assert!(buffer.contains(&format!("version=\"{}\"", env!("CARGO_PKG_VERSION"))));
        assert!(buffer.contains(&format!("os=\"{}\"", std::env::consts::OS)));
    }
}
