//! Controller configuration from a JSON file and command-line overrides

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ignition_core::{IgnitionConfig, Rpm};

/// Parse a JSON document; absent fields keep their defaults
pub fn from_json(text: &str) -> Result<IgnitionConfig> {
    serde_json::from_str(text).context("invalid controller configuration")
}

/// Default configuration, or the one stored at `path`
pub fn load(path: Option<&Path>) -> Result<IgnitionConfig> {
    let Some(path) = path else {
        return Ok(IgnitionConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read config file {}", path.display()))?;
    from_json(&text).with_context(|| format!("in {}", path.display()))
}

/// Apply the start-up speed override and check the result
pub fn finish(mut config: IgnitionConfig, rpm: Option<u32>) -> Result<IgnitionConfig> {
    if let Some(rpm) = rpm {
        config.default_rpm = Rpm(rpm);
    }
    config
        .validate()
        .map_err(anyhow::Error::new)
        .context("configuration rejected")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ignition_core::{Micros, Polarity};

    #[test]
    fn partial_json_keeps_defaults() {
        let config = from_json(r#"{ "default_rpm": 7000, "polarity": "ActiveLow" }"#).unwrap();
        assert_eq!(config.default_rpm, Rpm(7000));
        assert_eq!(config.polarity, Polarity::ActiveLow);
        assert_eq!(config.pulse_width, Micros(2000));
        assert_eq!(config.debounce_ticks, 15);
    }

    #[test]
    fn override_is_validated() {
        let config = finish(IgnitionConfig::default(), Some(8000)).unwrap();
        assert_eq!(config.default_rpm, Rpm(8000));

        assert!(finish(IgnitionConfig::default(), Some(12_000)).is_err());
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(from_json("{ default_rpm: }").is_err());
        assert!(from_json(r#"{ "rpm_min": "fast" }"#).is_err());
    }

    #[test]
    fn missing_file_reported() {
        let err = load(Some(Path::new("/nonexistent/ignition.json"))).unwrap_err();
        assert!(err.to_string().contains("cannot read config file"));
    }
}
