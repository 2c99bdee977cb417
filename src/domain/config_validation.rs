//! Configuration validation.
//!
//! Checks the `[run]` and `[macd]` sections before any data is read. Keys
//! that are absent fall back to their defaults and are not errors here;
//! required keys are enforced when the `RunConfig` is assembled.

use crate::domain::error::MacdTraderError;
use crate::ports::config_port::ConfigPort;

pub fn validate_run_config(config: &dyn ConfigPort) -> Result<(), MacdTraderError> {
    validate_pair(config)?;
    validate_initial_funds(config)?;
    validate_rows(config)?;
    Ok(())
}

pub fn validate_macd_config(config: &dyn ConfigPort) -> Result<(), MacdTraderError> {
    for key in ["fast", "slow", "signal"] {
        validate_period(config, key)?;
    }
    Ok(())
}

/// A pair name becomes a directory component, so it must be a single
/// plain path segment.
pub fn check_pair_name(section: &str, pair: &str) -> Result<(), MacdTraderError> {
    let pair = pair.trim();
    let reason = if pair.is_empty() {
        Some("pair must not be empty")
    } else if pair == "." || pair == ".." || pair.contains(['/', '\\']) {
        Some("pair must be a plain name, not a path")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(MacdTraderError::ConfigInvalid {
            section: section.to_string(),
            key: "pair".to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

pub fn check_initial_funds(section: &str, value: f64) -> Result<(), MacdTraderError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(MacdTraderError::ConfigInvalid {
            section: section.to_string(),
            key: "initial_funds".to_string(),
            reason: "initial_funds must be a positive number".to_string(),
        });
    }
    Ok(())
}

fn validate_pair(config: &dyn ConfigPort) -> Result<(), MacdTraderError> {
    match config.get_string("run", "pair") {
        Some(pair) => check_pair_name("run", &pair),
        None => Ok(()),
    }
}

fn validate_initial_funds(config: &dyn ConfigPort) -> Result<(), MacdTraderError> {
    if config.get_string("run", "initial_funds").is_none() {
        return Ok(());
    }
    check_initial_funds("run", config.get_double("run", "initial_funds", f64::NAN))
}

fn validate_rows(config: &dyn ConfigPort) -> Result<(), MacdTraderError> {
    validate_positive_int(config, "run", "rows", "rows must be positive")
}

fn validate_period(config: &dyn ConfigPort, key: &str) -> Result<(), MacdTraderError> {
    validate_positive_int(config, "macd", key, &format!("{key} period must be positive"))
}

/// An absent key is fine; a present one must parse as an integer above zero.
fn validate_positive_int(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    reason: &str,
) -> Result<(), MacdTraderError> {
    let Some(raw) = config.get_string(section, key) else {
        return Ok(());
    };
    let value = config.get_int(section, key, i64::MIN);
    let reason = if value == i64::MIN {
        format!("{key} must be an integer, got {raw:?}")
    } else if value <= 0 {
        reason.to_string()
    } else {
        return Ok(());
    };
    Err(MacdTraderError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapConfig(HashMap<(String, String), String>);

    impl MapConfig {
        fn new(entries: &[(&str, &str, &str)]) -> Self {
            MapConfig(
                entries
                    .iter()
                    .map(|(s, k, v)| ((s.to_string(), k.to_string()), v.to_string()))
                    .collect(),
            )
        }
    }

    impl ConfigPort for MapConfig {
        fn get_string(&self, section: &str, key: &str) -> Option<String> {
            self.0.get(&(section.to_string(), key.to_string())).cloned()
        }

        fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
            self.get_string(section, key)
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }

        fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
            self.get_string(section, key)
                .and_then(|v| v.parse().ok())
                .unwrap_or(default)
        }
    }

    #[test]
    fn valid_run_section() {
        let config = MapConfig::new(&[
            ("run", "pair", "BTCUSDT"),
            ("run", "initial_funds", "1000"),
            ("run", "rows", "500"),
        ]);
        assert!(validate_run_config(&config).is_ok());
    }

    #[test]
    fn empty_config_is_valid() {
        let config = MapConfig::new(&[]);
        assert!(validate_run_config(&config).is_ok());
        assert!(validate_macd_config(&config).is_ok());
    }

    #[test]
    fn rejects_zero_funds() {
        let config = MapConfig::new(&[("run", "initial_funds", "0")]);
        let err = validate_run_config(&config).unwrap_err();
        assert!(matches!(err, MacdTraderError::ConfigInvalid { key, .. } if key == "initial_funds"));
    }

    #[test]
    fn rejects_non_numeric_funds() {
        let config = MapConfig::new(&[("run", "initial_funds", "lots")]);
        assert!(validate_run_config(&config).is_err());
    }

    #[test]
    fn rejects_path_like_pair() {
        for bad in ["../etc", "a/b", "..", "  "] {
            let config = MapConfig::new(&[("run", "pair", bad)]);
            let err = validate_run_config(&config).unwrap_err();
            assert!(
                matches!(err, MacdTraderError::ConfigInvalid { ref key, .. } if key == "pair"),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_negative_rows() {
        let config = MapConfig::new(&[("run", "rows", "-5")]);
        let err = validate_run_config(&config).unwrap_err();
        assert!(matches!(err, MacdTraderError::ConfigInvalid { key, .. } if key == "rows"));
    }

    #[test]
    fn rejects_zero_period() {
        let config = MapConfig::new(&[("macd", "signal", "0")]);
        let err = validate_macd_config(&config).unwrap_err();
        assert!(matches!(err, MacdTraderError::ConfigInvalid { key, .. } if key == "signal"));
    }

    #[test]
    fn rejects_malformed_rows() {
        let config = MapConfig::new(&[("run", "rows", "many")]);
        let err = validate_run_config(&config).unwrap_err();
        assert!(matches!(err, MacdTraderError::ConfigInvalid { ref key, .. } if key == "rows"));
        assert!(err.to_string().contains("must be an integer"));
    }

    #[test]
    fn rejects_malformed_periods() {
        for (key, raw) in [("fast", "8.5"), ("slow", "twenty"), ("signal", "")] {
            let config = MapConfig::new(&[("macd", key, raw)]);
            let err = validate_macd_config(&config).unwrap_err();
            assert!(
                matches!(err, MacdTraderError::ConfigInvalid { key: ref k, .. } if k == key),
                "{key} = {raw:?} should be rejected"
            );
        }
    }
}
