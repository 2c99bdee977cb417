//! INI file configuration adapter.
//!
//! ```ini
//! [run]
//! pair = BTCUSDT
//! initial_funds = 1000
//! zipped_dir = data/zipped_data
//! data_dir = data/unzipped_data
//! plots_dir = plots
//! rows = 1000
//!
//! [macd]
//! fast = 12
//! slow = 26
//! signal = 9
//! ```

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    /// An adapter with no sections, so every lookup falls back to its default.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config
            .get(section, key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    const FULL: &str = r#"
[run]
pair = ETHUSDT
initial_funds = 2500.5
data_dir = /srv/klines
plots_dir = out/plots
rows = 750

[macd]
fast = 8
slow = 21
signal = 5
"#;

    #[test]
    fn from_string_parses_all_sections() {
        let adapter = FileConfigAdapter::from_string(FULL).unwrap();
        assert_eq!(adapter.get_string("run", "pair"), Some("ETHUSDT".to_string()));
        assert_eq!(adapter.get_double("run", "initial_funds", 0.0), 2500.5);
        assert_eq!(
            adapter.get_string("run", "data_dir"),
            Some("/srv/klines".to_string())
        );
        assert_eq!(adapter.get_int("run", "rows", 0), 750);
        assert_eq!(adapter.get_int("macd", "fast", 0), 8);
        assert_eq!(adapter.get_int("macd", "slow", 0), 21);
        assert_eq!(adapter.get_int("macd", "signal", 0), 5);
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[run]\npair = BTCUSDT\n").unwrap();
        assert_eq!(adapter.get_string("run", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "pair"), None);
    }

    #[test]
    fn get_string_treats_blank_as_missing() {
        let adapter = FileConfigAdapter::from_string("[run]\npair =\n").unwrap();
        assert_eq!(adapter.get_string("run", "pair"), None);
    }

    #[test]
    fn get_int_returns_default_for_missing_or_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[run]\nrows = many\n").unwrap();
        assert_eq!(adapter.get_int("run", "rows", 1000), 1000);
        assert_eq!(adapter.get_int("macd", "fast", 12), 12);
    }

    #[test]
    fn get_double_returns_default_for_missing_or_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[run]\ninitial_funds = lots\n").unwrap();
        assert_eq!(adapter.get_double("run", "initial_funds", 99.9), 99.9);
        assert_eq!(adapter.get_double("run", "missing", 1.5), 1.5);
    }

    #[test]
    fn empty_adapter_uses_defaults() {
        let adapter = FileConfigAdapter::empty();
        assert_eq!(adapter.get_string("run", "pair"), None);
        assert_eq!(adapter.get_int("run", "rows", 1000), 1000);
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[run]\nplots_dir = /tmp/charts\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("run", "plots_dir"),
            Some("/tmp/charts".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/macdtrader.ini");
        assert!(result.is_err());
    }
}
