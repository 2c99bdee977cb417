//! Domain error types.

/// Top-level error type for macdtrader.
#[derive(Debug, thiserror::Error)]
pub enum MacdTraderError {
    #[error("insufficient data: have {have} prices, need at least {need}")]
    InsufficientData { have: usize, need: usize },

    #[error("invalid {name} window: {value} (must be positive)")]
    InvalidWindow { name: &'static str, value: usize },

    #[error("invalid price {price} at index {index}: prices must be finite and positive")]
    InvalidPrice { index: usize, price: f64 },

    #[error("invalid initial funds {value}: must be finite and non-negative")]
    InvalidFunds { value: f64 },

    #[error("{series} has {actual} entries, expected {expected}")]
    LengthMismatch {
        series: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{series} value {value} at index {index} is not finite")]
    NonFiniteIndicator {
        series: &'static str,
        index: usize,
        value: f64,
    },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no kline data for {pair}")]
    NoData { pair: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&MacdTraderError> for std::process::ExitCode {
    fn from(err: &MacdTraderError) -> Self {
        let code: u8 = match err {
            MacdTraderError::Io(_) => 1,
            MacdTraderError::ConfigParse { .. }
            | MacdTraderError::ConfigMissing { .. }
            | MacdTraderError::ConfigInvalid { .. } => 2,
            MacdTraderError::Data { .. } | MacdTraderError::NoData { .. } => 3,
            MacdTraderError::InsufficientData { .. }
            | MacdTraderError::InvalidWindow { .. }
            | MacdTraderError::InvalidPrice { .. }
            | MacdTraderError::InvalidFunds { .. }
            | MacdTraderError::LengthMismatch { .. }
            | MacdTraderError::NonFiniteIndicator { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::ExitCode;

    #[test]
    fn invalid_price_message_names_index() {
        let err = MacdTraderError::InvalidPrice {
            index: 7,
            price: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid price 0 at index 7: prices must be finite and positive"
        );
    }

    #[test]
    fn length_mismatch_message() {
        let err = MacdTraderError::LengthMismatch {
            series: "signal line",
            expected: 10,
            actual: 9,
        };
        assert_eq!(err.to_string(), "signal line has 9 entries, expected 10");
    }

    #[test]
    fn non_finite_indicator_message() {
        let err = MacdTraderError::NonFiniteIndicator {
            series: "signal line",
            index: 12,
            value: f64::NAN,
        };
        assert_eq!(err.to_string(), "signal line value NaN at index 12 is not finite");
        assert_eq!(code_of(&err), format!("{:?}", ExitCode::from(5u8)));
    }

    fn code_of(err: &MacdTraderError) -> String {
        format!("{:?}", ExitCode::from(err))
    }

    #[test]
    fn exit_codes_by_family() {
        let config = MacdTraderError::ConfigMissing {
            section: "run".into(),
            key: "pair".into(),
        };
        assert_eq!(code_of(&config), format!("{:?}", ExitCode::from(2u8)));

        let data = MacdTraderError::NoData {
            pair: "BTCUSDT".into(),
        };
        assert_eq!(code_of(&data), format!("{:?}", ExitCode::from(3u8)));

        let input = MacdTraderError::InsufficientData { have: 0, need: 1 };
        assert_eq!(code_of(&input), format!("{:?}", ExitCode::from(5u8)));

        let io = MacdTraderError::Io(std::io::Error::other("boom"));
        assert_eq!(code_of(&io), format!("{:?}", ExitCode::from(1u8)));
    }
}
