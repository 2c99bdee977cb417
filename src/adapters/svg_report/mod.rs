//! SVG chart report adapter implementing `ReportPort`.
//!
//! Writes three charts per pair into `<plots_dir>/<pair>/`: the close
//! price, the MACD and signal lines with trade markers, and the portfolio
//! value over time.

pub mod chart;

use std::fs;
use std::path::PathBuf;

use crate::domain::backtest::BacktestResult;
use crate::domain::error::MacdTraderError;
use crate::domain::kline::{close_prices, close_times, Kline};
use crate::ports::report_port::ReportPort;
use chart::{Chart, MarkerShape, Markers, Series, YFormat};

pub const CLOSE_PRICE_FILE: &str = "close_price_plot.svg";
pub const MACD_FILE: &str = "macd_plot.svg";
pub const PORTFOLIO_FILE: &str = "portfolio_plot.svg";

pub struct SvgReportAdapter {
    plots_dir: PathBuf,
}

impl SvgReportAdapter {
    pub fn new(plots_dir: PathBuf) -> Self {
        Self { plots_dir }
    }
}

pub fn close_price_chart(pair: &str, klines: &[Kline]) -> String {
    let times = close_times(klines);
    Chart {
        title: format!("Close Price Of The {} Over Time", pair),
        x_label: "Time",
        y_label: "Price",
        y_format: YFormat::Dollars,
        times: &times,
        series: vec![Series::dense(
            "Close Price",
            "cornflowerblue",
            &close_prices(klines),
        )],
        markers: Vec::new(),
    }
    .render()
}

pub fn macd_chart(pair: &str, klines: &[Kline], result: &BacktestResult) -> String {
    let times = close_times(klines);
    let line = &result.indicator.line;
    let at = |indices: &[usize]| -> Vec<(usize, f64)> {
        indices
            .iter()
            .filter_map(|&i| line.get(i).map(|&v| (i, v)))
            .collect()
    };

    Chart {
        title: format!("MACD Indicator For The {} Over Time", pair),
        x_label: "Time",
        y_label: "MACD Value",
        y_format: YFormat::Plain,
        times: &times,
        series: vec![
            Series::dense("MACD Line", "mediumorchid", line),
            Series::new("Signal Line", "dodgerblue", result.indicator.signal.clone()),
        ],
        markers: vec![
            Markers {
                label: "Buy".into(),
                color: "olivedrab",
                shape: MarkerShape::TriangleUp,
                points: at(&result.simulation.buy_indices),
            },
            Markers {
                label: "Sell".into(),
                color: "red",
                shape: MarkerShape::TriangleDown,
                points: at(&result.simulation.sell_indices),
            },
        ],
    }
    .render()
}

pub fn portfolio_chart(pair: &str, klines: &[Kline], result: &BacktestResult) -> String {
    let times = close_times(klines);
    Chart {
        title: format!(
            "Portfolio Value Over Time While Investing In The {} Using Algorithm Based On The MACD",
            pair
        ),
        x_label: "Time",
        y_label: "Portfolio Value",
        y_format: YFormat::Dollars,
        times: &times,
        series: vec![Series::dense(
            "Total Value Of Portfolio",
            "mediumorchid",
            &result.simulation.portfolio_values,
        )],
        markers: Vec::new(),
    }
    .render()
}

impl ReportPort for SvgReportAdapter {
    fn write(
        &self,
        pair: &str,
        klines: &[Kline],
        result: &BacktestResult,
    ) -> Result<Vec<PathBuf>, MacdTraderError> {
        let dir = self.plots_dir.join(pair);
        fs::create_dir_all(&dir)?;

        let charts = [
            (CLOSE_PRICE_FILE, close_price_chart(pair, klines)),
            (MACD_FILE, macd_chart(pair, klines, result)),
            (PORTFOLIO_FILE, portfolio_chart(pair, klines, result)),
        ];

        let mut written = Vec::with_capacity(charts.len());
        for (name, svg) in charts {
            let path = dir.join(name);
            fs::write(&path, svg)?;
            tracing::debug!(path = %path.display(), "wrote chart");
            written.push(path);
        }
        Ok(written)
    }
}
