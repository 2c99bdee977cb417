//! Strategy-versus-baseline comparison.

use std::fmt;

/// Which strategy ended with the larger share of the initial funds, and by
/// how many percentage points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    AlgorithmOutperformed { by: f64 },
    BaselineOutperformed { by: f64 },
    Equal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub initial_funds: f64,
    pub algorithm_final: f64,
    pub baseline_final: f64,
    /// Final value as a percentage of the initial funds.
    pub algorithm_change: f64,
    pub baseline_change: f64,
}

impl Comparison {
    pub fn new(initial_funds: f64, algorithm_final: f64, baseline_final: f64) -> Self {
        Comparison {
            initial_funds,
            algorithm_final,
            baseline_final,
            algorithm_change: percent_of(algorithm_final, initial_funds),
            baseline_change: percent_of(baseline_final, initial_funds),
        }
    }

    pub fn verdict(&self) -> Verdict {
        let diff = self.algorithm_change - self.baseline_change;
        if diff > 0.0 {
            Verdict::AlgorithmOutperformed { by: diff }
        } else if diff < 0.0 {
            Verdict::BaselineOutperformed { by: -diff }
        } else {
            Verdict::Equal
        }
    }
}

fn percent_of(value: f64, initial: f64) -> f64 {
    if initial > 0.0 {
        value / initial * 100.0
    } else {
        0.0
    }
}

/// Format with two decimals and comma thousands separators: 1234567.891 -> "1,234,567.89".
pub fn format_amount(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let initial = format_amount(self.initial_funds);
        writeln!(
            f,
            "In the end, funds invested at the beginning of the value of ${}, are worth ${} \
             after using the algorithm based on the MACD index.",
            initial,
            format_amount(self.algorithm_final)
        )?;
        writeln!(
            f,
            "The change is {}% of the initial value.\n",
            format_amount(self.algorithm_change)
        )?;
        writeln!(
            f,
            "If we simply bought all the coins at the beginning (with ${} for the initial funds) \
             and sold them at the end, the value would be ${}.",
            initial,
            format_amount(self.baseline_final)
        )?;
        writeln!(
            f,
            "The change is {}% of the initial value.\n",
            format_amount(self.baseline_change)
        )?;
        match self.verdict() {
            Verdict::AlgorithmOutperformed { by } => write!(
                f,
                "The algorithm based on the MACD index outperformed the simple algorithm by \
                 {} percentage points of the change.",
                format_amount(by)
            ),
            Verdict::BaselineOutperformed { by } => write!(
                f,
                "The simple algorithm outperformed the algorithm based on the MACD index by \
                 {} percentage points of the change.",
                format_amount(by)
            ),
            Verdict::Equal => write!(
                f,
                "The algorithm based on the MACD index performed equally well as the simple algorithm."
            ),
        }
    }
}
