//! Binance kline CSV data adapter.
//!
//! Layout: `<base_path>/<pair>/*.csv`, one file per period as published in
//! the Binance public data dumps. Files are headerless with 12 columns;
//! times are epoch milliseconds.
//!
//! With an archive directory set, every `<archive_path>/<pair>/*.zip` is
//! unpacked into `<base_path>/<pair>/` before the CSV files are read.

use crate::domain::error::MacdTraderError;
use crate::domain::kline::Kline;
use crate::ports::data_port::DataPort;
use chrono::{DateTime, NaiveDateTime};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

pub struct BinanceCsvAdapter {
    base_path: PathBuf,
    archive_path: Option<PathBuf>,
}

impl BinanceCsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            base_path,
            archive_path: None,
        }
    }

    /// Unpack `<archive_path>/<pair>/*.zip` on each fetch.
    pub fn with_archives(mut self, archive_path: PathBuf) -> Self {
        self.archive_path = Some(archive_path);
        self
    }

    fn pair_dir(&self, pair: &str) -> PathBuf {
        self.base_path.join(pair)
    }

    /// Extract every archive for `pair`. A pair without an archive
    /// directory is left alone so pre-extracted data still loads.
    pub fn extract_archives(&self, pair: &str) -> Result<usize, MacdTraderError> {
        let Some(archive_path) = &self.archive_path else {
            return Ok(0);
        };
        let source = archive_path.join(pair);
        if !source.is_dir() {
            tracing::debug!(dir = %source.display(), "no archive directory");
            return Ok(0);
        }

        let archives = Self::sorted_files(&source, "zip")?;
        let dest = self.pair_dir(pair);
        fs::create_dir_all(&dest)?;
        for path in &archives {
            let file = File::open(path)?;
            let mut archive = ZipArchive::new(file).map_err(|e| MacdTraderError::Data {
                reason: format!("failed to open archive {}: {}", path.display(), e),
            })?;
            archive.extract(&dest).map_err(|e| MacdTraderError::Data {
                reason: format!("failed to extract {}: {}", path.display(), e),
            })?;
            tracing::debug!(archive = %path.display(), entries = archive.len(), "extracted");
        }
        Ok(archives.len())
    }

    /// Files in `dir` with the given extension, sorted by file name.
    fn sorted_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, MacdTraderError> {
        let entries = fs::read_dir(dir).map_err(|e| MacdTraderError::Data {
            reason: format!("failed to read directory {}: {}", dir.display(), e),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| MacdTraderError::Data {
                reason: format!("directory entry error: {}", e),
            })?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }

    fn read_file(path: &Path) -> Result<Vec<Kline>, MacdTraderError> {
        let content = fs::read_to_string(path).map_err(|e| MacdTraderError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(content.as_bytes());
        let mut klines = Vec::new();

        for (line, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| MacdTraderError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            // Newer dumps carry a header row.
            if line == 0 && record.get(0).is_some_and(|f| f.trim() == "open_time") {
                continue;
            }

            let row = Row {
                record: &record,
                path,
                line: line + 1,
            };
            klines.push(Kline {
                open_time: row.time(0, "open_time")?,
                open: row.number(1, "open")?,
                high: row.number(2, "high")?,
                low: row.number(3, "low")?,
                close: row.number(4, "close")?,
                volume: row.number(5, "volume")?,
                close_time: row.time(6, "close_time")?,
                quote_volume: row.number(7, "quote_volume")?,
                count: row.number(8, "count")?,
                taker_buy_volume: row.number(9, "taker_buy_volume")?,
                taker_buy_quote_volume: row.number(10, "taker_buy_quote_volume")?,
            });
        }

        Ok(klines)
    }
}

struct Row<'a> {
    record: &'a csv::StringRecord,
    path: &'a Path,
    line: usize,
}

impl Row<'_> {
    fn field(&self, index: usize, name: &str) -> Result<&str, MacdTraderError> {
        self.record
            .get(index)
            .map(str::trim)
            .ok_or_else(|| MacdTraderError::Data {
                reason: format!(
                    "{} line {}: missing {} column",
                    self.path.display(),
                    self.line,
                    name
                ),
            })
    }

    fn number<T: std::str::FromStr>(&self, index: usize, name: &str) -> Result<T, MacdTraderError>
    where
        T::Err: std::fmt::Display,
    {
        let raw = self.field(index, name)?;
        raw.parse().map_err(|e| MacdTraderError::Data {
            reason: format!(
                "{} line {}: invalid {} value {:?}: {}",
                self.path.display(),
                self.line,
                name,
                raw,
                e
            ),
        })
    }

    fn time(&self, index: usize, name: &str) -> Result<NaiveDateTime, MacdTraderError> {
        let millis: i64 = self.number(index, name)?;
        DateTime::from_timestamp_millis(millis)
            .map(|dt| dt.naive_utc())
            .ok_or_else(|| MacdTraderError::Data {
                reason: format!(
                    "{} line {}: {} out of range: {}",
                    self.path.display(),
                    self.line,
                    name,
                    millis
                ),
            })
    }
}

impl DataPort for BinanceCsvAdapter {
    fn fetch_klines(&self, pair: &str) -> Result<Vec<Kline>, MacdTraderError> {
        let extracted = self.extract_archives(pair)?;
        if extracted > 0 {
            tracing::info!(pair, archives = extracted, "extracted kline archives");
        }

        let dir = self.pair_dir(pair);
        let files = Self::sorted_files(&dir, "csv")?;
        if files.is_empty() {
            return Err(MacdTraderError::NoData {
                pair: pair.to_string(),
            });
        }

        let mut klines = Vec::new();
        for file in &files {
            let chunk = Self::read_file(file)?;
            tracing::debug!(file = %file.display(), rows = chunk.len(), "read kline file");
            klines.extend(chunk);
        }

        if klines.is_empty() {
            return Err(MacdTraderError::NoData {
                pair: pair.to_string(),
            });
        }
        Ok(klines)
    }

    fn list_pairs(&self) -> Result<Vec<String>, MacdTraderError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| MacdTraderError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut pairs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| MacdTraderError::Data {
                reason: format!("directory entry error: {}", e),
            })?;
            if entry.path().is_dir() {
                pairs.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        pairs.sort();
        Ok(pairs)
    }
}
