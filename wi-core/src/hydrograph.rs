//! Hydrograph records and the uploaded hydrograph file format.
//!
//! An uploaded hydrograph is plain text with one `time,flow` record per
//! line and no header:
//!
//! ```text
//! 0,12.5
//! 1,13.0
//! 2,11.8
//! ```
//!
//! `time` is an integer number of hours since an arbitrary origin and
//! `flow` is a rate in cfs. Only the first two fields of a line are read.

use csv::{ReaderBuilder, StringRecord, Terminator, Trim};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The hydrograph attached to a well. `well_id` is `None` until assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hydrograph {
    pub id: i64,
    pub well_id: Option<i64>,
}

/// One (time, flow) observation of a hydrograph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HydrographPoint {
    /// Hours since the hydrograph origin
    pub time: i64,
    /// Flow rate in cfs
    pub flow: f64,
}

/// Points recovered from an uploaded file plus the number of lines dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedHydrograph {
    pub points: Vec<HydrographPoint>,
    pub lines_skipped: usize,
}

impl ParsedHydrograph {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum HydrographFileError {
    #[error("hydrograph file is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),
}

/// Parse an uploaded hydrograph file.
///
/// The payload must be UTF-8. Lines with fewer than two fields, a time
/// that is not an integer or a flow that is not a finite number are
/// skipped and counted. Empty and whitespace-only lines are ignored and
/// not counted. Quotes have no meaning.
pub fn parse_hydrograph(payload: &[u8]) -> Result<ParsedHydrograph, HydrographFileError> {
    let text = std::str::from_utf8(payload)?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .terminator(Terminator::CRLF)
        .from_reader(text.as_bytes());

    let mut parsed = ParsedHydrograph::default();
    for result in rdr.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::debug!("hydrograph: unreadable record: {}", e);
                parsed.lines_skipped += 1;
                continue;
            }
        };
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        match parse_point(&record) {
            Some(point) => parsed.points.push(point),
            None => {
                let line = record.position().map_or(0, |p| p.line());
                log::debug!("hydrograph: skipping malformed line {}", line);
                parsed.lines_skipped += 1;
            }
        }
    }
    Ok(parsed)
}

fn parse_point(record: &StringRecord) -> Option<HydrographPoint> {
    let time: i64 = record.get(0)?.parse().ok()?;
    let flow: f64 = record.get(1)?.parse().ok()?;
    if !flow.is_finite() {
        return None;
    }
    Some(HydrographPoint { time, flow })
}
