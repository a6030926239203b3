/// Kandilli Observatory (KOERI) recent earthquakes listing client.
///
/// The primary feed for the service:
///   http://www.koeri.boun.edu.tr/scripts/lst9.asp
///
/// The listing is a fixed-layout plain-text table inside an HTML `<pre>`
/// block. Everything up to and including the dashed separator line under
/// the column headers is preamble; each following non-blank line is one
/// event. See `fixtures.rs` for an annotated sample.
///
/// Parsing is line-by-line and never fails as a whole: every line yields
/// either a record or a reason it was skipped.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ingest::{not_after, SourceAdapter};
use crate::model::{
    sort_most_recent_first, Coordinate, EarthquakeRecord, FeedError, RecordError, UNKNOWN_LOCATION,
};

pub const KANDILLI_URL: &str = "http://www.koeri.boun.edu.tr/scripts/lst9.asp";

/// Request timeout for the listing, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Marks the end of the column header block.
const SEPARATOR: &str = "-------------";

const MIN_TOKENS: usize = 9;
const DATETIME_FORMAT: &str = "%Y.%m.%d %H:%M:%S";

/// Turkey has been on permanent UTC+03:00 since 2016.
const TURKEY_OFFSET_SECS: i64 = 3 * 3600;

// Token positions
const TOK_DATE: usize = 0;
const TOK_TIME: usize = 1;
const TOK_LAT: usize = 2;
const TOK_LON: usize = 3;
const TOK_DEPTH: usize = 4;
const TOK_ML: usize = 6;

// ---------------------------------------------------------------------------
// Line parsing
// ---------------------------------------------------------------------------

/// Why a candidate line did not produce a record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkipReason {
    #[error("only {0} tokens, need at least 9")]
    TooFewTokens(usize),
    #[error("cannot parse {field} from '{value}'")]
    BadField { field: &'static str, value: String },
    #[error("timestamp {0} is in the future")]
    InFuture(DateTime<Utc>),
    #[error(transparent)]
    InvalidRecord(#[from] RecordError),
}

/// Outcome of parsing one candidate line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Record(EarthquakeRecord),
    Unparseable(SkipReason),
}

/// Everything the parser got out of one listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedListing {
    /// Most-recent-first.
    pub records: Vec<EarthquakeRecord>,
    /// Candidate lines that were dropped.
    pub skipped: usize,
    pub separator_found: bool,
}

fn parse_f64(tokens: &[&str], idx: usize, field: &'static str) -> Result<f64, SkipReason> {
    let raw = tokens[idx];
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SkipReason::BadField {
            field,
            value: raw.to_string(),
        })
}

/// Text between the first `(` and the first `)`, or `"Unknown"`.
///
/// A `(` at the very start of the line does not count, and neither does a
/// `)` that comes before the `(`.
pub fn extract_label(line: &str) -> String {
    match (line.find('('), line.find(')')) {
        (Some(open), Some(close)) if open > 0 && close > open => {
            line[open + 1..close].trim().to_string()
        }
        _ => UNKNOWN_LOCATION.to_string(),
    }
}

fn try_parse_line(
    line: &str,
    reference: Coordinate,
    now: DateTime<Utc>,
) -> Result<EarthquakeRecord, SkipReason> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MIN_TOKENS {
        return Err(SkipReason::TooFewTokens(tokens.len()));
    }

    let stamp = format!("{} {}", tokens[TOK_DATE], tokens[TOK_TIME]);
    let local = NaiveDateTime::parse_from_str(&stamp, DATETIME_FORMAT).map_err(|_| {
        SkipReason::BadField {
            field: "date/time",
            value: stamp.clone(),
        }
    })?;

    let latitude = parse_f64(&tokens, TOK_LAT, "latitude")?;
    let longitude = parse_f64(&tokens, TOK_LON, "longitude")?;
    let depth_km = parse_f64(&tokens, TOK_DEPTH, "depth")?;
    let magnitude = parse_f64(&tokens, TOK_ML, "magnitude")?;

    let occurred_at = DateTime::from_naive_utc_and_offset(
        local - Duration::seconds(TURKEY_OFFSET_SECS),
        Utc,
    );
    let occurred_at = not_after(occurred_at, now).ok_or(SkipReason::InFuture(occurred_at))?;

    let record = EarthquakeRecord::new(
        occurred_at,
        Coordinate::new(latitude, longitude),
        depth_km,
        magnitude,
        extract_label(line),
        reference,
    )?;
    Ok(record)
}

/// Parses one (already trimmed) listing line.
pub fn parse_line(line: &str, reference: Coordinate, now: DateTime<Utc>) -> LineOutcome {
    match try_parse_line(line, reference, now) {
        Ok(record) => LineOutcome::Record(record),
        Err(reason) => LineOutcome::Unparseable(reason),
    }
}

/// Parses a full listing body.
///
/// Lines after the first dashed separator are candidates; if no separator
/// is present every line is a candidate. Blank lines are ignored and do not
/// count as skipped.
pub fn parse_listing(body: &str, reference: Coordinate, now: DateTime<Utc>) -> ParsedListing {
    let lines: Vec<&str> = body.lines().collect();
    let separator = lines.iter().position(|l| l.contains(SEPARATOR));
    let start = separator.map(|i| i + 1).unwrap_or(0);

    let mut parsed = ParsedListing {
        separator_found: separator.is_some(),
        ..ParsedListing::default()
    };

    for line in &lines[start..] {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line, reference, now) {
            LineOutcome::Record(record) => parsed.records.push(record),
            LineOutcome::Unparseable(reason) => {
                debug!(%reason, line, "skipping listing line");
                parsed.skipped += 1;
            }
        }
    }

    sort_most_recent_first(&mut parsed.records);
    parsed
}

// ---------------------------------------------------------------------------
// Adapter
// ---------------------------------------------------------------------------

/// Primary source adapter: one bounded GET per fetch.
pub struct KandilliAdapter {
    client: reqwest::blocking::Client,
    url: String,
    reference: Coordinate,
}

impl KandilliAdapter {
    /// # Errors
    /// `FeedError::Transport` if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout_secs: u64, reference: Coordinate) -> Result<Self, FeedError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
            reference,
        })
    }

    fn try_fetch(&self, now: DateTime<Utc>) -> Result<ParsedListing, FeedError> {
        let response = self.client.get(&self.url).send()?;
        if !response.status().is_success() {
            return Err(FeedError::HttpStatus(response.status().as_u16()));
        }
        let body = response.text()?;
        Ok(parse_listing(&body, self.reference, now))
    }
}

impl SourceAdapter for KandilliAdapter {
    fn name(&self) -> &'static str {
        "kandilli"
    }

    fn fetch(&self, now: DateTime<Utc>) -> Vec<EarthquakeRecord> {
        match self.try_fetch(now) {
            Ok(parsed) => {
                if !parsed.separator_found {
                    warn!(url = %self.url, "Kandilli listing had no separator line");
                }
                info!(
                    records = parsed.records.len(),
                    skipped = parsed.skipped,
                    "fetched Kandilli listing"
                );
                parsed.records
            }
            Err(e) => {
                warn!(error = %e, url = %self.url, "Kandilli fetch failed");
                Vec::new()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
