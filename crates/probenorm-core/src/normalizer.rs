//! Normalizer — turns raw probe output into [`ResultEntity`] values.
//!
//! The pipeline runs strictly forward, one record at a time:
//!
//! ```text
//! blob ──split──► record ──split──► fields ──classify──► extract ──resolve──► entities
//! ```
//!
//! Field positions are fixed per probe shape (field 0 is always the tag):
//!
//! | Shape      | epoch s | status | target | value          | counters              |
//! |------------|---------|--------|--------|----------------|-----------------------|
//! | throughput | 1       | 2      | 3      | 7 (bytes/s)    |                       |
//! | latency    | 1       | 2      | 3      | 5 (µs)         | 9 received, 10 lost   |
//! | jitter     | 1       | 2      | 3      | 12 (µs)        |                       |

use std::str::FromStr;

use crate::config::ParserConfig;
use crate::error::{BatchError, RecordError};
use crate::location::{resolve_location, AliasLookup};
use crate::probe::{ProbeTag, Route, Shape};
use crate::types::{ResultEntity, Success, TestKind};

const FIELD_EPOCH_SECS: usize = 1;
const FIELD_STATUS: usize = 2;
const FIELD_TARGET: usize = 3;
const FIELD_THROUGHPUT_BYTES: usize = 7;
const FIELD_LATENCY_MICROS: usize = 5;
const FIELD_RECEIVED: usize = 9;
const FIELD_LOST: usize = 10;
const FIELD_JITTER_MICROS: usize = 12;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Result of normalizing one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// Zero or more results. Telemetry and unrecognised records yield none.
    Entities(Vec<ResultEntity>),
    /// A closest-target record: nothing after it should be processed.
    Stop,
}

/// A record the batch driver skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct DroppedRecord {
    /// Position of the record in the split output (blank records count).
    pub index: usize,
    pub raw: String,
    pub reason: DropReason,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropReason {
    UnknownTag(String),
    Malformed(RecordError),
}

/// Everything produced from one blob of probe output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    /// Results in input order; a latency record contributes latency then
    /// packet loss.
    pub entities: Vec<ResultEntity>,
    /// A closest-target record ended processing early.
    pub stopped: bool,
    pub dropped: Vec<DroppedRecord>,
}

/// Separators and failure policy for [`normalize_output`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub record_separator: String,
    pub field_separator: String,
    pub strict: bool,
}

impl Default for Options {
    fn default() -> Self {
        ParserConfig::default().into()
    }
}

impl From<ParserConfig> for Options {
    fn from(cfg: ParserConfig) -> Self {
        Self {
            record_separator: cfg.record_separator,
            field_separator: cfg.field_separator,
            strict: cfg.strict,
        }
    }
}

// ---------------------------------------------------------------------------
// Line splitting
// ---------------------------------------------------------------------------

/// Split a blob into records. Empty input yields no records.
pub fn split_records<'a>(blob: &'a str, separator: &str) -> Vec<&'a str> {
    if blob.is_empty() {
        return Vec::new();
    }
    if separator.is_empty() {
        return vec![blob];
    }
    blob.split(separator).collect()
}

/// Split one record into its positional fields.
pub fn split_fields<'a>(record: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return vec![record];
    }
    record.split(separator).collect()
}

// ---------------------------------------------------------------------------
// Record normalization
// ---------------------------------------------------------------------------

/// Classify and extract a single record already split into fields.
///
/// Unrecognised tags are reported through `tracing` and yield no entities;
/// only malformed test records return an error.
pub fn normalize_record(
    fields: &[&str],
    aliases: &dyn AliasLookup,
) -> Result<Normalized, RecordError> {
    let raw_tag = fields.first().copied().unwrap_or_default();
    let tag = ProbeTag::classify(raw_tag);

    let entities = match tag.route() {
        Route::Discard => {
            tracing::debug!(tag = raw_tag, "telemetry record discarded");
            Vec::new()
        }
        Route::Stop => {
            tracing::debug!("closest-target record, stopping");
            return Ok(Normalized::Stop);
        }
        Route::Reject => {
            tracing::error!(tag = raw_tag, "unrecognised probe record tag");
            Vec::new()
        }
        Route::Extract(shape) => {
            let record = Record::new(tag, fields);
            match shape {
                Shape::Throughput(kind) => vec![extract_throughput(kind, &record, aliases)?],
                Shape::Latency => Vec::from(extract_latency(&record, aliases)?),
                Shape::Jitter => vec![extract_jitter(&record, aliases)?],
            }
        }
    };
    Ok(Normalized::Entities(entities))
}

/// Normalize a whole blob of probe output.
///
/// Blank records are skipped. In lenient mode a malformed record is dropped
/// and recorded in [`Batch::dropped`]; in strict mode it fails the batch.
pub fn normalize_output(
    blob: &str,
    options: &Options,
    aliases: &dyn AliasLookup,
) -> Result<Batch, BatchError> {
    let mut batch = Batch::default();

    for (index, record) in split_records(blob, &options.record_separator)
        .into_iter()
        .enumerate()
    {
        let record = record.trim();
        if record.is_empty() {
            continue;
        }
        let fields = split_fields(record, &options.field_separator);
        let tag = fields.first().copied().unwrap_or_default();

        match normalize_record(&fields, aliases) {
            Ok(Normalized::Stop) => {
                batch.stopped = true;
                break;
            }
            Ok(Normalized::Entities(entities)) => {
                if ProbeTag::classify(tag) == ProbeTag::Unknown {
                    batch.dropped.push(DroppedRecord {
                        index,
                        raw: record.to_string(),
                        reason: DropReason::UnknownTag(tag.to_string()),
                    });
                }
                batch.entities.extend(entities);
            }
            Err(source) if options.strict => return Err(BatchError { index, source }),
            Err(err) => {
                tracing::warn!(index, error = %err, "dropping malformed probe record");
                batch.dropped.push(DroppedRecord {
                    index,
                    raw: record.to_string(),
                    reason: DropReason::Malformed(err),
                });
            }
        }
    }

    tracing::debug!(
        entities = batch.entities.len(),
        dropped = batch.dropped.len(),
        stopped = batch.stopped,
        "probe output normalized"
    );
    Ok(batch)
}

// ---------------------------------------------------------------------------
// Extractors
// ---------------------------------------------------------------------------

/// Positional view over a record's fields with typed accessors.
struct Record<'a> {
    tag: &'static str,
    fields: &'a [&'a str],
}

impl<'a> Record<'a> {
    fn new(tag: ProbeTag, fields: &'a [&'a str]) -> Self {
        Self {
            tag: tag.as_str().unwrap_or_default(),
            fields,
        }
    }

    /// The field exactly as it appears in the record.
    fn text(&self, index: usize, field: &'static str) -> Result<&'a str, RecordError> {
        self.fields.get(index).copied().ok_or(RecordError::MissingField {
                tag: self.tag,
                field,
                index,
                len: self.fields.len(),
            })
    }

    fn number<T: FromStr>(&self, index: usize, field: &'static str) -> Result<T, RecordError> {
        let raw = self.text(index, field)?;
        raw.trim().parse().map_err(|_| RecordError::InvalidNumber {
            tag: self.tag,
            field,
            index,
            raw: raw.to_string(),
        })
    }

    /// Epoch seconds → epoch milliseconds.
    fn timestamp_millis(&self) -> Result<i64, RecordError> {
        let secs: i64 = self.number(FIELD_EPOCH_SECS, "epoch seconds")?;
        secs.checked_mul(1000)
            .ok_or(RecordError::TimestampOutOfRange(secs.saturating_mul(1000)))
    }

    fn success(&self) -> Result<Success, RecordError> {
        self.text(FIELD_STATUS, "status").map(Success::from_marker)
    }

    fn location(&self, aliases: &dyn AliasLookup) -> Result<String, RecordError> {
        self.text(FIELD_TARGET, "target")
            .map(|target| resolve_location(target, aliases))
    }
}

/// Download/upload: bytes per second in field 7, reported as bits per second.
fn extract_throughput(
    kind: TestKind,
    record: &Record<'_>,
    aliases: &dyn AliasLookup,
) -> Result<ResultEntity, RecordError> {
    let dtime = record.timestamp_millis()?;
    let success = record.success()?;
    let location = record.location(aliases)?;
    let bytes_per_sec: f64 = record.number(FIELD_THROUGHPUT_BYTES, "bytes/sec")?;

    let entity = ResultEntity::new(kind, dtime, location, success, bytes_per_sec * 8.0)?;
    Ok(entity.scheduled_test())
}

/// Latency record: one latency result and one packet-loss result derived
/// from the received/lost counters.
fn extract_latency(
    record: &Record<'_>,
    aliases: &dyn AliasLookup,
) -> Result<[ResultEntity; 2], RecordError> {
    let dtime = record.timestamp_millis()?;
    let success = record.success()?;
    let location = record.location(aliases)?;
    let latency_us: f64 = record.number(FIELD_LATENCY_MICROS, "latency")?;
    // Packet counters are never negative; a negative count is malformed.
    let received: u64 = record.number(FIELD_RECEIVED, "received")?;
    let lost: u64 = record.number(FIELD_LOST, "lost")?;

    let latency = ResultEntity::new(
        TestKind::Latency,
        dtime,
        location.clone(),
        success,
        latency_us,
    )?
    .scheduled_test();
    let loss = ResultEntity::new(
        TestKind::PacketLoss,
        dtime,
        location,
        success,
        packet_loss_percent(received, lost),
    )?
    .scheduled_test();

    Ok([latency, loss])
}

/// Jitter: microseconds in field 12.
fn extract_jitter(
    record: &Record<'_>,
    aliases: &dyn AliasLookup,
) -> Result<ResultEntity, RecordError> {
    let dtime = record.timestamp_millis()?;
    let success = record.success()?;
    let location = record.location(aliases)?;
    let jitter_us: f64 = record.number(FIELD_JITTER_MICROS, "jitter")?;

    let entity = ResultEntity::new(TestKind::Jitter, dtime, location, success, jitter_us)?;
    Ok(entity.scheduled_test())
}

/// `100 × lost / (received + lost)`, or `0.0` when nothing was sent.
pub fn packet_loss_percent(received: u64, lost: u64) -> f64 {
    let sent = received.saturating_add(lost);
    if sent == 0 {
        return 0.0;
    }
    100.0 * lost as f64 / sent as f64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
