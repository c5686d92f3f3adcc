//! Core types for probenorm-core.
//!
//! This module defines the normalised [`ResultEntity`], the closed
//! [`TestKind`] enumeration it is keyed by, and the two small value types
//! ([`Success`], [`Provenance`]) that replace the stringly-typed flags found
//! in raw probe output.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;
use std::str::FromStr;

use crate::error::RecordError;
use crate::format;
use crate::probe::ProbeTag;

// ---------------------------------------------------------------------------
// TestKind
// ---------------------------------------------------------------------------

/// The kind of measurement a [`ResultEntity`] carries.
///
/// Ids and names are stable: they are what downstream storage keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TestKind {
    Download,
    Upload,
    Latency,
    PacketLoss,
    Jitter,
}

impl TestKind {
    /// Every kind, in id order.
    pub const ALL: [TestKind; 5] = [
        TestKind::Download,
        TestKind::Upload,
        TestKind::Latency,
        TestKind::PacketLoss,
        TestKind::Jitter,
    ];

    pub fn id(self) -> i32 {
        match self {
            TestKind::Download => 0,
            TestKind::Upload => 1,
            TestKind::Latency => 2,
            TestKind::PacketLoss => 3,
            TestKind::Jitter => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TestKind::Download => "download",
            TestKind::Upload => "upload",
            TestKind::Latency => "latency",
            TestKind::PacketLoss => "packetloss",
            TestKind::Jitter => "jitter",
        }
    }

    /// Look a kind up by its numeric id.
    pub fn from_id(id: i32) -> Result<Self, UnknownTestKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == id)
            .ok_or_else(|| UnknownTestKind(id.to_string()))
    }

    /// The probe tag whose records produce this kind.
    ///
    /// Download and upload each have a single-stream and a multi-thread
    /// probe variant; the single-stream tag is returned. Packet loss is
    /// derived from the latency probe.
    pub fn probe_tag(self) -> ProbeTag {
        match self {
            TestKind::Download => ProbeTag::HttpGet,
            TestKind::Upload => ProbeTag::HttpPost,
            TestKind::Latency | TestKind::PacketLoss => ProbeTag::UdpLatency,
            TestKind::Jitter => ProbeTag::UdpJitter,
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TestKind {
    type Err = UnknownTestKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownTestKind(s.to_string()))
    }
}

/// Returned when a string or id names no [`TestKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown test kind: {0:?}")]
pub struct UnknownTestKind(pub String);

// ---------------------------------------------------------------------------
// Success / Provenance
// ---------------------------------------------------------------------------

/// Outcome flag reported by the probe. Only the literal marker `OK` counts
/// as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Success {
    Ok,
    Failed,
}

impl Success {
    pub const MARKER: &'static str = "OK";

    pub fn from_marker(marker: &str) -> Self {
        if marker == Self::MARKER {
            Success::Ok
        } else {
            Success::Failed
        }
    }

    pub fn is_ok(self) -> bool {
        self == Success::Ok
    }

    /// `1` for success, `0` for failure.
    pub fn as_flag(self) -> u8 {
        match self {
            Success::Ok => 1,
            Success::Failed => 0,
        }
    }
}

/// Where a result came from. Scheduled tests carry their test number and a
/// completion marker; passive metrics carry neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Provenance {
    #[default]
    Unspecified,
    ScheduledTest {
        test_number: i32,
        status_complete: u8,
    },
    PassiveMetric,
}

/// Completion marker stamped on every entity produced from a finished test.
pub const STATUS_COMPLETE: u8 = 100;

// ---------------------------------------------------------------------------
// ResultEntity
// ---------------------------------------------------------------------------

/// A normalised test result.
///
/// Constructed once through [`ResultEntity::new`]; the ISO timestamp and the
/// human-readable rendering are computed at construction and never change,
/// so they always agree with `timestamp_millis` and `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultEntity {
    kind: TestKind,
    timestamp: DateTime<Utc>,
    timestamp_millis: i64,
    iso_timestamp: String,
    location: String,
    success: Success,
    value: f64,
    human_readable: String,
    provenance: Provenance,
}

impl ResultEntity {
    /// Build an entity from fully-resolved inputs.
    ///
    /// Fails if the timestamp is outside the range chrono can represent or
    /// if `value` is NaN or infinite.
    pub fn new(
        kind: TestKind,
        timestamp_millis: i64,
        location: impl Into<String>,
        success: Success,
        value: f64,
    ) -> Result<Self, RecordError> {
        if !value.is_finite() {
            return Err(RecordError::NonFiniteValue { kind, value });
        }
        let ts = DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
            .ok_or(RecordError::TimestampOutOfRange(timestamp_millis))?;

        Ok(Self {
            kind,
            timestamp: ts,
            timestamp_millis,
            iso_timestamp: iso8601(ts),
            location: location.into(),
            success,
            value,
            human_readable: format::human_readable(kind, value),
            provenance: Provenance::Unspecified,
        })
    }

    /// Mark this entity as the output of a completed scheduled test.
    pub fn scheduled_test(self) -> Self {
        let test_number = self.kind.id();
        Self {
            provenance: Provenance::ScheduledTest {
                test_number,
                status_complete: STATUS_COMPLETE,
            },
            ..self
        }
    }

    /// Mark this entity as a passively collected metric.
    pub fn passive_metric(self) -> Self {
        Self {
            provenance: Provenance::PassiveMetric,
            ..self
        }
    }

    pub fn kind(&self) -> TestKind {
        self.kind
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp_millis
    }

    pub fn iso_timestamp(&self) -> &str {
        &self.iso_timestamp
    }

    /// The timestamp as a chrono value.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn success(&self) -> Success {
        self.success
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn human_readable(&self) -> &str {
        &self.human_readable
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }
}

/// ISO-8601 rendering used for `iso_timestamp`: UTC, millisecond precision.
pub fn iso8601(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an ISO-8601 timestamp back to epoch milliseconds.
pub fn parse_iso8601_millis(s: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|ts| ts.timestamp_millis())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
