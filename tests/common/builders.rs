//! Test builders — ergonomic constructors for raw probe records and alias
//! tables.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use probenorm_core::config::HostAliases;
use probenorm_core::{normalize_record, AliasLookup, Normalized, ResultEntity};

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for a `;`-delimited probe record.
///
/// Unset positions are filled with `0` so the record always has the full
/// width its shape needs.
///
/// # Example
///
/// ```rust
/// let line = RecordBuilder::latency()
///     .epoch(1364383801)
///     .target("n1-london.example.net")
///     .latency_micros(25400)
///     .counters(8, 2)
///     .build();
/// ```
pub struct RecordBuilder {
    fields: Vec<String>,
}

impl RecordBuilder {
    fn with_tag(tag: &str, width: usize) -> Self {
        let mut fields = vec!["0".to_string(); width];
        fields[0] = tag.to_string();
        fields[1] = EPOCH.to_string();
        fields[2] = "OK".to_string();
        fields[3] = "n1-london.example.net".to_string();
        Self { fields }
    }

    /// A throughput record for any of the four HTTP tags.
    pub fn throughput(tag: &str) -> Self {
        Self::with_tag(tag, 10)
    }

    pub fn latency() -> Self {
        Self::with_tag("JUDPLATENCY", 12)
    }

    pub fn jitter() -> Self {
        Self::with_tag("JUDPJITTER", 13)
    }

    pub fn epoch(self, secs: i64) -> Self {
        self.field(1, secs)
    }

    pub fn status(self, status: &str) -> Self {
        self.field(2, status)
    }

    pub fn target(self, target: &str) -> Self {
        self.field(3, target)
    }

    pub fn bytes_per_sec(self, rate: impl ToString) -> Self {
        self.field(7, rate)
    }

    pub fn latency_micros(self, us: impl ToString) -> Self {
        self.field(5, us)
    }

    pub fn counters(self, received: u64, lost: u64) -> Self {
        self.field(9, received).field(10, lost)
    }

    pub fn jitter_micros(self, us: impl ToString) -> Self {
        self.field(12, us)
    }

    /// Overwrite any position, growing the record if needed.
    pub fn field(mut self, index: usize, value: impl ToString) -> Self {
        if index >= self.fields.len() {
            self.fields.resize(index + 1, "0".to_string());
        }
        self.fields[index] = value.to_string();
        self
    }

    /// Drop every field from `len` onwards.
    pub fn truncate(mut self, len: usize) -> Self {
        self.fields.truncate(len);
        self
    }

    pub fn build(self) -> String {
        self.fields.join(";")
    }
}

/// Default epoch used by [`RecordBuilder`]: 2013-03-27T11:29:56Z.
pub const EPOCH: i64 = 1_364_383_796;

// ---------------------------------------------------------------------------
// Convenience helpers
// ---------------------------------------------------------------------------

/// Alias table from `(target, location)` pairs.
pub fn aliases(pairs: &[(&str, &str)]) -> HostAliases {
    pairs
        .iter()
        .map(|(t, l)| (t.to_string(), l.to_string()))
        .collect()
}

/// Normalize one `;`-delimited record, panicking on error or stop.
pub fn entities_of(line: &str, aliases: &dyn AliasLookup) -> Vec<ResultEntity> {
    let fields: Vec<&str> = line.split(';').collect();
    match normalize_record(&fields, aliases) {
        Ok(Normalized::Entities(entities)) => entities,
        Ok(Normalized::Stop) => panic!("record unexpectedly stopped processing: {line:?}"),
        Err(err) => panic!("record failed to normalize: {err}\n  line: {line:?}"),
    }
}
