//! Export — serializes [`ResultEntity`] values at the storage boundary.
//!
//! The wire object mirrors the `test_result` table the results are written
//! into:
//!
//! | key               | value                                             |
//! |-------------------|---------------------------------------------------|
//! | `type`            | `"test"`, `"passivemetric"`, or the kind id       |
//! | `type_name`       | kind name                                         |
//! | `testnumber`      | kind id (scheduled tests only)                    |
//! | `status_complete` | `100` (scheduled tests only)                      |
//! | `dtime`           | epoch milliseconds                                |
//! | `datetime`        | ISO-8601 of `dtime`                               |
//! | `location`        | resolved location                                 |
//! | `result`          | value in the kind's canonical unit                |
//! | `success`         | `1` / `0`                                         |
//! | `hrresult`        | human-readable rendering of `result`              |

use serde::Serialize;
use std::io::Write;

use crate::types::{Provenance, ResultEntity};

#[derive(Debug, Serialize)]
struct WireResult<'a> {
    #[serde(rename = "type")]
    kind: serde_json::Value,
    type_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    testnumber: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_complete: Option<u8>,
    dtime: i64,
    datetime: &'a str,
    location: &'a str,
    result: f64,
    success: u8,
    hrresult: &'a str,
}

impl<'a> From<&'a ResultEntity> for WireResult<'a> {
    fn from(e: &'a ResultEntity) -> Self {
        let (kind, testnumber, status_complete) = match e.provenance() {
            Provenance::ScheduledTest {
                test_number,
                status_complete,
            } => ("test".into(), Some(test_number), Some(status_complete)),
            Provenance::PassiveMetric => ("passivemetric".into(), None, None),
            Provenance::Unspecified => (e.kind().id().into(), None, None),
        };
        Self {
            kind,
            type_name: e.kind().name(),
            testnumber,
            status_complete,
            dtime: e.timestamp_millis(),
            datetime: e.iso_timestamp(),
            location: e.location(),
            result: e.value(),
            success: e.success().as_flag(),
            hrresult: e.human_readable(),
        }
    }
}

/// The wire object for one entity.
pub fn to_json(entity: &ResultEntity) -> serde_json::Value {
    // Serializing a struct of plain fields into a `Value` cannot fail.
    serde_json::to_value(WireResult::from(entity)).unwrap_or_default()
}

/// Write one JSON object per line.
pub fn write_jsonl<W: Write>(mut out: W, entities: &[ResultEntity]) -> anyhow::Result<()> {
    for entity in entities {
        serde_json::to_writer(&mut out, &WireResult::from(entity))?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Render entities as JSON lines into a string.
pub fn to_jsonl(entities: &[ResultEntity]) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    write_jsonl(&mut buf, entities)?;
    Ok(String::from_utf8(buf)?)
}

/// Plain-text table, one entity per line, tab separated.
pub fn to_text(entities: &[ResultEntity]) -> String {
    entities
        .iter()
        .map(|e| {
            format!(
                "{}\t{}\t{}\t{}\t{}\n",
                e.iso_timestamp(),
                e.kind(),
                e.location(),
                if e.success().is_ok() { "OK" } else { "FAILED" },
                e.human_readable()
            )
        })
        .collect()
}
