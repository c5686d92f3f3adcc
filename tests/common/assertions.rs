//! Domain-specific assertion macros for probenorm harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear which result invariant was violated.

use probenorm_core::types::parse_iso8601_millis;
use probenorm_core::{format, ResultEntity};

/// Assert the kinds of a result list, in order.
///
/// ```rust
/// assert_kinds!(entities, [TestKind::Latency, TestKind::PacketLoss]);
/// ```
#[macro_export]
macro_rules! assert_kinds {
    ($entities:expr, [$($kind:expr),* $(,)?]) => {{
        let entities: &[probenorm_core::ResultEntity] = &$entities;
        let actual: Vec<probenorm_core::TestKind> = entities.iter().map(|e| e.kind()).collect();
        let expected: Vec<probenorm_core::TestKind> = vec![$($kind),*];
        pretty_assertions::assert_eq!(actual, expected, "assert_kinds! failed");
    }};
}

/// Assert an entity's human-readable rendering.
#[macro_export]
macro_rules! assert_rendered {
    ($entity:expr, $expected:expr) => {{
        let entity: &probenorm_core::ResultEntity = &$entity;
        let expected: &str = $expected;
        if entity.human_readable() != expected {
            panic!(
                "assert_rendered! failed:\n  kind:     {}\n  value:    {}\n  expected: {:?}\n  actual:   {:?}",
                entity.kind(),
                entity.value(),
                expected,
                entity.human_readable()
            );
        }
    }};
}

/// Assert that an entity's derived fields agree with its primary ones:
/// the ISO timestamp round-trips to `timestamp_millis` and the rendering is
/// a pure function of kind and value.
pub fn assert_entity_consistent(entity: &ResultEntity) {
    assert_eq!(
        parse_iso8601_millis(entity.iso_timestamp()),
        Some(entity.timestamp_millis()),
        "iso timestamp {:?} does not round-trip",
        entity.iso_timestamp()
    );
    assert_eq!(
        entity.human_readable(),
        format::human_readable(entity.kind(), entity.value()),
        "rendering of {} {} is not derived from kind and value",
        entity.kind(),
        entity.value()
    );
}

/// Assert that two entities came from the same record.
pub fn assert_same_record(a: &ResultEntity, b: &ResultEntity) {
    assert_eq!(a.timestamp_millis(), b.timestamp_millis(), "timestamps differ");
    assert_eq!(a.location(), b.location(), "locations differ");
    assert_eq!(a.success(), b.success(), "success flags differ");
}
