// Record trait and the label -> field table every code path goes through.

use chrono::{DateTime, SecondsFormat};
use std::fmt::Write;

/// One entry of a record's field table.
///
/// `id` is the field's wire identity in encoded frames: it is fixed once assigned
/// and never reused for another field. `label` is the exact source label.
pub struct Field<R> {
    pub id: u16,
    pub label: &'static str,
    pub get: fn(&R) -> u64,
    pub set: fn(&mut R, u64),
}

impl<R> Field<R> {
    pub fn matches(&self, label: &[u8]) -> bool {
        self.label.as_bytes() == label
    }
}

/// A fixed-shape snapshot of one data source.
///
/// The field set is closed: labels missing from `FIELDS` are dropped by the
/// builder and never stored.
pub trait Record: Default + Clone + PartialEq + Send + 'static {
    /// Short data-source name used in errors and logs, e.g. `"mem"`.
    const KIND: &'static str;
    /// Frame marker identifying this record type on the wire.
    const MARKER: [u8; 4];
    /// Virtual file the record is normally sampled from.
    const DEFAULT_PATH: &'static str;
    const FIELDS: &'static [Field<Self>];

    /// Nanoseconds since the Unix epoch, UTC.
    fn timestamp(&self) -> i64;
    fn set_timestamp(&mut self, ts: i64);

    fn field_by_label(label: &[u8]) -> Option<&'static Field<Self>> {
        Self::FIELDS.iter().find(|f| f.matches(label))
    }

    fn field_by_id(id: u16) -> Option<&'static Field<Self>> {
        Self::FIELDS.iter().find(|f| f.id == id)
    }
}

/// Human-readable multi-line rendering for diagnostics. Lines follow table order.
pub fn stringify<R: Record>(record: &R) -> String {
    let mut out = String::with_capacity(32 + R::FIELDS.len() * 24);
    let ts = DateTime::from_timestamp_nanos(record.timestamp());
    let _ = writeln!(
        out,
        "Timestamp: {}",
        ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
    );
    for field in R::FIELDS {
        let _ = writeln!(out, "{}:\t{}", field.label, (field.get)(record));
    }
    out
}
