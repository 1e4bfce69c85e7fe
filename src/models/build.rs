// Snapshot builder: scanned pairs -> record, through the record's field table.

use super::record::Record;
use crate::error::SampleError;
use crate::scanner::ScanItem;

/// Builds a fresh record stamped with `timestamp`.
///
/// Unknown labels are ignored. A repeated label overwrites the earlier value.
/// Value faults on known labels and an exceeded line limit go to `report`.
pub fn build<'a, R: Record>(
    items: impl IntoIterator<Item = ScanItem<'a>>,
    timestamp: i64,
    mut report: impl FnMut(SampleError),
) -> R {
    let mut record = R::default();
    build_into(&mut record, items, timestamp, &mut report);
    record
}

/// Same as [`build`], resetting and filling an existing record.
pub fn build_into<'a, R: Record>(
    record: &mut R,
    items: impl IntoIterator<Item = ScanItem<'a>>,
    timestamp: i64,
    mut report: impl FnMut(SampleError),
) {
    *record = R::default();
    record.set_timestamp(timestamp);
    for item in items {
        match item {
            ScanItem::Pair(pair) => {
                let Some(field) = R::field_by_label(pair.label) else {
                    continue;
                };
                if let Some(fault) = pair.fault {
                    report(SampleError::Parse {
                        kind: R::KIND,
                        label: pair.label_lossy(),
                        fault,
                    });
                }
                (field.set)(record, pair.value);
            }
            ScanItem::LimitExceeded { limit } => {
                report(SampleError::LineLimitExceeded {
                    kind: R::KIND,
                    limit,
                });
            }
        }
    }
}
