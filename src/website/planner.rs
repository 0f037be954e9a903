use super::entry::IndexEntry;
use chrono::NaiveDate;

/// Computes where a new entry dated `new_date` belongs in `existing`, which is
/// ordered newest-first on disk. The insertion point is the first entry whose
/// date is strictly older than `new_date`; with no such entry the new one is
/// appended. Entries without a recovered date are skipped for comparison but
/// still advance the insertion point, so they are never displaced relative to
/// each other. An exact date tie places the new entry after the existing one.
pub fn insertion_index(existing: &[IndexEntry], new_date: NaiveDate) -> usize {
    let mut position = 0;
    for (index, entry) in existing.iter().enumerate() {
        if let Some(entry_date) = entry.date {
            if new_date > entry_date {
                return index;
            }
        }
        position = index + 1;
    }
    position
}
