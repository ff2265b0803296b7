//! Display formatting for listing rows.

use crate::listing::{DirectoryEntry, DirectorySnapshot, EntryKind};

/// Shown for a missing or zero modification time.
pub const NEVER: &str = "never";

/// 9999-12-31 23:59:59 UTC. Later timestamps are shown as this.
const MAX_TIMESTAMP: u64 = 253_402_300_799;

/// Format a byte count with decimal units (e.g. "1.5 KB", "3.4 MB").
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1_000 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64 / 1_000.0;
    let mut unit = 0;
    // Step up once rounding to one decimal would print "1000.0"
    while (value * 10.0).round() >= 10_000.0 && unit + 1 < UNITS.len() {
        value /= 1_000.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Format a modification time as `YYYY-MM-DD HH:MM` (UTC), or [`NEVER`].
pub fn format_modified(timestamp: Option<u64>) -> String {
    match timestamp {
        None | Some(0) => NEVER.to_string(),
        Some(ts) => {
            let ts = ts.min(MAX_TIMESTAMP);
            let (hour, min) = ((ts % 86400) / 3600, (ts % 3600) / 60);
            format!("{} {:02}:{:02}", format_date_iso(ts), hour, min)
        }
    }
}

/// Format Unix timestamp as ISO date (YYYY-MM-DD), capped at year 9999.
pub fn format_date_iso(timestamp: u64) -> String {
    let mut remaining_days = (timestamp.min(MAX_TIMESTAMP) / 86400) as i64;
    let mut year = 1970i64;

    loop {
        let days_in_year = if is_leap_year(year) { 366 } else { 365 };
        if remaining_days < days_in_year {
            break;
        }
        remaining_days -= days_in_year;
        year += 1;
    }

    let february = if is_leap_year(year) { 29 } else { 28 };
    let days_in_months: [i64; 12] = [31, february, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

    let mut month = 1;
    for days_in_month in days_in_months {
        if remaining_days < days_in_month {
            break;
        }
        remaining_days -= days_in_month;
        month += 1;
    }

    format!("{:04}-{:02}-{:02}", year, month, remaining_days + 1)
}

fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// One rendered row of the file list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntryRow {
    pub name: String,
    pub kind: EntryKind,
    /// "File" or "Folder"
    pub kind_label: &'static str,
    pub size: String,
    pub modified: String,
}

impl From<&DirectoryEntry> for EntryRow {
    fn from(entry: &DirectoryEntry) -> Self {
        let (kind_label, size) = match entry.kind {
            EntryKind::Directory => ("Folder", "-".to_string()),
            EntryKind::File => ("File", format_size(entry.size.unwrap_or(0))),
        };
        Self {
            name: entry.name.clone(),
            kind: entry.kind,
            kind_label,
            size,
            modified: format_modified(entry.last_modified),
        }
    }
}

/// Rows for a snapshot: folders first, then files, each by name.
pub fn entry_rows(snapshot: &DirectorySnapshot) -> Vec<EntryRow> {
    let mut rows: Vec<EntryRow> = snapshot.entries().map(EntryRow::from).collect();
    rows.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathStack;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(999), "999 B");
        assert_eq!(format_size(1500), "1.5 KB");
        assert_eq!(format_size(1_500_000), "1.5 MB");
        assert_eq!(format_size(2_000_000_000), "2.0 GB");
    }

    #[test]
    fn test_format_size_near_unit_boundary() {
        assert_eq!(format_size(999_949), "999.9 KB");
        assert_eq!(format_size(999_999), "1.0 MB");
        assert_eq!(format_size(999_960_000), "1.0 GB");
        assert_eq!(format_size(999_999_999_999), "1.0 TB");
    }

    #[test]
    fn test_format_modified() {
        assert_eq!(format_modified(None), "never");
        assert_eq!(format_modified(Some(0)), "never");
        // 2024-01-01 00:00:00 UTC
        assert_eq!(format_modified(Some(1704067200)), "2024-01-01 00:00");
        // 2024-02-29 13:45:00 UTC
        assert_eq!(format_modified(Some(1709214300)), "2024-02-29 13:45");
    }

    #[test]
    fn test_far_future_timestamp_is_capped() {
        assert_eq!(format_modified(Some(u64::MAX)), "9999-12-31 23:59");
        assert_eq!(format_date_iso(u64::MAX), "9999-12-31");
        assert_eq!(format_date_iso(MAX_TIMESTAMP), "9999-12-31");
    }

    #[test]
    fn test_snapshot_rows() {
        let snapshot = DirectorySnapshot::new(
            PathStack::root(),
            vec![DirectoryEntry::file("a.txt", 1500, 0)],
            vec![DirectoryEntry::directory("sub")],
        );

        let rows = entry_rows(&snapshot);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].name, "sub");
        assert_eq!(rows[0].kind_label, "Folder");
        assert_eq!(rows[0].size, "-");

        assert_eq!(rows[1].name, "a.txt");
        assert_eq!(rows[1].kind_label, "File");
        assert_eq!(rows[1].size, "1.5 KB");
        assert_eq!(rows[1].modified, "never");
    }

    #[test]
    fn test_rows_sorted_by_kind_then_name() {
        let snapshot = DirectorySnapshot::new(
            PathStack::root(),
            vec![
                DirectoryEntry::file("b.txt", 1, 0),
                DirectoryEntry::file("a.txt", 1, 0),
            ],
            vec![DirectoryEntry::directory("z"), DirectoryEntry::directory("m")],
        );

        let names: Vec<_> = entry_rows(&snapshot).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["m", "z", "a.txt", "b.txt"]);
    }
}
