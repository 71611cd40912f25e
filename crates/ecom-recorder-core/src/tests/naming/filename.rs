use crate::{TIMESTAMP_FORMAT, file_name, timestamp_name};

use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};

/// WHAT: Timestamp names carry millisecond precision
/// WHY: Back-to-back segments must not collide on their temporary name
#[test]
#[allow(clippy::unwrap_used)]
fn given_fixed_time_when_timestamp_name_then_millisecond_format() {
    // Given: A fixed instant with 7 milliseconds
    let now = NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_milli_opt(8, 5, 3, 7)
        .unwrap()
        .and_utc();

    // When: Formatting the name
    let name = timestamp_name(&now);

    // Then: All fields are zero padded
    assert_eq!(name, "2024-03-09-08-05-03-007");
}

/// WHAT: The name uses the wall clock of the supplied zone
/// WHY: Operators read file names in station local time
#[test]
#[allow(clippy::unwrap_used)]
fn given_offset_time_when_timestamp_name_then_local_fields_used() {
    // Given: 23:59:59.999 UTC seen from UTC+2
    let utc = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap()
        + chrono::Duration::milliseconds(999);
    let local = utc.with_timezone(&FixedOffset::east_opt(2 * 3600).unwrap());

    // When: Formatting the name
    let name = timestamp_name(&local);

    // Then: The local date has already rolled over
    assert_eq!(name, "2025-01-01-01-59-59-999");
}

/// WHAT: The format constant has no path separators or spaces
/// WHY: Temporary names must be valid in every media store
#[test]
fn given_format_when_inspected_then_filesystem_safe() {
    assert!(!TIMESTAMP_FORMAT.contains('/'));
    assert!(!TIMESTAMP_FORMAT.contains(' '));
    assert!(!TIMESTAMP_FORMAT.contains(':'));
}

#[test]
fn given_base_and_extension_when_file_name_then_joined_with_dot() {
    assert_eq!(file_name("JT01", "mp4"), "JT01.mp4");
    assert_eq!(file_name("a.b", "jpg"), "a.b.jpg");
}
