use chrono::{DateTime, TimeZone};

/// Format of temporary segment names: `yyyy-MM-dd-HH-mm-ss-SSS`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S-%3f";

/// Base name for a segment that has not been tagged yet.
pub fn timestamp_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format(TIMESTAMP_FORMAT).to_string()
}

/// Join a base name and an extension.
pub fn file_name(base: &str, extension: &str) -> String {
    format!("{}.{}", base, extension)
}
