use std::fmt;

/// Replace every character outside `[A-Za-z0-9._-]` with `_`.
///
/// Idempotent: the output only contains characters from the allowed set.
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// A scan code that has already passed through [`sanitize`].
///
/// Naming code only accepts this type, so a code cannot be sanitized twice
/// or reach the filesystem unsanitized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SanitizedCode(String);

impl SanitizedCode {
    /// Sanitize a raw code at the decoding/naming boundary.
    pub fn new(raw: &str) -> Self {
        Self(sanitize(raw))
    }

    /// The sanitized code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SanitizedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
