//! Shared normalization for user-entered names and descriptions.

/// Trims `raw`, returning `None` when nothing is left.
pub(crate) fn required(raw: impl Into<String>) -> Option<String> {
    let raw = raw.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Trims an optional description and drops it when blank.
pub(crate) fn optional(raw: Option<String>) -> Option<String> {
    raw.and_then(required)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims() {
        assert_eq!(required("  Bench  "), Some("Bench".to_owned()));
        assert_eq!(required(" \t "), None);
    }

    #[test]
    fn optional_drops_blank() {
        assert_eq!(optional(Some("   ".into())), None);
        assert_eq!(optional(None), None);
        assert_eq!(optional(Some(" chest day ".into())), Some("chest day".into()));
    }
}
