//! In-band "tentative schedule" marker inside event descriptions.
//!
//! The backend has no dedicated column for tentative scheduling, so the
//! client encodes it as a first-line marker in the free-text description:
//!
//! ```text
//! [TENTATIVE] waiting for regional director confirmation
//! Actual description starts here.
//! ```

const TENTATIVE_PREFIX: &str = "[TENTATIVE]";

/// Parsed view of a description that may carry the tentative marker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TentativeMeta {
    pub is_tentative: bool,
    pub note: String,
    pub plain_description: String,
}

/// Split a raw description into tentative metadata and the plain text.
///
/// Only the first line is inspected; the marker match is case-insensitive.
/// Anything that doesn't start with the marker is plain description.
pub fn parse_tentative_description(raw: &str) -> TentativeMeta {
    if raw.is_empty() {
        return TentativeMeta::default();
    }

    let normalized = raw.replace("\r\n", "\n");
    let mut lines = normalized.split('\n');
    let first = lines.next().unwrap_or("").trim();

    if !first
        .to_ascii_uppercase()
        .starts_with(TENTATIVE_PREFIX)
    {
        return TentativeMeta {
            is_tentative: false,
            note: String::new(),
            plain_description: raw.to_string(),
        };
    }

    let note = first[TENTATIVE_PREFIX.len()..].trim().to_string();
    let plain_description = lines.collect::<Vec<_>>().join("\n").trim().to_string();

    TentativeMeta {
        is_tentative: true,
        note,
        plain_description,
    }
}

/// Inverse of [`parse_tentative_description`].
///
/// Returns `None` when the resulting description would be empty, so callers
/// can omit the field from the payload entirely.
pub fn build_tentative_description(
    is_tentative: bool,
    note: &str,
    plain_description: &str,
) -> Option<String> {
    let clean_desc = plain_description.trim();
    if !is_tentative {
        return if clean_desc.is_empty() {
            None
        } else {
            Some(clean_desc.to_string())
        };
    }

    let clean_note = note.trim();
    let first_line = if clean_note.is_empty() {
        TENTATIVE_PREFIX.to_string()
    } else {
        format!("{TENTATIVE_PREFIX} {clean_note}")
    };

    if clean_desc.is_empty() {
        Some(first_line)
    } else {
        Some(format!("{first_line}\n{clean_desc}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_not_tentative() {
        let meta = parse_tentative_description("Regular notes\nsecond line");
        assert!(!meta.is_tentative);
        assert_eq!(meta.plain_description, "Regular notes\nsecond line");
        assert_eq!(meta.note, "");
    }

    #[test]
    fn marker_line_with_note() {
        let meta = parse_tentative_description("[TENTATIVE] pending approval\nBudget meeting");
        assert!(meta.is_tentative);
        assert_eq!(meta.note, "pending approval");
        assert_eq!(meta.plain_description, "Budget meeting");
    }

    #[test]
    fn marker_is_case_insensitive() {
        let meta = parse_tentative_description("[tentative]\nBody");
        assert!(meta.is_tentative);
        assert_eq!(meta.note, "");
        assert_eq!(meta.plain_description, "Body");
    }

    #[test]
    fn crlf_input_is_normalized() {
        let meta = parse_tentative_description("[TENTATIVE] note\r\nline one\r\nline two");
        assert!(meta.is_tentative);
        assert_eq!(meta.plain_description, "line one\nline two");
    }

    #[test]
    fn build_round_trips() {
        let built = build_tentative_description(true, "pending approval", "Budget meeting")
            .expect("non-empty");
        let meta = parse_tentative_description(&built);
        assert!(meta.is_tentative);
        assert_eq!(meta.note, "pending approval");
        assert_eq!(meta.plain_description, "Budget meeting");
    }

    #[test]
    fn build_marker_only_when_description_empty() {
        assert_eq!(
            build_tentative_description(true, "", "").as_deref(),
            Some("[TENTATIVE]")
        );
        assert_eq!(
            build_tentative_description(true, "note", "").as_deref(),
            Some("[TENTATIVE] note")
        );
    }

    #[test]
    fn build_returns_none_when_empty() {
        assert_eq!(build_tentative_description(false, "ignored", "  "), None);
    }

    #[test]
    fn build_plain_passthrough() {
        assert_eq!(
            build_tentative_description(false, "", " notes ").as_deref(),
            Some("notes")
        );
    }
}
