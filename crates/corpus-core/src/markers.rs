//! Boilerplate marker extraction

use serde::{Deserialize, Serialize};

pub const GUTENBERG_START: &str = "*** START OF THIS PROJECT GUTENBERG EBOOK ***";
pub const GUTENBERG_END: &str = "*** END OF THIS PROJECT GUTENBERG EBOOK ***";

/// Header/footer pair surrounding the substantive content of a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            start: GUTENBERG_START.to_string(),
            end: GUTENBERG_END.to_string(),
        }
    }
}

impl Markers {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Extract the text between the first start marker and the last end marker.
    ///
    /// Falls back to the whole input unless both markers are present. When the
    /// last end marker begins before the start marker finishes, the result is empty.
    pub fn extract<'a>(&self, raw: &'a str) -> &'a str {
        match (raw.find(&self.start), raw.rfind(&self.end)) {
            (Some(start), Some(end)) => raw.get(start + self.start.len()..end).unwrap_or(""),
            _ => raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> Markers {
        Markers::default()
    }

    #[test]
    fn test_extract_between_markers() {
        let raw = format!("header\n{GUTENBERG_START}\nbody text\n{GUTENBERG_END}\nlicense");
        assert_eq!(markers().extract(&raw), "\nbody text\n");
    }

    #[test]
    fn test_no_markers_returns_everything() {
        assert_eq!(markers().extract("just a book"), "just a book");
    }

    #[test]
    fn test_single_marker_falls_back() {
        let only_start = format!("{GUTENBERG_START} body");
        assert_eq!(markers().extract(&only_start), only_start);

        let only_end = format!("body {GUTENBERG_END}");
        assert_eq!(markers().extract(&only_end), only_end);
    }

    #[test]
    fn test_first_start_last_end() {
        let raw = format!("{GUTENBERG_START}a{GUTENBERG_START}b{GUTENBERG_END}c{GUTENBERG_END}");
        assert_eq!(
            markers().extract(&raw),
            format!("a{GUTENBERG_START}b{GUTENBERG_END}c")
        );
    }

    #[test]
    fn test_end_before_start_is_empty() {
        let raw = format!("{GUTENBERG_END} middle {GUTENBERG_START}");
        assert_eq!(markers().extract(&raw), "");
    }

    #[test]
    fn test_custom_markers() {
        let markers = Markers::new("<<", ">>");
        assert_eq!(markers.extract("x << inner >> y"), " inner ");
    }
}
