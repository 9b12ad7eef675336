// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Filename normalization
//!
//! `photo_001.jpg` becomes `photo.jpg`: every `.jpg` is removed from the
//! name, the rest is split on `_`, and the first segment gets `.jpg` back.

/// Image suffix removed from, then re-appended to, every name
pub const IMAGE_SUFFIX: &str = ".jpg";

/// Separator between the kept name and the dropped segments
pub const SEGMENT_SEPARATOR: char = '_';

/// Filename with every occurrence of the image suffix removed.
///
/// This is a substring removal, not extension stripping:
/// `sun.jpg_edit.jpg` gives `sun_edit`.
pub fn stem(filename: &str) -> String {
    filename.replace(IMAGE_SUFFIX, "")
}

/// Split a stem on the segment separator. Never empty.
pub fn segments(stem: &str) -> Vec<&str> {
    stem.split(SEGMENT_SEPARATOR).collect()
}

/// Target name for a file: first segment of the stem plus the image suffix
pub fn normalized_name(filename: &str) -> String {
    let stem = stem(filename);
    let first = segments(&stem).first().copied().unwrap_or_default();
    format!("{}{}", first, IMAGE_SUFFIX)
}

/// Whether a file already has its normalized name
pub fn is_normalized(filename: &str) -> bool {
    normalized_name(filename) == filename
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_suffix_segment() {
        assert_eq!(normalized_name("photo_001.jpg"), "photo.jpg");
    }

    #[test]
    fn test_keeps_only_first_segment() {
        assert_eq!(segments("a_b_c"), vec!["a", "b", "c"]);
        assert_eq!(normalized_name("a_b_c.jpg"), "a.jpg");
    }

    #[test]
    fn test_already_normalized() {
        assert_eq!(normalized_name("landscape.jpg"), "landscape.jpg");
        assert!(is_normalized("landscape.jpg"));
        assert!(!is_normalized("photo_001.jpg"));
    }

    #[test]
    fn test_removes_every_occurrence_of_suffix() {
        assert_eq!(stem("sun.jpg_edit.jpg"), "sun_edit");
        assert_eq!(normalized_name("sun.jpg_edit.jpg"), "sun.jpg");
        assert_eq!(normalized_name("pic.jpg.jpg"), "pic.jpg");
    }

    #[test]
    fn test_no_underscore_is_stem_plus_suffix() {
        for name in ["plain", "dup.jpg.jpg", "notes.txt", "a.jpgb"] {
            assert_eq!(normalized_name(name), format!("{}.jpg", stem(name)));
        }
    }

    #[test]
    fn test_non_jpg_file_with_underscore() {
        // Still renamed: the rule never looks at the real extension
        assert_eq!(normalized_name("notes_v2.txt"), "notes.jpg");
    }

    #[test]
    fn test_case_sensitive_suffix() {
        assert_eq!(normalized_name("IMG_1234.JPG"), "IMG.jpg");
    }

    #[test]
    fn test_leading_separator_gives_bare_suffix() {
        assert_eq!(segments("_x"), vec!["", "x"]);
        assert_eq!(normalized_name("_x.jpg"), ".jpg");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for name in ["photo_001.jpg", "a_b_c.jpg", "sun.jpg_edit.jpg", "x", "_y_z.jpg"] {
            let once = normalized_name(name);
            assert_eq!(normalized_name(&once), once, "not idempotent for {}", name);
        }
    }
}
