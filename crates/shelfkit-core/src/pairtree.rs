//! Pair-tree path derivation from item barcodes.
//!
//! A barcode maps to a library prefix followed by 2-character directory
//! segments, e.g. `36105123456` -> `36105/12/34/56` and `ABC123456` ->
//! `ABC/12/34/56`. Barcodes shorter than the expected length are truncated
//! rather than rejected: the segments are built from whatever characters
//! are present.
//!
//! The empty barcode is rejected, as is any barcode containing `/`, `\` or
//! NUL, since the result would not stay inside the tree. Non-UTF-8 input
//! reaching [`pair_tree_os`] is rejected too.

use std::ffi::OsStr;
use std::path::PathBuf;

use crate::error::{ShelfError, ShelfResult};

/// Library prefix whose barcodes carry a 5-character prefix segment.
pub const LONG_LIBRARY_PREFIX: &str = "36105";

const SHORT_PREFIX_LEN: usize = 3;
const BODY_LEN: usize = 6;
const SEGMENT_LEN: usize = 2;

/// Derive the pair-tree directory path for a barcode.
pub fn pair_tree(barcode: &str) -> ShelfResult<PathBuf> {
    if barcode.is_empty() {
        return Err(ShelfError::invalid_argument("barcode must not be empty"));
    }
    if barcode.contains(['/', '\\', '\0']) {
        return Err(ShelfError::invalid_argument(format!(
            "barcode {barcode:?} contains a path separator or NUL"
        )));
    }

    let chars: Vec<char> = barcode.chars().collect();
    let prefix_len = if barcode.starts_with(LONG_LIBRARY_PREFIX) {
        LONG_LIBRARY_PREFIX.len()
    } else {
        SHORT_PREFIX_LEN.min(chars.len())
    };

    let (prefix, rest) = chars.split_at(prefix_len);
    let body = &rest[..BODY_LEN.min(rest.len())];

    let mut path: PathBuf = prefix.iter().collect::<String>().into();
    for segment in body.chunks(SEGMENT_LEN) {
        path.push(segment.iter().collect::<String>());
    }
    Ok(path)
}

/// Derive the pair-tree path for a barcode that may not be valid UTF-8.
pub fn pair_tree_os(barcode: &OsStr) -> ShelfResult<PathBuf> {
    let barcode = barcode.to_str().ok_or_else(|| {
        ShelfError::invalid_argument(format!(
            "barcode {} is not valid UTF-8",
            barcode.to_string_lossy()
        ))
    })?;
    pair_tree(barcode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_long_prefix_barcode() {
        assert_eq!(
            pair_tree("36105123456").unwrap(),
            Path::new("36105/12/34/56")
        );
    }

    #[test]
    fn test_short_prefix_barcode() {
        assert_eq!(pair_tree("ABC123456").unwrap(), Path::new("ABC/12/34/56"));
    }

    #[test]
    fn test_characters_past_the_body_are_ignored() {
        assert_eq!(
            pair_tree("36105123456789").unwrap(),
            Path::new("36105/12/34/56")
        );
        assert_eq!(pair_tree("ABC123456XYZ").unwrap(), Path::new("ABC/12/34/56"));
    }

    #[test]
    fn test_prefix_must_match_exactly() {
        // "36104" is not the long prefix, so only 3 characters form the prefix.
        assert_eq!(pair_tree("36104123456").unwrap(), Path::new("361/04/12/34"));
    }

    #[test]
    fn test_short_barcodes_truncate() {
        assert_eq!(pair_tree("A").unwrap(), Path::new("A"));
        assert_eq!(pair_tree("ABC").unwrap(), Path::new("ABC"));
        assert_eq!(pair_tree("ABC1234").unwrap(), Path::new("ABC/12/34"));
        assert_eq!(pair_tree("ABC12345").unwrap(), Path::new("ABC/12/34/5"));
        assert_eq!(pair_tree("36105").unwrap(), Path::new("36105"));
        assert_eq!(pair_tree("361051").unwrap(), Path::new("36105/1"));
    }

    #[test]
    fn test_multibyte_characters_are_counted_as_characters() {
        assert_eq!(pair_tree("ÄBC1é3456").unwrap(), Path::new("ÄBC/1é/34/56"));
    }

    #[test]
    fn test_invalid_barcodes_are_rejected() {
        for barcode in ["", "AB/123456", "AB\\12", "AB\0C"] {
            let err = pair_tree(barcode).unwrap_err();
            assert!(
                matches!(err, ShelfError::InvalidArgument(_)),
                "expected InvalidArgument for {barcode:?}"
            );
        }
    }

    #[test]
    fn test_os_str_input() {
        assert_eq!(
            pair_tree_os(OsStr::new("36105123456")).unwrap(),
            Path::new("36105/12/34/56")
        );
    }

    #[test]
    #[cfg(unix)]
    fn test_non_utf8_input_is_invalid_argument() {
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"AB\xFFC123456");
        let err = pair_tree_os(raw).unwrap_err();
        assert!(matches!(err, ShelfError::InvalidArgument(_)));
    }
}
