#![forbid(unsafe_code)]

//! Display-width accounting per grapheme cluster.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width (0, 1, or 2) of a single grapheme cluster.
///
/// Zero-width joiners, variation selectors, and combining marks fold into
/// the preceding cell and so measure `0`; East-Asian-wide/Fullwidth code
/// points and emoji presentation sequences measure `2`; everything else
/// measures `1`.
#[must_use]
pub fn cluster_width(cluster: &str) -> usize {
    UnicodeWidthStr::width(cluster)
}

/// Split `s` into its grapheme clusters.
#[must_use]
pub fn graphemes(s: &str) -> Vec<&str> {
    s.graphemes(true).collect()
}

/// Total display width of a string, summed over its grapheme clusters.
#[must_use]
pub fn str_width(s: &str) -> usize {
    graphemes(s).iter().map(|g| cluster_width(g)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_width_one() {
        assert_eq!(cluster_width("a"), 1);
    }

    #[test]
    fn cjk_is_width_two() {
        assert_eq!(cluster_width("世"), 2);
    }

    #[test]
    fn combining_mark_folds_to_zero_width_on_its_own_but_widens_base() {
        // "e" + combining acute accent: base is 1, mark alone measures 0.
        let base = "e";
        let combining = "\u{0301}";
        assert_eq!(cluster_width(base), 1);
        assert_eq!(cluster_width(combining), 0);
    }

    #[test]
    fn emoji_is_width_two() {
        assert_eq!(cluster_width("🔥"), 2);
    }

    #[test]
    fn grapheme_width_scenario() {
        // "a世b" from the concrete scenario in §8.
        assert_eq!(str_width("a世b"), 4);
    }
}
