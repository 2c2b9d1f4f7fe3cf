#![forbid(unsafe_code)]

//! Fitting labels into a fixed number of columns.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Marker appended to shortened titles. One column wide.
pub const ELLIPSIS: &str = "…";

/// Columns `text` occupies on screen.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Byte length of the longest run of leading grapheme clusters that fits in
/// `columns`.
fn fitting_prefix_len(text: &str, columns: usize) -> usize {
    let mut used = 0;
    for (offset, cluster) in text.grapheme_indices(true) {
        used += cluster.width();
        if used > columns {
            return offset;
        }
    }
    text.len()
}

/// `text` cut to at most `max_width` columns, ending in `ellipsis` when
/// anything was removed.
///
/// If `ellipsis` would use up all of `max_width` the text is cut without it.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max_width: usize, ellipsis: &str) -> String {
    if display_width(text) <= max_width {
        return text.to_owned();
    }
    match max_width.checked_sub(display_width(ellipsis)) {
        Some(room) if room > 0 => {
            let keep = fitting_prefix_len(text, room);
            [&text[..keep], ellipsis].concat()
        }
        _ => truncate_to_width(text, max_width),
    }
}

/// The longest prefix of whole grapheme clusters within `max_width` columns.
///
/// A two-column cluster that would straddle the limit is left out, so the
/// result can be a column short.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    text[..fitting_prefix_len(text, max_width)].to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_titles_pass_through() {
        assert_eq!(truncate_with_ellipsis("CPU", 8, ELLIPSIS), "CPU");
        assert_eq!(truncate_with_ellipsis("Memory", 6, ELLIPSIS), "Memory");
    }

    #[test]
    fn ellipsis_takes_the_last_column() {
        assert_eq!(truncate_with_ellipsis("Disk write", 5, ELLIPSIS), "Disk…");
        assert_eq!(truncate_with_ellipsis("Disk write", 5, "..."), "Di...");
    }

    #[test]
    fn no_columns_means_no_text() {
        assert_eq!(truncate_with_ellipsis("Load", 0, ELLIPSIS), "");
        assert_eq!(truncate_to_width("Load", 0), "");
    }

    #[test]
    fn single_column_drops_ellipsis() {
        assert_eq!(truncate_with_ellipsis("Temp", 1, ELLIPSIS), "T");
    }

    #[test]
    fn wide_glyphs_never_split() {
        // Four columns less one for the ellipsis: only one wide glyph fits.
        assert_eq!(truncate_with_ellipsis("网络流量", 4, ELLIPSIS), "网…");
        assert_eq!(truncate_to_width("网络", 3), "网");
    }

    #[test]
    fn accents_stay_with_their_letter() {
        assert_eq!(truncate_to_width("re\u{301}seau", 2), "re\u{301}");
    }

    #[test]
    fn widths() {
        assert_eq!(display_width("rx/s"), 4);
        assert_eq!(display_width("网"), 2);
        assert_eq!(display_width(ELLIPSIS), 1);
        assert_eq!(display_width(""), 0);
    }

    mod property {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn result_fits(s in "[a-z0-9 /网络é]{0,40}", width in 0usize..30) {
                let out = truncate_with_ellipsis(&s, width, ELLIPSIS);
                prop_assert!(display_width(&out) <= width);
            }

            #[test]
            fn hard_cut_is_a_prefix(s in "[a-z0-9 /网络]{0,50}", width in 0usize..30) {
                let out = truncate_to_width(&s, width);
                prop_assert!(s.starts_with(&out));
                prop_assert!(display_width(&out) + 1 >= width.min(display_width(&s)));
            }
        }
    }
}
