//! Slide segmentation
//!
//! A lesson body is split into slides at top-level headings. A boundary is a
//! line that starts at column 0 with exactly `level` `#` characters followed by
//! a space, a tab, or the end of the line. Lines inside fenced code blocks are
//! never boundaries.
//!
//! Slides borrow from the body, so joining the returned slices gives back the
//! body minus any whitespace-only chunks that were dropped.

/// Slide shown when a lesson has no body at all
pub const PLACEHOLDER_SLIDE: &str = "lesson content unavailable";

/// Split a lesson body into slides at level-1 headings
pub fn segment(body: &str) -> Vec<&str> {
    segment_at_level(body, 1)
}

/// Number of slides `segment` produces for `body`
pub fn slide_count(body: &str) -> usize {
    segment(body).len()
}

/// Split a lesson body into slides at headings of the given level (1-6).
///
/// Never returns an empty list.
pub fn segment_at_level(body: &str, level: u8) -> Vec<&str> {
    if body.is_empty() {
        return vec![PLACEHOLDER_SLIDE];
    }

    let level = level.clamp(1, 6) as usize;
    let mut boundaries = Vec::new();
    // Marker byte and run length of the fence we are inside, if any
    let mut open_fence: Option<(u8, usize)> = None;

    for (start, line) in lines_with_offsets(body) {
        match (open_fence, fence_marker(line)) {
            (None, Some(marker)) => {
                open_fence = Some(marker);
                continue;
            }
            (Some(open), Some(_)) if closes_fence(line, open) => {
                open_fence = None;
                continue;
            }
            _ => {}
        }
        if open_fence.is_none() && start > 0 && is_heading(line, level) {
            boundaries.push(start);
        }
    }
    boundaries.push(body.len());

    let mut slides = Vec::with_capacity(boundaries.len());
    let mut start = 0;
    for end in boundaries {
        let chunk = &body[start..end];
        if !chunk.trim().is_empty() {
            slides.push(chunk);
        }
        start = end;
    }

    if slides.is_empty() {
        slides.push(body);
    }
    slides
}

/// Iterate lines along with the byte offset each one starts at
fn lines_with_offsets(body: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    body.split_inclusive('\n').map(move |line| {
        let start = offset;
        offset += line.len();
        (start, line.trim_end_matches(['\n', '\r']))
    })
}

/// Marker byte and length if the line starts with a run of three or more ` or ~
fn fence_marker(line: &str) -> Option<(u8, usize)> {
    let marker = *line.as_bytes().first()?;
    if marker != b'`' && marker != b'~' {
        return None;
    }
    let len = line.bytes().take_while(|&b| b == marker).count();
    (len >= 3).then_some((marker, len))
}

/// A fence closes only on the same marker, at least as long, with nothing after it.
/// An unclosed fence runs to the end of the body.
fn closes_fence(line: &str, (marker, len): (u8, usize)) -> bool {
    let run = line.bytes().take_while(|&b| b == marker).count();
    run >= len && line[run..].trim().is_empty()
}

/// Whether a line is an ATX heading of exactly `level`
fn is_heading(line: &str, level: usize) -> bool {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    if hashes != level {
        return false;
    }
    matches!(line.as_bytes().get(level), None | Some(b' ') | Some(b'\t'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn empty_body_yields_placeholder() {
        assert_eq!(segment(""), vec![PLACEHOLDER_SLIDE]);
    }

    #[test]
    fn body_without_headings_is_one_slide() {
        let body = "Just some text.\n\nAnother paragraph.";
        assert_eq!(segment(body), vec![body]);
    }

    #[test]
    fn whitespace_only_body_is_returned_whole() {
        assert_eq!(segment("  \n\t\n"), vec!["  \n\t\n"]);
    }

    #[test]
    fn splits_at_top_level_headings() {
        let body = "# One\nfirst\n# Two\nsecond\n# Three\nthird";
        assert_eq!(segment(body), vec!["# One\nfirst\n", "# Two\nsecond\n", "# Three\nthird"]);
    }

    #[test]
    fn leading_content_becomes_its_own_slide() {
        let body = "Intro text\n# Heading\nBody";
        assert_eq!(segment(body), vec!["Intro text\n", "# Heading\nBody"]);
    }

    #[test]
    fn whitespace_before_first_heading_is_dropped() {
        let body = "\n\n# Heading\nBody";
        assert_eq!(segment(body), vec!["# Heading\nBody"]);
    }

    #[test]
    fn deeper_headings_do_not_split() {
        let body = "# Top\n## Sub\ntext\n### Deeper";
        assert_eq!(segment(body), vec![body]);
    }

    #[test]
    fn hash_without_space_is_not_a_heading() {
        let body = "# Top\n#hashtag\ntext";
        assert_eq!(segment(body).len(), 1);
    }

    #[test]
    fn indented_heading_is_not_a_boundary() {
        let body = "# Top\n  # indented\ntext";
        assert_eq!(segment(body).len(), 1);
    }

    #[test]
    fn bare_hash_line_is_a_heading() {
        let body = "intro\n#\nrest";
        assert_eq!(segment(body), vec!["intro\n", "#\nrest"]);
    }

    #[test]
    fn fence_closes_only_on_its_own_marker() {
        let body = "# A\n~~~\n```\n~~~\n# B\nb";
        assert_eq!(segment(body), vec!["# A\n~~~\n```\n~~~\n", "# B\nb"]);
    }

    #[test]
    fn shorter_run_does_not_close_fence() {
        let body = "# A\n````\n```\n# not a slide\n````\n# B\nb";
        assert_eq!(segment(body).len(), 2);
        assert!(segment(body)[0].contains("# not a slide"));
    }

    #[test]
    fn fence_with_info_string_does_not_close() {
        let body = "# A\n```rust\n```rust\n# still code\n```\n# B\nb";
        assert_eq!(segment(body), vec!["# A\n```rust\n```rust\n# still code\n```\n", "# B\nb"]);
    }

    #[test]
    fn headings_inside_code_fences_are_ignored() {
        let body = "# Shell\n```sh\n# install it\ncargo install foo\n```\n# Next\ndone";
        assert_eq!(
            segment(body),
            vec!["# Shell\n```sh\n# install it\ncargo install foo\n```\n", "# Next\ndone"]
        );
    }

    #[test]
    fn crlf_line_endings_split_cleanly() {
        let body = "# One\r\nfirst\r\n# Two\r\nsecond";
        assert_eq!(segment(body), vec!["# One\r\nfirst\r\n", "# Two\r\nsecond"]);
    }

    #[test]
    fn level_two_segmentation() {
        let body = "# Title\nintro\n## A\na\n## B\nb";
        assert_eq!(segment_at_level(body, 2), vec!["# Title\nintro\n", "## A\na\n", "## B\nb"]);
    }

    #[test]
    fn segmentation_is_idempotent() {
        let body = "# A\nx\n# B\ny";
        assert_eq!(segment(body), segment(body));
        assert_eq!(slide_count(body), 2);
    }

    proptest! {
        #[test]
        fn never_empty(body in ".{0,200}") {
            prop_assert!(!segment(&body).is_empty());
        }

        #[test]
        fn concatenation_loses_only_whitespace(
            parts in prop::collection::vec(("[a-z ]{0,12}", "[a-z \n]{0,30}"), 0..6)
        ) {
            let body: String = parts
                .iter()
                .map(|(title, text)| format!("# {}\n{}\n", title, text))
                .collect();
            let joined: String = segment(&body).concat();

            if body.is_empty() {
                prop_assert_eq!(joined, PLACEHOLDER_SLIDE);
            } else {
                let strip = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
                prop_assert_eq!(strip(&joined), strip(&body));
                prop_assert!(body.contains(joined.trim()));
            }
        }

        #[test]
        fn every_slide_is_a_substring(body in "(# [a-z]{0,5}\n[a-z \n]{0,20}){0,5}") {
            for slide in segment(&body) {
                prop_assert!(slide == PLACEHOLDER_SLIDE || body.contains(slide));
            }
        }
    }
}
