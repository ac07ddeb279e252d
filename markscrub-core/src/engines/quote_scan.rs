//! Quote scanner: splits a document into quoted spans and verbatim text.
//!
//! A small three-state machine (`Outside`, `InsideSingleQuote`,
//! `InsideDoubleQuote`) walks the document once. A span opens on an
//! unescaped `'` or `"` seen while outside, and closes at the next unescaped
//! quote of the same kind; the other quote kind is ordinary content inside
//! a span. Quote characters themselves always belong to the verbatim text
//! around a span, never to the span content.
//!
//! Concatenating the text of every segment, in order, reproduces the input
//! exactly.

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Outside,
    InsideSingleQuote,
    InsideDoubleQuote,
}

impl ScanState {
    fn quote(self) -> Option<char> {
        match self {
            ScanState::Outside => None,
            ScanState::InsideSingleQuote => Some('\''),
            ScanState::InsideDoubleQuote => Some('"'),
        }
    }
}

/// One piece of a scanned document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text outside any span, including the quote characters.
    Verbatim(&'a str),
    /// The content strictly between a matching quote pair.
    Span {
        quote: char,
        /// Byte offset of the first content byte.
        offset: usize,
        content: &'a str,
    },
    /// Content after a quote that is never closed, up to end of input.
    Unterminated {
        quote: char,
        /// Byte offset of the opening quote.
        open_offset: usize,
        content: &'a str,
    },
}

impl<'a> Segment<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Verbatim(text) => text,
            Segment::Span { content, .. } | Segment::Unterminated { content, .. } => content,
        }
    }
}

/// Splits `text` into segments.
///
/// With `backslash_escapes`, a quote preceded by an odd number of
/// consecutive backslashes is treated as a literal character: it neither
/// opens nor closes a span.
pub fn scan(text: &str, backslash_escapes: bool) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut state = ScanState::Outside;
    let mut segment_start = 0usize;
    let mut open_offset = 0usize;
    let mut backslashes = 0usize;

    for (i, c) in text.char_indices() {
        let escaped = backslash_escapes && backslashes % 2 == 1;

        match state {
            ScanState::Outside => {
                if !escaped && (c == '"' || c == '\'') {
                    let after_quote = i + c.len_utf8();
                    push_verbatim(&mut segments, &text[segment_start..after_quote]);
                    state = if c == '"' {
                        ScanState::InsideDoubleQuote
                    } else {
                        ScanState::InsideSingleQuote
                    };
                    open_offset = i;
                    segment_start = after_quote;
                }
            }
            ScanState::InsideSingleQuote | ScanState::InsideDoubleQuote => {
                if !escaped && Some(c) == state.quote() {
                    segments.push(Segment::Span {
                        quote: c,
                        offset: segment_start,
                        content: &text[segment_start..i],
                    });
                    state = ScanState::Outside;
                    // The closing quote opens the next verbatim run.
                    segment_start = i;
                }
            }
        }

        backslashes = if c == '\\' { backslashes + 1 } else { 0 };
    }

    match state.quote() {
        None => push_verbatim(&mut segments, &text[segment_start..]),
        Some(quote) => segments.push(Segment::Unterminated {
            quote,
            open_offset,
            content: &text[segment_start..],
        }),
    }

    segments
}

fn push_verbatim<'a>(segments: &mut Vec<Segment<'a>>, text: &'a str) {
    if !text.is_empty() {
        segments.push(Segment::Verbatim(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rebuild(segments: &[Segment<'_>]) -> String {
        segments.iter().map(|s| s.text()).collect()
    }

    fn spans<'a>(segments: &[Segment<'a>]) -> Vec<&'a str> {
        segments
            .iter()
            .filter_map(|s| match s {
                Segment::Span { content, .. } => Some(*content),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_no_quotes_is_one_verbatim_segment() {
        let segs = scan("<div class=x>Taak</div>", true);
        assert_eq!(segs, vec![Segment::Verbatim("<div class=x>Taak</div>")]);
    }

    #[test]
    fn test_spans_do_not_bridge_between_pairs() {
        // A naive "between any two quotes" match would pick up `>Taak</div><div id=`.
        let input = r#"<div class="a">Taak</div><div id="b">"#;
        let segs = scan(input, true);
        assert_eq!(spans(&segs), vec!["a", "b"]);
        assert_eq!(rebuild(&segs), input);
    }

    #[test]
    fn test_other_quote_kind_is_content() {
        let input = r#"title="Don't stop" x='say "hi"'"#;
        let segs = scan(input, true);
        assert_eq!(spans(&segs), vec!["Don't stop", r#"say "hi""#]);
        assert_eq!(rebuild(&segs), input);
    }

    #[test]
    fn test_span_offsets_point_at_content() {
        let input = r#"a "bc" d"#;
        let segs = scan(input, true);
        let Segment::Span { offset, content, quote } = segs[1] else {
            panic!("expected span, got {:?}", segs[1]);
        };
        assert_eq!(quote, '"');
        assert_eq!(&input[offset..offset + content.len()], "bc");
    }

    #[test]
    fn test_escaped_quotes_neither_open_nor_close() {
        let input = r#"x \"no\" y 'it\'s' z"#;
        let segs = scan(input, true);
        assert_eq!(spans(&segs), vec![r"it\'s"]);
        assert_eq!(rebuild(&segs), input);
    }

    #[test]
    fn test_double_backslash_does_not_escape() {
        let input = r#"'a\\' b"#;
        let segs = scan(input, true);
        assert_eq!(spans(&segs), vec![r"a\\"]);
    }

    #[test]
    fn test_escapes_ignored_when_disabled() {
        let input = r#"'it\'s'"#;
        let segs = scan(input, false);
        assert_eq!(spans(&segs), vec![r"it\"]);
        assert_eq!(rebuild(&segs), input);
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        let input = "ok 'fine' and \"never closed";
        let segs = scan(input, true);
        assert_eq!(
            segs.last(),
            Some(&Segment::Unterminated {
                quote: '"',
                open_offset: 14,
                content: "never closed",
            })
        );
        assert_eq!(rebuild(&segs), input);
    }

    #[test]
    fn test_empty_span() {
        let segs = scan(r#"a="" b"#, true);
        assert_eq!(spans(&segs), vec![""]);
        assert_eq!(rebuild(&segs), r#"a="" b"#);
    }

    #[test]
    fn test_multibyte_content() {
        let input = "«x» 'café über' ü";
        let segs = scan(input, true);
        assert_eq!(spans(&segs), vec!["café über"]);
        assert_eq!(rebuild(&segs), input);
    }
}
