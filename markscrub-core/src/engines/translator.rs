//! Quote-scoped dictionary translator.
//!
//! Only the content of quoted spans (see [`quote_scan`](super::quote_scan))
//! is ever rewritten; every byte outside a span, including the quote
//! characters, is copied through untouched.
//!
//! Inside a span, dictionary entries are tried longest term first. Each
//! entry replaces every whole-word occurrence of its term. Text produced by
//! a translation is locked: a later, shorter entry can neither match inside
//! it nor use it to complete a match. Whole-word means the match does not
//! start or end in the middle of a run of alphabetic characters.
//!
//! A span that is the value of a protected attribute (`class="..."`,
//! `data-view='...'`) is passed through as-is.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};

use crate::config::RewriteSummaryItem;
use crate::dictionary::{
    is_attribute_name_char, matches_protected_attribute, DictionaryConfig, TranslationEntry, UnterminatedSpanPolicy,
};
use crate::engine::{RewriteMode, RewriteOutcome, Rewriter};
use crate::engines::quote_scan::{scan, Segment};
use crate::errors::ScrubError;
use crate::rewrite_log::log_span_translation_debug;

const MODULE_PATH: &str = "markscrub_core::translator";

/// Everything a translation run found out about a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationReport {
    pub output: String,
    pub spans_scanned: usize,
    pub spans_changed: usize,
    /// Spans skipped because they are protected attribute values.
    pub spans_protected: usize,
    /// Byte offset of a quote left open at end of input, if any.
    pub unterminated_at: Option<usize>,
    /// Non-zero replacement counts per term, in application order.
    pub term_counts: Vec<RewriteSummaryItem>,
}

/// Applies a dictionary to the quoted spans of a document.
#[derive(Debug, Clone)]
pub struct QuoteScopedTranslator {
    /// Entries already sorted into application order.
    entries: Vec<TranslationEntry>,
    unterminated_span: UnterminatedSpanPolicy,
    backslash_escapes: bool,
    protected_attributes: Vec<String>,
}

impl QuoteScopedTranslator {
    /// Validates the dictionary and fixes its application order.
    pub fn new(dictionary: &DictionaryConfig) -> Result<Self, ScrubError> {
        dictionary.validate()?;
        let entries: Vec<TranslationEntry> = dictionary.application_order().into_iter().cloned().collect();
        debug!(
            "Translator ready with {} entries (longest term: {} chars).",
            entries.len(),
            entries.first().map_or(0, TranslationEntry::term_len)
        );
        Ok(Self {
            entries,
            unterminated_span: dictionary.unterminated_span,
            backslash_escapes: dictionary.backslash_escapes,
            protected_attributes: dictionary.protected_attributes.clone(),
        })
    }

    /// Translates `document`, returning only the rewritten text.
    pub fn translate(&self, document: &str) -> Result<String, ScrubError> {
        Ok(self.translate_with_report(document)?.output)
    }

    /// Translates `document` and reports span and term statistics.
    pub fn translate_with_report(&self, document: &str) -> Result<TranslationReport, ScrubError> {
        let mut output = String::with_capacity(document.len());
        let mut counts = vec![0usize; self.entries.len()];
        let mut spans_scanned = 0usize;
        let mut spans_changed = 0usize;
        let mut spans_protected = 0usize;
        let mut unterminated_at = None;

        for segment in scan(document, self.backslash_escapes) {
            match segment {
                Segment::Verbatim(text) => output.push_str(text),
                Segment::Span { offset, content, .. } => {
                    spans_scanned += 1;
                    if self.is_protected_span(document, offset) {
                        spans_protected += 1;
                        output.push_str(content);
                        continue;
                    }
                    let translated = translate_span(content, &self.entries, &mut counts);
                    if translated != content {
                        spans_changed += 1;
                        log_span_translation_debug(MODULE_PATH, offset, content, &translated);
                    }
                    output.push_str(&translated);
                }
                Segment::Unterminated { quote, open_offset, content } => match self.unterminated_span {
                    UnterminatedSpanPolicy::Reject => {
                        return Err(ScrubError::UnterminatedSpan {
                            offset: open_offset,
                            quote,
                        });
                    }
                    UnterminatedSpanPolicy::LeaveUntranslated => {
                        warn!(
                            "Unterminated {} quote at byte {}; leaving the rest of the document untranslated.",
                            quote, open_offset
                        );
                        unterminated_at = Some(open_offset);
                        output.push_str(content);
                    }
                },
            }
        }

        let term_counts = self
            .entries
            .iter()
            .zip(counts)
            .filter(|(_, n)| *n > 0)
            .map(|(entry, occurrences)| RewriteSummaryItem {
                name: entry.term.clone(),
                occurrences,
            })
            .collect();

        debug!(
            "Translated {} of {} quoted spans ({} protected).",
            spans_changed, spans_scanned, spans_protected
        );
        Ok(TranslationReport {
            output,
            spans_scanned,
            spans_changed,
            spans_protected,
            unterminated_at,
            term_counts,
        })
    }

    /// `content_offset` is the byte right after the opening quote.
    fn is_protected_span(&self, document: &str, content_offset: usize) -> bool {
        !self.protected_attributes.is_empty()
            && attribute_name_before(document, content_offset.saturating_sub(1))
                .is_some_and(|name| matches_protected_attribute(&self.protected_attributes, name))
    }
}

impl Rewriter for QuoteScopedTranslator {
    fn rewrite(&self, document: &str) -> Result<RewriteOutcome, ScrubError> {
        let report = self.translate_with_report(document)?;
        Ok(RewriteOutcome {
            output: report.output,
            summary: report.term_counts,
        })
    }

    fn mode(&self) -> RewriteMode {
        RewriteMode::Translate
    }
}

/// One-shot translation with an ad-hoc dictionary.
pub fn translate(document: &str, dictionary: &DictionaryConfig) -> Result<String, ScrubError> {
    QuoteScopedTranslator::new(dictionary)?.translate(document)
}

/// Name of the attribute whose value opens at `quote_offset`, i.e. the
/// `name` in `name = "`. `None` when the quote is not an attribute value.
fn attribute_name_before(document: &str, quote_offset: usize) -> Option<&str> {
    let head = document[..quote_offset].trim_end();
    let head = head.strip_suffix('=')?.trim_end();
    let start = head
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_attribute_name_char(*c))
        .last()
        .map(|(i, _)| i)?;
    match head[..start].chars().next_back() {
        None => Some(&head[start..]),
        Some(c) if c.is_whitespace() => Some(&head[start..]),
        _ => None,
    }
}

#[derive(Debug, Clone)]
struct Piece {
    text: String,
    locked: bool,
}

/// Translates the content of one span. `entries` must already be in
/// application order; `counts` is indexed like `entries`.
fn translate_span(content: &str, entries: &[TranslationEntry], counts: &mut [usize]) -> String {
    let mut pieces = vec![Piece {
        text: content.to_string(),
        locked: false,
    }];

    for (idx, entry) in entries.iter().enumerate() {
        let mut next = Vec::with_capacity(pieces.len());

        for (i, piece) in pieces.iter().enumerate() {
            if piece.locked {
                next.push(piece.clone());
                continue;
            }

            let before = pieces[..i].iter().rev().find_map(|p| p.text.chars().next_back());
            let after = pieces[i + 1..].iter().find_map(|p| p.text.chars().next());
            let hits = find_whole_words(&piece.text, &entry.term, before, after);
            if hits.is_empty() {
                next.push(piece.clone());
                continue;
            }

            counts[idx] += hits.len();
            let mut last = 0usize;
            for (start, end) in hits {
                if start > last {
                    next.push(Piece {
                        text: piece.text[last..start].to_string(),
                        locked: false,
                    });
                }
                next.push(Piece {
                    text: entry.translation.clone(),
                    locked: true,
                });
                last = end;
            }
            if last < piece.text.len() {
                next.push(Piece {
                    text: piece.text[last..].to_string(),
                    locked: false,
                });
            }
        }

        pieces = next;
    }

    pieces.into_iter().map(|p| p.text).collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphabetic()
}

/// Byte ranges of every whole-word, non-overlapping occurrence of `term` in
/// `text`. `before`/`after` are the characters adjacent to `text` in the
/// surrounding span, if any.
fn find_whole_words(text: &str, term: &str, before: Option<char>, after: Option<char>) -> Vec<(usize, usize)> {
    let (Some(first), Some(last)) = (term.chars().next(), term.chars().next_back()) else {
        return Vec::new();
    };

    let mut hits = Vec::new();
    let mut pos = 0usize;
    while let Some(rel) = text[pos..].find(term) {
        let start = pos + rel;
        let end = start + term.len();
        let prev = text[..start].chars().next_back().or(before);
        let next = text[end..].chars().next().or(after);

        let starts_inside_word = is_word_char(first) && prev.is_some_and(is_word_char);
        let ends_inside_word = is_word_char(last) && next.is_some_and(is_word_char);

        if starts_inside_word || ends_inside_word {
            pos = start + first.len_utf8();
        } else {
            hits.push((start, end));
            pos = end;
        }
    }
    hits
}
