//! Structural validator: a line-oriented scan over raw document text.
//!
//! Deliberately independent of the grammar parser so diagnostics are still
//! produced for documents the grammar cannot parse. Columns are counted in
//! UTF-16 code units to match editor coordinates.

use serde::{Deserialize, Serialize};

use crate::casing::title_case;
use crate::grammar::{CONTEXT_HEADING, OPTIONS_HEADING, OUTCOME_HEADING};
use crate::matching::matches_short_title;
use crate::model::{Point, TextRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// A located, severity-tagged structural complaint about a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    /// Stable identifier, e.g. `required-section-missing:considered-options`.
    pub code: String,
    pub message: String,
    pub range: TextRange,
}

pub const CODE_MISSING_TITLE: &str = "required-section-missing:title";
pub const CODE_MISSING_CONTEXT: &str = "required-section-missing:context-and-problem-statement";
pub const CODE_MISSING_OPTIONS: &str = "required-section-missing:considered-options";
pub const CODE_MISSING_OUTCOME: &str = "required-section-missing:decision-outcome";
pub const CODE_EMPTY_CONTEXT: &str = "empty-section:context-and-problem-statement";
pub const CODE_EMPTY_OPTIONS: &str = "empty-section:considered-options";
pub const CODE_EMPTY_OUTCOME: &str = "empty-section:decision-outcome";
pub const CODE_HEADING_NOT_TITLE_CASE: &str = "heading-not-title-case";
pub const CODE_INVALID_CHOSEN_OPTION: &str = "invalid-chosen-option";

/// Scan raw document text for structural defects.
///
/// `considered_options` is the list text the chosen-option statement is
/// cross-checked against, normally obtained via
/// [`crate::extract::extract_list_items`].
pub fn validate_document(text: &str, considered_options: &[String]) -> Vec<Diagnostic> {
    let lines: Vec<&str> = text.lines().collect();
    let mut diagnostics = Vec::new();

    let mut title_line: Option<usize> = None;
    let mut context_line: Option<usize> = None;
    let mut options_line: Option<usize> = None;
    let mut outcome_line: Option<usize> = None;

    for (i, line) in lines.iter().enumerate() {
        if title_line.is_none() && is_h1(line) {
            title_line = Some(i);
        }
        if let Some(name) = h2_name(line) {
            if context_line.is_none() && name.eq_ignore_ascii_case(CONTEXT_HEADING) {
                context_line = Some(i);
            }
            if options_line.is_none() && name.eq_ignore_ascii_case(OPTIONS_HEADING) {
                options_line = Some(i);
            }
            if outcome_line.is_none() && name.eq_ignore_ascii_case(OUTCOME_HEADING) {
                outcome_line = Some(i);
            }
        }

        if (is_h1(line) || is_h2(line)) && title_case(line) != *line {
            diagnostics.push(Diagnostic {
                severity: DiagnosticSeverity::Warning,
                code: CODE_HEADING_NOT_TITLE_CASE.to_string(),
                message: format!("Heading is not in title case: expected '{}'", title_case(line)),
                range: line_range(i, line),
            });
        }

        if line.starts_with("Chosen option:") {
            if let Some((chosen, end_col)) = extract_quoted(line) {
                let listed = considered_options
                    .iter()
                    .any(|option| matches_short_title(&chosen, option));
                if !listed {
                    diagnostics.push(Diagnostic {
                        severity: DiagnosticSeverity::Error,
                        code: CODE_INVALID_CHOSEN_OPTION.to_string(),
                        message: format!(
                            "Chosen option '{}' does not appear in the considered options",
                            chosen
                        ),
                        range: TextRange {
                            start: Point {
                                line: i as u32,
                                col: 0,
                            },
                            end: Point {
                                line: i as u32,
                                col: end_col,
                            },
                        },
                    });
                }
            }
        }
    }

    if title_line.is_none() {
        diagnostics.push(missing_section(
            DiagnosticSeverity::Error,
            CODE_MISSING_TITLE,
            "title",
        ));
    }

    let tracked = [
        (context_line, CONTEXT_HEADING, CODE_MISSING_CONTEXT, CODE_EMPTY_CONTEXT),
        (options_line, OPTIONS_HEADING, CODE_MISSING_OPTIONS, CODE_EMPTY_OPTIONS),
        (outcome_line, OUTCOME_HEADING, CODE_MISSING_OUTCOME, CODE_EMPTY_OUTCOME),
    ];
    for (found, heading, missing_code, empty_code) in tracked {
        match found {
            None => diagnostics.push(missing_section(
                DiagnosticSeverity::Warning,
                missing_code,
                heading,
            )),
            Some(marker) => {
                if let Some(range) = empty_section_span(&lines, marker) {
                    diagnostics.push(Diagnostic {
                        severity: DiagnosticSeverity::Warning,
                        code: empty_code.to_string(),
                        message: format!("Section '{}' has no content", heading),
                        range,
                    });
                }
            }
        }
    }

    diagnostics
}

fn missing_section(severity: DiagnosticSeverity, code: &str, heading: &str) -> Diagnostic {
    Diagnostic {
        severity,
        code: code.to_string(),
        message: format!("Required section '{}' is missing", heading),
        range: TextRange {
            start: Point { line: 0, col: 0 },
            end: Point { line: 0, col: 1 },
        },
    }
}

/// Span of the lines between a section marker and the next `#` line (or end
/// of document), when that span contains nothing but whitespace.
fn empty_section_span(lines: &[&str], marker: usize) -> Option<TextRange> {
    let start = marker + 1;
    let mut end = lines.len();
    for (offset, line) in lines[start.min(end)..].iter().enumerate() {
        if line.starts_with('#') {
            end = start + offset;
            break;
        }
    }

    let empty = lines[start.min(lines.len())..end]
        .iter()
        .all(|line| line.trim().is_empty());
    if !empty {
        return None;
    }

    let range = if end > start {
        TextRange {
            start: Point {
                line: start as u32,
                col: 0,
            },
            end: Point {
                line: (end - 1) as u32,
                col: utf16_len(lines[end - 1]),
            },
        }
    } else {
        TextRange {
            start: Point {
                line: start as u32,
                col: 0,
            },
            end: Point {
                line: start as u32,
                col: 0,
            },
        }
    };
    Some(range)
}

fn is_h1(line: &str) -> bool {
    let mut chars = line.chars();
    chars.next() == Some('#') && chars.next().is_some_and(|c| c.is_whitespace())
}

fn is_h2(line: &str) -> bool {
    let mut chars = line.chars();
    chars.next() == Some('#')
        && chars.next() == Some('#')
        && chars.next().is_some_and(|c| c.is_whitespace())
}

fn h2_name(line: &str) -> Option<&str> {
    if is_h2(line) {
        Some(line[2..].trim())
    } else {
        None
    }
}

/// Substring between the first and second double quote, plus the column one
/// past the closing quote. `None` when the line has fewer than two quotes.
fn extract_quoted(line: &str) -> Option<(String, u32)> {
    let open = line.find('"')?;
    let close_offset = line[open + 1..].find('"')?;
    let close = open + 1 + close_offset;
    let chosen = line[open + 1..close].to_string();
    Some((chosen, utf16_len(&line[..=close])))
}

fn utf16_len(text: &str) -> u32 {
    text.encode_utf16().count() as u32
}

fn line_range(line_index: usize, line: &str) -> TextRange {
    TextRange {
        start: Point {
            line: line_index as u32,
            col: 0,
        },
        end: Point {
            line: line_index as u32,
            col: utf16_len(line),
        },
    }
}
