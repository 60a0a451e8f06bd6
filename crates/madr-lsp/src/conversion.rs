//! Conversion utilities between Core types and LSP types

use madr_core::model::{Point, TextRange};
use madr_core::{Diagnostic as CoreDiagnostic, DiagnosticSeverity as CoreSeverity};
use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString, Position, Range};

/// Convert Core Point to LSP Position.
/// Both sides are 0-based with UTF-16 columns, so this is a field rename.
pub fn point_to_lsp_position(point: Point) -> Position {
    Position {
        line: point.line,
        character: point.col,
    }
}

/// Convert Core TextRange to LSP Range
pub fn text_range_to_lsp_range(range: TextRange) -> Range {
    Range {
        start: point_to_lsp_position(range.start),
        end: point_to_lsp_position(range.end),
    }
}

/// Convert Core Diagnostic to LSP Diagnostic
pub fn core_diagnostic_to_lsp_diagnostic(diag: CoreDiagnostic) -> Diagnostic {
    let severity = match diag.severity {
        CoreSeverity::Error => DiagnosticSeverity::ERROR,
        CoreSeverity::Warning => DiagnosticSeverity::WARNING,
    };

    Diagnostic {
        range: text_range_to_lsp_range(diag.range),
        severity: Some(severity),
        code: Some(NumberOrString::String(diag.code)),
        code_description: None,
        source: Some("madr".to_string()),
        message: diag.message,
        related_information: None,
        tags: None,
        data: None,
    }
}

/// Position one past the last character of `text`, for whole-document
/// replacement edits.
pub fn document_end_position(text: &str) -> Position {
    let line = text.matches('\n').count() as u32;
    let last_line = text.rsplit('\n').next().unwrap_or("");
    Position {
        line,
        character: last_line.encode_utf16().count() as u32,
    }
}
