// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Error types, diagnostics, and reporting for the assembler.

use std::fmt;

/// Categories of assembler errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsmErrorKind {
    Assembler,
    UnknownMnemonic,
    InvalidRegister,
    MalformedOperand,
    DuplicateLabel,
    Cli,
    Image,
    Io,
}

/// An assembler error with a kind and message.
#[derive(Debug, Clone)]
pub struct AsmError {
    kind: AsmErrorKind,
    message: String,
}

impl AsmError {
    pub fn new(kind: AsmErrorKind, msg: &str, param: Option<&str>) -> Self {
        Self {
            kind,
            message: format_error(msg, param),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> AsmErrorKind {
        self.kind
    }
}

impl fmt::Display for AsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AsmError {}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A diagnostic message with source location and context.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub(crate) line: u32,
    pub(crate) severity: Severity,
    pub(crate) error: AsmError,
}

impl Diagnostic {
    pub fn new(line: u32, severity: Severity, error: AsmError) -> Self {
        Self {
            line,
            severity,
            error,
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn error(&self) -> &AsmError {
        &self.error
    }

    pub fn format(&self) -> String {
        let sev = severity_tag(self.severity);
        format!("{}: {} - {}", self.line, sev, self.error.message())
    }

    /// Render with the raw source line, in the form
    /// `NNNN: ERROR` / `  NNN | <source>` / `ERROR: <message>`.
    pub fn format_with_context(&self, lines: Option<&[String]>, use_color: bool) -> String {
        let sev = severity_tag(self.severity);
        let sev_colored = if use_color {
            format!("\x1b[31m{sev}\x1b[0m")
        } else {
            sev.to_string()
        };

        let mut out = String::new();
        out.push_str(&format!("{}: {sev_colored}\n", self.line));
        for line in build_context_lines(self.line, lines) {
            out.push_str(&line);
            out.push('\n');
        }
        out.push_str(&format!("{sev_colored}: {}", self.error.message()));
        out
    }
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Warning => "WARNING",
        Severity::Error => "ERROR",
    }
}

/// Report from a successful assembly run.
#[derive(Debug)]
pub struct AsmRunReport {
    diagnostics: Vec<Diagnostic>,
    source_lines: Vec<String>,
    output_path: String,
    program_size: usize,
}

impl AsmRunReport {
    pub fn new(
        diagnostics: Vec<Diagnostic>,
        source_lines: Vec<String>,
        output_path: String,
        program_size: usize,
    ) -> Self {
        Self {
            diagnostics,
            source_lines,
            output_path,
            program_size,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn source_lines(&self) -> &[String] {
        &self.source_lines
    }

    pub fn output_path(&self) -> &str {
        &self.output_path
    }

    pub fn program_size(&self) -> usize {
        self.program_size
    }
}

/// Error from a failed assembly run.
#[derive(Debug)]
pub struct AsmRunError {
    error: AsmError,
    diagnostics: Vec<Diagnostic>,
    source_lines: Vec<String>,
}

impl AsmRunError {
    pub fn new(error: AsmError, diagnostics: Vec<Diagnostic>, source_lines: Vec<String>) -> Self {
        Self {
            error,
            diagnostics,
            source_lines,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn source_lines(&self) -> &[String] {
        &self.source_lines
    }
}

impl fmt::Display for AsmRunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for AsmRunError {}

/// Pass statistics.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassCounts {
    pub lines: u32,
    pub errors: u32,
}

impl PassCounts {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Build context lines for error display.
pub fn build_context_lines(line_num: u32, lines: Option<&[String]>) -> Vec<String> {
    let line_idx = line_num.saturating_sub(1) as usize;
    let text = lines
        .and_then(|lines| lines.get(line_idx))
        .map(|line| line.as_str())
        .unwrap_or("<source unavailable>");
    vec![format!("{:>5} | {}", line_num, text)]
}

/// Format an error message with an optional parameter.
pub fn format_error(msg: &str, param: Option<&str>) -> String {
    match param {
        Some(p) => format!("{msg}: {p}"),
        None => msg.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_format_includes_line_and_severity() {
        let err = AsmError::new(AsmErrorKind::UnknownMnemonic, "Unknown mnemonic", Some("FOO"));
        let diag = Diagnostic::new(12, Severity::Error, err);
        assert_eq!(diag.format(), "12: ERROR - Unknown mnemonic: FOO");
    }

    #[test]
    fn format_with_context_shows_raw_source_line() {
        let err = AsmError::new(AsmErrorKind::InvalidRegister, "Invalid register", Some("R9"));
        let diag = Diagnostic::new(2, Severity::Error, err);
        let lines = vec!["HALT".to_string(), "PUSH R9".to_string()];
        let text = diag.format_with_context(Some(lines.as_slice()), false);
        assert_eq!(text, "2: ERROR\n    2 | PUSH R9\nERROR: Invalid register: R9");
    }

    #[test]
    fn format_with_context_handles_missing_source() {
        let err = AsmError::new(AsmErrorKind::MalformedOperand, "Malformed operand", None);
        let diag = Diagnostic::new(9, Severity::Warning, err);
        let text = diag.format_with_context(None, false);
        assert!(text.contains("<source unavailable>"));
        assert!(text.starts_with("9: WARNING"));
    }
}
