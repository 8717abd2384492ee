// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Two-pass assembler driver.
//!
//! Pass 1 walks all lines with the length-only encoder and records every
//! label's address; pass 2 walks them again with the completed symbol
//! table and emits the final byte stream. Both backward and forward label
//! references are valid because pass 1 completes before any byte is
//! encoded. The output file is written only after pass 2 succeeds in
//! full, so a failed run never leaves a truncated artifact behind.

pub mod cli;


use std::fs::{self, File};
use std::io::{self, Write};

use clap::Parser;

use crate::core::encoder;
use crate::core::error::{
    AsmError, AsmErrorKind, AsmRunError, AsmRunReport, Diagnostic, PassCounts, Severity,
};
use crate::core::line;
use crate::core::listing::{ListingLine, ListingWriter};
use crate::core::symbol_table::{DefineResult, SymbolTable};

use cli::{validate_cli, Cli, CliConfig};

pub use cli::VERSION;

/// Run the assembler with command-line arguments.
pub fn run() -> Result<AsmRunReport, AsmRunError> {
    let cli = Cli::parse();
    let config = validate_cli(&cli)?;
    run_one(&config)
}

/// Assemble one source file per the validated configuration.
pub fn run_one(config: &CliConfig) -> Result<AsmRunReport, AsmRunError> {
    let contents = fs::read_to_string(&config.source).map_err(|err| {
        let detail = err.to_string();
        AsmRunError::new(
            AsmError::new(AsmErrorKind::Io, "Error reading source file", Some(detail.as_str())),
            Vec::new(),
            Vec::new(),
        )
    })?;
    let lines: Vec<String> = contents.lines().map(|s| s.to_string()).collect();

    let mut assembler = Assembler::new();
    let pass1 = assembler.pass1(&lines);
    if pass1.errors > 0 {
        return Err(AsmRunError::new(
            AsmError::new(
                AsmErrorKind::Assembler,
                "Errors detected in source. No output file created.",
                None,
            ),
            assembler.take_diagnostics(),
            lines,
        ));
    }

    let mut list_output: Box<dyn Write> = match &config.list_path {
        Some(path) => Box::new(File::create(path).map_err(|_| {
            AsmRunError::new(
                AsmError::new(
                    AsmErrorKind::Io,
                    "Error opening file for write",
                    Some(path.as_str()),
                ),
                Vec::new(),
                Vec::new(),
            )
        })?),
        None => Box::new(io::sink()),
    };
    let mut listing = ListingWriter::new(&mut *list_output);
    let header_title = format!("forgevm Assembler v{VERSION}");
    if let Err(err) = listing.header(&header_title) {
        return Err(io_run_error(&err, assembler.take_diagnostics(), lines));
    }

    let pass2 = match assembler.pass2(&lines, &mut listing) {
        Ok(counts) => counts,
        Err(err) => return Err(io_run_error(&err, assembler.take_diagnostics(), lines)),
    };
    if pass2.errors > 0 {
        return Err(AsmRunError::new(
            AsmError::new(
                AsmErrorKind::Assembler,
                "Errors detected in source. No output file created.",
                None,
            ),
            assembler.take_diagnostics(),
            lines,
        ));
    }

    if let Err(err) = listing.footer(&pass2, assembler.symbols(), assembler.program().len()) {
        return Err(io_run_error(&err, assembler.take_diagnostics(), lines));
    }

    let output_path = config.output.to_string_lossy().to_string();
    fs::write(&config.output, assembler.program()).map_err(|_| {
        AsmRunError::new(
            AsmError::new(
                AsmErrorKind::Io,
                "Error opening file for write",
                Some(output_path.as_str()),
            ),
            Vec::new(),
            lines.clone(),
        )
    })?;

    let program_size = assembler.program().len();
    Ok(AsmRunReport::new(
        assembler.take_diagnostics(),
        lines,
        output_path,
        program_size,
    ))
}

fn io_run_error(
    err: &io::Error,
    diagnostics: Vec<Diagnostic>,
    source_lines: Vec<String>,
) -> AsmRunError {
    AsmRunError::new(
        AsmError::new(AsmErrorKind::Io, &err.to_string(), None),
        diagnostics,
        source_lines,
    )
}

/// Core assembler state. A fresh instance is created per assembly run;
/// nothing persists across runs.
pub struct Assembler {
    symbols: SymbolTable,
    program: Vec<u8>,
    diagnostics: Vec<Diagnostic>,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
            program: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// The assembled byte stream. Complete only after a clean pass 2.
    pub fn program(&self) -> &[u8] {
        &self.program
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Address pass: record every label's address using instruction
    /// lengths only. A label sharing a line with an instruction gets the
    /// address of that instruction, not the address after it.
    ///
    /// The first error aborts the pass: a duplicate label, an unknown
    /// mnemonic (the only thing the length-only encoder can reject;
    /// register and operand errors stay invisible until pass 2), or an
    /// address counter that would pass the 16-bit address space.
    pub fn pass1(&mut self, lines: &[String]) -> PassCounts {
        let mut addr: u16 = 0;
        let mut counts = PassCounts::new();
        counts.lines = lines.len() as u32;

        for (idx, src) in lines.iter().enumerate() {
            let line_num = idx as u32 + 1;
            let classified = line::classify(src);
            if let Some(name) = classified.label() {
                if self.symbols.define(name, addr) == DefineResult::Duplicate {
                    self.report(line_num, AsmErrorKind::DuplicateLabel, "Duplicate label", Some(name));
                    counts.errors += 1;
                    return counts;
                }
            }
            if let Some((mnemonic, _)) = classified.instruction() {
                match encoder::length(mnemonic) {
                    Ok(len) => match addr.checked_add(len) {
                        Some(next) => addr = next,
                        None => {
                            self.report(
                                line_num,
                                AsmErrorKind::Assembler,
                                "Program exceeds 65536 bytes",
                                None,
                            );
                            counts.errors += 1;
                            return counts;
                        }
                    },
                    Err(err) => {
                        self.diagnostics
                            .push(Diagnostic::new(line_num, Severity::Error, err));
                        counts.errors += 1;
                        return counts;
                    }
                }
            }
        }

        counts
    }

    /// Encode pass: emit the final byte stream with the completed symbol
    /// table. Aborts on the first encoder failure, leaving the program
    /// buffer incomplete; the caller must not write it out in that case.
    pub fn pass2<W: Write>(
        &mut self,
        lines: &[String],
        listing: &mut ListingWriter<W>,
    ) -> io::Result<PassCounts> {
        let mut addr: u16 = 0;
        let mut counts = PassCounts::new();
        counts.lines = lines.len() as u32;

        for (idx, src) in lines.iter().enumerate() {
            let line_num = idx as u32 + 1;
            let classified = line::classify(src);
            let Some((mnemonic, args)) = classified.instruction() else {
                listing.write_line(ListingLine {
                    addr,
                    bytes: &[],
                    line_num,
                    source: src,
                })?;
                continue;
            };

            match encoder::encode(mnemonic, args, &self.symbols) {
                Ok(bytes) => {
                    listing.write_line(ListingLine {
                        addr,
                        bytes: &bytes,
                        line_num,
                        source: src,
                    })?;
                    match addr.checked_add(bytes.len() as u16) {
                        Some(next) => addr = next,
                        None => {
                            let msg = "Program exceeds 65536 bytes";
                            listing.write_diagnostic("ERROR", msg, line_num, lines)?;
                            self.report(line_num, AsmErrorKind::Assembler, msg, None);
                            counts.errors += 1;
                            return Ok(counts);
                        }
                    }
                    self.program.extend_from_slice(&bytes);
                }
                Err(err) => {
                    listing.write_diagnostic("ERROR", err.message(), line_num, lines)?;
                    self.diagnostics
                        .push(Diagnostic::new(line_num, Severity::Error, err));
                    counts.errors += 1;
                    return Ok(counts);
                }
            }
        }

        Ok(counts)
    }

    fn report(&mut self, line_num: u32, kind: AsmErrorKind, msg: &str, param: Option<&str>) {
        let err = AsmError::new(kind, msg, param);
        self.diagnostics
            .push(Diagnostic::new(line_num, Severity::Error, err));
    }
}

/// Assemble a full source text in one step. Convenience wrapper used by
/// tests and embedders; the CLI path goes through [`run_one`] for listing
/// and file handling.
pub fn assemble(source: &str) -> Result<Vec<u8>, Diagnostic> {
    let lines: Vec<String> = source.lines().map(|s| s.to_string()).collect();
    let mut assembler = Assembler::new();
    let pass1 = assembler.pass1(&lines);
    if pass1.errors > 0 {
        return Err(first_error(assembler.take_diagnostics()));
    }
    let mut listing = ListingWriter::new(io::sink());
    let pass2 = assembler
        .pass2(&lines, &mut listing)
        .expect("sink writes cannot fail");
    if pass2.errors > 0 {
        return Err(first_error(assembler.take_diagnostics()));
    }
    Ok(assembler.program().to_vec())
}

fn first_error(diagnostics: Vec<Diagnostic>) -> Diagnostic {
    diagnostics
        .into_iter()
        .next()
        .expect("error count is nonzero")
}
