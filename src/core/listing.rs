// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Listing file generation.

use std::io::Write;

use crate::core::error::{build_context_lines, PassCounts};
use crate::core::symbol_table::SymbolTable;

/// Data for a single listing line.
pub struct ListingLine<'a> {
    pub addr: u16,
    pub bytes: &'a [u8],
    pub line_num: u32,
    pub source: &'a str,
}

/// Writer for listing file output.
pub struct ListingWriter<W: Write> {
    out: W,
}

impl<W: Write> ListingWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn header(&mut self, title: &str) -> std::io::Result<()> {
        writeln!(self.out, "{title}")?;
        writeln!(self.out, "ADDR    BYTES        LINE  SOURCE")?;
        writeln!(self.out, "------  -----------  ----  ------")?;
        Ok(())
    }

    pub fn write_line(&mut self, line: ListingLine<'_>) -> std::io::Result<()> {
        let (loc, bytes_col) = if line.bytes.is_empty() {
            ("----".to_string(), String::new())
        } else {
            (format!("{:04X}", line.addr), format_bytes(line.bytes))
        };

        writeln!(
            self.out,
            "{:<6}  {:<11}  {:>4}  {}",
            loc, bytes_col, line.line_num, line.source
        )
    }

    pub fn write_diagnostic(
        &mut self,
        kind: &str,
        msg: &str,
        line_num: u32,
        source_lines: &[String],
    ) -> std::io::Result<()> {
        let context = build_context_lines(line_num, Some(source_lines));
        for line in context {
            writeln!(self.out, "{line}")?;
        }
        writeln!(self.out, "{kind}: {msg}")
    }

    pub fn footer(
        &mut self,
        counts: &PassCounts,
        symbols: &SymbolTable,
        total_bytes: usize,
    ) -> std::io::Result<()> {
        writeln!(
            self.out,
            "\nLines: {}  Errors: {}",
            counts.lines, counts.errors
        )?;
        writeln!(self.out, "\nSYMBOL TABLE\n")?;
        symbols.dump(&mut self.out)?;
        writeln!(self.out, "\nTotal program is {} bytes", total_bytes)?;
        Ok(())
    }
}

/// Format bytes as hex string for listing.
pub fn format_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
