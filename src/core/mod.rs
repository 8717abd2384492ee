// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Assembler core for the forgevm fixed-format instruction set.
//!
//! # Components
//!
//! - [`line`] - Source line classification (labels, instructions, comments)
//! - [`encoder`] - Opcode table, register set, and instruction encoding
//! - [`symbol_table`] - Label address management
//! - [`error`] - Error values, diagnostics, and run reports
//! - [`listing`] - Listing file generation

pub mod encoder;
pub mod error;
pub mod line;
pub mod listing;
pub mod symbol_table;

// Re-exports for convenience
pub use error::{AsmError, AsmErrorKind, AsmRunError, AsmRunReport, Diagnostic, Severity};
pub use line::Line;
pub use symbol_table::SymbolTable;
