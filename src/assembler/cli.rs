// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Command-line interface parsing and argument validation.

use std::path::PathBuf;

use clap::Parser;

use crate::core::error::{AsmError, AsmErrorKind, AsmRunError};

pub const VERSION: &str = "1.0";

const LONG_ABOUT: &str = "Two-pass assembler for the forgevm instruction set.

Reads SOURCE, resolves labels across the whole file (forward references
included), and writes the flat binary instruction stream to OUTPUT.
Nothing is written when assembly fails.
Use -l/--list to also emit a listing with addresses, encoded bytes, and
the symbol table.";

#[derive(Parser, Debug)]
#[command(
    name = "forgevm-asm",
    version = VERSION,
    about = "Two-pass assembler for the forgevm instruction set",
    long_about = LONG_ABOUT
)]
pub struct Cli {
    #[arg(value_name = "SOURCE", help = "Input assembly source file")]
    pub source: PathBuf,
    #[arg(value_name = "OUTPUT", help = "Output binary file")]
    pub output: PathBuf,
    #[arg(
        short = 'l',
        long = "list",
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = "",
        long_help = "Emit a listing file. FILE is optional; when omitted, the output base is used and a .lst extension is added."
    )]
    pub list_name: Option<String>,
}

/// Validated CLI configuration.
#[derive(Debug)]
pub struct CliConfig {
    pub source: PathBuf,
    pub output: PathBuf,
    pub list_path: Option<String>,
}

/// Validate CLI arguments and return parsed configuration.
pub fn validate_cli(cli: &Cli) -> Result<CliConfig, AsmRunError> {
    if !cli.source.is_file() {
        let source = cli.source.to_string_lossy();
        return Err(AsmRunError::new(
            AsmError::new(AsmErrorKind::Cli, "Input file not found", Some(source.as_ref())),
            Vec::new(),
            Vec::new(),
        ));
    }

    let out_base = output_base(&cli.output);
    let list_path = resolve_output_path(&out_base, cli.list_name.clone(), "lst");

    Ok(CliConfig {
        source: cli.source.clone(),
        output: cli.output.clone(),
        list_path,
    })
}

/// Output base name: the output path with its extension dropped.
pub fn output_base(output: &PathBuf) -> String {
    output.with_extension("").to_string_lossy().to_string()
}

pub fn resolve_output_path(base: &str, name: Option<String>, extension: &str) -> Option<String> {
    let name = name?;
    if name.is_empty() {
        return Some(format!("{base}.{extension}"));
    }
    let mut path = PathBuf::from(&name);
    if path.extension().is_none() {
        path = PathBuf::from(format!("{name}.{extension}"));
    }
    Some(path.to_string_lossy().to_string())
}
