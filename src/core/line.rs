// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Source line classification.
//!
//! Splits one physical line into its label and instruction parts. The
//! classification is purely lexical and identical in both passes: it never
//! consults the symbol table or the address counter.

/// Classified form of one source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Blank line, or nothing left once the comment is stripped.
    Empty,
    /// A label definition with nothing after it.
    LabelOnly { name: String },
    /// A label definition followed by an instruction on the same line.
    LabelWithInstruction {
        name: String,
        mnemonic: String,
        args: Vec<String>,
    },
    /// A plain instruction.
    Instruction { mnemonic: String, args: Vec<String> },
}

impl Line {
    /// The instruction part of this line, if any.
    pub fn instruction(&self) -> Option<(&str, &[String])> {
        match self {
            Line::LabelWithInstruction { mnemonic, args, .. }
            | Line::Instruction { mnemonic, args } => Some((mnemonic, args)),
            _ => None,
        }
    }

    /// The label defined on this line, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            Line::LabelOnly { name } | Line::LabelWithInstruction { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Classify one raw source line.
///
/// Everything from the first `;` onward is a comment and ignored, wherever
/// it appears on the line. Tokens are whitespace-delimited; trailing commas
/// on argument tokens are stripped. A token ending in `:` introduces a label.
pub fn classify(line: &str) -> Line {
    let line = match line.find(';') {
        Some(pos) => &line[..pos],
        None => line,
    };
    let mut tokens = line.split_whitespace();
    let first = match tokens.next() {
        Some(token) => token,
        None => return Line::Empty,
    };

    if let Some(name) = first.strip_suffix(':') {
        let name = name.to_string();
        match tokens.next() {
            Some(mnemonic) => Line::LabelWithInstruction {
                name,
                mnemonic: mnemonic.to_string(),
                args: collect_args(tokens),
            },
            None => Line::LabelOnly { name },
        }
    } else {
        Line::Instruction {
            mnemonic: first.to_string(),
            args: collect_args(tokens),
        }
    }
}

fn collect_args<'a, I: Iterator<Item = &'a str>>(tokens: I) -> Vec<String> {
    tokens
        .map(|token| token.trim_end_matches(',').to_string())
        .collect()
}
