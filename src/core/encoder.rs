// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Opcode table, register set, and instruction encoding.
//!
//! Every mnemonic has a fixed operand layout; the encoded length of an
//! instruction depends only on its mnemonic, never on the operand values.
//! Pass 1 therefore uses [`length`] alone, which does not look at the
//! argument tokens at all. Full validation and byte emission happen in
//! [`encode`], which needs the completed symbol table.

use crate::core::error::{AsmError, AsmErrorKind};
use crate::core::symbol_table::SymbolTable;

/// Fixed operand shape of a mnemonic. The opcode byte is always emitted
/// first; 16-bit values are little-endian.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandLayout {
    /// Register, 16-bit immediate. 4 bytes.
    RegImm,
    /// Register, register. 3 bytes.
    RegReg,
    /// Register, 16-bit address-or-immediate. 4 bytes.
    RegAddr,
    /// 16-bit address-or-immediate. 3 bytes.
    Addr,
    /// Register only. 2 bytes.
    Reg,
    /// No operands. 1 byte.
    None,
}

impl OperandLayout {
    /// Total encoded size including the opcode byte.
    pub fn total_bytes(self) -> u16 {
        match self {
            OperandLayout::RegImm | OperandLayout::RegAddr => 4,
            OperandLayout::RegReg | OperandLayout::Addr => 3,
            OperandLayout::Reg => 2,
            OperandLayout::None => 1,
        }
    }
}

pub struct InstructionEntry {
    pub mnemonic: &'static str,
    pub opcode: u8,
    pub layout: OperandLayout,
}

/// The complete instruction set. Opcode values are part of the VM's binary
/// interface and are not contiguous.
pub const INSTRUCTION_TABLE: [InstructionEntry; 18] = [
    InstructionEntry { mnemonic: "LOAD", opcode: 0x01, layout: OperandLayout::RegImm },
    InstructionEntry { mnemonic: "ADD", opcode: 0x02, layout: OperandLayout::RegReg },
    InstructionEntry { mnemonic: "SUB", opcode: 0x03, layout: OperandLayout::RegReg },
    InstructionEntry { mnemonic: "LOADM", opcode: 0x04, layout: OperandLayout::RegAddr },
    InstructionEntry { mnemonic: "STORE", opcode: 0x05, layout: OperandLayout::RegAddr },
    InstructionEntry { mnemonic: "JMP", opcode: 0x06, layout: OperandLayout::Addr },
    InstructionEntry { mnemonic: "JZ", opcode: 0x07, layout: OperandLayout::Addr },
    InstructionEntry { mnemonic: "PRINT", opcode: 0x08, layout: OperandLayout::Reg },
    InstructionEntry { mnemonic: "PUSH", opcode: 0x09, layout: OperandLayout::Reg },
    InstructionEntry { mnemonic: "POP", opcode: 0x0A, layout: OperandLayout::Reg },
    InstructionEntry { mnemonic: "CALL", opcode: 0x0B, layout: OperandLayout::Addr },
    InstructionEntry { mnemonic: "RET", opcode: 0x0C, layout: OperandLayout::None },
    InstructionEntry { mnemonic: "IN", opcode: 0x0D, layout: OperandLayout::Reg },
    InstructionEntry { mnemonic: "OUT", opcode: 0x0E, layout: OperandLayout::Reg },
    InstructionEntry { mnemonic: "CMP", opcode: 0x0F, layout: OperandLayout::RegReg },
    InstructionEntry { mnemonic: "LOADR", opcode: 0x10, layout: OperandLayout::RegReg },
    InstructionEntry { mnemonic: "STORER", opcode: 0x11, layout: OperandLayout::RegReg },
    InstructionEntry { mnemonic: "HALT", opcode: 0xFF, layout: OperandLayout::None },
];

pub const NUM_REGISTERS: u8 = 8;

/// Look up a mnemonic in the instruction table, case-insensitively.
pub fn lookup(mnemonic: &str) -> Option<&'static InstructionEntry> {
    INSTRUCTION_TABLE
        .iter()
        .find(|entry| entry.mnemonic.eq_ignore_ascii_case(mnemonic))
}

/// Resolve a register token `R0`..`R7` to its index, case-insensitively.
pub fn register_index(token: &str) -> Option<u8> {
    let digit = token
        .strip_prefix('R')
        .or_else(|| token.strip_prefix('r'))?;
    let index: u8 = digit.parse().ok()?;
    // "R07" is not a register name
    if digit.len() != 1 || index >= NUM_REGISTERS {
        return None;
    }
    Some(index)
}

/// Byte length of an instruction, from the layout table alone.
///
/// Argument tokens are not inspected; only an unknown mnemonic can fail
/// here. Register and operand errors surface in [`encode`].
pub fn length(mnemonic: &str) -> Result<u16, AsmError> {
    let entry = lookup(mnemonic).ok_or_else(|| unknown_mnemonic(mnemonic))?;
    Ok(entry.layout.total_bytes())
}

/// Full byte encoding of an instruction, with the completed symbol table.
pub fn encode(mnemonic: &str, args: &[String], symbols: &SymbolTable) -> Result<Vec<u8>, AsmError> {
    let entry = lookup(mnemonic).ok_or_else(|| unknown_mnemonic(mnemonic))?;
    let mut bytes = Vec::with_capacity(entry.layout.total_bytes() as usize);
    bytes.push(entry.opcode);

    match entry.layout {
        OperandLayout::RegImm => {
            bytes.push(parse_register(args.first())?);
            let value = parse_literal(args.get(1))?;
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        OperandLayout::RegReg => {
            bytes.push(parse_register(args.first())?);
            bytes.push(parse_register(args.get(1))?);
        }
        OperandLayout::RegAddr => {
            bytes.push(parse_register(args.first())?);
            let value = resolve_addr(args.get(1), symbols)?;
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        OperandLayout::Addr => {
            let value = resolve_addr(args.first(), symbols)?;
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        OperandLayout::Reg => {
            bytes.push(parse_register(args.first())?);
        }
        OperandLayout::None => {}
    }

    Ok(bytes)
}

fn unknown_mnemonic(mnemonic: &str) -> AsmError {
    AsmError::new(
        AsmErrorKind::UnknownMnemonic,
        "Unknown mnemonic",
        Some(mnemonic),
    )
}

fn parse_register(token: Option<&String>) -> Result<u8, AsmError> {
    let token = token.map(String::as_str).ok_or_else(|| {
        AsmError::new(AsmErrorKind::InvalidRegister, "Missing register operand", None)
    })?;
    register_index(token)
        .ok_or_else(|| AsmError::new(AsmErrorKind::InvalidRegister, "Invalid register", Some(token)))
}

fn parse_literal(token: Option<&String>) -> Result<u16, AsmError> {
    let token = token.map(String::as_str).ok_or_else(|| {
        AsmError::new(AsmErrorKind::MalformedOperand, "Missing operand", None)
    })?;
    token.parse::<u16>().map_err(|_| {
        AsmError::new(AsmErrorKind::MalformedOperand, "Malformed operand", Some(token))
    })
}

/// Address-or-immediate resolution: a known label yields its address,
/// anything else must parse as a base-10 integer. `LOADM` and `STORE`
/// share this rule with the jump instructions, so a label can deliberately
/// double as a fixed memory address.
fn resolve_addr(token: Option<&String>, symbols: &SymbolTable) -> Result<u16, AsmError> {
    let token = token.map(String::as_str).ok_or_else(|| {
        AsmError::new(AsmErrorKind::MalformedOperand, "Missing operand", None)
    })?;
    if let Some(addr) = symbols.lookup(token) {
        return Ok(addr);
    }
    token.parse::<u16>().map_err(|_| {
        AsmError::new(AsmErrorKind::MalformedOperand, "Malformed operand", Some(token))
    })
}
