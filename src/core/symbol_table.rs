// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// Symbol table for labels.

use std::io::{self, Write};

#[derive(Debug, Clone)]
pub struct SymbolTableEntry {
    pub name: String,
    pub addr: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefineResult {
    Ok,
    Duplicate,
}

/// Label name to byte-address map, built once during pass 1 and read-only
/// during pass 2. Label names are case-sensitive.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: Vec<SymbolTableEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn define(&mut self, name: &str, addr: u16) -> DefineResult {
        if self.entries.iter().any(|entry| entry.name == name) {
            return DefineResult::Duplicate;
        }
        self.entries.push(SymbolTableEntry {
            name: name.to_string(),
            addr,
        });
        DefineResult::Ok
    }

    pub fn lookup(&self, name: &str) -> Option<u16> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.addr)
    }

    pub fn dump<W: Write>(&self, mut out: W) -> io::Result<()> {
        for entry in &self.entries {
            writeln!(
                out,
                "{:<16}: {:04x} ({})",
                entry.name, entry.addr, entry.addr
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DefineResult, SymbolTable};

    #[test]
    fn define_and_lookup() {
        let mut table = SymbolTable::new();
        assert_eq!(table.define("start", 0), DefineResult::Ok);
        assert_eq!(table.define("loop", 0x0010), DefineResult::Ok);
        assert_eq!(table.lookup("start"), Some(0));
        assert_eq!(table.lookup("loop"), Some(0x0010));
        assert_eq!(table.lookup("missing"), None);
    }

    #[test]
    fn redefinition_is_rejected() {
        let mut table = SymbolTable::new();
        assert_eq!(table.define("start", 0), DefineResult::Ok);
        assert_eq!(table.define("start", 4), DefineResult::Duplicate);
        assert_eq!(table.lookup("start"), Some(0));
    }

    #[test]
    fn labels_are_case_sensitive() {
        let mut table = SymbolTable::new();
        assert_eq!(table.define("Loop", 8), DefineResult::Ok);
        assert_eq!(table.lookup("loop"), None);
        assert_eq!(table.lookup("Loop"), Some(8));
    }

    #[test]
    fn dump_lists_entries_in_definition_order() {
        let mut table = SymbolTable::new();
        table.define("start", 0);
        table.define("data", 0x00ff);
        let mut out = Vec::new();
        table.dump(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("start"));
        assert!(lines[1].contains("00ff (255)"));
    }
}
