use arch::Word;
use indexmap::IndexMap;
use log::{debug, trace};

use crate::{
    error::Error,
    parser::{Parser, Stmt},
    token::Token,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub address: Word,
    /// Line of the definition.
    pub line: usize,
}

/// Label name -> address, in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    labels: IndexMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            labels: IndexMap::new(),
        }
    }

    /// Bind `name`. A second definition is rejected and the first one kept.
    pub fn insert(&mut self, name: String, address: Word, line: usize) -> Result<(), Error> {
        if let Some(prev) = self.labels.get(&name) {
            return Err(Error::DuplicateSymbol {
                name,
                line,
                first: prev.line,
            });
        }
        self.labels.insert(name, Symbol { address, line });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.labels.get(name)
    }

    pub fn get_val(&self, name: &str) -> Option<Word> {
        self.labels.get(name).map(|symbol| symbol.address)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Symbol)> {
        self.labels.iter().map(|(name, symbol)| (name.as_str(), symbol))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Name of the label bound to `address`, if any.
    pub fn name_at(&self, address: Word) -> Option<&str> {
        self.iter()
            .find(|(_, symbol)| symbol.address == address)
            .map(|(name, _)| name)
    }
}

/// Pass 1: assign addresses and collect label definitions.
///
/// A label is bound to the address counter before it is advanced, so it
/// names the instruction that follows it.
pub fn collect(tokens: &[Token]) -> Result<SymbolTable, Error> {
    let mut symbols = SymbolTable::new();
    let mut pc: Word = 0;

    for line in Parser::new(tokens) {
        let line = line?;
        match line.stmt {
            Stmt::Label(name) => {
                trace!("label `{}` = {}", name, pc);
                symbols.insert(name, pc, line.line)?;
            }
            stmt => {
                let width = Word::try_from(stmt.width())
                    .map_err(|_| Error::AddressOverflow { line: line.line })?;
                pc = pc
                    .checked_add(width)
                    .ok_or(Error::AddressOverflow { line: line.line })?;
            }
        }
    }

    debug!("pass 1: {} label(s), {} word(s)", symbols.len(), pc);
    Ok(symbols)
}
