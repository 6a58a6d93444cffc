use arch::Word;
use indexmap::IndexMap;

/// Address of the first word of each instruction -> source line.
/// Only for diagnostics; the machine never sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineMap(IndexMap<Word, usize>);

impl LineMap {
    pub fn new() -> Self {
        LineMap(IndexMap::new())
    }

    pub fn insert(&mut self, address: Word, line: usize) {
        self.0.insert(address, line);
    }

    pub fn get(&self, address: Word) -> Option<usize> {
        self.0.get(&address).copied()
    }

    /// Entries in address order.
    pub fn iter(&self) -> impl Iterator<Item = (Word, usize)> + '_ {
        self.0.iter().map(|(addr, line)| (*addr, *line))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Source line of the instruction that covers `address`.
    pub fn line_of(&self, address: Word) -> Option<usize> {
        self.iter()
            .take_while(|(start, _)| *start <= address)
            .last()
            .map(|(_, line)| line)
    }
}
