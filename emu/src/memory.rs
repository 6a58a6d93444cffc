use arch::Word;

use crate::error::MemoryError;

/// Flat word memory shared by code, data and the operand stack.
/// Every access is bounds checked here and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    cells: Vec<Word>,
}

impl Memory {
    pub fn new(capacity: usize) -> Self {
        Memory {
            cells: vec![0; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    fn index(&self, address: Word) -> Result<usize, MemoryError> {
        usize::try_from(address)
            .ok()
            .filter(|idx| *idx < self.cells.len())
            .ok_or(MemoryError::OutOfBounds {
                address,
                capacity: self.cells.len(),
            })
    }

    pub fn read(&self, address: Word) -> Result<Word, MemoryError> {
        let idx = self.index(address)?;
        Ok(self.cells[idx])
    }

    pub fn write(&mut self, address: Word, value: Word) -> Result<(), MemoryError> {
        let idx = self.index(address)?;
        self.cells[idx] = value;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    pub fn as_slice(&self) -> &[Word] {
        &self.cells
    }
}
