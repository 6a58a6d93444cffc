//! Shared definitions of the Footnote stack machine.
//!
//! Everything the assembler and the emulator must agree on lives here:
//! the machine word, the opcode table and the textual image format that
//! carries an assembled program from one to the other.

pub mod alu;
pub mod image;
pub mod op;

/// Machine word. Instructions, operands, data and addresses are all words.
pub type Word = i32;

/// Memory capacity used when nothing else is requested.
pub const DEFAULT_MEMORY_SIZE: usize = 256;

/// Largest memory whose every address, and the empty stack pointer, fit in a
/// word.
pub const MAX_MEMORY_SIZE: usize = Word::MAX as usize;
