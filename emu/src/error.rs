use arch::{image::ImageError, Word};
use thiserror::Error;

use crate::machine::Status;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryError {
    #[error("address {address} is outside memory of {capacity} word(s)")]
    OutOfBounds { address: Word, capacity: usize },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    #[error("memory access out of bounds at address {address}")]
    OutOfBounds { address: Word },

    #[error("program counter {address} left memory without a halt")]
    FetchOutOfBounds { address: Word },

    #[error("pop from an empty stack")]
    StackUnderflow,

    #[error("division by zero")]
    DivideByZero,

    #[error("invalid opcode {0}")]
    InvalidOpcode(Word),

    #[error("step limit of {0} exhausted")]
    StepLimit(u64),
}

impl From<MemoryError> for FaultKind {
    fn from(err: MemoryError) -> Self {
        match err {
            MemoryError::OutOfBounds { address, .. } => FaultKind::OutOfBounds { address },
        }
    }
}

/// Abnormal end of a run. `pc` is the address of the faulting instruction.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} (pc = {pc})")]
pub struct Fault {
    pub kind: FaultKind,
    pub pc: Word,
}

#[derive(Error, Debug)]
pub enum MachineError {
    #[error("program of {size} word(s) does not fit in memory of {capacity} word(s)")]
    ProgramTooLarge { size: usize, capacity: usize },

    #[error("memory of {capacity} word(s) exceeds the limit of {max}")]
    CapacityTooLarge { capacity: usize, max: usize },

    #[error("cannot {action} a machine that is {status}")]
    InvalidState {
        action: &'static str,
        status: Status,
    },

    #[error("Failed to load image")]
    Image(#[from] ImageError),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error(transparent)]
    Fault(#[from] Fault),
}
