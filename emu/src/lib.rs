//! Stack machine for the Footnote toolchain.
//!
//! Code, data and the operand stack share one bounds-checked [`Memory`].
//! A [`StackMachine`] moves through `Constructed -> Loaded -> Running` and
//! ends either `Halted` or `Faulted`; there is no way back from either.

pub mod config;
pub mod error;
pub mod hooks;
pub mod machine;
pub mod memory;

pub use config::MachineConfig;
pub use error::{Fault, FaultKind, MachineError, MemoryError};
pub use machine::{Executed, StackMachine, Status};
pub use memory::Memory;
