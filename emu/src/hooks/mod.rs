pub mod console;
pub mod dump;

use crate::machine::{Executed, StackMachine};

/// Side effects observed around the fetch-execute loop.
pub trait Hook {
    fn init(&mut self, machine: &StackMachine);
    fn exec(&mut self, time: u64, executed: &Executed, machine: &StackMachine);
}
