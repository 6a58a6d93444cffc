use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use arch::alu::valu;
use arch::image;
use arch::op::Op;
use arch::{Word, MAX_MEMORY_SIZE};
use log::{debug, info, trace};
use strum::Display;

use crate::config::MachineConfig;
use crate::error::{Fault, FaultKind, MachineError};
use crate::hooks::Hook;
use crate::memory::Memory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    Constructed,
    Loaded,
    Running,
    Halted,
    Faulted(Fault),
}

/// One executed instruction, as reported to hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Executed {
    /// Address the opcode was fetched from.
    pub addr: Word,
    pub op: Op,
}

/// Stack machine over a single memory. The operand stack grows down from the
/// top of memory; `sp == capacity` means the stack is empty.
#[derive(Debug)]
pub struct StackMachine {
    config: MachineConfig,
    memory: Memory,
    pc: Word,
    sp: Word,
    status: Status,
    /// Next free address for incremental loading.
    loaded: usize,
    steps: u64,
    output: Vec<Word>,
}

impl StackMachine {
    /// Fails if `config.capacity` is beyond the word address range.
    pub fn new(config: MachineConfig) -> Result<Self, MachineError> {
        if config.capacity > MAX_MEMORY_SIZE {
            return Err(MachineError::CapacityTooLarge {
                capacity: config.capacity,
                max: MAX_MEMORY_SIZE,
            });
        }
        let memory = Memory::new(config.capacity);
        let mut machine = StackMachine {
            config,
            memory,
            pc: 0,
            sp: 0,
            status: Status::Constructed,
            loaded: 0,
            steps: 0,
            output: vec![],
        };
        machine.reset();
        Ok(machine)
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, MachineError> {
        Self::new(MachineConfig::with_capacity(capacity))
    }

    /// `capacity` fits in a word, checked in `new`.
    fn stack_base(&self) -> Word {
        self.memory.capacity() as Word
    }

    fn reset(&mut self) {
        self.memory.clear();
        self.pc = 0;
        self.sp = self.stack_base();
        self.loaded = 0;
        self.steps = 0;
        self.output.clear();
    }

    fn check_loadable(&self) -> Result<(), MachineError> {
        match self.status {
            Status::Constructed | Status::Loaded => Ok(()),
            status => Err(MachineError::InvalidState {
                action: "load",
                status,
            }),
        }
    }
}

// Loading
impl StackMachine {
    /// Copy `program` to address 0. Memory and registers start fresh.
    pub fn load(&mut self, program: &[Word]) -> Result<(), MachineError> {
        self.check_loadable()?;
        let capacity = self.memory.capacity();
        if program.len() > capacity {
            return Err(MachineError::ProgramTooLarge {
                size: program.len(),
                capacity,
            });
        }

        self.reset();
        for (addr, word) in (0..).zip(program) {
            self.memory.write(addr, *word).map_err(|_| MachineError::ProgramTooLarge {
                size: program.len(),
                capacity,
            })?;
        }
        self.loaded = program.len();
        self.status = Status::Loaded;
        debug!("loaded {} word(s) into {} word(s) of memory", program.len(), capacity);
        Ok(())
    }

    /// Append one word at the next free address.
    pub fn load_word(&mut self, word: Word) -> Result<(), MachineError> {
        self.check_loadable()?;
        let capacity = self.memory.capacity();
        let size = self.loaded + 1;
        let too_large = || MachineError::ProgramTooLarge { size, capacity };
        if self.loaded >= capacity {
            return Err(too_large());
        }
        let addr = Word::try_from(self.loaded).map_err(|_| too_large())?;
        self.memory.write(addr, word).map_err(|_| too_large())?;
        self.loaded = size;
        self.status = Status::Loaded;
        Ok(())
    }

    /// Load a program in image format.
    pub fn load_image<R: BufRead>(&mut self, reader: R) -> Result<(), MachineError> {
        let words = image::read(reader)?;
        self.load(&words)
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), MachineError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|err| MachineError::FileOpen(path.display().to_string(), err))?;
        self.load_image(BufReader::new(file))
    }
}

// Execution
impl StackMachine {
    /// Execute until `HALT` or a fault.
    pub fn run(&mut self) -> Result<(), MachineError> {
        self.run_with(&mut [])
    }

    /// Execute until `HALT` or a fault, calling every hook after each
    /// instruction.
    pub fn run_with(&mut self, hooks: &mut [Box<dyn Hook>]) -> Result<(), MachineError> {
        if self.status != Status::Loaded {
            return Err(MachineError::InvalidState {
                action: "run",
                status: self.status,
            });
        }
        for hook in hooks.iter_mut() {
            hook.init(self);
        }
        loop {
            let executed = self.step()?;
            for hook in hooks.iter_mut() {
                hook.exec(self.steps, &executed, self);
            }
            if self.status == Status::Halted {
                info!("halted after {} step(s)", self.steps);
                return Ok(());
            }
        }
    }

    /// One fetch-decode-execute cycle.
    pub fn step(&mut self) -> Result<Executed, MachineError> {
        match self.status {
            Status::Loaded | Status::Running => self.status = Status::Running,
            status => {
                return Err(MachineError::InvalidState {
                    action: "step",
                    status,
                })
            }
        }

        let addr = self.pc;
        let result = match self.config.max_steps {
            Some(max) if self.steps >= max => Err(FaultKind::StepLimit(max)),
            _ => self.exec(),
        };
        match result {
            Ok(op) => {
                self.steps += 1;
                trace!("[{:0>6}] {:>5}: {:<5} sp={}", self.steps, addr, op, self.sp);
                if op == Op::HALT {
                    self.status = Status::Halted;
                }
                Ok(Executed { addr, op })
            }
            Err(kind) => {
                let fault = Fault { kind, pc: addr };
                debug!("fault: {}", fault);
                self.status = Status::Faulted(fault);
                Err(fault.into())
            }
        }
    }

    fn exec(&mut self) -> Result<Op, FaultKind> {
        use Op::*;

        let word = self.fetch()?;
        let op = Op::decode(word).ok_or(FaultKind::InvalidOpcode(word))?;
        match op {
            HALT => {}
            PUSH => {
                let val = self.fetch()?;
                self.push(val)?;
            }
            POP => {
                self.pop()?;
            }
            DUP => {
                let val = self.peek()?;
                self.push(val)?;
            }
            SWAP => {
                let b = self.pop()?;
                let a = self.pop()?;
                self.push(b)?;
                self.push(a)?;
            }
            ADD | SUB | MUL | DIV | MOD | EQ | LT | GT => {
                let b = self.pop()?;
                let a = self.pop()?;
                let alu = op.alu().ok_or(FaultKind::InvalidOpcode(word))?;
                let val = valu(alu, a, b).ok_or(FaultKind::DivideByZero)?;
                self.push(val)?;
            }
            NEG => {
                let a = self.pop()?;
                self.push(a.wrapping_neg())?;
            }
            JMP => {
                self.pc = self.fetch()?;
            }
            JZ | JNZ => {
                let target = self.fetch()?;
                let cond = self.pop()?;
                if (cond == 0) == (op == JZ) {
                    self.pc = target;
                }
            }
            LOAD => {
                let addr = self.fetch()?;
                let val = self.memory.read(addr)?;
                self.push(val)?;
            }
            STORE => {
                let addr = self.fetch()?;
                let val = self.pop()?;
                self.memory.write(addr, val)?;
            }
            CALL => {
                let target = self.fetch()?;
                self.push(self.pc)?;
                self.pc = target;
            }
            RET => {
                self.pc = self.pop()?;
            }
            OUT => {
                let val = self.pop()?;
                info!("out: {}", val);
                self.output.push(val);
            }
        }
        Ok(op)
    }

    fn fetch(&mut self) -> Result<Word, FaultKind> {
        let word = self
            .memory
            .read(self.pc)
            .map_err(|_| FaultKind::FetchOutOfBounds { address: self.pc })?;
        self.pc = self.pc.wrapping_add(1);
        Ok(word)
    }

    fn push(&mut self, val: Word) -> Result<(), FaultKind> {
        let sp = self.sp - 1;
        self.memory.write(sp, val)?;
        self.sp = sp;
        Ok(())
    }

    fn pop(&mut self) -> Result<Word, FaultKind> {
        let val = self.peek()?;
        self.sp += 1;
        Ok(val)
    }

    fn peek(&self) -> Result<Word, FaultKind> {
        if self.sp >= self.stack_base() {
            return Err(FaultKind::StackUnderflow);
        }
        Ok(self.memory.read(self.sp)?)
    }
}

// Inspection
impl StackMachine {
    pub fn status(&self) -> Status {
        self.status
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn pc(&self) -> Word {
        self.pc
    }

    pub fn sp(&self) -> Word {
        self.sp
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Words written by `OUT`, oldest first.
    pub fn output(&self) -> &[Word] {
        &self.output
    }

    /// Top of the operand stack.
    pub fn top(&self) -> Option<Word> {
        self.peek().ok()
    }

    /// Operand stack contents, top first.
    pub fn stack(&self) -> &[Word] {
        let sp = usize::try_from(self.sp).unwrap_or(0);
        self.memory.as_slice().get(sp..).unwrap_or(&[])
    }

    /// Length of the loaded program.
    pub fn loaded(&self) -> usize {
        self.loaded
    }
}
