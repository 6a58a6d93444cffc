use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display, EnumIter, EnumString};

use crate::{alu::ALU, Word};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    EnumIter,
    Display,
)]
#[repr(i32)]
pub enum Op {
    HALT = 0,
    PUSH,
    POP,
    DUP,
    SWAP,
    ADD,
    SUB,
    MUL,
    DIV,
    MOD,
    NEG,
    EQ,
    LT,
    GT,
    JMP,
    JZ,
    JNZ,
    LOAD,
    STORE,
    CALL,
    RET,
    OUT,
}

impl Op {
    /// Look up a mnemonic. Mnemonics are case-insensitive.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_uppercase().parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(format!("Undefined Op: {s}")),
        }
    }

    /// Decode a fetched word.
    pub fn decode(word: Word) -> Option<Self> {
        Self::try_from(word).ok()
    }

    pub fn code(self) -> Word {
        self.into()
    }
}

pub enum Arg {
    /// Value pushed as-is.
    VAL,
    /// Absolute address in memory.
    ADDR,
}

impl Op {
    pub fn arg_field(&self) -> Vec<Arg> {
        use Op::*;
        match self {
            PUSH => vec![Arg::VAL],
            JMP | JZ | JNZ | LOAD | STORE | CALL => vec![Arg::ADDR],
            HALT | POP | DUP | SWAP | ADD | SUB | MUL | DIV | MOD | NEG | EQ | LT | GT | RET
            | OUT => vec![],
        }
    }

    /// Number of words the instruction occupies once emitted.
    pub fn width(&self) -> usize {
        1 + self.arg_field().len()
    }

    /// Binary stack operation computed by the ALU, if this is one.
    pub fn alu(&self) -> Option<ALU> {
        use Op::*;
        match self {
            ADD => Some(ALU::ADD),
            SUB => Some(ALU::SUB),
            MUL => Some(ALU::MUL),
            DIV => Some(ALU::DIV),
            MOD => Some(ALU::MOD),
            EQ => Some(ALU::EQ),
            LT => Some(ALU::LT),
            GT => Some(ALU::GT),
            _ => None,
        }
    }
}
