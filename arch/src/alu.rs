use crate::Word;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ALU {
    ADD,
    SUB,
    MUL,
    DIV,
    MOD,
    EQ,
    LT,
    GT,
}

macro_rules! boo {
    ($cond:expr) => {
        if $cond {
            1
        } else {
            0
        }
    };
}

/// Apply `op` to `a` (second from top) and `b` (top).
/// Returns `None` when the divisor of `DIV`/`MOD` is zero.
pub fn valu(op: ALU, a: Word, b: Word) -> Option<Word> {
    use ALU::*;
    match op {
        ADD => Some(a.wrapping_add(b)),
        SUB => Some(a.wrapping_sub(b)),
        MUL => Some(a.wrapping_mul(b)),
        DIV => (b != 0).then(|| a.wrapping_div(b)),
        MOD => (b != 0).then(|| a.wrapping_rem(b)),
        EQ => Some(boo!(a == b)),
        LT => Some(boo!(a < b)),
        GT => Some(boo!(a > b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_wraps() {
        assert_eq!(valu(ALU::ADD, Word::MAX, 1), Some(Word::MIN));
        assert_eq!(valu(ALU::SUB, 3, 10), Some(-7));
        assert_eq!(valu(ALU::MUL, -4, 5), Some(-20));
        assert_eq!(valu(ALU::DIV, Word::MIN, -1), Some(Word::MIN));
    }

    #[test]
    fn division_truncates_toward_zero() {
        assert_eq!(valu(ALU::DIV, -7, 2), Some(-3));
        assert_eq!(valu(ALU::MOD, -7, 2), Some(-1));
        assert_eq!(valu(ALU::DIV, 1, 0), None);
        assert_eq!(valu(ALU::MOD, 1, 0), None);
    }

    #[test]
    fn comparisons_yield_flags() {
        assert_eq!(valu(ALU::EQ, 4, 4), Some(1));
        assert_eq!(valu(ALU::EQ, 4, 5), Some(0));
        assert_eq!(valu(ALU::LT, -1, 0), Some(1));
        assert_eq!(valu(ALU::GT, -1, 0), Some(0));
    }
}
