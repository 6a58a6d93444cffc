use std::num::IntErrorKind;

use arch::{op::Op, Word};

use crate::{error::Error, symbol::SymbolTable, token::Token};

/// Data directive: emits its single operand as a raw word.
pub const WORD_DIRECTIVE: &str = ".word";

// ----------------------------------------------------------------------------
// Statement

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Label(String),
    Code(Op, Vec<Imm>),
    Data(Imm),
}

impl Stmt {
    /// Words occupied by the statement once emitted.
    pub fn width(&self) -> usize {
        match self {
            Stmt::Label(_) => 0,
            Stmt::Code(op, _) => op.width(),
            Stmt::Data(_) => 1,
        }
    }
}

/// A statement together with the source line of its first token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub stmt: Stmt,
    pub line: usize,
}

/// Groups a token sequence into statements. Each mnemonic consumes exactly
/// as many following tokens as it has operands.
pub struct Parser<'a> {
    tokens: std::slice::Iter<'a, Token>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens: tokens.iter(),
        }
    }

    fn stmt(&mut self, head: &Token) -> Result<Line, Error> {
        let line = head.line;

        // main:
        if let Some(name) = head.text.strip_suffix(':') {
            if !is_label(name) {
                return Err(Error::InvalidLabel {
                    name: name.to_string(),
                    line,
                });
            }
            return Ok(Line {
                stmt: Stmt::Label(name.to_string()),
                line,
            });
        }

        // .word 42
        if head.text == WORD_DIRECTIVE {
            let imm = self.operand(head, 1)?;
            return Ok(Line {
                stmt: Stmt::Data(imm),
                line,
            });
        }

        let op = Op::parse(&head.text).map_err(|_| Error::UnknownMnemonic {
            name: head.text.clone(),
            line,
        })?;
        let expected = op.arg_field().len();
        let args = (0..expected)
            .map(|_| self.operand(head, expected))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Line {
            stmt: Stmt::Code(op, args),
            line,
        })
    }

    fn operand(&mut self, head: &Token, expected: usize) -> Result<Imm, Error> {
        let token = self.tokens.next().ok_or_else(|| Error::MissingOperand {
            name: head.text.clone(),
            expected,
            line: head.line,
        })?;
        Imm::parse(&token.text, token.line)
    }
}

impl Iterator for Parser<'_> {
    type Item = Result<Line, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let head = self.tokens.next()?;
        Some(self.stmt(head))
    }
}

/// Label names start with a letter or `_`, continue with alphanumerics,
/// `_` or `.`, and never shadow a mnemonic.
pub fn is_label(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(head) = chars.next() else {
        return false;
    };
    (head.is_ascii_alphabetic() || head == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        && Op::parse(name).is_err()
}

// ----------------------------------------------------------------------------
// Immidiate

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imm {
    Literal(Word),
    Ident(String),
}

impl Imm {
    pub fn parse(s: &str, line: usize) -> Result<Imm, Error> {
        let numeric = s
            .trim_start_matches('-')
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit());

        if !numeric {
            return match is_label(s) {
                true => Ok(Imm::Ident(s.to_string())),
                false => Err(Error::InvalidOperand {
                    text: s.to_string(),
                    line,
                }),
            };
        }

        let out_of_range = || Error::LiteralOutOfRange {
            text: s.to_string(),
            line,
        };
        match parse_with_prefix(s) {
            Ok(v) => Word::try_from(v).map(Imm::Literal).map_err(|_| out_of_range()),
            Err(kind) => match kind {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => Err(out_of_range()),
                _ => Err(Error::InvalidOperand {
                    text: s.to_string(),
                    line,
                }),
            },
        }
    }

    pub fn resolve(&self, symbols: &SymbolTable, line: usize) -> Result<Word, Error> {
        match self {
            Imm::Literal(v) => Ok(*v),
            Imm::Ident(s) => match symbols.get_val(s) {
                Some(v) => Ok(v),
                None => Err(Error::UndefinedSymbol {
                    name: s.clone(),
                    line,
                }),
            },
        }
    }
}

fn parse_with_prefix(s: &str) -> Result<i64, IntErrorKind> {
    let (sign, s) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s),
    };
    let (radix, num) = [("0b", 2), ("0o", 8), ("0x", 16)]
        .into_iter()
        .find_map(|(prefix, radix)| s.strip_prefix(prefix).map(|num| (radix, num)))
        .unwrap_or((10, s));
    // A second sign after the prefix is not a number.
    if num.starts_with(['+', '-']) {
        return Err(IntErrorKind::InvalidDigit);
    }
    i64::from_str_radix(num, radix)
        .map(|v| sign * v)
        .map_err(|err| err.kind().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenize;

    fn parse(src: &str) -> Result<Vec<Line>, Error> {
        let tokens = tokenize(src.as_bytes())?;
        Parser::new(&tokens).collect()
    }

    #[test]
    fn literals() {
        assert_eq!(Imm::parse("42", 1).unwrap(), Imm::Literal(42));
        assert_eq!(Imm::parse("-42", 1).unwrap(), Imm::Literal(-42));
        assert_eq!(Imm::parse("0x1F", 1).unwrap(), Imm::Literal(31));
        assert_eq!(Imm::parse("0b101", 1).unwrap(), Imm::Literal(5));
        assert_eq!(Imm::parse("0o17", 1).unwrap(), Imm::Literal(15));
        assert_eq!(Imm::parse("-0x10", 1).unwrap(), Imm::Literal(-16));
        assert_eq!(Imm::parse("-2147483648", 1).unwrap(), Imm::Literal(Word::MIN));
        assert_eq!(Imm::parse("2147483647", 1).unwrap(), Imm::Literal(Word::MAX));
    }

    #[test]
    fn bad_literals() {
        assert!(matches!(
            Imm::parse("2147483648", 3),
            Err(Error::LiteralOutOfRange { line: 3, .. })
        ));
        assert!(matches!(
            Imm::parse("99999999999999999999", 1),
            Err(Error::LiteralOutOfRange { .. })
        ));
        assert!(matches!(Imm::parse("12ab", 1), Err(Error::InvalidOperand { .. })));
        assert!(matches!(Imm::parse("0x-5", 1), Err(Error::InvalidOperand { .. })));
        assert!(matches!(Imm::parse("--5", 1), Err(Error::InvalidOperand { .. })));
        assert!(matches!(Imm::parse("1é", 1), Err(Error::InvalidOperand { .. })));
    }

    #[test]
    fn identifiers() {
        assert_eq!(Imm::parse("loop", 1).unwrap(), Imm::Ident("loop".into()));
        assert_eq!(Imm::parse("_x.1", 1).unwrap(), Imm::Ident("_x.1".into()));
        assert!(matches!(Imm::parse("add", 1), Err(Error::InvalidOperand { .. })));
        assert!(matches!(Imm::parse("a-b", 1), Err(Error::InvalidOperand { .. })));
    }

    #[test]
    fn labels() {
        assert!(is_label("main"));
        assert!(is_label("Main"));
        assert!(!is_label(""));
        assert!(!is_label("1st"));
        assert!(!is_label("halt"));
        assert!(!is_label("HALT"));
    }

    #[test]
    fn statements() {
        let lines = parse("start: push 3\n  PUSH start\nadd\n.word -1\nhalt").unwrap();
        let stmts: Vec<_> = lines.iter().map(|l| (l.stmt.clone(), l.line)).collect();
        assert_eq!(
            stmts,
            vec![
                (Stmt::Label("start".into()), 1),
                (Stmt::Code(Op::PUSH, vec![Imm::Literal(3)]), 1),
                (Stmt::Code(Op::PUSH, vec![Imm::Ident("start".into())]), 2),
                (Stmt::Code(Op::ADD, vec![]), 3),
                (Stmt::Data(Imm::Literal(-1)), 4),
                (Stmt::Code(Op::HALT, vec![]), 5),
            ]
        );
    }

    #[test]
    fn operands_may_span_lines() {
        let lines = parse("jmp\n  end\nend: halt").unwrap();
        assert_eq!(lines[0].stmt, Stmt::Code(Op::JMP, vec![Imm::Ident("end".into())]));
        assert_eq!(lines[0].line, 1);
    }

    #[test]
    fn malformed() {
        assert!(matches!(
            parse("push 1\nfrobnicate"),
            Err(Error::UnknownMnemonic { line: 2, .. })
        ));
        assert!(matches!(
            parse("halt\npush"),
            Err(Error::MissingOperand { line: 2, expected: 1, .. })
        ));
        assert!(matches!(
            parse("push add"),
            Err(Error::InvalidOperand { line: 1, .. })
        ));
        assert!(matches!(parse("9lives: halt"), Err(Error::InvalidLabel { .. })));
        assert!(matches!(parse(":"), Err(Error::InvalidLabel { .. })));
    }
}
