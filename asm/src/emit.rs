use arch::Word;
use log::{debug, trace};

use crate::{
    error::Error,
    linemap::LineMap,
    parser::{Parser, Stmt},
    symbol::SymbolTable,
    token::Token,
};

/// Pass 2: emit one word per opcode and operand, resolving label
/// references through the completed symbol table.
pub fn emit(tokens: &[Token], symbols: &SymbolTable) -> Result<(Vec<Word>, LineMap), Error> {
    let mut program: Vec<Word> = vec![];
    let mut line_map = LineMap::new();

    for line in Parser::new(tokens) {
        let line = line?;
        let start = Word::try_from(program.len())
            .map_err(|_| Error::AddressOverflow { line: line.line })?;
        match &line.stmt {
            Stmt::Label(_) => continue,
            Stmt::Code(op, args) => {
                program.push(op.code());
                for arg in args {
                    program.push(arg.resolve(symbols, line.line)?);
                }
                trace!("{:>4}: {} {:?}", start, op, &program[start as usize..]);
            }
            Stmt::Data(imm) => {
                program.push(imm.resolve(symbols, line.line)?);
            }
        }
        line_map.insert(start, line.line);
    }

    debug!("pass 2: {} word(s)", program.len());
    Ok((program, line_map))
}
