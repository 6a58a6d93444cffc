//! Two-pass assembler for the Footnote stack machine.
//!
//! Source text is split into tokens, pass 1 ([`symbol::collect`]) binds
//! labels to addresses and pass 2 ([`emit::emit`]) produces the program words
//! together with a map from addresses back to source lines.

pub mod assembler;
pub mod dump;
pub mod emit;
pub mod error;
pub mod linemap;
pub mod parser;
pub mod symbol;
pub mod token;
pub mod util;

pub use assembler::{assemble_str, Assembled, Assembler};
pub use error::{Error, ErrorKind};
