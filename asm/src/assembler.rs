use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use arch::{image, Word};
use log::debug;

use crate::{
    emit::emit,
    error::Error,
    linemap::LineMap,
    symbol::{collect, SymbolTable},
    token::tokenize,
};

enum Source {
    Text(String),
    File(PathBuf),
}

/// Result of a successful assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembled {
    pub program: Vec<Word>,
    pub symbols: SymbolTable,
    pub line_map: LineMap,
}

impl Assembled {
    /// The program in image format.
    pub fn image(&self) -> String {
        image::to_text(&self.program)
    }
}

pub struct Assembler {
    source: Source,
    assembled: Option<Assembled>,
}

impl Assembler {
    pub fn new(text: impl Into<String>) -> Self {
        Assembler {
            source: Source::Text(text.into()),
            assembled: None,
        }
    }

    /// The file is (re-)read on every `assemble`.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Assembler {
            source: Source::File(path.as_ref().to_path_buf()),
            assembled: None,
        }
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text).map_err(Error::Read)?;
        Ok(Self::new(text))
    }

    /// Run pass 1 and then pass 2. Previous results are discarded first, so
    /// a failed run leaves nothing behind.
    pub fn assemble(&mut self) -> Result<&Assembled, Error> {
        self.assembled = None;

        let tokens = match &self.source {
            Source::Text(text) => tokenize(text.as_bytes())?,
            Source::File(path) => {
                let file = File::open(path)
                    .map_err(|err| Error::FileOpen(path.display().to_string(), err))?;
                tokenize(BufReader::new(file))?
            }
        };
        debug!("{} token(s)", tokens.len());

        let symbols = collect(&tokens)?;
        let (program, line_map) = emit(&tokens, &symbols)?;

        Ok(&*self.assembled.insert(Assembled {
            program,
            symbols,
            line_map,
        }))
    }

    pub fn assembled(&self) -> Option<&Assembled> {
        self.assembled.as_ref()
    }

    pub fn program(&self) -> Option<&[Word]> {
        self.assembled.as_ref().map(|a| a.program.as_slice())
    }

    pub fn symbols(&self) -> Option<&SymbolTable> {
        self.assembled.as_ref().map(|a| &a.symbols)
    }

    pub fn line_map(&self) -> Option<&LineMap> {
        self.assembled.as_ref().map(|a| &a.line_map)
    }

    pub fn into_assembled(self) -> Result<Assembled, Error> {
        self.assembled.ok_or(Error::NotAssembled)
    }

    /// Source text split into lines, for diagnostics and listings.
    pub fn source_lines(&self) -> Result<Vec<String>, Error> {
        let text = match &self.source {
            Source::Text(text) => text.clone(),
            Source::File(path) => std::fs::read_to_string(path)
                .map_err(|err| Error::FileOpen(path.display().to_string(), err))?,
        };
        Ok(text.lines().map(str::to_string).collect())
    }
}

/// One-shot helper: assemble source text into program words.
pub fn assemble_str(text: &str) -> Result<Vec<Word>, Error> {
    let mut assembler = Assembler::new(text);
    assembler.assemble()?;
    Ok(assembler.into_assembled()?.program)
}
