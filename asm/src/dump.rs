//! Files written after an assembly: the program image, plus the symbol table
//! and the address to source line map as debug artifacts. The artifacts are
//! write-only; nothing reads them back.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use arch::{image, Word};

use crate::{error::Error, linemap::LineMap, symbol::SymbolTable};

pub const SYMBOLS_FILE: &str = "symbols.txt";
pub const LINEMAP_FILE: &str = "linemap.txt";

/// `label, address` per line, in definition order.
pub fn write_symbols<W: Write>(mut out: W, symbols: &SymbolTable) -> std::io::Result<()> {
    for (name, symbol) in symbols.iter() {
        writeln!(out, "{}, {}", name, symbol.address)?;
    }
    out.flush()
}

/// `address, source_line` per line, in address order.
pub fn write_line_map<W: Write>(mut out: W, line_map: &LineMap) -> std::io::Result<()> {
    for (address, line) in line_map.iter() {
        writeln!(out, "{}, {}", address, line)?;
    }
    out.flush()
}

pub fn save_image(path: impl AsRef<Path>, program: &[Word]) -> Result<(), Error> {
    save(path.as_ref(), |out| image::write(out, program))
}

pub fn save_symbols(path: impl AsRef<Path>, symbols: &SymbolTable) -> Result<(), Error> {
    save(path.as_ref(), |out| write_symbols(out, symbols))
}

pub fn save_line_map(path: impl AsRef<Path>, line_map: &LineMap) -> Result<(), Error> {
    save(path.as_ref(), |out| write_line_map(out, line_map))
}

fn save<F>(path: &Path, write: F) -> Result<(), Error>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let name = path.display().to_string();
    let file = File::create(path).map_err(|err| Error::FileCreate(name.clone(), err))?;
    let mut out = BufWriter::new(file);
    write(&mut out).map_err(|err| Error::FileWrite(name, err))
}
