use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::debug;

use crate::{cli::Args, error::DriverError};

pub const SOURCE_EXT: &str = "ftnt";
pub const IMAGE_EXT: &str = "i";

/// What the driver does, decided by which of `<name>.ftnt` and `<name>.i`
/// exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Only the source exists.
    Assemble,
    /// Only the image exists.
    Run,
    /// Both exist: the image is rewritten and the fresh program is run.
    AssembleAndRun,
}

impl Mode {
    pub fn assembles(self) -> bool {
        matches!(self, Mode::Assemble | Mode::AssembleAndRun)
    }

    pub fn runs(self) -> bool {
        matches!(self, Mode::Run | Mode::AssembleAndRun)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    /// `<name>.ftnt`.
    pub source: PathBuf,
    /// Written when assembling, read when only running.
    pub image: PathBuf,
    pub memory: usize,
    pub sym: bool,
    pub lines: bool,
    /// Where `symbols.txt` and `linemap.txt` go. Empty means the working
    /// directory.
    pub dump_dir: PathBuf,
}

impl Config {
    pub fn from_args(args: &Args) -> Result<Config, DriverError> {
        let infile = args
            .infile
            .as_ref()
            .ok_or_else(|| DriverError::Usage("No input file specified".into()))?;

        let name = program_name(infile);
        let source = with_ext(&name, SOURCE_EXT);
        let image = with_ext(&name, IMAGE_EXT);
        let mode = match (source.is_file(), image.is_file()) {
            (true, false) => Mode::Assemble,
            (true, true) => Mode::AssembleAndRun,
            (false, true) => Mode::Run,
            (false, false) => {
                return Err(DriverError::Usage(format!(
                    "Neither {} nor {} exists",
                    source.display(),
                    image.display()
                )))
            }
        };

        let image = match (&args.outfile, mode) {
            (Some(out), Mode::Assemble | Mode::AssembleAndRun) => image_path(out),
            _ => image,
        };
        debug!("{:?}: {} -> {}", mode, source.display(), image.display());

        Ok(Config {
            mode,
            source,
            image,
            memory: args.memory,
            sym: args.sym,
            lines: args.lines,
            dump_dir: PathBuf::new(),
        })
    }

    pub fn with_dump_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dump_dir = dir.into();
        self
    }

    /// `--sym` / `--lines` given but nothing is assembled.
    pub fn ignores_dumps(&self) -> bool {
        (self.sym || self.lines) && !self.mode.assembles()
    }
}

/// `dir/prog`, `dir/prog.ftnt` and `dir/prog.i` all name `dir/prog`.
fn program_name(path: &Path) -> PathBuf {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(SOURCE_EXT | IMAGE_EXT) => path.with_extension(""),
        _ => path.to_path_buf(),
    }
}

/// Appends rather than replaces, so `prog.v2` becomes `prog.v2.i`.
fn with_ext(path: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

fn image_path(out: &Path) -> PathBuf {
    match out.extension().and_then(|ext| ext.to_str()) {
        Some(IMAGE_EXT) => out.to_path_buf(),
        _ => with_ext(out, IMAGE_EXT),
    }
}
