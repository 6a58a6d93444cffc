use color_print::cprintln;
use ftemu::MachineError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DriverError {
    #[error("{0}")]
    Usage(String),

    #[error("Failed to assemble {file}")]
    Assemble {
        file: String,
        lines: Vec<String>,
        #[source]
        source: ftasm::Error,
    },

    #[error(transparent)]
    Output(ftasm::Error),

    #[error(transparent)]
    Machine(#[from] MachineError),
}

impl DriverError {
    pub fn print_diag(&self) {
        match self {
            DriverError::Assemble {
                file,
                lines,
                source,
            } => source.print_diag(file, lines),
            DriverError::Output(err) => err.print_diag("", &[]),
            _ => {
                cprintln!("<red,bold>error</>: {}", self);
                if let Some(source) = std::error::Error::source(self) {
                    cprintln!("  <blue>=</> caused by: {}", source);
                }
            }
        }
    }
}
