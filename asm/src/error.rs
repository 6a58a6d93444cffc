use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read source")]
    Read(#[source] std::io::Error),

    #[error("Unknown operation: `{name}`")]
    UnknownMnemonic { name: String, line: usize },

    #[error("More argument required: `{name}` takes {expected}")]
    MissingOperand {
        name: String,
        expected: usize,
        line: usize,
    },

    #[error("Invalid label name: `{name}`")]
    InvalidLabel { name: String, line: usize },

    #[error("Cannot parse `{text}` as operand")]
    InvalidOperand { text: String, line: usize },

    #[error("Literal `{text}` does not fit in a word")]
    LiteralOutOfRange { text: String, line: usize },

    #[error("Address space exhausted")]
    AddressOverflow { line: usize },

    #[error("Re-defined label: `{name}`")]
    DuplicateSymbol {
        name: String,
        line: usize,
        first: usize,
    },

    #[error("Undefined label: `{name}`")]
    UndefinedSymbol { name: String, line: usize },

    #[error("Program has not been assembled")]
    NotAssembled,

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

/// Coarse classification of assembly failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedSource,
    DuplicateSymbol,
    UndefinedSymbol,
    Usage,
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        use Error::*;
        match self {
            Read(_)
            | FileOpen(..)
            | UnknownMnemonic { .. }
            | MissingOperand { .. }
            | InvalidLabel { .. }
            | InvalidOperand { .. }
            | LiteralOutOfRange { .. }
            | AddressOverflow { .. } => ErrorKind::MalformedSource,
            DuplicateSymbol { .. } => ErrorKind::DuplicateSymbol,
            UndefinedSymbol { .. } => ErrorKind::UndefinedSymbol,
            NotAssembled => ErrorKind::Usage,
            FileCreate(..) | FileWrite(..) => ErrorKind::Io,
        }
    }

    /// 1-based source line the error points at, if any.
    pub fn line(&self) -> Option<usize> {
        use Error::*;
        match self {
            UnknownMnemonic { line, .. }
            | MissingOperand { line, .. }
            | InvalidLabel { line, .. }
            | InvalidOperand { line, .. }
            | LiteralOutOfRange { line, .. }
            | AddressOverflow { line }
            | DuplicateSymbol { line, .. }
            | UndefinedSymbol { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, file: &str, lines: &[String]) {
        cprintln!("<red,bold>error</>: {}", self);
        if let Some(source) = std::error::Error::source(self) {
            cprintln!("  <blue>=</> caused by: {}", source);
        }

        let Some(line_num) = self.line() else {
            return;
        };
        print_snippet(file, lines, line_num);

        if let Error::DuplicateSymbol { first, .. } = self {
            cprintln!("<cyan,bold>note</>: first defined here");
            print_snippet(file, lines, *first);
        }
    }
}

fn print_snippet(file: &str, lines: &[String], line_num: usize) {
    cprintln!("     <blue>--></> <underline>{}:{}</>", file, line_num);
    cprintln!("      <blue>|</>");

    let line_content = line_num
        .checked_sub(1)
        .and_then(|idx| lines.get(idx))
        .map(|s| s.as_str())
        .unwrap_or("");

    cprintln!(" <blue>{:>4} |</> {}", line_num, line_content);
    cprintln!("      <blue>|</>");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        let dup = Error::DuplicateSymbol {
            name: "loop".into(),
            line: 4,
            first: 1,
        };
        assert_eq!(dup.kind(), ErrorKind::DuplicateSymbol);
        assert_eq!(dup.line(), Some(4));

        let undef = Error::UndefinedSymbol {
            name: "nowhere".into(),
            line: 2,
        };
        assert_eq!(undef.kind(), ErrorKind::UndefinedSymbol);

        let read = Error::Read(std::io::Error::other("broken"));
        assert_eq!(read.kind(), ErrorKind::MalformedSource);
        assert_eq!(read.line(), None);
    }

    #[test]
    fn messages() {
        let err = Error::UnknownMnemonic {
            name: "jump".into(),
            line: 1,
        };
        assert_eq!(err.to_string(), "Unknown operation: `jump`");
        let err = Error::MissingOperand {
            name: "PUSH".into(),
            expected: 1,
            line: 1,
        };
        assert_eq!(err.to_string(), "More argument required: `PUSH` takes 1");
    }
}
