use std::collections::VecDeque;
use std::io::BufRead;

use crate::error::Error;

/// Everything after this character up to the end of the line is ignored.
pub const COMMENT: char = ';';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// 1-based source line
    pub line: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, line: usize) -> Self {
        Token {
            text: text.into(),
            line,
        }
    }
}

/// Lazily splits a source stream into whitespace separated tokens.
pub struct Tokens<R> {
    lines: std::io::Lines<R>,
    line: usize,
    pending: VecDeque<Token>,
    done: bool,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Tokens {
            lines: reader.lines(),
            line: 0,
            pending: VecDeque::new(),
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for Tokens<R> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(Ok(token));
            }
            if self.done {
                return None;
            }
            match self.lines.next() {
                None => {
                    self.done = true;
                    return None;
                }
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(Error::Read(err)));
                }
                Some(Ok(raw)) => {
                    self.line += 1;
                    let line = self.line;
                    self.pending.extend(
                        strip_comment(&raw)
                            .split_whitespace()
                            .map(|text| Token::new(text, line)),
                    );
                }
            }
        }
    }
}

pub fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Read the whole stream into a token vector.
pub fn tokenize<R: BufRead>(reader: R) -> Result<Vec<Token>, Error> {
    Tokens::new(reader).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(src: &str) -> Vec<(String, usize)> {
        tokenize(src.as_bytes())
            .unwrap()
            .into_iter()
            .map(|t| (t.text, t.line))
            .collect()
    }

    #[test]
    fn splits_on_whitespace_and_lines() {
        assert_eq!(
            texts("push 3\n\tpush   4\n\nadd\nhalt"),
            vec![
                ("push".to_string(), 1),
                ("3".to_string(), 1),
                ("push".to_string(), 2),
                ("4".to_string(), 2),
                ("add".to_string(), 4),
                ("halt".to_string(), 5),
            ]
        );
    }

    #[test]
    fn drops_comments() {
        assert_eq!(
            texts("; header\nloop: jmp loop ; forever\n"),
            vec![
                ("loop:".to_string(), 2),
                ("jmp".to_string(), 2),
                ("loop".to_string(), 2),
            ]
        );
    }

    #[test]
    fn empty_source() {
        assert!(texts("").is_empty());
        assert!(texts("\n  \n;only comment\n").is_empty());
    }

    struct Broken;

    impl std::io::Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("device gone"))
        }
    }

    #[test]
    fn read_failure_ends_stream() {
        let mut tokens = Tokens::new(std::io::BufReader::new(Broken));
        assert!(matches!(tokens.next(), Some(Err(Error::Read(_)))));
        assert!(tokens.next().is_none());
    }
}
