//! Intermediate image format: one decimal word per line, in address order
//! starting at 0.

use std::io::{BufRead, Write};

use thiserror::Error;

use crate::Word;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Failed to read image")]
    Read(#[source] std::io::Error),

    #[error("Line {line}: cannot parse `{text}` as a word")]
    Parse { line: usize, text: String },
}

/// Render a program as image text.
pub fn to_text(words: &[Word]) -> String {
    let mut text = String::with_capacity(words.len() * 4);
    for word in words {
        text.push_str(&word.to_string());
        text.push('\n');
    }
    text
}

pub fn write<W: Write>(mut out: W, words: &[Word]) -> std::io::Result<()> {
    for word in words {
        writeln!(out, "{}", word)?;
    }
    out.flush()
}

/// Parse image text. Blank lines are skipped; line numbers in errors are 1-based.
pub fn read<R: BufRead>(reader: R) -> Result<Vec<Word>, ImageError> {
    let mut words = vec![];
    for (idx, raw) in reader.lines().enumerate() {
        let raw = raw.map_err(ImageError::Read)?;
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }
        let word = text.parse::<Word>().map_err(|_| ImageError::Parse {
            line: idx + 1,
            text: text.to_string(),
        })?;
        words.push(word);
    }
    Ok(words)
}

pub fn from_text(text: &str) -> Result<Vec<Word>, ImageError> {
    read(text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_one_word_per_line() {
        assert_eq!(to_text(&[1, -2, 0]), "1\n-2\n0\n");
        assert_eq!(to_text(&[]), "");
    }

    #[test]
    fn parse_skips_blank_lines() {
        let words = from_text("1\n\n  -42 \n7").unwrap();
        assert_eq!(words, vec![1, -42, 7]);
    }

    #[test]
    fn parse_reports_line() {
        match from_text("1\n2\nthree\n") {
            Err(ImageError::Parse { line, text }) => {
                assert_eq!(line, 3);
                assert_eq!(text, "three");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn write_matches_to_text() {
        let mut buf = vec![];
        write(&mut buf, &[Word::MIN, Word::MAX]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), to_text(&[Word::MIN, Word::MAX]));
        assert_eq!(
            from_text(&to_text(&[Word::MIN, Word::MAX])).unwrap(),
            vec![Word::MIN, Word::MAX]
        );
    }
}
