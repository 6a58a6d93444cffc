use arch::Word;
use color_print::cformat;
use indexmap::IndexMap;

use crate::assembler::Assembled;
use crate::token::COMMENT;

/// Words emitted for each source line: line -> [(address, words)].
pub fn words_by_line(assembled: &Assembled) -> IndexMap<usize, Vec<(Word, &[Word])>> {
    let starts: Vec<(Word, usize)> = assembled.line_map.iter().collect();
    let mut rows: IndexMap<usize, Vec<(Word, &[Word])>> = IndexMap::new();
    for (idx, (start, line)) in starts.iter().enumerate() {
        let end = starts
            .get(idx + 1)
            .map(|(next, _)| *next as usize)
            .unwrap_or(assembled.program.len());
        let words = &assembled.program[*start as usize..end];
        rows.entry(*line).or_default().push((*start, words));
    }
    rows
}

pub fn print_dump(path: &str, lines: &[String], assembled: &Assembled) {
    let rows = words_by_line(assembled);
    println!(
        "{}+------[{}]{}",
        "-".repeat(27),
        path,
        "-".repeat(45usize.saturating_sub(path.len()))
    );

    for (idx, raw) in lines.iter().enumerate() {
        let line_num = idx + 1;
        let (code, comment) = match raw.find(COMMENT) {
            Some(pos) => raw.split_at(pos),
            None => (raw.as_str(), ""),
        };
        let code = match code.trim_end().strip_suffix(':') {
            Some(_) => cformat!("<g>{}</>", code.trim_end()),
            None => code.trim_end().to_string(),
        };
        let comment = cformat!("<dim>{}</>", comment);

        match rows.get(&line_num) {
            None => println!("{:27}| {:>4}: {} {}", "", line_num, code, comment),
            Some(entries) => {
                for (n, (addr, words)) in entries.iter().enumerate() {
                    let bin = words
                        .iter()
                        .map(|w| w.to_string())
                        .collect::<Vec<_>>()
                        .join(" ");
                    let addr = cformat!("<c>[{:04}]</>", addr);
                    if n == 0 {
                        println!("{} {:<20} | {:>4}: {} {}", addr, bin, line_num, code, comment);
                    } else {
                        println!("{} {:<20} |", addr, bin);
                    }
                }
            }
        }
    }
    println!("---------------------------+-----------------------------------------------------");
}
