use arch::op::Op;
use ftasm::{assemble_str, Assembler, Error, ErrorKind};
use strum::IntoEnumIterator;

fn source_for(op: Op) -> String {
    match op.width() {
        1 => format!("{}\n", op),
        _ => format!("{} 0\n", op.to_string().to_lowercase()),
    }
}

#[test]
fn every_mnemonic_assembles_to_its_code() {
    for op in Op::iter() {
        let program = assemble_str(&source_for(op)).unwrap();
        assert_eq!(program.len(), op.width(), "{}", op);
        assert_eq!(program[0], op.code(), "{}", op);
    }
}

#[test]
fn mnemonics_ignore_case() {
    assert_eq!(
        assemble_str("Push 0x10\nDUP\nadd\nHaLt").unwrap(),
        assemble_str("PUSH 16\ndup\nADD\nhalt").unwrap()
    );
}

#[test]
fn literal_forms() {
    let program = assemble_str(".word 0x1f\n.word 0o17\n.word 0b101\n.word -42\n").unwrap();
    assert_eq!(program, vec![31, 15, 5, -42]);
}

#[test]
fn duplicate_label_points_at_both_definitions() {
    let err = assemble_str("a: halt\nb: halt\na: halt\n").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateSymbol);
    match err {
        Error::DuplicateSymbol { name, line, first } => {
            assert_eq!(name, "a");
            assert_eq!(line, 3);
            assert_eq!(first, 1);
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn halt_only() {
    let mut assembler = Assembler::new("halt");
    let assembled = assembler.assemble().unwrap();
    assert_eq!(assembled.program, vec![0]);
    assert!(assembled.symbols.is_empty());
    assert_eq!(assembled.line_map.line_of(0), Some(1));
}

#[test]
fn reads_source_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("count.ftnt");
    std::fs::write(&path, "; count\nstart: push 2\nloop: push -1\nadd\ndup\njnz loop\nhalt\n")
        .unwrap();

    let mut assembler = Assembler::from_path(&path);
    let assembled = assembler.assemble().unwrap().clone();
    assert_eq!(assembled.symbols.get_val("start"), Some(0));
    assert_eq!(assembled.symbols.get_val("loop"), Some(2));
    assert_eq!(assembled.program[7], 2);
    assert_eq!(assembled.line_map.get(6), Some(6));
    assert_eq!(assembled.line_map.line_of(7), Some(6));
    assert_eq!(assembled.line_map.line_of(8), Some(7));
    assert_eq!(assembler.source_lines().unwrap()[1], "start: push 2");

    std::fs::write(&path, "push\n").unwrap();
    let err = assembler.assemble().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedSource);
    assert!(assembler.assembled().is_none());
}
