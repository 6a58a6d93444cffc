use arch::{image, op::Op, Word};
use ftasm::{assemble_str, Assembler};
use ftemu::{FaultKind, MachineError, StackMachine, Status};

fn run_words(words: &[Word], capacity: usize) -> (StackMachine, Result<(), MachineError>) {
    let mut machine = StackMachine::with_capacity(capacity).unwrap();
    machine.load(words).unwrap();
    let result = machine.run();
    (machine, result)
}

const COUNTDOWN: &str = "\
; print 3 2 1 then halt
        push 3
loop:   dup
        out
        push 1
        sub
        dup
        jnz loop
        pop
        halt
";

#[test]
fn push_push_add_halt() {
    let program = assemble_str("PUSH 3\nPUSH 4\nADD\nHALT").unwrap();
    assert_eq!(program.len(), 6);
    let (machine, result) = run_words(&program, 256);
    result.unwrap();
    assert_eq!(machine.status(), Status::Halted);
    assert_eq!(machine.top(), Some(7));
}

#[test]
fn countdown_loop() {
    let program = assemble_str(COUNTDOWN).unwrap();
    let (machine, result) = run_words(&program, 64);
    result.unwrap();
    assert_eq!(machine.output(), &[3, 2, 1]);
    assert!(machine.stack().is_empty());
}

#[test]
fn image_round_trip_matches_direct_run() {
    let program = assemble_str(COUNTDOWN).unwrap();
    let (direct, direct_result) = run_words(&program, 64);
    direct_result.unwrap();

    let text = image::to_text(&program);
    let mut reloaded = StackMachine::with_capacity(64).unwrap();
    reloaded.load_image(text.as_bytes()).unwrap();
    reloaded.run().unwrap();

    assert_eq!(direct.memory(), reloaded.memory());
    assert_eq!(direct.pc(), reloaded.pc());
    assert_eq!(direct.sp(), reloaded.sp());
    assert_eq!(direct.output(), reloaded.output());
    assert_eq!(direct.status(), reloaded.status());
}

#[test]
fn streaming_load_matches_batch_load() {
    let program = assemble_str(COUNTDOWN).unwrap();
    let (batch, _) = run_words(&program, 64);

    let mut streamed = StackMachine::with_capacity(64).unwrap();
    for word in &program {
        streamed.load_word(*word).unwrap();
    }
    streamed.run().unwrap();
    assert_eq!(batch.memory(), streamed.memory());
    assert_eq!(batch.output(), streamed.output());
}

#[test]
fn forward_and_backward_references_resolve_alike() {
    for name in ["a", "target", "Loop_2", "x.y"] {
        let forward = format!("jmp {name}\npush 1\n{name}: halt\njmp {name}");
        let mut assembler = Assembler::new(forward);
        let assembled = assembler.assemble().unwrap();
        let addr = assembled.symbols.get_val(name).unwrap();
        assert_eq!(addr, 4);
        assert_eq!(assembled.program[1], addr);
        assert_eq!(assembled.program[6], addr);
    }
}

#[test]
fn load_fits_exactly_or_fails() {
    for capacity in [1usize, 4, 16] {
        for size in [capacity - 1, capacity, capacity + 1] {
            let program: Vec<Word> = (0..size as Word).map(|w| w * 3 - 7).collect();
            let mut machine = StackMachine::with_capacity(capacity).unwrap();
            let result = machine.load(&program);
            if size <= capacity {
                result.unwrap();
                assert_eq!(&machine.memory().as_slice()[..size], program.as_slice());
                assert_eq!(machine.status(), Status::Loaded);
            } else {
                assert!(matches!(result, Err(MachineError::ProgramTooLarge { .. })));
                assert_eq!(machine.status(), Status::Constructed);
            }
        }
    }
}

#[test]
fn jump_out_of_range_faults() {
    let program = assemble_str("push 1\njmp 300\nhalt").unwrap();
    let (machine, result) = run_words(&program, 256);
    match result {
        Err(MachineError::Fault(fault)) => {
            assert_eq!(fault.kind, FaultKind::FetchOutOfBounds { address: 300 })
        }
        other => panic!("unexpected: {:?}", other),
    }
    assert!(matches!(machine.status(), Status::Faulted(_)));
}

#[test]
fn halt_alone() {
    let program = assemble_str("halt").unwrap();
    assert_eq!(program, vec![Op::HALT.code()]);
    let (machine, result) = run_words(&program, 8);
    result.unwrap();
    assert_eq!(machine.memory().as_slice(), &[0; 8]);
}

#[test]
fn subroutine_with_data() {
    let program = assemble_str(
        "
        call double
        load result
        out
        halt
double: load value
        push 2
        mul
        store result
        ret
value:  .word 21
result: .word 0
",
    )
    .unwrap();
    let (machine, result) = run_words(&program, 64);
    result.unwrap();
    assert_eq!(machine.output(), &[42]);
}

#[test]
fn image_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prog.i");
    std::fs::write(&path, image::to_text(&assemble_str("push 5\nout\nhalt").unwrap())).unwrap();

    let mut machine = StackMachine::with_capacity(16).unwrap();
    machine.load_file(&path).unwrap();
    machine.run().unwrap();
    assert_eq!(machine.output(), &[5]);

    std::fs::write(&path, "1\nfive\n").unwrap();
    let mut machine = StackMachine::with_capacity(16).unwrap();
    assert!(matches!(machine.load_file(&path), Err(MachineError::Image(_))));
    assert!(matches!(
        machine.load_file(dir.path().join("missing.i")),
        Err(MachineError::FileOpen(..))
    ));
}
