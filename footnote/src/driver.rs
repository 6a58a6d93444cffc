use color_print::cprintln;
use ftasm::{dump, Assembled, Assembler};
use ftemu::hooks::Hook;
use ftemu::StackMachine;
use log::info;

use crate::config::{Config, Mode};
use crate::error::DriverError;

/// What a driver run produced.
#[derive(Debug, Default)]
pub struct Outcome {
    pub assembled: Option<Assembled>,
    /// The machine after a `HALT`.
    pub machine: Option<StackMachine>,
}

struct Progress(usize);

impl Progress {
    fn step(&mut self, title: &str) {
        self.0 += 1;
        println!("{}. {}", self.0, title);
    }
}

/// Assemble and/or run according to `config.mode`. `hooks` observe the run.
pub fn run(config: &Config, hooks: &mut [Box<dyn Hook>]) -> Result<Outcome, DriverError> {
    let mut progress = Progress(0);
    let mut outcome = Outcome::default();

    if config.ignores_dumps() {
        cprintln!("<cyan,bold>note</>: --sym and --lines can only be used during assembly");
    }

    if config.mode.assembles() {
        outcome.assembled = Some(assemble(config, &mut progress)?);
    }

    if config.mode.runs() {
        progress.step("Run");
        let mut machine = StackMachine::with_capacity(config.memory)?;
        match (&outcome.assembled, config.mode) {
            (Some(assembled), Mode::AssembleAndRun) => {
                println!("  < {} word(s) in memory", assembled.program.len());
                machine.load(&[])?;
                for word in &assembled.program {
                    machine.load_word(*word)?;
                }
            }
            _ => {
                println!("  < {}", config.image.display());
                machine.load_file(&config.image)?;
            }
        }
        println!("  = {} word(s) of memory", config.memory);
        machine.run_with(hooks)?;
        info!("halted after {} step(s)", machine.steps());
        outcome.machine = Some(machine);
    }

    Ok(outcome)
}

fn assemble(config: &Config, progress: &mut Progress) -> Result<Assembled, DriverError> {
    let file = config.source.display().to_string();
    progress.step("Read File and Resolve Labels");
    println!("  < {}", file);

    let mut assembler = Assembler::from_path(&config.source);
    let failed = |assembler: &Assembler, source| DriverError::Assemble {
        file: file.clone(),
        lines: assembler.source_lines().unwrap_or_default(),
        source,
    };
    if let Err(err) = assembler.assemble() {
        return Err(failed(&assembler, err));
    }
    let assembled = match assembler.assembled() {
        Some(assembled) => assembled.clone(),
        None => return Err(failed(&assembler, ftasm::Error::NotAssembled)),
    };

    progress.step("Generate Program");
    println!("  > {}", config.image.display());
    dump::save_image(&config.image, &assembled.program).map_err(DriverError::Output)?;

    if config.sym {
        let path = config.dump_dir.join(dump::SYMBOLS_FILE);
        println!("  > {}", path.display());
        dump::save_symbols(&path, &assembled.symbols).map_err(DriverError::Output)?;
    }
    if config.lines {
        let path = config.dump_dir.join(dump::LINEMAP_FILE);
        println!("  > {}", path.display());
        dump::save_line_map(&path, &assembled.line_map).map_err(DriverError::Output)?;
    }

    Ok(assembled)
}
