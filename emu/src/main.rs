use std::process::ExitCode;

use arch::DEFAULT_MEMORY_SIZE;
use clap::Parser;
use color_print::cprintln;

use ftemu::hooks::{console::Console, dump::Dump, Hook};
use ftemu::config::parse_memory_size;
use ftemu::{MachineConfig, MachineError, StackMachine};

#[derive(Parser, Debug)]
#[clap(
    name = "Footnote Emulator",
    author = "Footnote developers",
    version = "v0.1.0",
    about = "Stack machine for Footnote images"
)]
struct Args {
    /// Memory size in words
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_MEMORY_SIZE,
        value_parser = parse_memory_size
    )]
    memory: usize,

    /// Stop with a fault after this many instructions
    #[arg(short = 't', long)]
    tmax: Option<u64>,

    #[arg(short, long)]
    dump_cfg: Option<String>,

    #[arg(short = 'a', long)]
    dump_all: bool,

    /// Highlight program output
    #[arg(short, long)]
    style: bool,

    /// Also write program output to this file
    #[arg(short, long)]
    write: Option<String>,

    #[arg(default_value = "main.i")]
    input_file: String,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    println!("Footnote Emulator");

    println!("+-----------------------------------------------+");
    println!("| {:<45} |", args.input_file);
    println!("+-----------------------------------------------+");

    // ------------------------------------------------------------------------
    // Initialize state machine model
    let config = MachineConfig::with_capacity(args.memory).max_steps(args.tmax);
    let mut machine = match StackMachine::new(config) {
        Ok(machine) => machine,
        Err(err) => {
            report(&err);
            return ExitCode::FAILURE;
        }
    };
    println!(" * Memory {} word(s)", machine.config().capacity);
    if let Err(err) = machine.load_file(&args.input_file) {
        report(&err);
        return ExitCode::FAILURE;
    }

    // ------------------------------------------------------------------------
    // Initialize hooks
    println!("[INIT]");
    let dump = match Dump::arg(args.dump_cfg, args.dump_all) {
        Ok(dump) => dump,
        Err(err) => {
            cprintln!("<red,bold>error</>: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let console = match Console::arg(args.style, args.write.clone()) {
        Ok(console) => console,
        Err(err) => {
            cprintln!(
                "<red,bold>error</>: Failed to create file: {} ({})",
                args.write.unwrap_or_default(),
                err
            );
            return ExitCode::FAILURE;
        }
    };
    let mut hooks: Vec<Box<dyn Hook>> = vec![Box::new(dump), Box::new(console)];

    // ------------------------------------------------------------------------
    // Main loop
    let result = machine.run_with(&mut hooks);
    drop(hooks);

    // Exit
    println!("=================================================");
    match result {
        Ok(()) => {
            cprintln!(
                "<g,s>Halted</> after {} step(s), stack: {:?}",
                machine.steps(),
                machine.stack()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn report(err: &MachineError) {
    cprintln!("<red,bold>error</>: {}", err);
    if let Some(source) = std::error::Error::source(err) {
        cprintln!("  <blue>=</> caused by: {}", source);
    }
}
