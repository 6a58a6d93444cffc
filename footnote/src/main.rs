use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use color_print::cprintln;

use footnote::{driver, Args, Config, DriverError, VERSION};
use ftemu::hooks::{console::Console, Hook};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    if args.version {
        println!("{}", VERSION);
        return ExitCode::SUCCESS;
    }

    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(err) => {
            usage(&err);
            return ExitCode::FAILURE;
        }
    };
    println!("Footnote");

    let mut hooks: Vec<Box<dyn Hook>> = vec![Box::new(Console::new())];
    let result = driver::run(&config, &mut hooks);
    drop(hooks);

    match result {
        Ok(outcome) => {
            if let Some(assembled) = &outcome.assembled {
                cprintln!(
                    "<g,s>Assembled</> {} word(s), {} label(s)",
                    assembled.program.len(),
                    assembled.symbols.len()
                );
            }
            if let Some(machine) = &outcome.machine {
                cprintln!(
                    "<g,s>Halted</> after {} step(s), stack: {:?}",
                    machine.steps(),
                    machine.stack()
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            err.print_diag();
            ExitCode::FAILURE
        }
    }
}

fn usage(err: &DriverError) {
    err.print_diag();
    println!();
    if let Err(err) = Args::command().print_help() {
        log::warn!("cannot print help: {}", err);
    }
}
