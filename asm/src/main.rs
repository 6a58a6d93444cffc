use std::path::PathBuf;
use std::process::ExitCode;

use color_print::cprintln;
use ftasm::{dump, util, Assembler};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.ftnt")]
    input: PathBuf,

    /// Output file [default: input with `.i` extension]
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Save the symbol table to symbols.txt
    #[clap(long)]
    sym: bool,

    /// Save the address to source line map to linemap.txt
    #[clap(long)]
    lines: bool,

    /// Dump assembly listing
    #[clap(short, long)]
    dump: bool,
}

fn main() -> ExitCode {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Args = Args::parse();
    println!("Footnote Assembler");

    let input = args.input.display().to_string();
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.with_extension("i"));

    println!("1. Read File and Resolve Labels");
    println!("  < {}", input);
    let mut assembler = Assembler::from_path(&args.input);
    let assembled = match assembler.assemble() {
        Ok(assembled) => assembled.clone(),
        Err(err) => {
            let lines = assembler.source_lines().unwrap_or_default();
            err.print_diag(&input, &lines);
            return ExitCode::FAILURE;
        }
    };

    println!("2. Generate Program");
    println!("  > {}", output.display());
    if let Err(err) = dump::save_image(&output, &assembled.program) {
        err.print_diag(&input, &[]);
        return ExitCode::FAILURE;
    }

    let mut saves = vec![];
    if args.sym {
        println!("  > {}", dump::SYMBOLS_FILE);
        saves.push(dump::save_symbols(dump::SYMBOLS_FILE, &assembled.symbols));
    }
    if args.lines {
        println!("  > {}", dump::LINEMAP_FILE);
        saves.push(dump::save_line_map(dump::LINEMAP_FILE, &assembled.line_map));
    }
    let mut failed = false;
    for err in saves.into_iter().filter_map(Result::err) {
        err.print_diag(&input, &[]);
        failed = true;
    }

    if args.dump {
        let lines = assembler.source_lines().unwrap_or_default();
        util::print_dump(&input, &lines, &assembled);
    }

    cprintln!(
        "<g,s>Finished</> {} word(s), {} label(s)",
        assembled.program.len(),
        assembled.symbols.len()
    );
    match failed {
        true => ExitCode::FAILURE,
        false => ExitCode::SUCCESS,
    }
}
