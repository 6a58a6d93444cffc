use std::path::PathBuf;

use arch::DEFAULT_MEMORY_SIZE;
use ftemu::config::parse_memory_size;

pub const VERSION: &str = "Footnote version 0.1";

const HELP_TEMPLATE: &str = "\
{before-help}{bin}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(
    name = "footnote",
    author,
    about,
    help_template = HELP_TEMPLATE,
    disable_version_flag = true
)]
pub struct Args {
    /// Print a version message and quit. All other arguments are ignored
    #[clap(long)]
    pub version: bool,

    /// Save the symbol table to symbols.txt
    #[clap(long)]
    pub sym: bool,

    /// Save the address to source line map to linemap.txt
    #[clap(long)]
    pub lines: bool,

    /// Number of words available to the machine
    #[clap(
        short,
        long,
        default_value_t = DEFAULT_MEMORY_SIZE,
        value_parser = parse_memory_size
    )]
    pub memory: usize,

    /// Program name, with or without the `.ftnt` / `.i` extension
    pub infile: Option<PathBuf>,

    /// Image to write when assembling [default: <infile>.i]
    pub outfile: Option<PathBuf>,
}
