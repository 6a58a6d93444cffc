use std::io::Write;

use color_print::cprintln;

use super::Hook;
use crate::machine::{Executed, StackMachine};

/// Prints the words a program emits with `OUT`, as they are emitted.
pub struct Console {
    style: bool,
    printed: usize,
    write_buf: Option<Box<dyn Write>>,
}

impl Console {
    pub fn new() -> Console {
        Console {
            style: false,
            printed: 0,
            write_buf: None,
        }
    }

    pub fn arg(style: bool, write_file: Option<String>) -> std::io::Result<Console> {
        let write_buf = match write_file {
            Some(file) => {
                let file = std::fs::File::create(file)?;
                Some(Box::new(std::io::BufWriter::new(file)) as Box<dyn Write>)
            }
            None => None,
        };
        Ok(Console {
            style,
            printed: 0,
            write_buf,
        })
    }

    /// Also copy every word to `out`, one per line.
    pub fn tee(mut self, out: Box<dyn Write>) -> Console {
        self.write_buf = Some(out);
        self
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Hook for Console {
    fn init(&mut self, _machine: &StackMachine) {
        self.printed = 0;
    }

    fn exec(&mut self, _time: u64, _executed: &Executed, machine: &StackMachine) {
        let output = machine.output();
        for val in output.get(self.printed..).unwrap_or(&[]) {
            match self.style {
                true => cprintln!(" > <r,s>{}</>", val),
                false => println!("{}", val),
            }
            if let Some(buf) = self.write_buf.as_mut() {
                if let Err(err) = writeln!(buf, "{}", val) {
                    log::warn!("console copy failed: {}", err);
                    self.write_buf = None;
                }
            }
        }
        self.printed = output.len();
    }
}

impl Drop for Console {
    fn drop(&mut self) {
        if let Some(buf) = self.write_buf.as_mut() {
            if let Err(err) = buf.flush() {
                log::warn!("console copy failed: {}", err);
            }
        }
    }
}
