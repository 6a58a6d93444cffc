use arch::Word;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use thiserror::Error;

use crate::machine::{Executed, StackMachine};

use super::Hook;

#[derive(Error, Debug)]
pub enum DumpError {
    #[error("Failed to open dump config: {0}")]
    Open(String, #[source] std::io::Error),

    #[error("Failed to parse dump config: {0}")]
    Parse(String, #[source] serde_yaml::Error),
}

/// Prints machine state when execution reaches configured addresses.
///
/// The config is a YAML map from address to what to show there:
///
/// ```yaml
/// 4: { stack: true }
/// 12: { heap: [30, 31] }
/// ```
#[derive(Debug)]
pub struct Dump {
    file: Option<String>,
    all: bool,
    list: List,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct List(HashMap<Word, Config>);

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct Config {
    stack: bool,
    heap: Vec<Word>,
}

impl Dump {
    pub fn arg(file: Option<String>, all: bool) -> Result<Self, DumpError> {
        match file {
            Some(fname) => {
                let file = File::open(&fname).map_err(|err| DumpError::Open(fname.clone(), err))?;
                let list: List = serde_yaml::from_reader(BufReader::new(file))
                    .map_err(|err| DumpError::Parse(fname.clone(), err))?;
                Ok(Self {
                    file: Some(fname),
                    list,
                    all,
                })
            }
            None => Ok(Self {
                file,
                list: List::default(),
                all,
            }),
        }
    }

    pub fn from_yaml(yaml: &str, all: bool) -> Result<Self, DumpError> {
        let list: List =
            serde_yaml::from_str(yaml).map_err(|err| DumpError::Parse("<inline>".into(), err))?;
        Ok(Self {
            file: None,
            list,
            all,
        })
    }

    fn get(&self, pc: Word) -> Option<&Config> {
        self.list.0.get(&pc)
    }

    /// Number of watched addresses.
    pub fn len(&self) -> usize {
        self.list.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.0.is_empty()
    }
}

impl Hook for Dump {
    fn init(&mut self, _machine: &StackMachine) {
        if self.all {
            println!(" * Dump all");
        }
        if let Some(fname) = &self.file {
            println!(" * Dump[{}] {:?}", self.list.0.len(), fname);
        }
    }

    fn exec(&mut self, _time: u64, executed: &Executed, machine: &StackMachine) {
        if let Some(cfg) = self.get(executed.addr) {
            self.print_reg(executed, machine);
            if cfg.stack {
                self.print_stack(machine);
            }
            self.print_heap(machine, &cfg.heap);
        } else if self.all {
            self.print_reg(executed, machine);
        }
    }
}

impl Dump {
    fn print_reg(&self, executed: &Executed, machine: &StackMachine) {
        let top = machine
            .top()
            .map(|v| format!("{:>11}", v))
            .unwrap_or_else(|| format!("{:>11}", "-"));
        println!(" +------------+------------+------------------+");
        println!(
            " | at: {:>6} | op: {:<6} | steps: {:>8} |",
            executed.addr,
            executed.op.to_string(),
            machine.steps()
        );
        println!(
            " | pc: {:>6} | sp: {:>6} | top: {} |",
            machine.pc(),
            machine.sp(),
            top
        );
        println!(" +------------+------------+------------------+");
    }

    fn print_stack(&self, machine: &StackMachine) {
        for (addr, val) in (machine.sp()..).zip(machine.stack()) {
            println!(" | {:>6} : {:>11}                          |", addr, val);
        }
        println!(" +-------------------------------------------+");
    }

    fn print_heap(&self, machine: &StackMachine, addrs: &[Word]) {
        if addrs.is_empty() {
            return;
        }
        for addr in addrs {
            match machine.memory().read(*addr) {
                Ok(val) => println!(" | {:>6} : {:>11}                          |", addr, val),
                Err(err) => println!(" | {:>6} : {}", addr, err),
            }
        }
        println!(" +-------------------------------------------+");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_config() {
        let dump = Dump::from_yaml("4: { stack: true }\n12:\n  heap: [30, 31]\n", false).unwrap();
        assert_eq!(dump.len(), 2);
        assert!(dump.get(4).unwrap().stack);
        assert!(dump.get(4).unwrap().heap.is_empty());
        assert_eq!(dump.get(12).unwrap().heap, vec![30, 31]);
        assert!(!dump.get(12).unwrap().stack);
        assert!(dump.get(5).is_none());
    }

    #[test]
    fn rejects_bad_config() {
        assert!(matches!(
            Dump::from_yaml("4: [not, a, map]", false),
            Err(DumpError::Parse(..))
        ));
        assert!(matches!(
            Dump::arg(Some("/no/such/dump.yaml".into()), false),
            Err(DumpError::Open(..))
        ));
    }

    #[test]
    fn reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.yaml");
        std::fs::write(&path, "0: { stack: true, heap: [1] }\n").unwrap();
        let dump = Dump::arg(Some(path.display().to_string()), true).unwrap();
        assert_eq!(dump.len(), 1);
    }
}
