use arch::{DEFAULT_MEMORY_SIZE, MAX_MEMORY_SIZE};

/// Everything a machine needs to know at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineConfig {
    /// Memory size in words.
    pub capacity: usize,
    /// Abort with a fault after this many executed instructions.
    pub max_steps: Option<u64>,
}

impl Default for MachineConfig {
    fn default() -> Self {
        MachineConfig {
            capacity: DEFAULT_MEMORY_SIZE,
            max_steps: None,
        }
    }
}

impl MachineConfig {
    pub fn with_capacity(capacity: usize) -> Self {
        MachineConfig {
            capacity,
            ..Default::default()
        }
    }

    pub fn max_steps(self, max_steps: Option<u64>) -> Self {
        MachineConfig { max_steps, ..self }
    }
}

/// Command-line parser for a memory size in words.
pub fn parse_memory_size(text: &str) -> Result<usize, String> {
    let size: usize = text
        .parse()
        .map_err(|_| format!("cannot construct a machine with memory of `{}`", text))?;
    if size > MAX_MEMORY_SIZE {
        return Err(format!("memory is limited to {} words", MAX_MEMORY_SIZE));
    }
    Ok(size)
}
