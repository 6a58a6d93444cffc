//! One-step front end: assemble `<name>.ftnt`, run `<name>.i`, or both,
//! depending on which of the two files exist.

pub mod cli;
pub mod config;
pub mod driver;
pub mod error;

pub use cli::{Args, VERSION};
pub use config::{Config, Mode};
pub use driver::{run, Outcome};
pub use error::DriverError;
