//! Logger initialization on top of the `log` facade.

mod init;

pub use init::{LoggingConfig, init_logging};
