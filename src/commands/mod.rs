//! Command handlers bridging the CLI to the use cases

pub mod generate;
pub mod init;

pub use generate::cmd_generate;
pub use init::cmd_init;
