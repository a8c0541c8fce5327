//! Library surface of the exoscan CLI: logging setup and the
//! file-level operations the binary wires to its subcommands.

pub mod logging;
pub mod predict;
