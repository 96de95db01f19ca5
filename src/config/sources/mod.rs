//! Configuration sources, in increasing precedence.

pub mod environment;
pub mod explicit_file;
pub mod user_file;
