//! CLI command implementations

pub mod fields;
pub mod init;
pub mod submit;
pub mod validate;
