//! CLI Commands

pub mod generate;
pub mod serve;
pub mod validate;
