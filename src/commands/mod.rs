//! Command implementations for reslug

pub mod collisions;
pub mod delete;
pub mod dispatch;
pub mod duplicates;
pub mod parse;
pub mod resolve;
