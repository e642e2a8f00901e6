pub mod support;

mod collisions;
mod config;
mod delete;
mod logging;
mod parse;
