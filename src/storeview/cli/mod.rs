pub mod commands;
mod print;
mod setup;

pub use commands::run;
