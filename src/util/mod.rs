// Utility Module
// File helpers used by the command line tool

pub mod file_ops;

pub use file_ops::{format_file_size, read_file, read_hex_file, write_file, write_hex_file};
