// File I/O operations

pub mod input;
pub mod report;
pub mod styles;
