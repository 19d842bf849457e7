// src/process/mod.rs
pub mod driver;
pub mod header;
pub mod project;
pub mod sink;
pub mod tokenize;
