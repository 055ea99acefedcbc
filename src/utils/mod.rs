// src/utils/mod.rs

pub mod options;
pub mod sample;
