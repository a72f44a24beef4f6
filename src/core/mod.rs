// src/core/mod.rs

pub mod converter;
pub mod dictionary;
pub mod syllable;
pub mod types;
