// src/core/mod.rs
pub mod counts;
pub mod engine;
pub mod ranking;
pub mod types;
pub mod vocabulary;
