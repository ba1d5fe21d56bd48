// src/services/mod.rs
pub mod openrouter;
