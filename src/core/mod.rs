//! Core translation engine module

pub mod backend;
pub mod config;
pub mod errors;
pub mod marian;
pub mod model_cache;
pub mod models;
pub mod samples;
pub mod script;
pub mod translator;
