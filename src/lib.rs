// EduLog - classroom activity notes
// Library exports

pub mod app;
pub mod cli;
pub mod config;
pub mod records;
pub mod rewrite;
pub mod roster;
pub mod script;
pub mod storage;
pub mod sync;
