// src/grid/systems/mod.rs
pub mod ai;
pub mod io;
pub mod logic;
