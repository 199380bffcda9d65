//! Cartas - terminal browser for a card game catalog
//!
//! The library holds the state machine, the filter/sort pipeline and the
//! components; `main.rs` wires them to the terminal.

pub mod action;
pub mod catalog;
pub mod collate;
pub mod components;
pub mod effect;
pub mod normalize;
pub mod pipeline;
pub mod preview;
pub mod reducer;
pub mod state;
