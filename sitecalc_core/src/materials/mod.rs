//! # Materials
//!
//! Material data for concrete work. Currently only reinforcement bar sizes;
//! concrete itself is priced per m³ and needs no properties here.

pub mod rebar;

pub use rebar::{rebar_table, RebarProperties, RebarSize};
