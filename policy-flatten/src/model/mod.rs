//! Core data models: the parsed element tree, the table hierarchy and the
//! in-memory table representation handed to sinks.

pub mod element;
pub mod level;
pub mod table;
