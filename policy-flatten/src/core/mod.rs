//! Building blocks of the flattening engine.

pub mod fk;
pub mod ids;
pub mod project;
pub mod summary;
pub mod traits;
pub mod xml_tree;
