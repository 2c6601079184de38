//! Exposition-format rendering of collected measures.

pub mod exposition;
