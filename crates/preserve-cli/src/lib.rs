//! Library side of the `preservation-calc` binary: logging setup, grid
//! dumps and result tables.

pub mod grid;
pub mod logging;
pub mod summary;
