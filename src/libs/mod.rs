pub mod cluster;
pub mod error;
pub mod io;
pub mod relation;
pub mod triad;
