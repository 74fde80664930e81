//! Operation records
//!
//! An operation is the immutable record of one committed transfer. It is
//! created exactly once by the transfer engine and owned by the Operation
//! Store; accounts only keep its id as a back-reference.

pub mod models;

pub use models::Operation;
