//! Progress reporting for collection runs

pub mod reporter;
pub mod tally;
