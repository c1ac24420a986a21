pub mod import;
pub mod latest;
pub mod results;
