pub mod file;
pub mod row;
pub mod summary;

pub use file::*;
pub use row::*;
pub use summary::*;
