pub mod cancel;
pub mod domain;
pub mod problem;
pub mod query;
mod util;

pub use cancel::CancellationToken;
pub use domain::*;
pub use problem::Problem;
pub use query::*;
pub use util::*;
