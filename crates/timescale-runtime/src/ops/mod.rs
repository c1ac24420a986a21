pub mod import;
pub mod results;
pub mod values;

pub use import::import;
pub use results::{results, validate_results_query};
pub use values::latest_values;
