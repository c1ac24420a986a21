pub mod summaries;
pub mod values;
