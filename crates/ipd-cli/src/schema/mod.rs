pub mod dataset;
pub mod distances;
pub mod insights;
