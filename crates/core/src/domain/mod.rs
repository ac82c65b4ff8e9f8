pub mod contract;
pub mod plan;
