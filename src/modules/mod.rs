pub mod assessment;
pub mod quiz;
