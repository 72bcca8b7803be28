pub mod generator;
pub mod production;
