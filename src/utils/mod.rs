pub mod fare;
pub mod geo;
