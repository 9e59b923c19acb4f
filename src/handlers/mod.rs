pub mod fare;
pub mod health;
