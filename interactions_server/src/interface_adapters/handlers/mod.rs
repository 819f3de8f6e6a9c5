pub mod health;
pub mod interactions;
