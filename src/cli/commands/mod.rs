pub mod health;
pub mod procedures;
pub mod token;
