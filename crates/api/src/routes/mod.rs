pub mod health;
pub mod worlds;
