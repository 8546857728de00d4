pub mod events;
pub mod health;
pub mod me;
pub mod users;
