pub mod auth;
pub mod health;
pub mod helpers;
pub mod notes;
pub mod users;
