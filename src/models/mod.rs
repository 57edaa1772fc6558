pub mod error;
pub mod jwt;
pub mod news;
pub mod provider;
pub mod user;
