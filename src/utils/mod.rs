pub mod aggregator;
pub mod config;
pub mod hash_password;
pub mod jwt_encode;
pub mod providers;
pub mod state;
pub mod user_store;
