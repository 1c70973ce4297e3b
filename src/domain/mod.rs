pub mod audio;
pub mod auth;
pub mod quiz;
pub mod speech;
