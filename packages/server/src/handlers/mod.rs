pub mod admin;
pub mod auth;
pub mod hackathon;
pub mod host;
pub mod registration;
pub mod submission;
