pub mod hackathon;
pub mod host_request;
pub mod platform_config;
pub mod registration;
pub mod submission;
pub mod team_member;
pub mod track;
pub mod user;
