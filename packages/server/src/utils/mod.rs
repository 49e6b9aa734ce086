pub mod hackathon;
pub mod hash;
pub mod host;
pub mod jwt;
