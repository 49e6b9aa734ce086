pub mod actor;
pub mod creation;
pub mod eligibility;
pub mod hackathon_status;
pub mod host_approval;
pub mod lifecycle;
pub mod platform_config;
pub mod team;

pub use actor::{Actor, ActorRole};
pub use hackathon_status::HackathonStatus;
pub use host_approval::HostApprovalStatus;
