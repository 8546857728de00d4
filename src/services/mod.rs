pub mod discovery_service;
pub mod event_service;
pub mod follow_service;
pub mod membership_service;
pub mod user_service;
