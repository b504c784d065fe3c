pub mod carryover;
pub mod config;
pub mod doctor;
pub mod streak;
