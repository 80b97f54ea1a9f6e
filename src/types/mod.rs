pub mod commit;
pub mod config;
pub mod entity;
pub mod report;
