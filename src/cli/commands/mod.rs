pub mod activity;
pub mod config;
pub mod contact;
pub mod dashboard;
pub mod hero;
pub mod projects;
pub mod schema;
pub mod stats;
pub mod theme;
