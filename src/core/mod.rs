pub mod activity;
pub mod animator;
pub mod app;
pub mod catalog;
pub mod contact;
pub mod filter;
pub mod repo;
pub mod scheduler;
pub mod theme;
pub mod view;
