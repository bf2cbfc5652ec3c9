//! Catalog data, filtering, the viewer state machine and their supporting services

pub mod catalog;
pub mod config;
pub mod download;
pub mod filter;
pub mod library;
pub mod resource;
pub mod semesters;
pub mod settings;
pub mod viewer;
