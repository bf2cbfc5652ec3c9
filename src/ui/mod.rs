//! UI components for LearnScape

pub mod card;
pub mod home;
pub mod navigation;
pub mod notices;
pub mod pages;
pub mod semesters;
pub mod theme;
pub mod viewer;
