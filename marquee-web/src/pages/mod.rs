//! Full page handlers using component system

pub mod home;

// Re-export page handlers
pub use home::home_page;
