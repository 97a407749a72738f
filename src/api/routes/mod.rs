//! API Routes
//!
//! Route handlers organized by functionality.

pub mod arm;
pub mod health;
pub mod state;
pub mod vision;
