//! Data Models
//!
//! Contains the data structures shared between services and commands.

pub mod response;
pub mod session;
pub mod settings;

pub use response::*;
pub use session::*;
pub use settings::*;
