//! Cog domain types.

mod error;
mod name;
mod state;

pub use error::CogDomainError;
pub use name::CogName;
pub use state::CogState;
