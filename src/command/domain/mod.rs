//! Command domain types.

mod descriptor;
mod error;
mod guard;
mod invocation;
mod path;

pub use descriptor::CommandDescriptor;
pub use error::{CommandDomainError, CommandError, CommandResult};
pub use guard::{
    CooldownScope, CooldownSpec, GuardRejection, Guards, PermissionRequirement,
};
pub use invocation::InvocationContext;
pub use path::{CommandPath, split_first_token};
