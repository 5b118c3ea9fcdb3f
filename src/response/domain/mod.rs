//! Response domain types and the inline body rule.

mod accent;
mod body;
mod options;
mod response;

pub use accent::Accent;
pub use body::{MAX_INLINE_BODY_CHARS, exceeds_inline_limit, paste_link_body, truncate_inline};
pub use options::RenderOptions;
pub use response::Response;
