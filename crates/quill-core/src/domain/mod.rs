//! Domain entities - the core business objects.

mod input;
mod post;

pub use input::{FieldErrors, PostInput};
pub use post::{Post, PostDraft};
