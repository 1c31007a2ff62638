//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod user;
pub mod post;

pub use validation::ValidationError;
pub use user::{Email, Password, PasswordHash, Username};
pub use post::{PostContent, PostTitle};
