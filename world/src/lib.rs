#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative state for the typing arcade.
//!
//! [`Word`] is the typable entity and its lifecycle state machine,
//! [`WordCollection`] holds the live words and resolves prefix matches, and
//! [`Session`] carries level, score and lives for a single play session.
//! None of these types know about rendering; hosts read positions and
//! progress from them every frame.

mod collection;
mod session;
mod word;

pub use collection::WordCollection;
pub use session::{Session, SessionStatus};
pub use word::{Kinematics, Word};
