pub mod assets;
pub mod config;
pub mod constants;
pub mod effects;
pub mod interaction;
pub mod pad;
pub mod physics;
pub mod session;

pub use assets::*;
pub use config::*;
pub use effects::*;
pub use interaction::{handle_pointer, hit_test, release_all, PointerEvent, PointerKind, Triggers};
pub use pad::*;
pub use session::*;
