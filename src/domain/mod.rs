pub mod member;
pub mod event;
pub mod subscription;

pub use member::*;
pub use event::*;
pub use subscription::*;
