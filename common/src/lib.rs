mod error;
mod event;
mod frame;
mod match_key;
mod timeline;

pub use error::*;
pub use event::*;
pub use frame::*;
pub use match_key::*;
pub use timeline::*;
