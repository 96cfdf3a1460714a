pub mod session;

pub use session::{SessionRecord, DEFAULT_DESC, DEFAULT_TAG};
