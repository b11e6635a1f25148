pub mod complexity;
pub mod persist;

pub use complexity::*;
pub use persist::*;
