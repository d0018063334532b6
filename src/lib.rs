pub use rowcast_core::*;
pub use rowcast_macros::Record;
