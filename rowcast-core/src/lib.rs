mod as_value;
mod binding;
mod cache;
mod cancel;
mod config;
mod cursor;
mod diagnose;
mod error;
mod loader;
pub mod memory;
mod naming;
mod reader;
mod reflector;
mod row;
mod signature;
mod statement;
mod target;
mod type_map;
mod util;
mod value;

pub use ::anyhow::Context;
pub use as_value::*;
pub use binding::*;
pub use cache::*;
pub use cancel::*;
pub use config::*;
pub use cursor::*;
pub use diagnose::*;
pub use error::*;
pub use loader::*;
pub use naming::*;
pub use reader::*;
pub use reflector::*;
pub use row::*;
pub use signature::*;
pub use statement::*;
pub use target::*;
pub use type_map::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
