mod cbox;
mod connection;
mod cursor;
mod extract;
mod statement;
mod type_map;

use std::{ffi::CStr, os::raw::c_char};

pub(crate) use cbox::*;
pub use connection::*;
pub use cursor::*;
pub use statement::*;
pub use type_map::*;

pub(crate) fn error_message_from_ptr(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return "Unknown error (could not extract the error message)".into();
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .unwrap_or("Unknown error (the error message was not a valid C string)")
        .to_string()
}
