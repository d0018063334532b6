use std::fmt::{self, Display};

/// Longest prefix of a text shown in messages, in bytes.
pub const TRUNCATE_LENGTH: usize = 497;

/// Displays a text cut after [`TRUNCATE_LENGTH`] bytes, on a char boundary.
pub struct Truncated<'a>(&'a str);

impl<'a> Truncated<'a> {
    pub fn new(text: &'a str) -> Self {
        Self(text)
    }
}

impl Display for Truncated<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut end = self.0.len().min(TRUNCATE_LENGTH);
        while !self.0.is_char_boundary(end) {
            end -= 1;
        }
        f.write_str(self.0[..end].trim_end())?;
        if end < self.0.len() {
            f.write_str("...")?;
        }
        Ok(())
    }
}

#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        $crate::Truncated::new(&$query)
    };
}

/// Sends the value through the channel and logs in case of error.
#[macro_export]
macro_rules! send_value {
    ($tx:ident, $value:expr) => {{
        if let Err(e) = $tx.send($value) {
            log::error!("{:#}", e);
        }
    }};
}
