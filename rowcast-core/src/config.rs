/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Keep one loader per result shape, when `false` every load reflects again.
    pub caching: bool,
    /// An empty result set loads as an empty collection instead of [`crate::Section::Empty`].
    pub allow_empty: bool,
    /// Rows buffered between the producer and the consumer of a stream.
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            caching: true,
            allow_empty: true,
            channel_capacity: 256,
        }
    }
}
