mod cancellation;
mod customers;
mod dynamic;
mod mismatch;
#[cfg(not(feature = "disable-multiple-statements"))]
mod multiple;
mod output;
mod tuples;

use crate::{
    cancellation::cancellation, customers::customers, dynamic::dynamic, mismatch::mismatch,
    output::output, tuples::tuples,
};
use log::LevelFilter;
#[cfg(not(feature = "disable-multiple-statements"))]
use multiple::multiple;
use rowcast::{Connection, Reader, ShapeCache};
use std::{env, sync::Arc};

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Reader using the type system of the connection.
pub fn reader<C: Connection>(connection: &C) -> Reader {
    Reader::new(Arc::new(ShapeCache::new(connection.type_map())))
}

pub async fn execute_tests<C: Connection>(connection: C)
where
    C::Statement: 'static,
{
    customers(&connection).await;
    tuples(&connection).await;
    dynamic(&connection).await;
    #[cfg(not(feature = "disable-multiple-statements"))]
    multiple(&connection).await;
    mismatch(&connection).await;
    cancellation(&connection).await;
    output(&connection).await;
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
