//! Helpers shared by the unit tests

use env_logger::Builder;
use log::LevelFilter;
use std::sync::Once;

/// Guards the one-time logger installation
static INIT: Once = Once::new();

/// Routes `log` output through the test harness. `RUST_LOG` overrides the default level.
pub(crate) fn init_test_logger() {
    INIT.call_once(|| {
        let mut builder = Builder::new();
        builder.filter_level(LevelFilter::Debug).is_test(true).parse_default_env();

        // Another harness may already have installed a logger
        let _ = builder.try_init();
    });
}
