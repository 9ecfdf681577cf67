pub use shine_test_macros::test;
use std::sync::Once;

static INIT: Once = Once::new();

fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .is_test(true)
        .try_init();
    color_backtrace::install();
    log::trace!("Test logger initialized");
}

/// Test setup executed before each test.
/// The logger honors `RUST_LOG` and is initialized once per process.
pub fn setup_test() {
    #[cfg(not(miri))]
    INIT.call_once(init_logger);
}
