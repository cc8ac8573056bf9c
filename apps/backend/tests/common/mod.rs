#![allow(dead_code)]

// Logging is auto-installed for every integration test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}
