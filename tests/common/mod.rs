#![allow(dead_code, unused_imports)]

pub use mjmlwatch_test_utils::builders;
pub use mjmlwatch_test_utils::fake_backend;
pub use mjmlwatch_test_utils::fake_engine;
pub use mjmlwatch_test_utils::recording_logger;
pub use mjmlwatch_test_utils::{init_tracing, with_timeout};
