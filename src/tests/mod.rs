
pub use setup_test::{setup_test, setup_test_with_config, test_config, TestUtils};
