
pub use test_utils::TestContextExt;
