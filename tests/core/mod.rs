pub mod pipeline_tests;
pub mod session_tests;
