pub mod git;
pub mod logging;
