pub mod matcher;
pub mod processor;
