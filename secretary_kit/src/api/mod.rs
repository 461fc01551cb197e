pub mod args;
pub mod markdown;
