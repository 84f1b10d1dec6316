pub mod compute;
pub mod tables;
