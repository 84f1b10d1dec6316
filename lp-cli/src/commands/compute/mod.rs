pub mod args;
pub mod handler;

pub use args::ComputeArgs;
pub use handler::{ComputeReport, handle_compute, run_compute};
