pub mod args;
pub mod handler;

pub use args::TablesArgs;
pub use handler::{TableReport, build_tables, handle_tables};
