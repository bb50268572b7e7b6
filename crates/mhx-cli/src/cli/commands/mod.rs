//! CLI command handlers. Each command is in its own file.
//!
//! Handlers take an already-parsed archive and write to any `io::Write`, so
//! tests can capture their output.

mod extract;
mod html;
mod list;

pub use extract::{run_extract, SelectionArgs};
pub use html::run_html;
pub use list::{run_list, ListOptions};

#[cfg(test)]
pub use extract::selected_indices;
#[cfg(test)]
pub use list::format_size;
