//! Document state and logic (UI-agnostic).

mod io;
mod ops;
mod state;

pub use io::FileFormat;
pub use state::Document;
