mod commands;
mod documents;
mod lifecycle;

pub use commands::*;
pub use documents::*;
pub use lifecycle::*;
