// Platform-specific code module

pub mod elevation;
pub mod signal;

pub use elevation::is_elevated;
pub use signal::deliver;
