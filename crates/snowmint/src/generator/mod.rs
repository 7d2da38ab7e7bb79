mod basic;
mod config;
mod lock;
mod mutex;
mod status;

pub use basic::*;
pub use config::*;
pub use lock::*;
pub use mutex::*;
pub use status::*;
