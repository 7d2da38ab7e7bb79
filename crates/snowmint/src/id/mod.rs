mod components;
#[allow(clippy::module_inception)]
mod id;
mod layout;

pub use components::*;
pub use id::*;
pub use layout::*;
