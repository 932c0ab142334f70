mod error;
mod fetchers;
mod nav;

pub use core_types::NavError;
pub use fetchers::Fetchers;
pub use nav::Router;
