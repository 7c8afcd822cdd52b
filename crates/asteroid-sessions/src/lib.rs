pub mod errors;
mod service;
pub mod traits;
pub mod types;

#[cfg(test)]
mod tests;

pub use errors::*;
pub use service::SessionService;
pub use traits::*;
pub use types::*;
