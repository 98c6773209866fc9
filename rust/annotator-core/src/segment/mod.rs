pub mod types;
pub mod resolver;
pub mod partition;

pub use types::*;
pub use resolver::*;
pub use partition::*;

#[cfg(test)]
mod tests;
