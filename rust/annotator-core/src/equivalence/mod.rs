pub mod record;
pub mod predicates;
pub mod reconcile;

pub use record::*;
pub use predicates::*;
pub use reconcile::*;
