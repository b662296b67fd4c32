pub mod builders;
pub mod collectors;
pub mod strategies;

pub use builders::*;
pub use collectors::*;
pub use strategies::*;
