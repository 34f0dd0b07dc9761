pub mod finding;
pub mod verdict;

pub use finding::*;
pub use verdict::*;
