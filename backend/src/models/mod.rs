pub mod ask;

pub use ask::*;
