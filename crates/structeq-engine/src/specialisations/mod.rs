//! Built-in container specialisations.

pub mod map;
pub mod optional;
pub mod sequence;
pub mod unordered;

pub use map::MapEntries;
pub use optional::OptionalValue;
pub use sequence::OrderedSequence;
pub use unordered::UnorderedCollection;
