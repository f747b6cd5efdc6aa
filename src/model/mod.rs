pub mod consensus;
pub mod course;
pub mod filter;
pub mod sort;

pub use consensus::*;
pub use course::*;
pub use filter::*;
pub use sort::*;
