//! Concrete implementations of the domain's `BoardRepository` trait.
//!
//! The usecase layer depends on the trait, not on these types (dependency
//! inversion).

pub mod file;

pub use file::FileBoardRepository;
