pub mod filter;
pub mod gather;
pub mod tag;
pub mod types;
pub mod walk;
