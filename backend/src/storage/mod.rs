//! # Storage Module
//!
//! Transaction persistence behind [`TransactionRepository`]. The shipped
//! implementation keeps records in memory and is seeded at startup.

pub mod memory;
pub mod seed;
pub mod traits;

pub use memory::InMemoryTransactionRepository;
pub use traits::TransactionRepository;
