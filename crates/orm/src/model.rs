//! Record Model System - Persisted record types and their bidirectional links
//!
//! A [`Person`] owns sets of [`Address`], [`Contact`] and [`Role`] records, and
//! every [`Role`] owns a set of [`Permission`] records. Children carry a key
//! back-reference to their owner. Links are only created or removed through
//! the owner's paired mutators, which keep the back-reference non-empty exactly
//! while the child sits in the owner's collection.

pub mod core_trait;
pub mod audit;
pub mod references;
pub mod person;
pub mod address;
pub mod contact;
pub mod role;
pub mod permission;

pub use core_trait::*;
pub use audit::*;
pub use references::*;
pub use person::*;
pub use address::*;
pub use contact::*;
pub use role::*;
pub use permission::*;
