//! ACL Core Types
//!
//! This crate provides the document model shared by the ACL parser and the
//! resolution engine:
//!
//! - **Identifiers**: interned block and field names ([`identifier::Id`])
//! - **Spans**: byte ranges into the source text ([`span::Span`])
//! - **Values**: literal and reference field values ([`value`] module)
//! - **References**: scoped reference paths ([`reference`] module)
//! - **Documents**: the arena-backed block tree ([`document`] module)

pub mod document;
pub mod identifier;
pub mod reference;
pub mod span;
pub mod value;

pub use document::{Block, BlockId, Document, Field};
pub use identifier::Id;
pub use reference::{Reference, Scope, Segment};
pub use span::Span;
pub use value::{TypeTag, Value};
