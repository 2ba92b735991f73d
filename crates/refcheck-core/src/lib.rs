//! # refcheck-core
//!
//! Core types and the metadata comparator for refcheck.
//!
//! This crate has no I/O. It provides:
//! - [`Doi`] parsing and validation
//! - The asserted [`Reference`] and the [`ResolvedRecord`] a service returns
//! - [`Verdict`] and the field-level comparator that produces it
//! - Reference-list report types with summary counts
//! - Cross-cutting error types

pub mod compare;
pub mod doi;
pub mod errors;
pub mod reference;
pub mod report;
pub mod verdict;

pub use compare::compare;
pub use doi::Doi;
pub use errors::CoreError;
pub use reference::{Author, Reference, ResolvedRecord};
pub use report::{CitedReference, ReferenceEntry, ReferenceReport, ReferenceStatus, Summary};
pub use verdict::{Field, FieldMismatch, Verdict};
