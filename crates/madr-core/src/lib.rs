//! MADR Core Library
//!
//! Bidirectional transform between Markdown decision-record documents and
//! the structured [`DecisionRecord`] model, plus a structural validator.
//! No IO dependencies, pure logic only: every entry point is a synchronous
//! total function over its input and can be called from any number of
//! concurrent tasks without coordination.

pub mod builder;
pub mod casing;
pub mod extract;
pub mod grammar;
pub mod matching;
pub mod model;
pub mod serializer;
pub mod validator;


pub use builder::parse_document;
pub use extract::extract_list_items;
pub use model::{ConsideredOption, DecisionOutcome, DecisionRecord, Point, RecordUpdate, TextRange};
pub use serializer::serialize_record;
pub use validator::{validate_document, Diagnostic, DiagnosticSeverity};
