//! Query data model for the petrel filter language.
//!
//! A filter is a flat boolean expression over one table's columns:
//!
//! ```text
//! age > 10 && name == 'bob'
//! ```
//!
//! The pipeline turns that source into three layers of data, all defined
//! here:
//!
//! - **[tokens]** - classified source fragments produced by the lexer
//! - **[groups]** - relation triples and join singles produced by the grouper
//! - **[operators]** - the comparison and join operator vocabularies
//! - **[tree]** - the boolean expression tree evaluated against each row
//!
//! Tokens keep their raw text all the way through so that errors can echo
//! the query back at the user. The typed operator enums are resolved from
//! that text wherever a stage needs the meaning rather than the spelling:
//! the validator to check operator/type compatibility, the planner to pick
//! AND over OR, and the evaluator to apply the comparison.

pub mod groups;
pub mod operators;
pub mod tokens;
pub mod tree;

pub use groups::{GroupKind, Relation, RelationGroup};
pub use operators::{CompareOp, JoinOp};
pub use tokens::{Token, TokenKind};
pub use tree::ExprNode;
