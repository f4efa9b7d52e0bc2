pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod planner;
pub mod query;
pub mod schema;
pub mod store;
pub mod validator;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{QueryError, StoreError};
pub use evaluator::{evaluate, plan, search};
pub use lexer::{tokenize, Lexer};
pub use parser::{group, Grouper};
pub use planner::build_tree;
pub use query::{CompareOp, ExprNode, GroupKind, JoinOp, Relation, RelationGroup, Token, TokenKind};
pub use schema::{Column, ColumnType, Schema};
pub use store::Table;
pub use validator::validate;
