pub mod context;
pub mod method_provider;
pub mod result_operator;
pub mod visitor;

pub use context::{ExecutionMode, QuerySource, RelationalQueryCompilationContext};
pub use method_provider::{AsyncQueryMethodProvider, QueryMethodProvider, SyncQueryMethodProvider};
pub use visitor::{ChildSubstitution, ExpressionRewriter, ResultTransformingVisitor, Transformed};
