//! 表达式访问器模块
//! 用于查询计划表达式树的重写

mod expression_rewriter;
mod result_transforming_visitor;

pub use expression_rewriter::{ExpressionRewriter, Transformed};
pub use result_transforming_visitor::{ChildSubstitution, ResultTransformingVisitor};
