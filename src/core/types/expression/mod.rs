//! 查询计划表达式树
//!
//! 本模块定义查询编译管线中传递的表达式树 `Expression`。
//!
//! ## 变体说明
//!
//! | 变体 | 用途 |
//! |------|------|
//! | `Constant` | 常量值 |
//! | `Parameter` | 参数引用（查询上下文、取消令牌等） |
//! | `Default` | 某类型的默认值，例如 `default(int?)` |
//! | `MethodCall` | 方法调用，重写只关心这一种节点 |
//!
//! 表达式树是不可变的：重写总是构造新节点，从不原地修改。
//!
//! ## 使用示例
//!
//! ```rust
//! use query_rewrite::core::types::expression::Expression;
//! use query_rewrite::core::types::DataType;
//!
//! let limit = Expression::default_of(DataType::nullable(DataType::Int));
//! assert_eq!(limit.to_string(), "default(int?)");
//! ```

mod constructors;
mod def;
mod display;
mod inspection;

pub use constructors::CANCELLATION_TOKEN_PARAMETER;
pub use def::{Expression, MethodCallExpression};
