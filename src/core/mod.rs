pub mod error;
pub mod types;
pub mod value;

// 错误和结果类型
pub use error::{RewriteError, RewriteResult};

// 核心数据类型
pub use value::*;

// 表达式系统类型
pub use types::expression::{Expression, MethodCallExpression};
pub use types::method::{MethodKind, MethodRef, MethodTemplate};
pub use types::DataType;
