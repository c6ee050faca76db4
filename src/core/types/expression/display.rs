//! 表达式字符串表示
//!
//! 生成紧凑、确定的字符串形式，用于日志、测试断言和命令行输出。

use crate::core::types::expression::Expression;
use std::fmt;

impl Expression {
    /// 将表达式转换为字符串表示
    pub fn to_expression_string(&self) -> String {
        match self {
            Expression::Constant(v) => v.to_string(),
            Expression::Parameter { name, .. } => name.clone(),
            Expression::Default(data_type) => format!("default({})", data_type),
            Expression::MethodCall(call) => {
                let args_str = call
                    .arguments
                    .iter()
                    .map(|e| e.to_expression_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                match &call.receiver {
                    Some(receiver) => format!(
                        "{}.{}({})",
                        receiver.to_expression_string(),
                        call.method,
                        args_str
                    ),
                    None => format!("{}({})", call.method, args_str),
                }
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_expression_string())
    }
}
