//! 表达式检查方法

use crate::core::types::expression::{Expression, MethodCallExpression};
use crate::core::types::method::MethodTemplate;
use crate::core::types::DataType;

impl Expression {
    /// 表达式的静态类型
    pub fn data_type(&self) -> DataType {
        match self {
            Expression::Constant(value) => value.data_type(),
            Expression::Parameter { data_type, .. } => data_type.clone(),
            Expression::Default(data_type) => data_type.clone(),
            Expression::MethodCall(call) => call.method.return_type.clone(),
        }
    }

    pub fn as_method_call(&self) -> Option<&MethodCallExpression> {
        match self {
            Expression::MethodCall(call) => Some(call),
            _ => None,
        }
    }

    /// 若本节点是给定模板封闭形式的方法调用，返回该调用
    pub fn as_closed_call_of(&self, template: &MethodTemplate) -> Option<&MethodCallExpression> {
        self.as_method_call()
            .filter(|call| call.method.is_closed_form_of(template))
    }

    /// 直接子表达式，按参数顺序，接收者在前
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Expression::MethodCall(call) => call
                .receiver
                .iter()
                .map(|r| &**r)
                .chain(call.arguments.iter())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// 树中节点总数
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(|c| c.node_count())
            .sum::<usize>()
    }
}
