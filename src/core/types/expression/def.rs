//! 表达式类型定义

use crate::core::types::method::MethodRef;
pub use crate::core::types::DataType;
use crate::core::Value;
use serde::{Deserialize, Serialize};

/// 表达式树节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// 常量值
    Constant(Value),

    /// 参数引用
    Parameter { name: String, data_type: DataType },

    /// 类型默认值
    Default(DataType),

    /// 方法调用
    MethodCall(MethodCallExpression),
}

/// 方法调用节点
///
/// 实例方法带有接收者表达式；结果转换重写不会访问接收者
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCallExpression {
    pub method: MethodRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Box<Expression>>,
    #[serde(default)]
    pub arguments: Vec<Expression>,
}

impl MethodCallExpression {
    pub fn new(method: MethodRef, arguments: Vec<Expression>) -> Self {
        Self {
            method,
            receiver: None,
            arguments,
        }
    }

    pub fn with_receiver(mut self, receiver: Expression) -> Self {
        self.receiver = Some(Box::new(receiver));
        self
    }

    /// 以新的参数列表构造同一方法的调用，保留接收者
    pub fn with_arguments(&self, arguments: Vec<Expression>) -> Self {
        Self {
            method: self.method.clone(),
            receiver: self.receiver.clone(),
            arguments,
        }
    }

    pub fn argument(&self, index: usize) -> Option<&Expression> {
        self.arguments.get(index)
    }
}
