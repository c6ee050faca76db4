//! 表达式构造函数
//!
//! 提供创建各类表达式的工厂方法。

use crate::core::types::expression::{Expression, MethodCallExpression};
use crate::core::types::method::MethodRef;
use crate::core::types::DataType;
use crate::core::Value;

/// 取消令牌参数名
pub const CANCELLATION_TOKEN_PARAMETER: &str = "ct";

impl Expression {
    /// 创建常量表达式
    pub fn constant(value: impl Into<Value>) -> Self {
        Expression::Constant(value.into())
    }

    /// 创建空值常量
    pub fn null() -> Self {
        Expression::Constant(Value::Null)
    }

    /// 创建参数引用
    pub fn parameter(name: impl Into<String>, data_type: DataType) -> Self {
        Expression::Parameter {
            name: name.into(),
            data_type,
        }
    }

    /// 创建类型默认值表达式
    pub fn default_of(data_type: DataType) -> Self {
        Expression::Default(data_type)
    }

    /// 创建静态方法调用
    pub fn call(method: MethodRef, arguments: Vec<Expression>) -> Self {
        Expression::MethodCall(MethodCallExpression::new(method, arguments))
    }

    /// 创建实例方法调用
    pub fn call_on(receiver: Expression, method: MethodRef, arguments: Vec<Expression>) -> Self {
        Expression::MethodCall(MethodCallExpression::new(method, arguments).with_receiver(receiver))
    }

    /// 生成代码在运行时读取的取消令牌参数
    pub fn cancellation_token() -> Self {
        Expression::parameter(CANCELLATION_TOKEN_PARAMETER, DataType::CancellationToken)
    }
}

impl From<MethodCallExpression> for Expression {
    fn from(call: MethodCallExpression) -> Self {
        Expression::MethodCall(call)
    }
}
