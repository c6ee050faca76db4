//! 表达式重写访问器框架
//!
//! 访问器返回带标签的结果 `Transformed`：`Yes(node)` 表示产生了新节点，
//! `No` 表示保持原样。调用方不依赖引用相等来判断是否发生了重写。

use crate::core::types::expression::{Expression, MethodCallExpression};

/// 重写结果
#[derive(Debug, Clone, PartialEq)]
pub enum Transformed<T> {
    /// 产生了新节点
    Yes(T),
    /// 未发生重写
    No,
}

impl<T> Transformed<T> {
    pub fn is_yes(&self) -> bool {
        matches!(self, Transformed::Yes(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Transformed::Yes(value) => Some(value),
            Transformed::No => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Transformed<U> {
        match self {
            Transformed::Yes(value) => Transformed::Yes(f(value)),
            Transformed::No => Transformed::No,
        }
    }
}

impl Transformed<Expression> {
    /// 取重写后的节点；未重写时克隆原节点
    pub fn or_original(self, original: &Expression) -> Expression {
        match self {
            Transformed::Yes(expr) => expr,
            Transformed::No => original.clone(),
        }
    }
}

/// 表达式重写访问器 trait
///
/// 默认实现对叶子节点不做改动，对方法调用逐个访问参数并在有参数变化时重建调用。
/// 接收者表达式不参与访问。
pub trait ExpressionRewriter: std::fmt::Debug + Send + Sync {
    /// 访问任意节点 - 主入口点
    fn visit(&self, expr: &Expression) -> Transformed<Expression> {
        match expr {
            Expression::MethodCall(call) => self.visit_method_call(call),
            Expression::Constant(_) | Expression::Parameter { .. } | Expression::Default(_) => {
                self.visit_leaf(expr)
            }
        }
    }

    /// 访问叶子节点
    fn visit_leaf(&self, _expr: &Expression) -> Transformed<Expression> {
        Transformed::No
    }

    /// 访问方法调用节点
    fn visit_method_call(&self, call: &MethodCallExpression) -> Transformed<Expression> {
        self.visit_arguments(call)
    }

    /// 访问全部参数，用重写后的参数替换原参数重建调用
    fn visit_arguments(&self, call: &MethodCallExpression) -> Transformed<Expression> {
        let mut changed = false;
        let arguments = call
            .arguments
            .iter()
            .map(|arg| match self.visit(arg) {
                Transformed::Yes(rewritten) => {
                    changed = true;
                    rewritten
                }
                Transformed::No => arg.clone(),
            })
            .collect();

        if changed {
            Transformed::Yes(Expression::MethodCall(call.with_arguments(arguments)))
        } else {
            Transformed::No
        }
    }

    /// 重写表达式，未发生重写时返回原表达式的克隆
    fn rewrite(&self, expr: &Expression) -> Expression {
        self.visit(expr).or_original(expr)
    }
}
