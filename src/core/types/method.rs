//! 方法标识
//!
//! 方法调用节点通过 `MethodRef` 标识被调用的方法。已知的查询方法在构建表达式树时
//! 就被解析为 `MethodKind` 枚举，形状匹配只比较枚举，不做运行时签名内省。
//!
//! - `MethodTemplate`: 方法模板，可以是泛型的（开放形式）
//! - `MethodRef`: 封闭方法，泛型参数已绑定具体类型

use crate::core::types::DataType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 已知的查询方法种类
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodKind {
    /// 产生整形后结果序列的查询
    ShapedQuery,
    /// 产生原始行缓冲序列的查询
    Query,
    /// 把行缓冲序列归约为单个值
    GetResult,
    /// 在枚举被包装序列前执行准备工作
    PreExecute,
    /// 其他任意方法
    Named(String),
}

impl MethodKind {
    pub fn name(&self) -> &str {
        match self {
            MethodKind::ShapedQuery => "ShapedQuery",
            MethodKind::Query => "Query",
            MethodKind::GetResult => "GetResult",
            MethodKind::PreExecute => "PreExecute",
            MethodKind::Named(name) => name,
        }
    }
}

/// 方法模板
///
/// 参数和返回类型中可以出现 `DataType::Generic(i)` 占位符，`generic_arity`
/// 为占位符个数；`generic_arity == 0` 表示非泛型方法。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodTemplate {
    pub kind: MethodKind,
    pub generic_arity: usize,
    pub parameters: Vec<DataType>,
    pub return_type: DataType,
}

impl MethodTemplate {
    pub fn new(
        kind: MethodKind,
        generic_arity: usize,
        parameters: Vec<DataType>,
        return_type: DataType,
    ) -> Self {
        Self {
            kind,
            generic_arity,
            parameters,
            return_type,
        }
    }

    pub fn is_generic(&self) -> bool {
        self.generic_arity > 0
    }

    /// 用类型实参构造封闭方法
    pub fn make_generic(&self, type_arguments: Vec<DataType>) -> MethodRef {
        MethodRef {
            kind: self.kind.clone(),
            parameters: self
                .parameters
                .iter()
                .map(|p| p.substitute(&type_arguments))
                .collect(),
            return_type: self.return_type.substitute(&type_arguments),
            type_arguments,
        }
    }

    /// 非泛型模板直接作为方法使用
    pub fn as_method(&self) -> MethodRef {
        self.make_generic(Vec::new())
    }
}

/// 封闭方法引用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRef {
    pub kind: MethodKind,
    #[serde(default)]
    pub type_arguments: Vec<DataType>,
    #[serde(default)]
    pub parameters: Vec<DataType>,
    pub return_type: DataType,
}

impl MethodRef {
    /// 创建不属于任何已知模板的普通方法
    pub fn named(name: impl Into<String>, parameters: Vec<DataType>, return_type: DataType) -> Self {
        Self {
            kind: MethodKind::Named(name.into()),
            type_arguments: Vec::new(),
            parameters,
            return_type,
        }
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// 检查本方法是否为给定泛型模板的封闭形式
    ///
    /// 要求模板是泛型的、种类相同，且类型实参个数与模板一致
    pub fn is_closed_form_of(&self, template: &MethodTemplate) -> bool {
        template.is_generic()
            && self.kind == template.kind
            && self.type_arguments.len() == template.generic_arity
    }

    /// 检查签名是否声明了取消令牌参数
    pub fn accepts_cancellation_token(&self) -> bool {
        self.parameters
            .iter()
            .any(|p| *p == DataType::CancellationToken)
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        if !self.type_arguments.is_empty() {
            let args = self
                .type_arguments
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "<{}>", args)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_result_template() -> MethodTemplate {
        MethodTemplate::new(
            MethodKind::GetResult,
            1,
            vec![DataType::sequence(DataType::ValueBuffer)],
            DataType::Generic(0),
        )
    }

    #[test]
    fn test_make_generic_substitutes_return_type() {
        let method = get_result_template().make_generic(vec![DataType::Int]);
        assert_eq!(method.return_type, DataType::Int);
        assert_eq!(method.to_string(), "GetResult<int>");
    }

    #[test]
    fn test_closed_form_of() {
        let template = get_result_template();
        let method = template.make_generic(vec![DataType::Long]);
        assert!(method.is_closed_form_of(&template));

        let other = MethodRef::named("GetResult", vec![], DataType::Long);
        assert!(!other.is_closed_form_of(&template));
    }

    #[test]
    fn test_non_generic_template_has_no_closed_form() {
        let template = MethodTemplate::new(MethodKind::Query, 0, vec![], DataType::Object);
        assert!(!template.as_method().is_closed_form_of(&template));
    }
}
