// 核心类型系统模块
//
// 包含重写所需的最小类型系统：数据类型、表达式树和方法标识

use crate::core::error::RewriteError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod expression;
pub mod method;

/// 统一的数据类型枚举
///
/// 只覆盖结果转换重写需要区分的类型；宿主系统的完整类型系统不在本 crate 范围内
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Bool,
    Int,
    Long,
    Double,
    String,
    /// 任意对象（未知或无需区分的类型）
    Object,
    /// 可空包装，例如 `int?`
    Nullable(Box<DataType>),
    /// 元素序列
    Sequence(Box<DataType>),
    /// 未整形的数据库行缓冲
    ValueBuffer,
    /// 映射实体类型
    Entity(String),
    QueryContext,
    QuerySource,
    ShaperCommandContext,
    Shaper(Box<DataType>),
    CancellationToken,
    /// 泛型方法模板中的第 N 个类型参数占位符
    Generic(usize),
}

impl DataType {
    pub fn nullable(inner: DataType) -> Self {
        DataType::Nullable(Box::new(inner))
    }

    pub fn sequence(element: DataType) -> Self {
        DataType::Sequence(Box::new(element))
    }

    pub fn shaper(element: DataType) -> Self {
        DataType::Shaper(Box::new(element))
    }

    /// 序列的元素类型；非序列返回 None
    pub fn element_type(&self) -> Option<&DataType> {
        match self {
            DataType::Sequence(element) => Some(element),
            _ => None,
        }
    }

    /// 检查类型中是否仍含有未绑定的泛型参数
    pub fn is_open(&self) -> bool {
        match self {
            DataType::Generic(_) => true,
            DataType::Nullable(inner) | DataType::Sequence(inner) | DataType::Shaper(inner) => {
                inner.is_open()
            }
            _ => false,
        }
    }

    /// 用具体类型实参替换泛型占位符
    ///
    /// 超出实参范围的占位符保持原样
    pub fn substitute(&self, type_arguments: &[DataType]) -> DataType {
        match self {
            DataType::Generic(index) => type_arguments
                .get(*index)
                .cloned()
                .unwrap_or_else(|| self.clone()),
            DataType::Nullable(inner) => DataType::nullable(inner.substitute(type_arguments)),
            DataType::Sequence(inner) => DataType::sequence(inner.substitute(type_arguments)),
            DataType::Shaper(inner) => DataType::shaper(inner.substitute(type_arguments)),
            _ => self.clone(),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Bool => write!(f, "bool"),
            DataType::Int => write!(f, "int"),
            DataType::Long => write!(f, "long"),
            DataType::Double => write!(f, "double"),
            DataType::String => write!(f, "string"),
            DataType::Object => write!(f, "object"),
            DataType::Nullable(inner) => write!(f, "{}?", inner),
            DataType::Sequence(element) => write!(f, "Sequence<{}>", element),
            DataType::ValueBuffer => write!(f, "ValueBuffer"),
            DataType::Entity(name) => write!(f, "{}", name),
            DataType::QueryContext => write!(f, "QueryContext"),
            DataType::QuerySource => write!(f, "QuerySource"),
            DataType::ShaperCommandContext => write!(f, "ShaperCommandContext"),
            DataType::Shaper(element) => write!(f, "Shaper<{}>", element),
            DataType::CancellationToken => write!(f, "CancellationToken"),
            DataType::Generic(index) => write!(f, "T{}", index),
        }
    }
}

/// 解析标量结果类型名称，支持 `int?` 形式的可空后缀
impl FromStr for DataType {
    type Err = RewriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if let Some(inner) = name.strip_suffix('?') {
            return Ok(DataType::nullable(inner.parse()?));
        }
        match name.to_ascii_lowercase().as_str() {
            "bool" => Ok(DataType::Bool),
            "int" => Ok(DataType::Int),
            "long" => Ok(DataType::Long),
            "double" => Ok(DataType::Double),
            "string" => Ok(DataType::String),
            "object" => Ok(DataType::Object),
            _ => Err(RewriteError::unsupported_result_type(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_generic() {
        let open = DataType::sequence(DataType::Generic(0));
        assert!(open.is_open());

        let closed = open.substitute(&[DataType::ValueBuffer]);
        assert_eq!(closed, DataType::sequence(DataType::ValueBuffer));
        assert!(!closed.is_open());
    }

    #[test]
    fn test_substitute_out_of_range_keeps_placeholder() {
        let open = DataType::Generic(1);
        assert_eq!(open.substitute(&[DataType::Int]), DataType::Generic(1));
    }

    #[test]
    fn test_parse_result_type() {
        assert_eq!("int".parse::<DataType>(), Ok(DataType::Int));
        assert_eq!(
            "long?".parse::<DataType>(),
            Ok(DataType::nullable(DataType::Long))
        );
        assert!("decimal".parse::<DataType>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(DataType::nullable(DataType::Int).to_string(), "int?");
        assert_eq!(
            DataType::sequence(DataType::ValueBuffer).to_string(),
            "Sequence<ValueBuffer>"
        );
        assert_eq!(DataType::Entity("Customer".to_string()).to_string(), "Customer");
    }
}
