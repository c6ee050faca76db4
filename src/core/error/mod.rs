//! 重写错误类型
//!
//! 结果转换重写在遍历阶段不产生错误：不匹配的形状直接落入通用分支。
//! 错误只出现在访问器构造阶段（前置条件检查）和提供者校验中。

use thiserror::Error;

/// 重写错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RewriteError {
    #[error("缺少必要参数: {0}")]
    MissingArgument(&'static str),

    #[error("无效的查询方法提供者: {0}")]
    InvalidProvider(String),

    #[error("不支持的结果类型: {0}")]
    UnsupportedResultType(String),
}

impl RewriteError {
    pub fn missing_argument(name: &'static str) -> Self {
        Self::MissingArgument(name)
    }

    pub fn invalid_provider(msg: impl Into<String>) -> Self {
        Self::InvalidProvider(msg.into())
    }

    pub fn unsupported_result_type(name: impl Into<String>) -> Self {
        Self::UnsupportedResultType(name.into())
    }
}

/// 重写结果类型
pub type RewriteResult<T> = std::result::Result<T, RewriteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_error_messages() {
        let err = RewriteError::missing_argument("outer_query_source");
        assert!(err.to_string().contains("outer_query_source"));

        let err = RewriteError::invalid_provider("GetResult 不是泛型方法");
        assert!(err.to_string().contains("GetResult"));
    }
}
