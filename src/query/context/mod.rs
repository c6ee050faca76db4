//! 查询编译上下文
//!
//! - `QuerySource`: 外层查询源的引用
//! - `RelationalQueryCompilationContext`: 关系查询编译上下文，持有查询方法提供者

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::error::RewriteResult;
use crate::core::types::DataType;
use crate::query::method_provider::{
    validate_provider, AsyncQueryMethodProvider, QueryMethodProvider, SyncQueryMethodProvider,
};

/// 查询执行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    #[default]
    Sync,
    Async,
}

/// 查询源
///
/// 对应查询模型中 `from x in xs` 的 `x`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySource {
    pub item_name: String,
    pub item_type: DataType,
}

impl QuerySource {
    pub fn new(item_name: impl Into<String>, item_type: DataType) -> Self {
        Self {
            item_name: item_name.into(),
            item_type,
        }
    }
}

/// 关系查询编译上下文
#[derive(Debug, Clone)]
pub struct RelationalQueryCompilationContext {
    query_method_provider: Arc<dyn QueryMethodProvider>,
    execution_mode: ExecutionMode,
}

impl RelationalQueryCompilationContext {
    /// 使用自定义提供者创建上下文，提供者需通过校验
    pub fn new(
        query_method_provider: Arc<dyn QueryMethodProvider>,
        execution_mode: ExecutionMode,
    ) -> RewriteResult<Self> {
        validate_provider(query_method_provider.as_ref())?;
        Ok(Self {
            query_method_provider,
            execution_mode,
        })
    }

    /// 使用内置提供者创建上下文
    pub fn for_mode(execution_mode: ExecutionMode) -> Self {
        let query_method_provider: Arc<dyn QueryMethodProvider> = match execution_mode {
            ExecutionMode::Sync => Arc::new(SyncQueryMethodProvider::new()),
            ExecutionMode::Async => Arc::new(AsyncQueryMethodProvider::new()),
        };
        Self {
            query_method_provider,
            execution_mode,
        }
    }

    pub fn query_method_provider(&self) -> &dyn QueryMethodProvider {
        self.query_method_provider.as_ref()
    }

    pub fn execution_mode(&self) -> ExecutionMode {
        self.execution_mode
    }

    pub fn is_async(&self) -> bool {
        self.execution_mode == ExecutionMode::Async
    }
}

impl Default for RelationalQueryCompilationContext {
    fn default() -> Self {
        Self::for_mode(ExecutionMode::Sync)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_mode_selects_provider() {
        let ctx = RelationalQueryCompilationContext::for_mode(ExecutionMode::Async);
        assert!(ctx.is_async());

        let get_result = ctx
            .query_method_provider()
            .get_result_method()
            .make_generic(vec![DataType::Int]);
        assert!(get_result.accepts_cancellation_token());
    }

    #[test]
    fn test_new_validates_provider() {
        let ctx = RelationalQueryCompilationContext::new(
            Arc::new(SyncQueryMethodProvider::new()),
            ExecutionMode::Sync,
        );
        assert!(ctx.is_ok());
    }
}
