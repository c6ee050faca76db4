//! 查询方法提供者
//!
//! 提供者暴露编译管线生成代码时使用的几个已知方法模板。结果转换重写只用它们做
//! 两件事：判断某个调用是否为模板的封闭形式，以及构造替换后的调用。
//!
//! 同步与异步两套实现的区别在于 `GetResult`：异步版本在签名末尾声明取消令牌参数。

use crate::core::error::{RewriteError, RewriteResult};
use crate::core::types::method::{MethodKind, MethodTemplate};
use crate::core::types::DataType;

/// 查询方法提供者 trait
pub trait QueryMethodProvider: std::fmt::Debug + Send + Sync {
    /// `ShapedQuery<T>(QueryContext, ShaperCommandContext, Shaper<T>) -> Sequence<T>`
    fn shaped_query_method(&self) -> &MethodTemplate;

    /// `Query(QueryContext, ShaperCommandContext, int?) -> Sequence<ValueBuffer>`
    fn query_method(&self) -> &MethodTemplate;

    /// `GetResult<TResult>(Sequence<ValueBuffer>) -> TResult`
    fn get_result_method(&self) -> &MethodTemplate;

    /// `PreExecute<T>(QueryContext, Sequence<T>, QuerySource) -> Sequence<T>`
    fn pre_execute_method(&self) -> &MethodTemplate;
}

/// 检查提供者的模板是否满足重写要求
///
/// `ShapedQuery`、`GetResult`、`PreExecute` 必须是单类型参数的泛型模板，
/// `Query` 必须是非泛型方法。
pub fn validate_provider(provider: &dyn QueryMethodProvider) -> RewriteResult<()> {
    let generic = [
        (provider.shaped_query_method(), MethodKind::ShapedQuery),
        (provider.get_result_method(), MethodKind::GetResult),
        (provider.pre_execute_method(), MethodKind::PreExecute),
    ];
    for (template, kind) in generic {
        if template.kind != kind {
            return Err(RewriteError::invalid_provider(format!(
                "期望 {} 模板，实际为 {}",
                kind.name(),
                template.kind.name()
            )));
        }
        if template.generic_arity != 1 {
            return Err(RewriteError::invalid_provider(format!(
                "{} 必须恰好有一个类型参数",
                kind.name()
            )));
        }
    }

    let query = provider.query_method();
    if query.kind != MethodKind::Query || query.is_generic() {
        return Err(RewriteError::invalid_provider("Query 必须是非泛型方法"));
    }
    Ok(())
}

fn shaped_query_template() -> MethodTemplate {
    MethodTemplate::new(
        MethodKind::ShapedQuery,
        1,
        vec![
            DataType::QueryContext,
            DataType::ShaperCommandContext,
            DataType::shaper(DataType::Generic(0)),
        ],
        DataType::sequence(DataType::Generic(0)),
    )
}

fn query_template() -> MethodTemplate {
    MethodTemplate::new(
        MethodKind::Query,
        0,
        vec![
            DataType::QueryContext,
            DataType::ShaperCommandContext,
            DataType::nullable(DataType::Int),
        ],
        DataType::sequence(DataType::ValueBuffer),
    )
}

fn pre_execute_template() -> MethodTemplate {
    MethodTemplate::new(
        MethodKind::PreExecute,
        1,
        vec![
            DataType::QueryContext,
            DataType::sequence(DataType::Generic(0)),
            DataType::QuerySource,
        ],
        DataType::sequence(DataType::Generic(0)),
    )
}

/// 同步查询方法提供者
#[derive(Debug, Clone)]
pub struct SyncQueryMethodProvider {
    shaped_query: MethodTemplate,
    query: MethodTemplate,
    get_result: MethodTemplate,
    pre_execute: MethodTemplate,
}

impl SyncQueryMethodProvider {
    pub fn new() -> Self {
        Self {
            shaped_query: shaped_query_template(),
            query: query_template(),
            get_result: MethodTemplate::new(
                MethodKind::GetResult,
                1,
                vec![DataType::sequence(DataType::ValueBuffer)],
                DataType::Generic(0),
            ),
            pre_execute: pre_execute_template(),
        }
    }
}

impl Default for SyncQueryMethodProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryMethodProvider for SyncQueryMethodProvider {
    fn shaped_query_method(&self) -> &MethodTemplate {
        &self.shaped_query
    }

    fn query_method(&self) -> &MethodTemplate {
        &self.query
    }

    fn get_result_method(&self) -> &MethodTemplate {
        &self.get_result
    }

    fn pre_execute_method(&self) -> &MethodTemplate {
        &self.pre_execute
    }
}

/// 异步查询方法提供者
///
/// `GetResult` 额外接收取消令牌
#[derive(Debug, Clone)]
pub struct AsyncQueryMethodProvider {
    shaped_query: MethodTemplate,
    query: MethodTemplate,
    get_result: MethodTemplate,
    pre_execute: MethodTemplate,
}

impl AsyncQueryMethodProvider {
    pub fn new() -> Self {
        Self {
            shaped_query: shaped_query_template(),
            query: query_template(),
            get_result: MethodTemplate::new(
                MethodKind::GetResult,
                1,
                vec![
                    DataType::sequence(DataType::ValueBuffer),
                    DataType::CancellationToken,
                ],
                DataType::Generic(0),
            ),
            pre_execute: pre_execute_template(),
        }
    }
}

impl Default for AsyncQueryMethodProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryMethodProvider for AsyncQueryMethodProvider {
    fn shaped_query_method(&self) -> &MethodTemplate {
        &self.shaped_query
    }

    fn query_method(&self) -> &MethodTemplate {
        &self.query
    }

    fn get_result_method(&self) -> &MethodTemplate {
        &self.get_result
    }

    fn pre_execute_method(&self) -> &MethodTemplate {
        &self.pre_execute
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct BrokenProvider {
        inner: SyncQueryMethodProvider,
        query: MethodTemplate,
    }

    impl QueryMethodProvider for BrokenProvider {
        fn shaped_query_method(&self) -> &MethodTemplate {
            self.inner.shaped_query_method()
        }

        fn query_method(&self) -> &MethodTemplate {
            &self.query
        }

        fn get_result_method(&self) -> &MethodTemplate {
            self.inner.get_result_method()
        }

        fn pre_execute_method(&self) -> &MethodTemplate {
            self.inner.pre_execute_method()
        }
    }

    #[test]
    fn test_builtin_providers_are_valid() {
        assert!(validate_provider(&SyncQueryMethodProvider::new()).is_ok());
        assert!(validate_provider(&AsyncQueryMethodProvider::new()).is_ok());
    }

    #[test]
    fn test_generic_query_method_is_rejected() {
        let provider = BrokenProvider {
            inner: SyncQueryMethodProvider::new(),
            query: MethodTemplate::new(MethodKind::Query, 1, vec![], DataType::Generic(0)),
        };
        let err = validate_provider(&provider).expect_err("泛型 Query 应被拒绝");
        assert!(matches!(err, RewriteError::InvalidProvider(_)));
    }

    #[test]
    fn test_only_async_get_result_accepts_cancellation_token() {
        let sync = SyncQueryMethodProvider::new()
            .get_result_method()
            .make_generic(vec![DataType::Int]);
        let async_ = AsyncQueryMethodProvider::new()
            .get_result_method()
            .make_generic(vec![DataType::Int]);

        assert!(!sync.accepts_cancellation_token());
        assert!(async_.accepts_cancellation_token());
    }
}
