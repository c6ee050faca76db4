//! ResultTransformingVisitor - 把序列查询改写为单结果查询的访问器
//!
//! 主要功能：
//! - `ShapedQuery<T>(a0, a1, a2)` 改写为 `GetResult<TResult>(Query(a0, a1, default(int?)))`
//! - `PreExecute<T>(ctx, GetResult(inner), qs)` 改写为
//!   `GetResult(PreExecute<ValueBuffer>(ctx, inner, qs))`，把 `GetResult` 提到外层
//! - 其他方法调用按参数顺序访问，第一个被改写的参数直接作为结果返回
//!
//! 最后一条（冒泡）只在宿主管线保证每个调用节点至多有一个可改写后代时成立。
//! `ChildSubstitution::Rebuild` 提供完整的参数替换作为替代。

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::core::error::{RewriteError, RewriteResult};
use crate::core::types::expression::{Expression, MethodCallExpression};
use crate::core::types::DataType;
use crate::query::context::{QuerySource, RelationalQueryCompilationContext};
use crate::query::result_operator::call_with_possible_cancellation_token;
use crate::query::visitor::expression_rewriter::{ExpressionRewriter, Transformed};

/// 通用分支中子节点被改写后的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildSubstitution {
    /// 返回第一个被改写的子节点本身，丢弃父调用和其余参数
    #[default]
    BubbleUp,
    /// 用改写后的子节点重建父调用
    Rebuild,
}

/// 结果转换访问器
///
/// 每个（外层查询源，编译上下文）对构造一个实例，访问一棵树后丢弃。
/// 只持有构造时捕获的不可变引用，可在多棵独立的树上并发使用。
#[derive(Debug, Clone)]
pub struct ResultTransformingVisitor<'a> {
    outer_query_source: &'a QuerySource,
    context: &'a RelationalQueryCompilationContext,
    result_type: DataType,
    child_substitution: ChildSubstitution,
}

impl<'a> ResultTransformingVisitor<'a> {
    pub fn new(
        outer_query_source: &'a QuerySource,
        context: &'a RelationalQueryCompilationContext,
        result_type: DataType,
    ) -> Self {
        Self {
            outer_query_source,
            context,
            result_type,
            child_substitution: ChildSubstitution::default(),
        }
    }

    /// 从可能缺失的参数构造访问器
    ///
    /// 任一参数缺失都是前置条件错误
    pub fn try_new(
        outer_query_source: Option<&'a QuerySource>,
        context: Option<&'a RelationalQueryCompilationContext>,
        result_type: DataType,
    ) -> RewriteResult<Self> {
        let outer_query_source =
            outer_query_source.ok_or(RewriteError::missing_argument("outer_query_source"))?;
        let context = context.ok_or(RewriteError::missing_argument("compilation_context"))?;
        Ok(Self::new(outer_query_source, context, result_type))
    }

    pub fn with_child_substitution(mut self, child_substitution: ChildSubstitution) -> Self {
        self.child_substitution = child_substitution;
        self
    }

    /// 静态方法：转换表达式
    pub fn transform(
        expr: &Expression,
        outer_query_source: &'a QuerySource,
        context: &'a RelationalQueryCompilationContext,
        result_type: DataType,
    ) -> Expression {
        Self::new(outer_query_source, context, result_type).rewrite(expr)
    }

    pub fn outer_query_source(&self) -> &QuerySource {
        self.outer_query_source
    }

    pub fn result_type(&self) -> &DataType {
        &self.result_type
    }

    pub fn child_substitution(&self) -> ChildSubstitution {
        self.child_substitution
    }

    /// `ShapedQuery(a0, a1, a2)` -> `GetResult<TResult>(Query(a0, a1, default(int?)))`
    fn rewrite_shaped_query(&self, call: &MethodCallExpression) -> Expression {
        let provider = self.context.query_method_provider();

        let mut query_arguments = call.arguments.clone();
        query_arguments[2] = Expression::default_of(DataType::nullable(DataType::Int));

        let query = Expression::call(provider.query_method().as_method(), query_arguments);
        let get_result = provider
            .get_result_method()
            .make_generic(vec![self.result_type.clone()]);

        debug!(
            "改写 {} 为 {} (查询源: {})",
            call.method, get_result, self.outer_query_source.item_name
        );
        call_with_possible_cancellation_token(get_result, vec![query])
    }

    /// `PreExecute(ctx, GetResult(inner), qs)` -> `GetResult(PreExecute<ValueBuffer>(ctx, inner, qs))`
    ///
    /// 内层参数没有归约为 `GetResult` 时直接返回访问后的内层参数
    fn rewrite_pre_execute(&self, call: &MethodCallExpression) -> Expression {
        let provider = self.context.query_method_provider();

        let source = &call.arguments[1];
        let visited = self.visit(source).or_original(source);

        let hoisted = visited
            .as_closed_call_of(provider.get_result_method())
            .filter(|get_result| !get_result.arguments.is_empty())
            .map(|get_result| {
                let pre_execute = Expression::call(
                    provider
                        .pre_execute_method()
                        .make_generic(vec![DataType::ValueBuffer]),
                    vec![
                        call.arguments[0].clone(),
                        get_result.arguments[0].clone(),
                        call.arguments[2].clone(),
                    ],
                );

                // 同一个 GetResult 方法，保留其余参数（例如取消令牌）
                let mut arguments = get_result.arguments.clone();
                arguments[0] = pre_execute;

                debug!("将 {} 提升到 {} 外层", get_result.method, call.method);
                Expression::MethodCall(get_result.with_arguments(arguments))
            });

        match hoisted {
            Some(expr) => expr,
            None => {
                trace!("{} 的源参数未归约为 GetResult，返回源参数", call.method);
                visited
            }
        }
    }

    fn bubble_up(&self, call: &MethodCallExpression) -> Transformed<Expression> {
        for argument in &call.arguments {
            if let Transformed::Yes(rewritten) = self.visit(argument) {
                trace!("{} 的参数被改写，改写结果替代整个调用", call.method);
                return Transformed::Yes(rewritten);
            }
        }
        Transformed::No
    }
}

impl ExpressionRewriter for ResultTransformingVisitor<'_> {
    fn visit_method_call(&self, call: &MethodCallExpression) -> Transformed<Expression> {
        let provider = self.context.query_method_provider();

        // 参数不足三个的调用不是合法形状，落入通用分支
        if call.arguments.len() > 2 {
            if call.method.is_closed_form_of(provider.shaped_query_method()) {
                return Transformed::Yes(self.rewrite_shaped_query(call));
            }

            if call.method.is_closed_form_of(provider.pre_execute_method()) {
                return Transformed::Yes(self.rewrite_pre_execute(call));
            }
        }

        match self.child_substitution {
            ChildSubstitution::BubbleUp => self.bubble_up(call),
            ChildSubstitution::Rebuild => self.visit_arguments(call),
        }
    }
}
