//! 集成测试共享工具模块
//!
//! 提供构造查询计划表达式树的辅助函数

#![allow(dead_code)]

use query_rewrite::core::{DataType, Expression, MethodRef};
use query_rewrite::query::{QueryMethodProvider, QuerySource, RelationalQueryCompilationContext};

/// 测试用表达式树构造器
///
/// 持有编译上下文，用其中的方法模板构造已知形状的调用
pub struct TreeBuilder<'a> {
    ctx: &'a RelationalQueryCompilationContext,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(ctx: &'a RelationalQueryCompilationContext) -> Self {
        Self { ctx }
    }

    fn provider(&self) -> &dyn QueryMethodProvider {
        self.ctx.query_method_provider()
    }

    pub fn param(&self, name: &str) -> Expression {
        Expression::parameter(name, DataType::Object)
    }

    /// `ShapedQuery<Customer>(a0, a1, a2)`
    pub fn shaped_query(&self, a0: Expression, a1: Expression, a2: Expression) -> Expression {
        let method = self
            .provider()
            .shaped_query_method()
            .make_generic(vec![customer()]);
        Expression::call(method, vec![a0, a1, a2])
    }

    /// `GetResult<T>(inner)`，按提供者签名附带取消令牌
    pub fn get_result(&self, result_type: DataType, inner: Expression) -> Expression {
        let method = self
            .provider()
            .get_result_method()
            .make_generic(vec![result_type]);
        let mut arguments = vec![inner];
        if method.accepts_cancellation_token() {
            arguments.push(Expression::cancellation_token());
        }
        Expression::call(method, arguments)
    }

    /// `PreExecute<T>(ctx, source, qs)`
    pub fn pre_execute(
        &self,
        element_type: DataType,
        ctx: Expression,
        source: Expression,
        qs: Expression,
    ) -> Expression {
        let method = self
            .provider()
            .pre_execute_method()
            .make_generic(vec![element_type]);
        Expression::call(method, vec![ctx, source, qs])
    }

    /// 不属于任何已知模板的普通调用
    pub fn call(&self, name: &str, arguments: Vec<Expression>) -> Expression {
        Expression::call(MethodRef::named(name, vec![], DataType::Object), arguments)
    }
}

pub fn customer() -> DataType {
    DataType::Entity("Customer".to_string())
}

pub fn outer_source() -> QuerySource {
    QuerySource::new("c", customer())
}
