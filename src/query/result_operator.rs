//! 结果操作符辅助函数

use crate::core::types::expression::Expression;
use crate::core::types::method::MethodRef;

/// 构造方法调用；若目标方法签名声明了取消令牌参数，则在参数末尾追加取消令牌
pub fn call_with_possible_cancellation_token(
    method: MethodRef,
    mut arguments: Vec<Expression>,
) -> Expression {
    if method.accepts_cancellation_token() {
        arguments.push(Expression::cancellation_token());
    }
    Expression::call(method, arguments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DataType;

    #[test]
    fn test_token_appended_only_when_declared() {
        let plain = MethodRef::named("First", vec![DataType::Object], DataType::Object);
        let call = call_with_possible_cancellation_token(plain, vec![Expression::null()]);
        assert_eq!(call.to_string(), "First(null)");

        let with_token = MethodRef::named(
            "FirstAsync",
            vec![DataType::Object, DataType::CancellationToken],
            DataType::Object,
        );
        let call = call_with_possible_cancellation_token(with_token, vec![Expression::null()]);
        assert_eq!(call.to_string(), "FirstAsync(null, ct)");
    }
}
