//! query-rewrite - 关系查询表达式树的结果转换重写
//!
//! 本 crate 实现查询编译管线中的一个重写步骤：在表达式树中定位整形查询和预执行
//! 标记调用，把产生序列的调用改写为产生单个标量/聚合结果的调用。
//!
//! 解析、关系映射、SQL 生成和执行均由宿主管线负责，不在本 crate 范围内。

pub mod config;
pub mod core;
pub mod query;
pub mod utils;
