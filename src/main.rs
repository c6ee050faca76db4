use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use query_rewrite::config::Config;
use query_rewrite::core::{DataType, Expression};
use query_rewrite::query::{
    ExecutionMode, ExpressionRewriter, QuerySource, RelationalQueryCompilationContext,
    ResultTransformingVisitor,
};
use query_rewrite::utils::logging;

#[derive(Parser)]
#[clap(version = "0.1.0", author = "GraphDB Contributors")]
enum Cli {
    /// Rewrite a JSON expression tree into its single-result form
    Rewrite {
        /// Expression tree in JSON
        #[clap(short, long)]
        input: PathBuf,
        /// Result type of the rewritten query, e.g. int, long, bool, int?
        #[clap(short, long, default_value = "int")]
        result_type: DataType,
        #[clap(short, long)]
        config: Option<PathBuf>,
        /// Use the async query method provider regardless of config
        #[clap(long = "async")]
        use_async: bool,
        /// Print the rewritten tree as JSON instead of its rendered form
        #[clap(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli {
        Cli::Rewrite {
            input,
            result_type,
            config,
            use_async,
            json,
        } => {
            let config = match config {
                Some(path) => Config::load(&path)
                    .with_context(|| format!("无法加载配置文件 {}", path.display()))?,
                None => Config::default(),
            };
            logging::init(&config.log)?;

            let content = fs::read_to_string(&input)
                .with_context(|| format!("无法读取表达式文件 {}", input.display()))?;
            let expr: Expression = serde_json::from_str(&content)
                .with_context(|| format!("无法解析表达式文件 {}", input.display()))?;

            let mode = if use_async {
                ExecutionMode::Async
            } else {
                config.rewrite.execution_mode
            };
            let context = RelationalQueryCompilationContext::for_mode(mode);
            let outer_query_source = QuerySource::new("outer", DataType::Object);

            let visitor = ResultTransformingVisitor::new(&outer_query_source, &context, result_type)
                .with_child_substitution(config.rewrite.child_substitution);
            let rewritten = visitor.rewrite(&expr);

            if json {
                println!("{}", serde_json::to_string_pretty(&rewritten)?);
            } else {
                println!("{}", rewritten);
            }

            logging::shutdown();
        }
    }

    Ok(())
}
