use std::path::PathBuf;

use argh::FromArgs;
use miette::Result;
use shunt::Evaluator;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

#[derive(FromArgs)]
/// Evaluate an integer expression. Without an expression a built-in demo is run.
pub struct Args {
    #[argh(positional)]
    expression: Option<String>,

    #[argh(option, short = 'D', description = "define a variable as name=value")]
    define: Vec<String>,

    #[argh(option, description = "TOML file of variable definitions")]
    vars: Option<PathBuf>,

    #[argh(switch, description = "reject unclosed parentheses and leftover operands")]
    strict: bool,

    #[argh(switch, description = "print the postfix form instead of evaluating")]
    postfix: bool,

    #[argh(switch, short = 'v', description = "log evaluation steps")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args: Args = argh::from_env();
    let config = Config::from_args(args)?;
    init_logging(config.verbose);
    debug!(
        expression = %config.expression,
        variables = config.variables.len(),
        strict = config.strict,
        "configured"
    );
    run(&config)
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(config: &Config) -> Result<()> {
    let evaluator = Evaluator::new().strict(config.strict);
    let report = |err: shunt::Error| {
        miette::Report::new(err).with_source_code(config.expression.clone())
    };

    if config.postfix {
        let postfix = evaluator.postfix(&config.expression).map_err(report)?;
        println!("{postfix}");
    } else {
        let value = evaluator
            .evaluate(&config.expression, &config.variables)
            .map_err(report)?;
        println!("{value}");
    }
    Ok(())
}
