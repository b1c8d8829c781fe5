use std::collections::BTreeMap;
use std::path::Path;

use miette::{IntoDiagnostic, Result, WrapErr, miette};
use serde::Deserialize;

use crate::Args;

pub const DEMO_EXPRESSION: &str = "(x + y * 2) * 3 > 10 && x != y";
const DEMO_VARIABLES: [(&str, i64); 2] = [("x", 1), ("y", 2)];

/// A variables file: a flat TOML table of integer values.
///
/// ```toml
/// limit = 50
/// used = 45
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct VarFile {
    pub variables: BTreeMap<String, i64>,
}

impl VarFile {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).into_diagnostic()
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("reading {} failed", path.display()))?;
        Self::parse(&text).wrap_err_with(|| format!("parsing {} failed", path.display()))
    }
}

/// Everything a run needs, resolved from the command line.
#[derive(Debug)]
pub struct Config {
    pub expression: String,
    pub variables: BTreeMap<String, i64>,
    pub strict: bool,
    pub postfix: bool,
    pub verbose: bool,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        let mut variables = BTreeMap::new();

        let expression = match args.expression {
            Some(expression) => expression,
            None => {
                for (name, value) in DEMO_VARIABLES {
                    variables.insert(name.to_string(), value);
                }
                DEMO_EXPRESSION.to_string()
            }
        };

        if let Some(path) = &args.vars {
            variables.extend(VarFile::load(path)?.variables);
        }
        for define in &args.define {
            let (name, value) = parse_define(define)?;
            variables.insert(name, value);
        }

        Ok(Self {
            expression,
            variables,
            strict: args.strict,
            postfix: args.postfix,
            verbose: args.verbose,
        })
    }
}

/// Parses a `name=value` definition.
pub fn parse_define(define: &str) -> Result<(String, i64)> {
    let (name, value) = define
        .split_once('=')
        .ok_or_else(|| miette!("expected name=value, found '{define}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(miette!("missing variable name in '{define}'"));
    }
    let value = value
        .trim()
        .parse::<i64>()
        .into_diagnostic()
        .wrap_err_with(|| format!("value of '{name}' is not an integer"))?;
    Ok((name.to_string(), value))
}
