//! Series Sampling Module
//! Evaluates response expressions in `t` over an evenly spaced time grid.

use crate::config::{AppConfig, DEFAULT_SAMPLE_COUNT, DEFAULT_SAMPLE_STEP};
use meval::{Context, Expr};
use rayon::prelude::*;
use thiserror::Error;

/// Name of the free variable in every response expression.
const TIME_VAR: &str = "t";

#[derive(Error, Debug)]
pub enum ExpressionError {
    #[error("Empty response expression")]
    Empty,
    #[error("Cannot evaluate `{expression}`: {reason}")]
    Invalid {
        expression: String,
        reason: meval::Error,
    },
}

/// The three expressions returned for one simulation, in template order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResponseFunctions {
    /// Displacement Y(t) or charge q(t)
    pub primary: String,
    /// Velocity V(t) or current i(t)
    pub first_derivative: String,
    /// Acceleration A(t); unused for RLC systems
    pub second_derivative: String,
}

impl ResponseFunctions {
    pub fn get(&self, index: usize) -> Option<&str> {
        match index {
            0 => Some(&self.primary),
            1 => Some(&self.first_derivative),
            2 => Some(&self.second_derivative),
            _ => None,
        }
    }
}

/// Evenly spaced sample times `start + i / (1 / step)` for `i < count`.
///
/// Dividing by the per-unit sample count keeps decimal steps exact: with the
/// default step every time equals `i / 10`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleGrid {
    pub start: f64,
    pub step: f64,
    pub count: usize,
}

impl Default for SampleGrid {
    fn default() -> Self {
        Self {
            start: 0.0,
            step: DEFAULT_SAMPLE_STEP,
            count: DEFAULT_SAMPLE_COUNT,
        }
    }
}

impl SampleGrid {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            start: 0.0,
            step: config.sample_step,
            count: config.sample_count,
        }
    }

    pub fn points(&self) -> Vec<f64> {
        let per_unit = 1.0 / self.step;
        (0..self.count)
            .map(|i| self.start + i as f64 / per_unit)
            .collect()
    }
}

/// Evaluate `expression` at every time in `times`.
pub fn sample_expression(expression: &str, times: &[f64]) -> Result<Vec<f64>, ExpressionError> {
    if expression.trim().is_empty() {
        return Err(ExpressionError::Empty);
    }

    let invalid = |reason| ExpressionError::Invalid {
        expression: expression.to_string(),
        reason,
    };

    let expr: Expr = insert_implicit_products(expression)
        .parse()
        .map_err(invalid)?;

    let f = expr
        .bind_with_context(expression_context(), TIME_VAR)
        .map_err(invalid)?;

    Ok(times.iter().map(|&t| f(t)).collect())
}

/// Builtins plus the logarithms of the service's expression dialect:
/// `log(x)` is natural, `log(x, base)` takes an explicit base.
fn expression_context<'a>() -> Context<'a> {
    let mut ctx = Context::new();
    ctx.funcn(
        "log",
        |args: &[f64]| match args {
            [x, base] => x.ln() / base.ln(),
            _ => args[0].ln(),
        },
        1..3,
    );
    ctx.func("log10", f64::log10);
    ctx.func("log2", f64::log2);
    ctx
}

/// Make implicit products explicit: `2t` → `2*t`, `3(t+1)` → `3*(t+1)`,
/// `(t+1)(t-1)` → `(t+1)*(t-1)`. Exponent literals such as `2e-3` are kept.
fn insert_implicit_products(expression: &str) -> String {
    let chars: Vec<char> = expression.chars().collect();
    let mut out = String::with_capacity(expression.len() + 4);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let ends_operand = if c.is_ascii_digit() || (c == '.' && next_is_digit(&chars, i)) {
            i = scan_number(&chars, i, &mut out);
            true
        } else if c.is_alphabetic() || c == '_' {
            // Identifiers may contain digits (`t2`) and never imply a product
            // before `(` since that is a call.
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                out.push(chars[i]);
                i += 1;
            }
            false
        } else {
            out.push(c);
            i += 1;
            c == ')'
        };

        if ends_operand {
            let mut j = i;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            if let Some(&next) = chars.get(j) {
                if next.is_alphabetic() || next == '_' || next == '(' {
                    out.push('*');
                }
            }
        }
    }

    out
}

fn next_is_digit(chars: &[char], i: usize) -> bool {
    chars.get(i + 1).is_some_and(|c| c.is_ascii_digit())
}

/// Copy a numeric literal starting at `i` into `out`; returns the index after it.
fn scan_number(chars: &[char], mut i: usize, out: &mut String) -> usize {
    while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
        out.push(chars[i]);
        i += 1;
    }

    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let signed = matches!(chars.get(i + 1), Some('+') | Some('-'));
        let digit_at = if signed { i + 2 } else { i + 1 };
        if chars.get(digit_at).is_some_and(|c| c.is_ascii_digit()) {
            out.extend(&chars[i..digit_at]);
            i = digit_at;
            while i < chars.len() && chars[i].is_ascii_digit() {
                out.push(chars[i]);
                i += 1;
            }
        }
    }

    i
}

/// Sample several expressions over the same grid, one series per expression.
pub fn sample_all(expressions: &[&str], times: &[f64]) -> Result<Vec<Vec<f64>>, ExpressionError> {
    expressions
        .par_iter()
        .map(|expression| sample_expression(expression, times))
        .collect()
}
