//! Compile-time evaluation of literal expressions in attributes.
//!
//! Attribute values like `default = -12.0` or `range = -60..=12` arrive as
//! `syn::Expr` trees; this module folds them into numbers.

use syn::{Expr, Lit, RangeLimits, UnOp};

/// A numeric literal, keeping track of whether it was written as an integer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LitValue {
    Int(i64),
    Float(f64),
}

impl LitValue {
    pub fn as_f64(self) -> f64 {
        match self {
            LitValue::Int(v) => v as f64,
            LitValue::Float(v) => v,
        }
    }

    fn negate(self) -> Self {
        match self {
            LitValue::Int(v) => LitValue::Int(-v),
            LitValue::Float(v) => LitValue::Float(-v),
        }
    }
}

/// Evaluate an integer or float literal, optionally negated or parenthesized.
pub fn eval_literal_expr(expr: &Expr) -> syn::Result<LitValue> {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Int(i) => Ok(LitValue::Int(i.base10_parse()?)),
            Lit::Float(f) => Ok(LitValue::Float(f.base10_parse()?)),
            other => Err(syn::Error::new_spanned(other, "expected a numeric literal")),
        },
        Expr::Unary(unary) if matches!(unary.op, UnOp::Neg(_)) => {
            eval_literal_expr(&unary.expr).map(LitValue::negate)
        }
        Expr::Paren(paren) => eval_literal_expr(&paren.expr),
        Expr::Group(group) => eval_literal_expr(&group.expr),
        other => Err(syn::Error::new_spanned(other, "expected a numeric literal")),
    }
}

/// Evaluate a bool literal.
pub fn eval_bool_expr(expr: &Expr) -> syn::Result<bool> {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Bool(b) => Ok(b.value),
            other => Err(syn::Error::new_spanned(other, "expected `true` or `false`")),
        },
        Expr::Group(group) => eval_bool_expr(&group.expr),
        other => Err(syn::Error::new_spanned(other, "expected `true` or `false`")),
    }
}

/// Evaluate an inclusive range `min..=max` into its bounds.
pub fn eval_range(expr: &Expr) -> syn::Result<(f64, f64)> {
    let range = match expr {
        Expr::Range(range) => range,
        Expr::Group(group) => return eval_range(&group.expr),
        other => return Err(syn::Error::new_spanned(other, "expected a range like `0.0..=1.0`")),
    };

    if !matches!(range.limits, RangeLimits::Closed(_)) {
        return Err(syn::Error::new_spanned(
            range,
            "parameter ranges must be inclusive (`min..=max`)",
        ));
    }

    let (Some(start), Some(end)) = (&range.start, &range.end) else {
        return Err(syn::Error::new_spanned(range, "range needs both bounds"));
    };

    let min = eval_literal_expr(start)?.as_f64();
    let max = eval_literal_expr(end)?.as_f64();
    if min >= max {
        return Err(syn::Error::new_spanned(
            range,
            format!("range minimum ({}) must be below maximum ({})", min, max),
        ));
    }
    Ok((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(s: &str) -> Expr {
        syn::parse_str(s).unwrap()
    }

    #[test]
    fn test_literals() {
        assert_eq!(eval_literal_expr(&expr("3")).unwrap(), LitValue::Int(3));
        assert_eq!(eval_literal_expr(&expr("-12.5")).unwrap(), LitValue::Float(-12.5));
        assert_eq!(eval_literal_expr(&expr("(-(4))")).unwrap().as_f64(), -4.0);
        assert!(eval_literal_expr(&expr("\"x\"")).is_err());
        assert!(eval_literal_expr(&expr("a + 1")).is_err());
    }

    #[test]
    fn test_bools() {
        assert!(eval_bool_expr(&expr("true")).unwrap());
        assert!(!eval_bool_expr(&expr("false")).unwrap());
        assert!(eval_bool_expr(&expr("1")).is_err());
    }

    #[test]
    fn test_ranges() {
        assert_eq!(eval_range(&expr("-60.0..=12.0")).unwrap(), (-60.0, 12.0));
        assert_eq!(eval_range(&expr("0..=100")).unwrap(), (0.0, 100.0));
        assert!(eval_range(&expr("0.0..1.0")).is_err());
        assert!(eval_range(&expr("1.0..=1.0")).is_err());
    }
}
