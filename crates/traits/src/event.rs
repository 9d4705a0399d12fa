//! Event indicator trait definitions.

use polars::prelude::*;

/// A boolean event indicator derived row by row from imputed measures.
pub trait EventRule: Send + Sync {
    /// Name of the flag column produced.
    fn name(&self) -> &str;

    /// Columns the flag is computed from. They must contain no nulls.
    fn sources(&self) -> Vec<&str>;

    /// Expression evaluating to the flag, aliased to [`EventRule::name`].
    fn flag(&self) -> Expr;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Negative;

    impl EventRule for Negative {
        fn name(&self) -> &str {
            "negative"
        }

        fn sources(&self) -> Vec<&str> {
            vec!["x"]
        }

        fn flag(&self) -> Expr {
            col("x").lt(lit(0)).alias(self.name())
        }
    }

    #[test]
    fn event_rule_produces_named_flag() {
        let rule = Negative;
        let df = df! { "x" => &[-1, 0, 2] }.unwrap();
        let out = df.lazy().with_column(rule.flag()).collect().unwrap();

        let flags: Vec<Option<bool>> =
            out.column("negative").unwrap().bool().unwrap().into_iter().collect();
        assert_eq!(flags, vec![Some(true), Some(false), Some(false)]);
        assert_eq!(rule.sources(), vec!["x"]);
    }
}
