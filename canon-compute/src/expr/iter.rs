use super::Expr;

/// An iterator that iteratively traverses the tree of expressions in left-to-right post-order
/// (i.e. depth-first).
///
/// This iterator is created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    /// Expressions waiting to be visited, paired with whether their children were already pushed.
    stack: Vec<(&'a Expr, bool)>,
}

impl<'a> ExprIter<'a> {
    /// Creates a new iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn new(expr: &'a Expr) -> Self {
        Self { stack: vec![(expr, false)] }
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (expr, expanded) = self.stack.pop()?;
            let children = expr.children();
            if expanded || children.is_empty() {
                return Some(expr);
            }

            self.stack.push((expr, true));
            self.stack.extend(children.into_iter().rev().map(|child| (child, false)));
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn post_order() {
        let x = Expr::variable("x");
        let y = Expr::variable("y");
        let power = x.clone().pow(y.clone()).unwrap();
        let visited = power.post_order_iter().collect::<Vec<_>>();
        assert_eq!(visited, vec![&x, &y, &power]);
    }
}
