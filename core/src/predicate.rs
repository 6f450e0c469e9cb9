// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Composable boolean predicates.
//!
//! Constructors simplify eagerly: constants absorb or vanish, nested
//! conjunctions and disjunctions are flattened, and double negation cancels.
//! Callers can therefore test [`Predicate::is_always_true`] to skip a filter
//! entirely.

use std::fmt;
use std::ops::Not;
use std::sync::Arc;

/// A boolean test over values of type `T`.
pub enum Predicate<T> {
    /// Matches everything.
    AlwaysTrue,

    /// Matches nothing.
    AlwaysFalse,

    /// Negation of the inner predicate.
    Not(Box<Predicate<T>>),

    /// Conjunction, evaluated left to right.
    And(Vec<Predicate<T>>),

    /// Disjunction, evaluated left to right.
    Or(Vec<Predicate<T>>),

    /// An arbitrary test function.
    Test(Arc<dyn Fn(&T) -> bool + Send + Sync>),
}

impl<T> Predicate<T> {
    /// Wrap a test function.
    pub fn test(f: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self::Test(Arc::new(f))
    }

    /// Conjunction of `predicates`; empty is [`Predicate::AlwaysTrue`].
    pub fn and(predicates: impl IntoIterator<Item = Predicate<T>>) -> Self {
        let mut terms = Vec::new();
        for p in predicates {
            match p {
                Self::AlwaysTrue => {}
                Self::AlwaysFalse => return Self::AlwaysFalse,
                Self::And(inner) => terms.extend(inner),
                p => terms.push(p),
            }
        }
        match terms.len() {
            0 => Self::AlwaysTrue,
            1 => terms.pop().unwrap_or(Self::AlwaysTrue),
            _ => Self::And(terms),
        }
    }

    /// Disjunction of `predicates`; empty is [`Predicate::AlwaysFalse`].
    pub fn or(predicates: impl IntoIterator<Item = Predicate<T>>) -> Self {
        let mut terms = Vec::new();
        for p in predicates {
            match p {
                Self::AlwaysFalse => {}
                Self::AlwaysTrue => return Self::AlwaysTrue,
                Self::Or(inner) => terms.extend(inner),
                p => terms.push(p),
            }
        }
        match terms.len() {
            0 => Self::AlwaysFalse,
            1 => terms.pop().unwrap_or(Self::AlwaysFalse),
            _ => Self::Or(terms),
        }
    }

    /// Evaluate against `value`.
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::AlwaysTrue => true,
            Self::AlwaysFalse => false,
            Self::Not(p) => !p.matches(value),
            Self::And(ps) => ps.iter().all(|p| p.matches(value)),
            Self::Or(ps) => ps.iter().any(|p| p.matches(value)),
            Self::Test(f) => f(value),
        }
    }

    /// Whether this predicate is the constant true.
    pub fn is_always_true(&self) -> bool {
        matches!(self, Self::AlwaysTrue)
    }

    /// Whether this predicate is the constant false.
    pub fn is_always_false(&self) -> bool {
        matches!(self, Self::AlwaysFalse)
    }
}

impl<T: PartialEq + Send + Sync + 'static> Predicate<T> {
    /// Matches any value equal to one of `values`.
    pub fn one_of(values: impl IntoIterator<Item = T>) -> Self {
        let values: Vec<T> = values.into_iter().collect();
        if values.is_empty() {
            return Self::AlwaysFalse;
        }
        Self::test(move |v| values.contains(v))
    }
}

impl<T> Not for Predicate<T> {
    type Output = Predicate<T>;

    fn not(self) -> Self::Output {
        match self {
            Self::AlwaysTrue => Self::AlwaysFalse,
            Self::AlwaysFalse => Self::AlwaysTrue,
            Self::Not(inner) => *inner,
            p => Self::Not(Box::new(p)),
        }
    }
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        match self {
            Self::AlwaysTrue => Self::AlwaysTrue,
            Self::AlwaysFalse => Self::AlwaysFalse,
            Self::Not(p) => Self::Not(p.clone()),
            Self::And(ps) => Self::And(ps.clone()),
            Self::Or(ps) => Self::Or(ps.clone()),
            Self::Test(f) => Self::Test(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlwaysTrue => f.write_str("AlwaysTrue"),
            Self::AlwaysFalse => f.write_str("AlwaysFalse"),
            Self::Not(p) => f.debug_tuple("Not").field(p).finish(),
            Self::And(ps) => f.debug_tuple("And").field(ps).finish(),
            Self::Or(ps) => f.debug_tuple("Or").field(ps).finish(),
            Self::Test(_) => f.write_str("Test(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn even() -> Predicate<i32> {
        Predicate::test(|v| v % 2 == 0)
    }

    fn positive() -> Predicate<i32> {
        Predicate::test(|v| *v > 0)
    }

    #[test]
    fn simplifies_constants() {
        assert!(Predicate::<i32>::and([]).is_always_true());
        assert!(Predicate::<i32>::or([]).is_always_false());
        assert!(Predicate::and([even(), Predicate::AlwaysFalse]).is_always_false());
        assert!(Predicate::or([even(), Predicate::AlwaysTrue]).is_always_true());
        assert!((!Predicate::<i32>::AlwaysTrue).is_always_false());
        assert!((!Predicate::<i32>::AlwaysFalse).is_always_true());
    }

    #[test]
    fn elides_neutral_terms() {
        let p = Predicate::and([Predicate::AlwaysTrue, even()]);
        assert!(matches!(p, Predicate::Test(_)));

        let p = Predicate::or([Predicate::AlwaysFalse, even(), Predicate::AlwaysFalse]);
        assert!(matches!(p, Predicate::Test(_)));
    }

    #[test]
    fn flattens_nested_conjunctions() {
        let inner = Predicate::and([even(), positive()]);
        let p = Predicate::and([inner, Predicate::test(|v: &i32| *v < 10)]);
        match &p {
            Predicate::And(terms) => assert_eq!(terms.len(), 3),
            other => panic!("expected a flat conjunction, got {other:?}"),
        }
        assert!(p.matches(&4));
        assert!(!p.matches(&12));
        assert!(!p.matches(&-2));
    }

    #[test]
    fn cancels_double_negation() {
        let p = !!even();
        assert!(matches!(p, Predicate::Test(_)));
        assert!(p.matches(&2));
        assert!((!even()).matches(&3));
    }

    #[test]
    fn short_circuits_evaluation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = {
            let calls = Arc::clone(&calls);
            Predicate::test(move |_: &i32| {
                calls.fetch_add(1, Ordering::SeqCst);
                true
            })
        };

        let p = Predicate::and([Predicate::test(|_: &i32| false), counter.clone()]);
        assert!(!p.matches(&0));
        let p = Predicate::or([Predicate::test(|_: &i32| true), counter]);
        assert!(p.matches(&0));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn matches_one_of_values() {
        let p = Predicate::one_of([1, 3, 5]);
        assert!(p.matches(&3));
        assert!(!p.matches(&4));
        assert!(Predicate::<i32>::one_of([]).is_always_false());
    }
}
