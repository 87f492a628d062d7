//! Element predicates for [`DomTree::find`](crate::DomTree::find).
//!
//! Any `Fn(&ElementData) -> bool` is a query; queries compose with
//! [`Query::and`] and [`Query::or`].

use crate::ElementData;

/// A predicate over elements.
pub trait Query {
    /// Whether `element` satisfies the query.
    fn matches(&self, element: &ElementData) -> bool;

    /// Both queries must match.
    fn and<Q: Query>(self, other: Q) -> And<Self, Q>
    where
        Self: Sized,
    {
        And(self, other)
    }

    /// Either query may match.
    fn or<Q: Query>(self, other: Q) -> Or<Self, Q>
    where
        Self: Sized,
    {
        Or(self, other)
    }
}

impl<F> Query for F
where
    F: Fn(&ElementData) -> bool,
{
    fn matches(&self, element: &ElementData) -> bool {
        self(element)
    }
}

/// Conjunction of two queries.
#[derive(Debug, Clone, Copy)]
pub struct And<A, B>(A, B);

impl<A: Query, B: Query> Query for And<A, B> {
    fn matches(&self, element: &ElementData) -> bool {
        self.0.matches(element) && self.1.matches(element)
    }
}

/// Disjunction of two queries.
#[derive(Debug, Clone, Copy)]
pub struct Or<A, B>(A, B);

impl<A: Query, B: Query> Query for Or<A, B> {
    fn matches(&self, element: &ElementData) -> bool {
        self.0.matches(element) || self.1.matches(element)
    }
}

/// Elements with the given tag name.
pub fn has_name(name: impl Into<String>) -> impl Fn(&ElementData) -> bool {
    let name = name.into();
    move |element: &ElementData| element.tag_name == name
}

/// Elements carrying the given attribute, whatever its value.
pub fn has_attribute(name: impl Into<String>) -> impl Fn(&ElementData) -> bool {
    let name = name.into();
    move |element: &ElementData| element.attribute(&name).is_some()
}

/// Elements whose attribute `name` equals `value`.
pub fn attribute_equals(
    name: impl Into<String>,
    value: impl Into<String>,
) -> impl Fn(&ElementData) -> bool {
    let name = name.into();
    let value = value.into();
    move |element: &ElementData| element.attribute(&name) == Some(value.as_str())
}
