//! CSS selector model used to render selectors as text. Nothing here evaluates
//! a selector against a document.

use std::fmt::{self, Display, Formatter};

/// A selector made of compound selectors joined by the child combinator (`>`)
#[derive(PartialEq, Clone, Debug, Default)]
pub struct Selector<'a> {
    pub compounds: Vec<CompoundSelector<'a>>,
}

/// Simple selectors written next to each other, e.g. `div.note#intro[hidden]`
#[derive(PartialEq, Clone, Debug, Default)]
pub struct CompoundSelector<'a>(pub Vec<SimpleSelector<'a>>);

#[derive(PartialEq, Clone, Debug)]
pub enum SimpleSelector<'a> {
    /// A tag name. An empty name renders as nothing.
    Type(&'a str),
    Class(&'a str),
    ID(&'a str),
    // [att]
    Attribute(&'a str),
    // [att="val"]
    AttributeEquals(&'a str, &'a str),
}

impl<'a> CompoundSelector<'a> {
    pub fn new(tag_name: &'a str) -> Self {
        Self(vec![SimpleSelector::Type(tag_name)])
    }

    pub fn push(&mut self, selector: SimpleSelector<'a>) {
        self.0.push(selector);
    }

    /// Add one class selector per whitespace separated name in `value`
    pub fn push_classes(&mut self, value: &'a str) {
        self.0
            .extend(value.split_whitespace().map(SimpleSelector::Class));
    }

    /// Add one ID selector per whitespace separated name in `value`
    pub fn push_ids(&mut self, value: &'a str) {
        self.0.extend(value.split_whitespace().map(SimpleSelector::ID));
    }
}

impl<'a> FromIterator<CompoundSelector<'a>> for Selector<'a> {
    fn from_iter<T: IntoIterator<Item = CompoundSelector<'a>>>(iter: T) -> Self {
        Self {
            compounds: iter.into_iter().collect(),
        }
    }
}

impl Display for SimpleSelector<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SimpleSelector::Type(name) => f.write_str(name),
            SimpleSelector::Class(name) => write!(f, ".{}", name),
            SimpleSelector::ID(name) => write!(f, "#{}", name),
            SimpleSelector::Attribute(name) => write!(f, "[{}]", name),
            SimpleSelector::AttributeEquals(name, value) => write!(f, "[{}=\"{}\"]", name, value),
        }
    }
}

impl Display for CompoundSelector<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|s| s.fmt(f))
    }
}

impl Display for Selector<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, compound) in self.compounds.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            compound.fmt(f)?;
        }
        Ok(())
    }
}
