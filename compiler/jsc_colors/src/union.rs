//! Union colors.

use std::collections::BTreeSet;

use crate::Color;

/// Two or more distinct alternates.
///
/// Only constructed through [`Color::union`], which guarantees the set holds
/// at least two members. An alternate may itself be a union.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnionColor {
    alternates: BTreeSet<Color>,
}

impl UnionColor {
    pub(crate) fn new(alternates: BTreeSet<Color>) -> Self {
        debug_assert!(alternates.len() >= 2, "unions hold at least two alternates");
        Self { alternates }
    }

    #[inline]
    pub fn alternates(&self) -> &BTreeSet<Color> {
        &self.alternates
    }
}
