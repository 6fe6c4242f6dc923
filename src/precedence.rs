//! The fixed precedence classes used both when reducing operators to postfix and when deciding
//! whether a rendered subtree needs brackets.

use crate::node::structured::ConstructId;

/// A precedence class. Classes are ordered, so `Precedence::AddSub < Precedence::MulDiv`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone, Hash)]
pub enum Precedence {
    None,
    AddSub,
    MulDiv,
    ExponentRoot,
}

impl Precedence {
    /// The precedence class of a construct identity. Anything not listed, including the leaf
    /// sentinel, is `None`.
    pub fn of(id: ConstructId) -> Precedence {
        match id {
            // Multiply, Divide
            0 | 1 => Precedence::MulDiv,
            // Add, Subtract
            2 | 3 => Precedence::AddSub,
            // Square root, n-th root, superscript, subscript
            5..=8 => Precedence::ExponentRoot,
            _ => Precedence::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::structured::SENTINEL_ID;

    #[test]
    fn test_classes() {
        assert_eq!(Precedence::of(0), Precedence::MulDiv);
        assert_eq!(Precedence::of(1), Precedence::MulDiv);
        assert_eq!(Precedence::of(2), Precedence::AddSub);
        assert_eq!(Precedence::of(3), Precedence::AddSub);
        assert_eq!(Precedence::of(4), Precedence::None);
        for id in 5..=8 {
            assert_eq!(Precedence::of(id), Precedence::ExponentRoot);
        }
        assert_eq!(Precedence::of(9), Precedence::None);
        assert_eq!(Precedence::of(57), Precedence::None);
        assert_eq!(Precedence::of(SENTINEL_ID), Precedence::None);
    }

    #[test]
    fn test_ordering() {
        assert!(Precedence::None < Precedence::AddSub);
        assert!(Precedence::AddSub < Precedence::MulDiv);
        assert!(Precedence::MulDiv < Precedence::ExponentRoot);
    }
}
