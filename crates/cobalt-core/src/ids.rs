//! Identifier types for symbols.
//!
//! Every symbol lives in an arena owned by the symbol table; these ids are
//! the non-owning handles the rest of the compiler passes around. An id is
//! only ever minted by the table that stores the symbol it names.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            /// Arena index of this symbol.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Handle to a registered class.
    ClassId,
    "class#"
);
define_id!(
    /// Handle to a registered method.
    MethodId,
    "method#"
);
define_id!(
    /// Handle to a field, parameter or local variable.
    VariableId,
    "var#"
);
define_id!(
    /// Handle to a node of the scope tree.
    ScopeId,
    "scope#"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_index_roundtrip() {
        let id = ClassId::new(7);
        assert_eq!(id.index(), 7);
        assert_eq!(id, ClassId::new(7));
        assert_ne!(id, ClassId::new(8));
    }

    #[test]
    fn id_display() {
        assert_eq!(ScopeId::new(3).to_string(), "scope#3");
        assert_eq!(VariableId::new(0).to_string(), "var#0");
    }
}
