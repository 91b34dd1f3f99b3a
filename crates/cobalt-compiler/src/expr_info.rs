//! Result of translating one expression.

use cobalt_core::TypeDescriptor;

use crate::emit::RECEIVER;

/// Type and C text of a translated expression.
///
/// A class-typed expression is always a pointer in C.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprInfo {
    /// `None` when the expression failed to check. Its error is already
    /// recorded and enclosing checks stay quiet.
    pub ty: Option<TypeDescriptor>,
    pub code: String,
}

impl ExprInfo {
    pub fn poisoned() -> Self {
        Self {
            ty: None,
            code: String::new(),
        }
    }

    pub fn value(ty: TypeDescriptor, code: impl Into<String>) -> Self {
        Self {
            ty: Some(ty),
            code: code.into(),
        }
    }

    /// The receiver pointer.
    pub fn receiver(ty: TypeDescriptor) -> Self {
        Self::value(ty, RECEIVER)
    }

    /// A named local, parameter or field access path.
    pub fn named(ty: Option<TypeDescriptor>, code: String) -> Self {
        Self { ty, code }
    }

    pub fn is_poisoned(&self) -> bool {
        self.ty.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        assert_eq!(ExprInfo::receiver(TypeDescriptor::INT).code, "self");
        assert_eq!(ExprInfo::named(None, "a".to_string()).code, "a");
        assert!(ExprInfo::named(None, "a".to_string()).is_poisoned());
        assert!(ExprInfo::poisoned().is_poisoned());
        assert!(!ExprInfo::value(TypeDescriptor::INT, "1").is_poisoned());
    }
}
