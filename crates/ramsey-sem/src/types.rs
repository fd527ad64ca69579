//! Numeric promotion rules shared by every type-checking site.

use ramsey_par::ast::Type;

/// True if `small` is numeric, i.e. `in`/`big`/`small` (everything but the
/// boolean type `boo`).
pub fn is_numeric(ty: Type) -> bool {
    !matches!(ty, Type::Boo)
}

/// Whether a value of type `from` may be used where `to` is expected,
/// under the widening rule: `small -> big`, and `in` matches either
/// numeric width. `boo` only matches `boo`.
pub fn assignable(from: Type, to: Type) -> bool {
    if from == to {
        return true;
    }
    match (from, to) {
        (Type::Small, Type::Big) => true,
        (Type::In, Type::Big) | (Type::In, Type::Small) => true,
        (Type::Big, Type::In) | (Type::Small, Type::In) => true,
        _ => false,
    }
}

/// The result type of combining two numeric operands under the widening
/// rule: any `big` forces `big`; otherwise `in` next to `small` yields
/// `small`; two `in`s yield `in`.
pub fn widen(a: Type, b: Type) -> Type {
    use Type::*;
    match (a, b) {
        (Big, _) | (_, Big) => Big,
        (Small, _) | (_, Small) => Small,
        _ => In,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_widens_to_big_but_not_reverse() {
        assert!(assignable(Type::Small, Type::Big));
        assert!(!assignable(Type::Big, Type::Small));
    }

    #[test]
    fn in_matches_either_numeric_width() {
        assert!(assignable(Type::In, Type::Big));
        assert!(assignable(Type::In, Type::Small));
        assert!(assignable(Type::Big, Type::In));
    }

    #[test]
    fn boo_is_not_numeric_and_only_matches_itself() {
        assert!(!is_numeric(Type::Boo));
        assert!(assignable(Type::Boo, Type::Boo));
        assert!(!assignable(Type::Boo, Type::In));
    }

    #[test]
    fn widen_prefers_big_over_everything() {
        assert_eq!(widen(Type::Big, Type::Small), Type::Big);
        assert_eq!(widen(Type::In, Type::Big), Type::Big);
    }

    #[test]
    fn widen_prefers_small_over_in() {
        assert_eq!(widen(Type::In, Type::Small), Type::Small);
    }

    #[test]
    fn widen_pure_in_yields_in() {
        assert_eq!(widen(Type::In, Type::In), Type::In);
    }
}
