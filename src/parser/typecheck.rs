//! Pure type-checking rules, independent of parser state.
//!
//! These take `Type` values in, and return `Ok(Type)` or `Err(message)`:
//! plain string messages rather than a typed error, since checks are modeled
//! as results and propagated up to the parser, which attaches the operator
//! token's span. `super::error` does that attaching.

use crate::ast::BinaryOp;
use crate::types::Type;

/// Array-to-pointer decay: `T[N]` becomes `T*` everywhere a value is
/// type-checked. The *value* an array expression produces is still its base
/// address, unloaded; only the type used for compatibility checks changes
/// here.
fn decay(ty: &Type) -> Type {
    match ty {
        Type::Array { elem, .. } => Type::pointer((**elem).clone()),
        other => other.clone(),
    }
}

fn pointer_depth(ty: &Type) -> (u32, &Type) {
    let mut depth = 0;
    let mut cur = ty;
    while let Type::Pointer(base) = cur {
        depth += 1;
        cur = base;
    }
    (depth, cur)
}

/// Same pointer depth and same leaf type: e.g. `int**` and `int**`, or
/// `char*` and `char*`, but not `int*` and `char*`.
pub fn are_ptr_compatible(a: &Type, b: &Type) -> bool {
    let (depth_a, leaf_a) = pointer_depth(a);
    let (depth_b, leaf_b) = pointer_depth(b);
    depth_a > 0 && depth_a == depth_b && leaf_a == leaf_b
}

/// Checks that `rhs` may be assigned into a slot of type `lhs`, after array
/// decay. Pointers must be depth- and leaf-compatible; integers are mutually
/// assignable (`char` promotes to `int` and back).
pub fn check_equal(lhs: &Type, rhs: &Type) -> Result<Type, String> {
    let lhs = decay(lhs);
    let rhs = decay(rhs);

    if lhs.is_pointer() && rhs.is_pointer() {
        if are_ptr_compatible(&lhs, &rhs) {
            return Ok(lhs);
        }
        return Err(format!("cannot assign '{rhs}' to incompatible pointer type '{lhs}'"));
    }
    if lhs.is_integer() && rhs.is_integer() {
        return Ok(lhs);
    }
    Err(format!("cannot assign value of type '{rhs}' to '{lhs}'"))
}

/// Checks a binary operator's operand types after decay, returning the
/// result type or an error message. Pointer arithmetic scaling is performed
/// by the caller once this confirms the operand shapes are legal; this
/// function only decides types.
pub fn check_binary(op: BinaryOp, lhs: &Type, rhs: &Type) -> Result<Type, String> {
    let lhs = decay(lhs);
    let rhs = decay(rhs);

    if op.is_comparison() {
        if lhs.is_pointer() && rhs.is_pointer() && !are_ptr_compatible(&lhs, &rhs) {
            return Err(format!("cannot compare incompatible pointer types '{lhs}' and '{rhs}'"));
        }
        return Ok(Type::Int);
    }

    match op {
        BinaryOp::Add => {
            if lhs.is_pointer() && rhs.is_pointer() {
                return Err("cannot add two pointers".to_string());
            }
            if lhs.is_pointer() && rhs.is_integer() {
                return Ok(lhs);
            }
            if lhs.is_integer() && rhs.is_pointer() {
                return Ok(rhs);
            }
            Ok(Type::Int)
        }
        BinaryOp::Sub => {
            if lhs.is_pointer() && rhs.is_pointer() {
                if !are_ptr_compatible(&lhs, &rhs) {
                    return Err(format!("cannot subtract incompatible pointer types '{lhs}' and '{rhs}'"));
                }
                return Ok(Type::Int);
            }
            if lhs.is_pointer() && rhs.is_integer() {
                return Ok(lhs);
            }
            if lhs.is_integer() && rhs.is_pointer() {
                return Err("cannot subtract a pointer from an integer".to_string());
            }
            Ok(Type::Int)
        }
        BinaryOp::Mul | BinaryOp::Div => {
            if lhs.is_pointer() || rhs.is_pointer() {
                return Err(format!("'{op}' cannot be applied to a pointer operand"));
            }
            Ok(Type::Int)
        }
        BinaryOp::BitAnd => {
            if lhs.is_pointer() || rhs.is_pointer() {
                return Err("'&' cannot be applied to a pointer operand".to_string());
            }
            Ok(Type::Int)
        }
        BinaryOp::Assign => check_equal(&lhs, &rhs),
        _ => unreachable!("comparisons handled above"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_ints_are_compatible() {
        assert_eq!(check_equal(&Type::Int, &Type::Char), Ok(Type::Int));
    }

    #[test]
    fn mismatched_pointer_depth_is_an_error() {
        let p1 = Type::pointer(Type::Int);
        let p2 = Type::pointer(Type::pointer(Type::Int));
        assert!(check_equal(&p1, &p2).is_err());
    }

    #[test]
    fn array_decays_to_pointer_for_assignment_compatibility() {
        let arr = Type::array(4, Type::Int);
        let ptr = Type::pointer(Type::Int);
        assert_eq!(check_equal(&ptr, &arr), Ok(ptr));
    }

    #[test]
    fn binary_add_is_commutative_in_result_type() {
        let ptr = Type::pointer(Type::Int);
        let a = check_binary(BinaryOp::Add, &ptr, &Type::Int).unwrap();
        let b = check_binary(BinaryOp::Add, &Type::Int, &ptr).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn pointer_minus_pointer_is_int() {
        let ptr = Type::pointer(Type::Int);
        assert_eq!(check_binary(BinaryOp::Sub, &ptr, &ptr), Ok(Type::Int));
    }

    #[test]
    fn pointer_minus_incompatible_pointer_is_an_error() {
        let p1 = Type::pointer(Type::Int);
        let p2 = Type::pointer(Type::Char);
        assert!(check_binary(BinaryOp::Sub, &p1, &p2).is_err());
    }

    #[test]
    fn mul_on_pointer_is_rejected() {
        let ptr = Type::pointer(Type::Int);
        assert!(check_binary(BinaryOp::Mul, &ptr, &Type::Int).is_err());
    }

    #[test]
    fn comparison_always_yields_int() {
        assert_eq!(check_binary(BinaryOp::Lt, &Type::Int, &Type::Char), Ok(Type::Int));
    }
}
