//! Shared test helpers for decompiler integration tests.

use std::collections::HashMap;

use ezstate_decompiler::Expr;
use ezstate_expr::{BinaryOperator, IntWidth, UnaryOperator};
use proptest::prelude::*;

/// Command metadata used by the integration tests: `(bank, id) -> args`.
#[allow(dead_code)]
pub fn commands() -> HashMap<(u8, i32), usize> {
    HashMap::from([((6, 12), 2), ((1, 100), 0), ((2, 5), 3), ((0, -1), 1)])
}

#[allow(dead_code)]
pub fn int_constant() -> impl Strategy<Value = Expr> {
    prop_oneof![
        (-64i64..=63).prop_map(|v| Expr::int_with_width(v, IntWidth::Inline)),
        (0i64..=65535).prop_map(|v| Expr::int_with_width(v, IntWidth::U16)),
        any::<i32>().prop_map(|v| Expr::int_with_width(v as i64, IntWidth::I32)),
    ]
}

#[allow(dead_code)]
pub fn leaf() -> impl Strategy<Value = Expr> {
    prop_oneof![
        4 => int_constant(),
        1 => any::<u32>().prop_map(|bits| Expr::f32(f32::from_bits(bits))),
        1 => any::<u64>().prop_map(|bits| Expr::f64(f64::from_bits(bits))),
        1 => "\\PC{0,8}".prop_map(Expr::string),
        2 => (0u8..8).prop_map(Expr::parameter),
    ]
}

fn unary_operator() -> impl Strategy<Value = UnaryOperator> {
    proptest::sample::select(UnaryOperator::ALL.to_vec())
}

fn binary_operator() -> impl Strategy<Value = BinaryOperator> {
    proptest::sample::select(BinaryOperator::ALL.to_vec())
}

/// Trees whose command calls agree with [`commands`], so they decode back
/// to themselves.
#[allow(dead_code)]
pub fn tree() -> impl Strategy<Value = Expr> {
    leaf().prop_recursive(6, 48, 6, |inner| {
        let mut table: Vec<((u8, i32), usize)> = commands().into_iter().collect();
        table.sort();
        prop_oneof![
            (unary_operator(), inner.clone()).prop_map(|(op, term)| Expr::unary(op, term)),
            (binary_operator(), inner.clone(), inner.clone())
                .prop_map(|(op, left, right)| Expr::binary(op, left, right)),
            (int_constant(), proptest::collection::vec(inner.clone(), 0..=6))
                .prop_map(|(id, args)| Expr::function(id, args)),
            (proptest::sample::select(table), proptest::collection::vec(inner, 3))
                .prop_map(|(((bank, id), arity), mut args)| {
                    args.truncate(arity);
                    Expr::command(bank, id, args)
                }),
        ]
    })
}
