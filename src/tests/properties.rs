use proptest::prelude::*;

use crate::{BuiltinFormat, FormatTemplates, NodeKind, SerializeOptions, StructuredTree, UnstructuredNode, UnstructuredNodeList, serialize};
use crate::node::structured::ConstructId;

fn operand() -> impl Strategy<Value = UnstructuredNode> {
    prop_oneof![
        (0u32..100).prop_map(|n| UnstructuredNode::Number(n as f64)),
        prop::char::range('a', 'z').prop_map(UnstructuredNode::Variable),
    ]
}

fn operator() -> impl Strategy<Value = UnstructuredNode> {
    prop::sample::select(vec!["Add", "Subtract", "Multiply", "Divide", "Power", "Equals"])
        .prop_map(|name| UnstructuredNode::operator(name))
}

/// A well-formed sequence: operands separated by single operators.
fn token_sequence() -> impl Strategy<Value = UnstructuredNodeList> {
    (operand(), prop::collection::vec((operator(), operand()), 0..8)).prop_map(|(first, rest)| {
        let mut items = vec![first];
        for (op, operand) in rest {
            items.push(op);
            items.push(operand);
        }
        UnstructuredNodeList { items }
    })
}

fn text_operand() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..100).prop_map(|n| n.to_string()),
        "[a-z]",
    ]
}

/// Text using only `+` and `*` between single letters and whole numbers.
fn sum_of_products() -> impl Strategy<Value = String> {
    (text_operand(), prop::collection::vec((prop::sample::select(vec!["+", "*"]), text_operand()), 0..8))
        .prop_map(|(first, rest)| {
            let mut text = first;
            for (op, operand) in rest {
                text.push_str(op);
                text.push_str(&operand);
            }
            text
        })
}

/// `outer(inner(a, b), c)`, where both are two-operand n-ary or binary operators.
fn nested(outer: (ConstructId, &str, bool), inner: (ConstructId, &str, bool)) -> StructuredTree {
    fn join(builder: &mut crate::node::structured::TreeBuilder, (id, name, nary): (ConstructId, &str, bool), left: crate::NodeId, right: crate::NodeId) -> crate::NodeId {
        if nary {
            builder.nary(id, name, vec![left, right]).unwrap()
        } else {
            builder.binary(id, name, left, right)
        }
    }

    let mut builder = StructuredTree::builder();
    let a = builder.variable('a');
    let b = builder.variable('b');
    let inner = join(&mut builder, inner, a, b);
    let c = builder.variable('c');
    let root = join(&mut builder, outer, inner, c);
    builder.finish(root)
}

fn add_sub() -> impl Strategy<Value = (ConstructId, &'static str, bool)> {
    prop::sample::select(vec![(2, "Add", true), (3, "Subtract", false)])
}

fn mul_div() -> impl Strategy<Value = (ConstructId, &'static str, bool)> {
    prop::sample::select(vec![(0, "Multiply", true), (1, "Divide", false)])
}

proptest! {
    #[test]
    fn chains_flatten_into_one_node(values in prop::collection::vec(0u32..1000, 3..12)) {
        let mut items = vec![];
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                items.push(UnstructuredNode::operator("Multiply"));
            }
            items.push(UnstructuredNode::Number(*value as f64));
        }

        let tree = upgrade!(UnstructuredNodeList { items }).unwrap();
        match tree.kind(tree.root()) {
            NodeKind::NaryOp { children } => prop_assert_eq!(children.len(), values.len()),
            other => prop_assert!(false, "expected an n-ary node, got {:?}", other),
        }
    }

    #[test]
    fn serialization_is_stable(tokens in token_sequence()) {
        let tree = upgrade!(tokens).unwrap();

        for format in BuiltinFormat::ALL {
            let templates = FormatTemplates::builtin(format);
            let first = serialize(&tree, &templates, &SerializeOptions::default()).unwrap();
            let second = serialize(&tree, &templates, &SerializeOptions::default()).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn every_parent_owns_its_children(tokens in token_sequence()) {
        let tree = upgrade!(tokens).unwrap();

        prop_assert_eq!(tree.parent(tree.root()), None);
        for id in tree.ids() {
            for child in tree.children(id) {
                prop_assert_eq!(tree.parent(child), Some(id));
            }
        }
    }

    #[test]
    fn tighter_operators_are_never_bracketed(outer in add_sub(), inner in mul_div()) {
        let output = render!(nested(outer, inner), Plain);
        prop_assert!(!output.contains('('), "{} was bracketed", output);
    }

    #[test]
    fn looser_operators_are_always_bracketed(outer in mul_div(), inner in add_sub()) {
        let output = render!(nested(outer, inner), Plain);
        prop_assert!(output.starts_with('('), "{} was not bracketed", output);
    }

    #[test]
    fn matrices_keep_their_shape(rows in 1usize..5, cols in 1usize..5) {
        let cells: Vec<u32> = (0..(rows * cols) as u32).collect();
        let matrix = UnstructuredNode::Matrix {
            name: "Matrix".into(),
            rows,
            cols,
            cells: cells.iter().map(|n| uns_list!(UnstructuredNode::Number(*n as f64))).collect(),
        };

        let tree = upgrade!(uns_list!(matrix)).unwrap();
        prop_assert!(
            matches!(tree.kind(tree.root()), NodeKind::Matrix { rows: r, cols: c, .. } if *r == rows && *c == cols),
            "matrix shape changed to {:?}", tree.kind(tree.root())
        );

        let expected_rows: Vec<String> = cells.chunks(cols)
            .map(|row| format!("[{}]", row.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(",")))
            .collect();
        prop_assert_eq!(render!(tree, Plain), format!("[{}]", expected_rows.join(",")));
    }

    #[test]
    fn plain_text_round_trips(text in sum_of_products()) {
        prop_assert_eq!(render!(parse!(&text), Plain), text);
    }
}
