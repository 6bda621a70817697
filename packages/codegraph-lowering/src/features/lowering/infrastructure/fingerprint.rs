//! Structural fingerprints for the subtree cache
//!
//! blake3 over a pre-order encoding of the subtree. Line and column metadata
//! are left out so identical expressions on different lines share a key;
//! `no_parens` stays in because it changes the shape (`a.b` vs `a.b()`).

use crate::features::lowering::domain::{CacheKey, ClassifyMode, Slot};
use crate::shared::models::{FormArgs, FormHead, SyntaxNode};

const TAG_INTEGER: u8 = 1;
const TAG_FLOAT: u8 = 2;
const TAG_STRING: u8 = 3;
const TAG_ATOM: u8 = 4;
const TAG_LIST: u8 = 5;
const TAG_PAIR: u8 = 6;
const TAG_FORM_NAMED: u8 = 7;
const TAG_FORM_NODE: u8 = 8;
const TAG_REFERENCE: u8 = 9;
const TAG_ARGS: u8 = 10;
const TAG_FORM: u8 = 11;

/// Key of `node` lowered in `slot`, plus the subtree size in nodes
///
/// `None` once the subtree grows past `max_nodes`, so oversized subtrees cost
/// at most `max_nodes` steps. Iterative so that arbitrarily deep input cannot
/// exhaust the stack.
pub fn structural_key(node: &SyntaxNode, slot: Slot, max_nodes: usize) -> Option<(CacheKey, usize)> {
    let mut hasher = blake3::Hasher::new();
    write_slot(&mut hasher, slot);

    let mut count = 0usize;
    let mut stack: Vec<&SyntaxNode> = vec![node];

    while let Some(current) = stack.pop() {
        count += 1;
        if count > max_nodes {
            return None;
        }
        match current {
            SyntaxNode::Integer(v) => {
                hasher.update(&[TAG_INTEGER]);
                hasher.update(&v.to_le_bytes());
            }
            SyntaxNode::Float(v) => {
                hasher.update(&[TAG_FLOAT]);
                hasher.update(&v.to_bits().to_le_bytes());
            }
            SyntaxNode::String(s) => write_str(&mut hasher, TAG_STRING, s),
            SyntaxNode::Atom(a) => write_str(&mut hasher, TAG_ATOM, a),
            SyntaxNode::List(items) => {
                write_len(&mut hasher, TAG_LIST, items.len());
                stack.extend(items.iter().rev());
            }
            SyntaxNode::Pair(a, b) => {
                hasher.update(&[TAG_PAIR]);
                stack.push(b);
                stack.push(a);
            }
            SyntaxNode::Form(form) => {
                hasher.update(&[TAG_FORM, u8::from(form.meta.no_parens)]);
                match &form.args {
                    FormArgs::Context(ctx) => write_str(&mut hasher, TAG_REFERENCE, ctx),
                    FormArgs::List(args) => {
                        write_len(&mut hasher, TAG_ARGS, args.len());
                        stack.extend(args.iter().rev());
                    }
                }
                match &form.head {
                    FormHead::Name(name) => write_str(&mut hasher, TAG_FORM_NAMED, name),
                    FormHead::Node(head) => {
                        hasher.update(&[TAG_FORM_NODE]);
                        // head is hashed before the arguments
                        stack.push(head);
                    }
                }
            }
        }
    }

    Some((CacheKey::from_bytes(*hasher.finalize().as_bytes()), count))
}

fn write_slot(hasher: &mut blake3::Hasher, slot: Slot) {
    let mode = |m: ClassifyMode| match m {
        ClassifyMode::Expression => 0u8,
        ClassifyMode::Pattern => 1u8,
    };
    match slot {
        Slot::Classify(m) => {
            hasher.update(&[0, mode(m)]);
        }
        Slot::Forced(shape, m) => {
            hasher.update(&[1, mode(m)]);
            write_str(hasher, 0, shape.class_name());
        }
    }
}

fn write_str(hasher: &mut blake3::Hasher, tag: u8, s: &str) {
    write_len(hasher, tag, s.len());
    hasher.update(s.as_bytes());
}

fn write_len(hasher: &mut blake3::Hasher, tag: u8, len: usize) {
    hasher.update(&[tag]);
    hasher.update(&(len as u64).to_le_bytes());
}
