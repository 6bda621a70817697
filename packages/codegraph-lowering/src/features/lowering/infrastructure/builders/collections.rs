//! Collection builders (lists, tuples, maps, structs, binaries, sigils)
//!
//! Shared between the expression and pattern tables: children inherit the
//! mode the collection itself was classified with.

use super::{form_args, form_name, Emitter};
use crate::features::lowering::domain::vocabulary::{edge, prop};
use crate::features::lowering::domain::{ClassifyMode, ShapeTag, Slot};
use crate::shared::models::SyntaxNode;

pub(super) fn list<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    let items = node.as_list().unwrap_or(&[]);
    let mode = out.mode();
    out.indexed(items, "element", edge::HAS_ELEMENT, Slot::Classify(mode));
    out.count(prop::ELEMENT_COUNT, items.len());
}

/// `[a: 1, b: 2]` - every item is a pair with an atom key
pub(super) fn keyword<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    let items = node.as_list().unwrap_or(&[]);
    let mode = out.mode();
    out.indexed(
        items,
        "entry",
        edge::HAS_ENTRY,
        Slot::Forced(ShapeTag::MapEntry, mode),
    );
    out.count(prop::ENTRY_COUNT, items.len());
}

/// 2-tuples are literal pairs, everything else is a `{}` form
pub(super) fn tuple<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    match node {
        SyntaxNode::Pair(first, second) => {
            out.inherit(first, "element/0", edge::HAS_ELEMENT);
            out.inherit(second, "element/1", edge::HAS_ELEMENT);
            out.count(prop::ELEMENT_COUNT, 2);
        }
        _ => {
            let items = form_args(node);
            let mode = out.mode();
            out.indexed(items, "element", edge::HAS_ELEMENT, Slot::Classify(mode));
            out.count(prop::ELEMENT_COUNT, items.len());
        }
    }
}

pub(super) fn map<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    entries(form_args(node), out);
}

/// `%{base | k => v}`
pub(super) fn map_update<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    let Some([base, updates]) = update_parts(form_args(node)) else {
        return;
    };
    out.expr(base, "base", edge::HAS_BASE);
    entries(updates.as_list().unwrap_or(&[]), out);
}

/// `{key, value}` of a map, struct or keyword list
pub(super) fn map_entry<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    if let SyntaxNode::Pair(key, value) = node {
        out.inherit(key, "key", edge::HAS_KEY);
        out.inherit(value, "value", edge::HAS_VALUE);
    }
}

/// `%Name{...}` and `%Name{base | ...}`
pub(super) fn structure<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    let [name, body] = form_args(node) else {
        return;
    };
    out.expr(name, "struct", edge::HAS_STRUCT_TYPE);

    let fields = form_args(body);
    match update_parts(fields) {
        Some([base, updates]) => {
            out.expr(base, "base", edge::HAS_BASE);
            entries(updates.as_list().unwrap_or(&[]), out);
        }
        None => entries(fields, out),
    }
}

/// `<<a, b::size(8)>>`
pub(super) fn binary<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    let mode = out.mode();
    out.indexed(form_args(node), "segment", edge::HAS_SEGMENT, Slot::Classify(mode));
}

/// `value::type`; the type spec is never a pattern
pub(super) fn binary_segment<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    if let [value, spec] = form_args(node) {
        out.inherit(value, "value", edge::HAS_VALUE);
        out.expr(spec, "type", edge::HAS_TYPE_SPEC);
    }
}

/// `~r/foo/i` → `sigil_r(<<"foo">>, 'i')`
pub(super) fn sigil<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    if let Some(letter) = form_name(node).and_then(|n| n.strip_prefix("sigil_")) {
        out.literal(prop::SIGIL_NAME, letter);
    }
    let [content, modifiers] = form_args(node) else {
        return;
    };

    let parts = form_args(content);
    let text: Option<String> = parts
        .iter()
        .map(|part| match part {
            SyntaxNode::String(s) => Some(s.as_str()),
            _ => None,
        })
        .collect();
    match text {
        Some(text) => out.literal(prop::VALUE, text),
        // interpolated
        None => out.indexed(
            parts,
            "part",
            edge::HAS_PART,
            Slot::Classify(ClassifyMode::Expression),
        ),
    }

    let flags: String = modifiers
        .as_list()
        .unwrap_or(&[])
        .iter()
        .filter_map(|c| match c {
            SyntaxNode::Integer(code) => u32::try_from(*code).ok().and_then(char::from_u32),
            _ => None,
        })
        .collect();
    if !flags.is_empty() {
        out.literal(prop::SIGIL_MODIFIERS, flags);
    }
}

/// `[head | tail]`
pub(super) fn cons<'a>(node: &'a SyntaxNode, out: &mut Emitter<'a>) {
    if let [head, tail] = form_args(node) {
        out.inherit(head, "head", edge::HAS_HEAD);
        out.inherit(tail, "tail", edge::HAS_TAIL);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════

/// Pairs become forced map entries; anything else is classified normally
fn entries<'a>(items: &'a [SyntaxNode], out: &mut Emitter<'a>) {
    let mode = out.mode();
    for (i, item) in items.iter().enumerate() {
        let slot = match item {
            SyntaxNode::Pair(_, _) => Slot::Forced(ShapeTag::MapEntry, mode),
            _ => Slot::Classify(mode),
        };
        out.child(item, format!("entry/{}", i), edge::HAS_ENTRY, slot);
    }
    out.count(prop::ENTRY_COUNT, items.len());
}

/// `[base, updates]` of a single `base | updates` argument
fn update_parts(args: &[SyntaxNode]) -> Option<&[SyntaxNode; 2]> {
    let [only] = args else {
        return None;
    };
    let parts = only.as_form()?.named_with_arity("|", 2)?;
    parts[1].as_list()?;
    parts.try_into().ok()
}
