//! Structural diff between two plist trees.
//!
//! Reports the paths at which the destination tree differs from the
//! source tree. Dictionaries are compared by key with removals reported
//! first, then additions and changes in destination traversal order;
//! arrays are compared index-wise with tail additions/removals.

use bplist_codec::PlistValue;
use bplist_path::format_plist_path;

/// What happened at a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Added,
    Removed,
    Changed,
}

/// One entry of a structural diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry {
    pub path: String,
    pub change: Change,
}

impl DiffEntry {
    fn at(components: &[String], change: Change) -> Self {
        Self {
            path: format_plist_path(components),
            change,
        }
    }
}

/// Computes the structural diff from `src` to `dst`.
pub fn diff(src: &PlistValue, dst: &PlistValue) -> Vec<DiffEntry> {
    let mut out = Vec::new();
    let mut components = Vec::new();
    diff_at(src, dst, &mut components, &mut out);
    out
}

fn diff_at(
    src: &PlistValue,
    dst: &PlistValue,
    components: &mut Vec<String>,
    out: &mut Vec<DiffEntry>,
) {
    match (src, dst) {
        (PlistValue::Dict(src_pairs), PlistValue::Dict(dst_pairs)) => {
            // removals first, in source order
            for (key, _) in src_pairs {
                if dst.dict_get(key).is_none() {
                    components.push(key.clone());
                    out.push(DiffEntry::at(components, Change::Removed));
                    components.pop();
                }
            }
            // then destination traversal order
            for (key, dst_val) in dst_pairs {
                components.push(key.clone());
                match src.dict_get(key) {
                    Some(src_val) => diff_at(src_val, dst_val, components, out),
                    None => out.push(DiffEntry::at(components, Change::Added)),
                }
                components.pop();
            }
        }
        (PlistValue::Array(src_items), PlistValue::Array(dst_items)) => {
            let common = src_items.len().min(dst_items.len());
            for index in 0..common {
                components.push(index.to_string());
                diff_at(&src_items[index], &dst_items[index], components, out);
                components.pop();
            }
            for index in common..dst_items.len() {
                components.push(index.to_string());
                out.push(DiffEntry::at(components, Change::Added));
                components.pop();
            }
            for index in common..src_items.len() {
                components.push(index.to_string());
                out.push(DiffEntry::at(components, Change::Removed));
                components.pop();
            }
        }
        _ => {
            if src != dst {
                out.push(DiffEntry::at(components, Change::Changed));
            }
        }
    }
}
