//! Import visibility.
//!
//! A module sees its direct imports, public or private, plus everything
//! reachable from them through *public* imports only: a public import is a
//! re-export, a private one is not. The closure over the public-import
//! subgraph is memoized (diamond-shaped module graphs would otherwise
//! retrace shared suffixes) and guarded against revisiting a module, so a
//! cycle in the public subgraph terminates instead of recursing forever.

use std::collections::{HashMap, HashSet};

use crate::ast::Import;

/// All module paths visible from `module`: its direct imports and the
/// public re-export closure behind each of them. The result preserves
/// discovery order and contains no duplicates.
pub(crate) fn visible_imports(
    imports: &HashMap<Vec<String>, Vec<Import>>,
    memo: &mut HashMap<Vec<String>, Vec<Vec<String>>>,
    module: &[String],
) -> Vec<Vec<String>> {
    let mut seen = HashSet::new();
    let mut visible = Vec::new();
    for import in imports.get(module).map(Vec::as_slice).unwrap_or(&[]) {
        push_unique(&mut visible, &mut seen, import.path.clone());
        for re_export in pub_exports(imports, memo, &import.path) {
            push_unique(&mut visible, &mut seen, re_export);
        }
    }
    visible
}

/// The public re-export closure of `module`: every path reachable by
/// following only imports flagged public, excluding `module` itself.
fn pub_exports(
    imports: &HashMap<Vec<String>, Vec<Import>>,
    memo: &mut HashMap<Vec<String>, Vec<Vec<String>>>,
    module: &[String],
) -> Vec<Vec<String>> {
    if let Some(cached) = memo.get(module) {
        return cached.clone();
    }
    let mut visited = HashSet::new();
    visited.insert(module.to_vec());
    let mut closure = Vec::new();
    let mut seen = HashSet::new();
    walk_pub(imports, module, &mut visited, &mut seen, &mut closure);
    memo.insert(module.to_vec(), closure.clone());
    closure
}

fn walk_pub(
    imports: &HashMap<Vec<String>, Vec<Import>>,
    module: &[String],
    visited: &mut HashSet<Vec<String>>,
    seen: &mut HashSet<Vec<String>>,
    closure: &mut Vec<Vec<String>>,
) {
    for import in imports.get(module).map(Vec::as_slice).unwrap_or(&[]) {
        if !import.public {
            continue;
        }
        push_unique(closure, seen, import.path.clone());
        if visited.insert(import.path.clone()) {
            walk_pub(imports, &import.path, visited, seen, closure);
        }
    }
}

fn push_unique(
    paths: &mut Vec<Vec<String>>,
    seen: &mut HashSet<Vec<String>>,
    path: Vec<String>,
) {
    if seen.insert(path.clone()) {
        paths.push(path);
    }
}
