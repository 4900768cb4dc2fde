//! An arena-backed scope tree.
//!
//! Scopes are nodes in a `Vec` with parent indices rather than
//! `Rc`/`Weak` pointers: no reference counting, and no possibility of
//! a cycle, since a scope's parent index is always assigned once, at
//! creation, to an index that already exists.

use rustc_hash::FxHashMap;
use space_common::Span;

use crate::ty::VarDec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Class,
    Function,
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Global,
    PGlobal,
    Private,
    Secure,
    Default,
}

/// What kind of thing an `Entry` names, so a resolved symbol can be
/// told apart from an ordinary variable of the same declared type
/// (e.g. a class name used bare, as in `A->g()`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Variable,
    Function,
    Class,
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub dec: VarDec,
    pub visibility: Visibility,
    pub span: Span,
    pub kind: EntryKind,
}

#[derive(Debug)]
struct Scope {
    kind: ScopeKind,
    parent: Option<usize>,
    owner_class: Option<String>,
    entries: FxHashMap<String, Entry>,
}

#[derive(Debug)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl Default for ScopeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeArena {
    pub fn new() -> Self {
        ScopeArena {
            scopes: vec![Scope {
                kind: ScopeKind::Global,
                parent: None,
                owner_class: None,
                entries: FxHashMap::default(),
            }],
        }
    }

    pub fn root(&self) -> usize {
        0
    }

    /// Opens a child scope of `parent`. `parent` must be an index
    /// already returned by this arena, so the new scope's parent chain
    /// can only ever point backward -- the invariant that rules out
    /// cycles.
    pub fn open(&mut self, parent: usize, kind: ScopeKind) -> usize {
        assert!(parent < self.scopes.len());
        self.scopes.push(Scope {
            kind,
            parent: Some(parent),
            owner_class: None,
            entries: FxHashMap::default(),
        });
        self.scopes.len() - 1
    }

    pub fn open_class(&mut self, parent: usize, class_name: impl Into<String>) -> usize {
        let idx = self.open(parent, ScopeKind::Class);
        self.scopes[idx].owner_class = Some(class_name.into());
        idx
    }

    pub fn kind(&self, scope: usize) -> ScopeKind {
        self.scopes[scope].kind
    }

    pub fn parent(&self, scope: usize) -> Option<usize> {
        self.scopes[scope].parent
    }

    pub fn owner_class(&self, scope: usize) -> Option<&str> {
        let mut cur = Some(scope);
        while let Some(idx) = cur {
            if let Some(name) = &self.scopes[idx].owner_class {
                return Some(name);
            }
            cur = self.scopes[idx].parent;
        }
        None
    }

    /// Declares `entry` in `scope`. Returns the prior entry if the name
    /// is already declared directly in this scope (shadowing an outer
    /// scope's declaration is allowed; redeclaring within the same
    /// scope is not).
    pub fn declare(&mut self, scope: usize, entry: Entry) -> Result<(), Entry> {
        if let Some(existing) = self.scopes[scope].entries.get(&entry.name) {
            return Err(existing.clone());
        }
        self.scopes[scope].entries.insert(entry.name.clone(), entry);
        Ok(())
    }

    /// Walks the parent chain looking for `name`, innermost scope first.
    pub fn resolve(&self, scope: usize, name: &str) -> Option<&Entry> {
        let mut cur = Some(scope);
        while let Some(idx) = cur {
            if let Some(entry) = self.scopes[idx].entries.get(name) {
                return Some(entry);
            }
            cur = self.scopes[idx].parent;
        }
        None
    }

    pub fn resolve_local(&self, scope: usize, name: &str) -> Option<&Entry> {
        self.scopes[scope].entries.get(name)
    }

    pub fn is_descendant_of(&self, scope: usize, kind: ScopeKind) -> bool {
        let mut cur = Some(scope);
        while let Some(idx) = cur {
            if self.scopes[idx].kind == kind {
                return true;
            }
            cur = self.scopes[idx].parent;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ty::VarDec;

    fn entry(name: &str) -> Entry {
        Entry {
            name: name.to_string(),
            dec: VarDec::primitive("int", 0, false),
            visibility: Visibility::Default,
            span: Span::new(0, 1),
            kind: EntryKind::Variable,
        }
    }

    #[test]
    fn resolves_through_parent_chain() {
        let mut arena = ScopeArena::new();
        arena.declare(arena.root(), entry("x")).unwrap();
        let child = arena.open(arena.root(), ScopeKind::Block);
        assert!(arena.resolve(child, "x").is_some());
        assert!(arena.resolve_local(child, "x").is_none());
    }

    #[test]
    fn redeclaration_in_same_scope_is_rejected() {
        let mut arena = ScopeArena::new();
        let scope = arena.open(arena.root(), ScopeKind::Block);
        arena.declare(scope, entry("x")).unwrap();
        assert!(arena.declare(scope, entry("x")).is_err());
    }

    #[test]
    fn shadowing_in_a_child_scope_is_allowed() {
        let mut arena = ScopeArena::new();
        arena.declare(arena.root(), entry("x")).unwrap();
        let child = arena.open(arena.root(), ScopeKind::Block);
        assert!(arena.declare(child, entry("x")).is_ok());
    }

    #[test]
    fn parent_chain_always_terminates() {
        let mut arena = ScopeArena::new();
        let mut scope = arena.root();
        for _ in 0..50 {
            scope = arena.open(scope, ScopeKind::Block);
        }
        let mut steps = 0;
        let mut cur = Some(scope);
        while let Some(idx) = cur {
            cur = arena.parent(idx);
            steps += 1;
            assert!(steps <= 51);
        }
    }
}
