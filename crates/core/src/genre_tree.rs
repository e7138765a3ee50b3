//! Genre taxonomy as an id graph (parent pointers plus a derived children
//! index), built on read from flat rows.
//!
//! Genres reference their parent by id only. [`GenreIndex`] borrows a slice
//! of rows and derives the adjacency list needed for tree rendering,
//! descendant expansion and parent-first ordering.

use std::collections::{HashMap, HashSet};

use crate::types::DbId;

/// Deepest allowed genre level (levels are 1-based).
pub const MAX_LEVEL: i32 = 3;

/// Anything that can be placed in the genre tree.
pub trait TreeNode {
    fn node_id(&self) -> &str;
    fn parent_id(&self) -> Option<&str>;
    fn sort_order(&self) -> i32;
}

/// Adjacency index over a borrowed slice of genre rows.
///
/// Sibling lists are sorted by `(sort_order, id)`. Rows whose parent is not
/// part of the slice are neither roots nor reachable from one.
#[derive(Debug)]
pub struct GenreIndex<'a, T> {
    nodes: &'a [T],
    by_id: HashMap<&'a str, usize>,
    children: HashMap<&'a str, Vec<usize>>,
    roots: Vec<usize>,
}

impl<'a, T: TreeNode> GenreIndex<'a, T> {
    pub fn new(nodes: &'a [T]) -> Self {
        let mut by_id = HashMap::with_capacity(nodes.len());
        let mut children: HashMap<&'a str, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();

        for (idx, node) in nodes.iter().enumerate() {
            by_id.insert(node.node_id(), idx);
            match node.parent_id() {
                Some(parent) => children.entry(parent).or_default().push(idx),
                None => roots.push(idx),
            }
        }

        let order_key = move |idx: &usize| (nodes[*idx].sort_order(), nodes[*idx].node_id());
        roots.sort_by_key(order_key);
        for siblings in children.values_mut() {
            siblings.sort_by_key(order_key);
        }

        Self {
            nodes,
            by_id,
            children,
            roots,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&'a T> {
        self.by_id.get(id).map(|&idx| &self.nodes[idx])
    }

    /// Top-level genres in display order.
    pub fn roots(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.roots.iter().map(|&idx| &self.nodes[idx])
    }

    /// Direct children of `id` in display order.
    pub fn children(&self, id: &str) -> impl Iterator<Item = &'a T> + '_ {
        self.children
            .get(id)
            .into_iter()
            .flatten()
            .map(|&idx| &self.nodes[idx])
    }

    /// The id itself followed by every transitive child id, depth-first.
    ///
    /// An id that is not in the index expands to just itself.
    pub fn descendant_ids(&self, id: &str) -> Vec<DbId> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            out.push(current.to_string());
            if let Some(kids) = self.children.get(current) {
                // Reverse so the first child is visited first.
                stack.extend(kids.iter().rev().map(|&idx| self.nodes[idx].node_id()));
            }
        }

        out
    }

    /// Whether `candidate` is `ancestor` or lies anywhere beneath it.
    pub fn is_within(&self, ancestor: &str, candidate: &str) -> bool {
        self.descendant_ids(ancestor).iter().any(|id| id == candidate)
    }

    /// Build a nested structure from the roots down.
    ///
    /// `make` receives a row and its already-built children.
    pub fn build<N, F>(&self, make: F) -> Vec<N>
    where
        F: Fn(&'a T, Vec<N>) -> N,
    {
        self.roots
            .iter()
            .map(|&idx| self.build_node(idx, &make))
            .collect()
    }

    fn build_node<N, F>(&self, idx: usize, make: &F) -> N
    where
        F: Fn(&'a T, Vec<N>) -> N,
    {
        let node = &self.nodes[idx];
        let children = self
            .children
            .get(node.node_id())
            .map(|kids| kids.iter().map(|&kid| self.build_node(kid, make)).collect())
            .unwrap_or_default();
        make(node, children)
    }

    /// All rows reordered so that every row comes after its parent whenever
    /// the parent is also in the slice. Otherwise input order is kept.
    pub fn parents_first(&self) -> Vec<&'a T> {
        let mut placed = vec![false; self.nodes.len()];
        let mut visiting = vec![false; self.nodes.len()];
        let mut out = Vec::with_capacity(self.nodes.len());

        for idx in 0..self.nodes.len() {
            self.place(idx, &mut placed, &mut visiting, &mut out);
        }

        out
    }

    fn place(&self, idx: usize, placed: &mut [bool], visiting: &mut [bool], out: &mut Vec<&'a T>) {
        if placed[idx] || visiting[idx] {
            return;
        }
        visiting[idx] = true;
        if let Some(parent_idx) = self.nodes[idx]
            .parent_id()
            .and_then(|parent| self.by_id.get(parent).copied())
        {
            self.place(parent_idx, placed, visiting, out);
        }
        visiting[idx] = false;
        placed[idx] = true;
        out.push(&self.nodes[idx]);
    }
}
