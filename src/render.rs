//! Tree diagram rendering.
//!
//! Walks a subtree depth-first, left to right over siblings, and writes one
//! line per node. Each line carries the vertical rails of every open
//! ancestor level, then the node's own connector (mid edge, or end edge for
//! the final child of its parent). A level whose last child has been
//! emitted turns into a blank gap for everything below it; that bookkeeping
//! lives in the `levels_ended` set, threaded by value down the recursion so
//! sibling subtrees never observe each other's markings.
//!
//! Values whose textual form spans multiple lines get every continuation
//! line prefixed with the rail pattern of the node's position, so wrapped
//! text stays nested under the correct connector.

use std::fmt;

use generational_arena::Index;
use itertools::Itertools;
use tracing::instrument;

use crate::arena::{Tree, TreeNode};
use crate::config::Style;

/// Borrowed view of a subtree that renders as a text diagram.
///
/// Produced by [`Tree::display`] / [`Tree::display_with`]; the diagram is
/// emitted through [`fmt::Display`], so it can go straight into `format!`,
/// `println!`, or `to_string()`.
pub struct DisplayTree<'t, V> {
    tree: &'t Tree<V>,
    node: Index,
    style: Style,
}

impl<V: fmt::Display> fmt::Display for DisplayTree<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(node) = self.tree.get_node(self.node) else {
            return Ok(());
        };

        let mut levels_ended: Vec<usize> = Vec::new();
        if node.parent.is_none() {
            // A rendering root without a parent gets a bare line, no
            // connector glyph.
            match &node.data.meta {
                Some(meta) => writeln!(f, "[{}]  {}", meta, node.data.value)?,
                None => writeln!(f, "{}", node.data.value)?,
            }
        } else {
            let edge = if node.children.is_empty() {
                levels_ended.push(0);
                &self.style.edge_end
            } else {
                &self.style.edge_mid
            };
            write_value(
                f,
                self.tree,
                &self.style,
                0,
                &levels_ended,
                edge,
                self.node,
                node,
            )?;
        }
        if !node.children.is_empty() {
            write_nodes(f, self.tree, &self.style, 0, &levels_ended, &node.children)?;
        }
        Ok(())
    }
}

impl<V: fmt::Display> Tree<V> {
    /// View of the subtree at `node`, rendered with the default [`Style`].
    pub fn display(&self, node: Index) -> DisplayTree<'_, V> {
        self.display_with(node, &Style::default())
    }

    /// View of the subtree at `node`, rendered with the given style.
    pub fn display_with(&self, node: Index, style: &Style) -> DisplayTree<'_, V> {
        DisplayTree {
            tree: self,
            node,
            style: style.clone(),
        }
    }

    /// Renders the subtree at `node` with the default style.
    #[instrument(level = "debug", skip(self))]
    pub fn render(&self, node: Index) -> String {
        self.display(node).to_string()
    }

    /// Renders the subtree at `node` with the given style.
    #[instrument(level = "debug", skip(self, style))]
    pub fn render_with(&self, node: Index, style: &Style) -> String {
        self.display_with(node, style).to_string()
    }
}

impl<V: fmt::Display> fmt::Display for Tree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display(self.root()))
    }
}

fn write_nodes<V: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    tree: &Tree<V>,
    style: &Style,
    level: usize,
    levels_ended: &[usize],
    children: &[Index],
) -> fmt::Result {
    for (i, &child) in children.iter().enumerate() {
        let Some(node) = tree.get_node(child) else {
            continue;
        };
        let last = i + 1 == children.len();

        let mut ended_owned;
        let (edge, levels_ended) = if last {
            ended_owned = levels_ended.to_vec();
            ended_owned.push(level);
            (&style.edge_end, ended_owned.as_slice())
        } else {
            (&style.edge_mid, levels_ended)
        };

        write_value(f, tree, style, level, levels_ended, edge, child, node)?;
        if !node.children.is_empty() {
            write_nodes(f, tree, style, level + 1, levels_ended, &node.children)?;
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn write_value<V: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    tree: &Tree<V>,
    style: &Style,
    level: usize,
    levels_ended: &[usize],
    edge: &str,
    idx: Index,
    node: &TreeNode<V>,
) -> fmt::Result {
    for i in 0..level {
        if is_ended(levels_ended, i) {
            write!(f, "{}", " ".repeat(style.indent + 1))?;
        } else {
            write!(f, "{}{}", style.edge_link, " ".repeat(style.indent))?;
        }
    }

    let value = rendered_value(tree, style, level, idx, node);
    match &node.data.meta {
        Some(meta) => writeln!(f, "{} [{}]  {}", edge, meta, value),
        None => writeln!(f, "{} {}", edge, value),
    }
}

fn is_ended(levels_ended: &[usize], level: usize) -> bool {
    levels_ended.contains(&level)
}

/// Textual form of a node's value.
///
/// Single-line values pass through unchanged. Values with embedded newlines
/// have every line after the first prefixed with the padding computed by
/// [`padding`], a trailing empty line included.
fn rendered_value<V: fmt::Display>(
    tree: &Tree<V>,
    style: &Style,
    level: usize,
    idx: Index,
    node: &TreeNode<V>,
) -> String {
    let text = node.data.value.to_string();
    if !text.contains('\n') {
        return text;
    }

    let pad = padding(tree, style, level, idx);
    text.split('\n')
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.to_string()
            } else {
                format!("{pad}{line}")
            }
        })
        .join("\n")
}

/// Padding for the continuation lines of a multi-line value.
///
/// Built by walking from the node up toward the root and checking, per
/// level, whether that ancestor is the last of its siblings. A last sibling
/// contributes a blank gap (there is nothing to connect below it); any
/// other contributes a link edge so the sibling line below stays connected.
/// Segments concatenate root-most first. The walk stops at a parentless
/// node, and at level 0 even when deeper ancestors exist (a mid-tree
/// rendering root has rails only for the levels it actually draws).
fn padding<V>(tree: &Tree<V>, style: &Style, level: usize, node: Index) -> String {
    let mut links = vec![String::new(); level + 1];
    let mut level = level;
    let mut current = node;

    while let Some(n) = tree.get_node(current) {
        let Some(parent) = n.parent else {
            break;
        };
        links[level] = if tree.is_last_sibling(current) {
            " ".repeat(style.indent + 1)
        } else {
            format!("{}{}", style.edge_link, " ".repeat(style.indent))
        };
        if level == 0 {
            break;
        }
        level -= 1;
        current = parent;
    }

    links.concat()
}
