//! Arena-based labeled trees rendered as ASCII/Unicode diagrams.
//!
//! A [`Tree`] stores its nodes in a generational arena: children are owned
//! through their parent's child list and referenced by [`Index`], the
//! parent link is a non-owning back-reference. Rendering walks a subtree
//! depth-first and emits one line per node with `tree`-style connector
//! glyphs:
//!
//! ```
//! use rstree::Tree;
//!
//! let mut tree = Tree::with_root("vault".to_string());
//! let root = tree.root();
//! let envs = tree.append_branch(root, "environments".to_string());
//! tree.append_node(envs, "dev.env".to_string());
//! tree.append_node(envs, "prod.env".to_string());
//! tree.append_node(root, "README.md".to_string());
//!
//! assert_eq!(
//!     tree.to_string(),
//!     "vault\n\
//!      ├── environments\n\
//!      │   ├── dev.env\n\
//!      │   └── prod.env\n\
//!      └── README.md\n"
//! );
//! ```
//!
//! Glyphs and indent width come from [`Style`]; rendering is a pure
//! function of the tree and the style handed to
//! [`Tree::render_with`]. Within one thread the borrow checker rules out
//! mutating a tree mid-render; across threads, callers are expected to
//! serialize mutation and rendering of a shared tree themselves.

pub mod arena;
pub mod config;
pub mod errors;
pub mod render;
pub mod util;

pub use arena::{NodeData, Tree, TreeIter, TreeNode, DEFAULT_ROOT_LABEL};
pub use config::Style;
pub use errors::{StyleError, StyleResult};
pub use render::DisplayTree;

pub use generational_arena::Index;
