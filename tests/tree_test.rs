//! Integration tests for the arena tree model: construction, accessors,
//! search, traversal, promotion.

use rstest::rstest;
use rstree::util::testing::init_test_setup;
use rstree::{Index, Tree, DEFAULT_ROOT_LABEL};

// root
// ├── one
// │   ├── sub1
// │   └── sub2
// ├── two
// │   └── sub3
// └── outer
fn sample_tree() -> (Tree<String>, Index) {
    let mut tree = Tree::with_root("root".to_string());
    let root = tree.root();
    let one = tree.append_branch(root, "one".to_string());
    tree.append_node(one, "sub1".to_string());
    tree.append_node(one, "sub2".to_string());
    let two = tree.append_branch(root, "two".to_string());
    tree.append_node(two, "sub3".to_string());
    tree.append_node(root, "outer".to_string());
    (tree, root)
}

#[rstest]
fn test_new_tree_has_placeholder_root() {
    init_test_setup();
    let tree = Tree::new();
    let root = tree.root();

    assert!(tree.is_root(root));
    assert_eq!(tree.value(root), Some(&DEFAULT_ROOT_LABEL.to_string()));
    assert_eq!(tree.meta(root), None);
    assert_eq!(tree.node_count(), 1);
}

#[rstest]
fn test_with_root_stores_given_value() {
    let tree = Tree::with_root(42u32);
    assert_eq!(tree.value(tree.root()), Some(&42));
}

#[rstest]
fn test_append_meta_node_stores_annotation() {
    let mut tree = Tree::new();
    let root = tree.root();
    tree.append_meta_node(root, "vault".to_string(), "prod.env".to_string());

    let child = tree.last_child(root).unwrap();
    assert_eq!(tree.value(child), Some(&"prod.env".to_string()));
    assert_eq!(tree.meta(child), Some(&"vault".to_string()));
}

#[rstest]
fn test_leaf_becomes_branch_by_gaining_children() {
    let mut tree = Tree::with_root("r".to_string());
    let root = tree.root();
    let leaf = tree.append_branch(root, "leaf".to_string());
    assert!(tree.get_node(leaf).unwrap().children.is_empty());

    tree.append_node(leaf, "child".to_string());
    assert_eq!(tree.get_node(leaf).unwrap().children.len(), 1);
}

#[rstest]
fn test_last_child() {
    let (tree, root) = sample_tree();

    let last = tree.last_child(root).unwrap();
    assert_eq!(tree.value(last), Some(&"outer".to_string()));

    let outer = last;
    assert_eq!(tree.last_child(outer), None);
}

#[rstest]
fn test_is_last_sibling() {
    let (tree, root) = sample_tree();
    let children = tree.get_node(root).unwrap().children.clone();

    assert!(tree.is_last_sibling(root), "rootless node is vacuously last");
    assert!(!tree.is_last_sibling(children[0]));
    assert!(!tree.is_last_sibling(children[1]));
    assert!(tree.is_last_sibling(children[2]));
}

#[rstest]
fn test_promote_to_root_clears_parent_but_keeps_membership() {
    let (mut tree, root) = sample_tree();
    let two = tree.get_node(root).unwrap().children[1];

    tree.promote_to_root(two);

    assert!(tree.is_root(two));
    assert!(tree.is_last_sibling(two));
    assert!(
        tree.get_node(root).unwrap().children.contains(&two),
        "former parent keeps the node among its children"
    );
}

#[rstest]
fn test_promote_to_root_is_noop_on_root() {
    let (mut tree, root) = sample_tree();
    tree.promote_to_root(root);
    assert!(tree.is_root(root));
    assert_eq!(tree.node_count(), 7);
}

#[rstest]
fn test_set_value_and_set_meta() {
    let mut tree = Tree::with_root("r".to_string());
    let root = tree.root();
    let child = tree.append_branch(root, "old".to_string());

    tree.set_value(child, "new".to_string());
    assert_eq!(tree.value(child), Some(&"new".to_string()));

    tree.set_meta(child, Some("note".to_string()));
    assert_eq!(tree.meta(child), Some(&"note".to_string()));

    tree.set_meta(child, None);
    assert_eq!(tree.meta(child), None, "None clears the annotation");
}

#[rstest]
fn test_find_by_value_returns_first_preorder_match() {
    let mut tree = Tree::with_root("root".to_string());
    let root = tree.root();
    let a = tree.append_branch(root, "a".to_string());
    let deep = tree.append_branch(a, "target".to_string());
    tree.append_node(root, "target".to_string());

    // The match inside the first subtree comes before the shallower sibling.
    assert_eq!(tree.find_by_value(root, &"target".to_string()), Some(deep));
}

#[rstest]
fn test_find_by_value_searches_descendants_only() {
    let (tree, root) = sample_tree();

    assert_eq!(
        tree.find_by_value(root, &"root".to_string()),
        None,
        "the start node itself is not part of the search"
    );
    assert_eq!(tree.find_by_value(root, &"missing".to_string()), None);
}

#[rstest]
fn test_find_by_value_uses_structural_equality() {
    let (tree, root) = sample_tree();

    // A freshly built String, not the stored instance.
    let needle = String::from("sub3");
    let found = tree.find_by_value(root, &needle).unwrap();
    assert_eq!(tree.value(found), Some(&needle));
}

#[rstest]
fn test_find_by_meta() {
    let mut tree = Tree::with_root("root".to_string());
    let root = tree.root();
    tree.append_node(root, "plain".to_string());
    let annotated = tree.append_meta_branch(root, "prod".to_string(), "plain".to_string());

    assert_eq!(tree.find_by_meta(root, &"prod".to_string()), Some(annotated));
    assert_eq!(
        tree.find_by_meta(root, &"plain".to_string()),
        None,
        "values do not match annotations, and unannotated nodes never match"
    );
}

#[rstest]
fn test_visit_all_is_preorder_depth_first() {
    let (tree, root) = sample_tree();

    let mut visited = Vec::new();
    tree.visit_all(root, |_, node| visited.push(node.data.value.clone()));

    assert_eq!(visited, vec!["one", "sub1", "sub2", "two", "sub3", "outer"]);
}

#[rstest]
fn test_visit_all_excludes_start_and_is_empty_for_leaf() {
    let (tree, root) = sample_tree();
    let outer = tree.last_child(root).unwrap();

    let mut count = 0;
    tree.visit_all(outer, |_, _| count += 1);
    assert_eq!(count, 0);
}

#[rstest]
fn test_iter_is_preorder_and_includes_root() {
    let (tree, _) = sample_tree();

    let values: Vec<&str> = tree.iter().map(|(_, n)| n.data.value.as_str()).collect();
    assert_eq!(
        values,
        vec!["root", "one", "sub1", "sub2", "two", "sub3", "outer"]
    );
}

#[rstest]
fn test_depth_and_leaves() {
    let (tree, _) = sample_tree();

    assert_eq!(tree.depth(), 3);

    let leaf_values: Vec<&str> = tree
        .leaves()
        .into_iter()
        .map(|idx| tree.value(idx).unwrap().as_str())
        .collect();
    assert_eq!(leaf_values, vec!["sub1", "sub2", "sub3", "outer"]);
}
