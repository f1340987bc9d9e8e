use crate::files::ActionFile;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeIcon {
    FolderClose,
    Document,
}

impl NodeIcon {
    pub fn glyph(&self, is_expanded: bool) -> &'static str {
        match self {
            NodeIcon::FolderClose if is_expanded => "📂",
            NodeIcon::FolderClose => "📁",
            NodeIcon::Document => "📄",
        }
    }
}

/// What a click does to a node that is already selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// The clicked node always ends up selected; re-clicking never deselects.
    #[default]
    Sticky,
    /// Re-clicking the selected node clears the selection.
    Toggle,
}

impl SelectionMode {
    fn resolve(self, was_selected: bool) -> bool {
        match self {
            SelectionMode::Sticky => true,
            SelectionMode::Toggle => !was_selected,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub id: NodeId,
    pub label: String,
    pub icon: NodeIcon,
    pub has_caret: bool,
    pub is_expanded: bool,
    pub is_selected: bool,
    pub children: Vec<TreeNode>,
    pub payload: Option<ActionFile>,
}

impl TreeNode {
    pub fn folder(label: impl Into<String>, is_expanded: bool) -> Self {
        TreeNode {
            id: NodeId(0),
            label: label.into(),
            icon: NodeIcon::FolderClose,
            has_caret: true,
            is_expanded,
            is_selected: false,
            children: Vec::new(),
            payload: None,
        }
    }

    pub fn file(file: ActionFile) -> Self {
        TreeNode {
            id: NodeId(0),
            label: file.name.clone(),
            icon: NodeIcon::Document,
            has_caret: false,
            is_expanded: false,
            is_selected: false,
            children: Vec::new(),
            payload: Some(file),
        }
    }

    pub fn is_folder(&self) -> bool {
        self.icon == NodeIcon::FolderClose
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }
}

fn find_or_create_folder<'a>(
    children: &'a mut Vec<TreeNode>,
    name: &str,
    depth: usize,
) -> &'a mut TreeNode {
    let pos = match children
        .iter()
        .position(|c| c.is_folder() && c.label == name)
    {
        Some(pos) => pos,
        None => {
            children.push(TreeNode::folder(name, depth == 0));
            children.len() - 1
        }
    };
    &mut children[pos]
}

/// Turns a flat list of action files into a folder hierarchy keyed on
/// `location`. Ids are numbered in pre-order starting at zero.
pub fn build_tree(files: &[ActionFile]) -> Vec<TreeNode> {
    if files.is_empty() {
        return Vec::new();
    }

    let mut sorted_files = files.to_vec();
    sorted_files.sort_by(|a, b| a.location.cmp(&b.location));

    let mut roots: Vec<TreeNode> = Vec::new();

    for file in sorted_files {
        let segments: Vec<String> = file.segments().into_iter().map(String::from).collect();
        let Some((_, folders)) = segments.split_last() else {
            continue;
        };

        let mut current_children = &mut roots;
        for (depth, folder) in folders.iter().enumerate() {
            let folder_node = find_or_create_folder(current_children, folder, depth);
            current_children = &mut folder_node.children;
        }

        let duplicate = current_children.iter().any(|n| {
            n.payload
                .as_ref()
                .is_some_and(|existing| existing.location == file.location)
        });
        if !duplicate {
            current_children.push(TreeNode::file(file));
        }
    }

    number_nodes(&mut roots);
    roots
}

/// Renumbers every node in pre-order, starting at zero.
pub fn number_nodes(nodes: &mut [TreeNode]) {
    let mut next = 0;
    walk_mut(nodes, &mut |node| {
        node.id = NodeId(next);
        next += 1;
    });
}

pub fn walk<'a>(nodes: &'a [TreeNode], callback: &mut impl FnMut(&'a TreeNode)) {
    for node in nodes {
        callback(node);
        walk(&node.children, callback);
    }
}

pub fn walk_mut(nodes: &mut [TreeNode], callback: &mut impl FnMut(&mut TreeNode)) {
    for node in nodes {
        callback(node);
        walk_mut(&mut node.children, callback);
    }
}

pub fn find_node(nodes: &[TreeNode], id: NodeId) -> Option<&TreeNode> {
    let mut found = None;
    walk(nodes, &mut |node| {
        if found.is_none() && node.id == id {
            found = Some(node);
        }
    });
    found
}

pub fn selected_ids(nodes: &[TreeNode]) -> Vec<NodeId> {
    let mut ids = Vec::new();
    walk(nodes, &mut |node| {
        if node.is_selected {
            ids.push(node.id);
        }
    });
    ids
}

/// Clears the selection across the whole tree and then applies `mode` to the
/// clicked node. Returns the new tree and whether the selection changed.
/// An unknown id leaves the tree untouched.
pub fn select_node(nodes: &[TreeNode], target: NodeId, mode: SelectionMode) -> (Vec<TreeNode>, bool) {
    let Some(was_selected) = find_node(nodes, target).map(|n| n.is_selected) else {
        return (nodes.to_vec(), false);
    };
    let now_selected = mode.resolve(was_selected);

    let mut next = nodes.to_vec();
    walk_mut(&mut next, &mut |node| node.is_selected = false);
    walk_mut(&mut next, &mut |node| {
        if node.id == target {
            node.is_selected = now_selected;
        }
    });

    let changed = selected_ids(nodes) != selected_ids(&next);
    (next, changed)
}

/// Sets the expansion flag of a single node. Descendants keep theirs.
pub fn set_expanded(nodes: &[TreeNode], target: NodeId, is_expanded: bool) -> Vec<TreeNode> {
    let mut next = nodes.to_vec();
    walk_mut(&mut next, &mut |node| {
        if node.id == target {
            node.is_expanded = is_expanded;
        }
    });
    next
}
