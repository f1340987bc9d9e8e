#![allow(non_snake_case)]

use dioxus::prelude::*;
use tracing::debug;

use crate::files::{ActionFile, FileCollections, FilesHandle};
use crate::tree::{self, build_tree, number_nodes, NodeId, SelectionMode, TreeNode};

pub const GLOBAL_SECTION_LABEL: &str = "Global";

pub fn bot_section_label(bot_name: &str) -> String {
    format!("{} (bot)", bot_name)
}

/// Builds the top level of the navigator: one section per collection that is
/// present. An empty but present collection still gets its section.
pub fn build_sections(files: &FileCollections, bot_name: &str) -> Vec<TreeNode> {
    let mut nodes = Vec::new();

    if let Some(actions_bot) = &files.actions_bot {
        nodes.push(TreeNode::folder(bot_section_label(bot_name), true).with_children(build_tree(actions_bot)));
    }

    if let Some(actions_global) = &files.actions_global {
        let mut section = TreeNode::folder(GLOBAL_SECTION_LABEL, true).with_children(build_tree(actions_global));
        section.has_caret = false;
        nodes.push(section);
    }

    number_nodes(&mut nodes);
    nodes
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionChange {
    pub node: NodeId,
    /// The selected file, or `None` for folders and cleared selections.
    pub payload: Option<ActionFile>,
}

/// View state behind [`FileNavigator`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigatorState {
    files: Option<FilesHandle>,
    nodes: Vec<TreeNode>,
}

impl NavigatorState {
    pub fn new(files: Option<&FilesHandle>, bot_name: &str) -> Self {
        let mut state = Self::default();
        state.sync_files(files, bot_name);
        state
    }

    /// Rebuilds the tree when `files` is a different handle from the one the
    /// current tree was built from. Missing files keep the current tree.
    pub fn sync_files(&mut self, files: Option<&FilesHandle>, bot_name: &str) -> bool {
        let Some(files) = files else {
            return false;
        };
        if self.files.as_ref().is_some_and(|current| current.same_as(files)) {
            return false;
        }

        self.nodes = build_sections(files, bot_name);
        self.files = Some(files.clone());
        true
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn click(&mut self, id: NodeId, mode: SelectionMode) -> Option<SelectionChange> {
        let (nodes, changed) = tree::select_node(&self.nodes, id, mode);
        self.nodes = nodes;
        if !changed {
            return None;
        }

        let payload = tree::find_node(&self.nodes, id)
            .filter(|node| node.is_selected)
            .and_then(|node| node.payload.clone());
        Some(SelectionChange { node: id, payload })
    }

    pub fn set_expanded(&mut self, id: NodeId, is_expanded: bool) {
        self.nodes = tree::set_expanded(&self.nodes, id, is_expanded);
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct FileNavigatorProps {
    pub files: Option<FilesHandle>,
    pub bot_name: String,
    #[props(default)]
    pub selection_mode: SelectionMode,
    pub on_file_selected: Option<EventHandler<Option<ActionFile>>>,
}

#[component]
pub fn FileNavigator(props: FileNavigatorProps) -> Element {
    let FileNavigatorProps {
        files,
        bot_name,
        selection_mode,
        on_file_selected,
    } = props;

    let mut state = use_signal(|| NavigatorState::new(files.as_ref(), &bot_name));

    // Only a new files handle rebuilds the tree; re-renders keep local state.
    use_effect(use_reactive((&files, &bot_name), move |(files, bot_name)| {
        if state.write().sync_files(files.as_ref(), &bot_name) {
            debug!("file navigator rebuilt for {}", bot_name);
        }
    }));

    let nodes = state.read().nodes().to_vec();
    if nodes.is_empty() {
        return rsx! {};
    }

    let on_node_click = move |id: NodeId| {
        let change = state.write().click(id, selection_mode);
        if let (Some(change), Some(handler)) = (change, on_file_selected) {
            handler.call(change.payload);
        }
    };

    let on_toggle_expanded = move |(id, is_expanded): (NodeId, bool)| {
        state.write().set_expanded(id, is_expanded);
    };

    rsx! {
        div {
            class: "file-navigator select-none text-sm",
            for node in nodes {
                TreeNodeRow {
                    key: "{node.id}",
                    node: node.clone(),
                    depth: 0,
                    on_click: on_node_click,
                    on_toggle_expanded: on_toggle_expanded,
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct TreeNodeRowProps {
    pub node: TreeNode,
    pub depth: usize,
    pub on_click: EventHandler<NodeId>,
    pub on_toggle_expanded: EventHandler<(NodeId, bool)>,
}

#[component]
pub fn TreeNodeRow(props: TreeNodeRowProps) -> Element {
    let TreeNodeRowProps {
        node,
        depth,
        on_click,
        on_toggle_expanded,
    } = props;

    let id = node.id;
    let is_expanded = node.is_expanded;
    let show_caret = node.has_caret || !node.children.is_empty();
    let icon = node.icon.glyph(is_expanded);
    let indent_style = format!("padding-left: {}px;", depth * 20);
    let row_class = if node.is_selected {
        "file-navigator-row is-selected flex items-center cursor-pointer bg-blue-100 dark:bg-blue-900"
    } else {
        "file-navigator-row flex items-center cursor-pointer hover:bg-gray-100 dark:hover:bg-gray-700"
    };

    rsx! {
        div {
            class: "{row_class}",
            style: "{indent_style}",
            "data-node-id": "{id}",
            onclick: move |_| on_click.call(id),

            if show_caret {
                span {
                    class: "file-navigator-caret w-4 inline-block",
                    onclick: move |evt| {
                        evt.stop_propagation();
                        on_toggle_expanded.call((id, !is_expanded));
                    },
                    if is_expanded { "▾" } else { "▸" }
                }
            } else {
                span { class: "w-4 inline-block" }
            }

            span { class: "mr-1", "{icon}" }
            span { class: "file-navigator-label", "{node.label}" }
        }

        if is_expanded {
            for child in node.children.iter() {
                TreeNodeRow {
                    key: "{child.id}",
                    node: child.clone(),
                    depth: depth + 1,
                    on_click: on_click,
                    on_toggle_expanded: on_toggle_expanded,
                }
            }
        }
    }
}
