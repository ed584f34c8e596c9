// ============================================================================
// Renderer Interface
// Defines the contract for turning symbol columns into visual nodes
// ============================================================================

use crate::domain::column::SymbolColumn;
use crate::domain::DigitSequence;
use parking_lot::Mutex;
use std::collections::HashMap;
use uuid::Uuid;

// ============================================================================
// Node Handle
// ============================================================================

/// Opaque handle to a visual node owned by a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeHandle(Uuid);

impl NodeHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NodeHandle {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Renderer Trait
// ============================================================================

/// Rendering collaborator consumed by the engine.
///
/// The engine never depends on a rendering technology beyond these
/// primitives. Implementations must treat calls against already-removed
/// nodes as no-ops: a superseded transition's orphaned callbacks may still
/// fire after their nodes are gone.
pub trait Renderer: Send + Sync {
    /// Create a detached container node.
    fn create_container(&self) -> NodeHandle;

    /// Create a node for one symbol column. `class_hints` is a
    /// space-separated class list describing the column's structural role.
    fn create_symbol_node(&self, column: &SymbolColumn, class_hints: &str) -> NodeHandle;

    /// Attach `child` under `parent`, after any existing children.
    fn attach(&self, parent: NodeHandle, child: NodeHandle);

    /// Detach and destroy `node` and everything under it.
    fn remove(&self, node: NodeHandle);

    /// Move a rotating node along its travel axis. One unit corresponds to
    /// one symbol; the sign follows the transition direction.
    fn set_offset(&self, node: NodeHandle, offset: f64);

    /// Replace `target`'s content with an error indicator.
    fn render_error(&self, target: NodeHandle, message: &str);
}

// ============================================================================
// No-Op Renderer
// ============================================================================

/// Renderer that draws nothing, for headless use and testing.
pub struct NoOpRenderer;

impl Renderer for NoOpRenderer {
    fn create_container(&self) -> NodeHandle {
        NodeHandle::new()
    }

    fn create_symbol_node(&self, _column: &SymbolColumn, _class_hints: &str) -> NodeHandle {
        NodeHandle::new()
    }

    fn attach(&self, _parent: NodeHandle, _child: NodeHandle) {}

    fn remove(&self, _node: NodeHandle) {}

    fn set_offset(&self, _node: NodeHandle, _offset: f64) {}

    fn render_error(&self, _target: NodeHandle, _message: &str) {}
}

// ============================================================================
// Text Renderer
// ============================================================================

enum NodeContent {
    Container,
    Static(char),
    Rotating(DigitSequence),
    Text(String),
}

struct TextNode {
    content: NodeContent,
    classes: String,
    offset: f64,
    parent: Option<NodeHandle>,
    children: Vec<NodeHandle>,
}

#[derive(Default)]
struct TextTree {
    nodes: HashMap<NodeHandle, TextNode>,
}

impl TextTree {
    fn insert(&mut self, content: NodeContent, classes: String) -> NodeHandle {
        let handle = NodeHandle::new();
        self.nodes.insert(
            handle,
            TextNode {
                content,
                classes,
                offset: 0.0,
                parent: None,
                children: Vec::new(),
            },
        );
        handle
    }

    fn detach(&mut self, node: NodeHandle) {
        if let Some(parent) = self.nodes.get(&node).and_then(|n| n.parent) {
            if let Some(parent_node) = self.nodes.get_mut(&parent) {
                parent_node.children.retain(|c| *c != node);
            }
        }
        if let Some(n) = self.nodes.get_mut(&node) {
            n.parent = None;
        }
    }

    fn drop_subtree(&mut self, node: NodeHandle) {
        let children = self
            .nodes
            .get(&node)
            .map(|n| n.children.clone())
            .unwrap_or_default();
        for child in children {
            self.drop_subtree(child);
        }
        self.nodes.remove(&node);
    }

    fn render(&self, node: NodeHandle, out: &mut String) {
        let Some(n) = self.nodes.get(&node) else {
            return;
        };
        match &n.content {
            NodeContent::Container => {},
            NodeContent::Static(symbol) => out.push(*symbol),
            NodeContent::Rotating(sequence) => {
                let index = (n.offset.abs().round() as usize).min(sequence.len() - 1);
                out.push((b'0' + sequence[index]) as char);
            },
            NodeContent::Text(text) => out.push_str(text),
        }
        for child in &n.children {
            self.render(*child, out);
        }
    }
}

/// In-memory renderer: maintains a node tree and can print the currently
/// visible string. Used by the test suite and by headless callers that only
/// want the formatted output.
pub struct TextRenderer {
    tree: Mutex<TextTree>,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self {
            tree: Mutex::new(TextTree::default()),
        }
    }

    /// The string currently visible under `root`: static symbols as-is,
    /// rotating nodes showing the digit their offset has reached.
    pub fn display_string(&self, root: NodeHandle) -> String {
        let tree = self.tree.lock();
        let mut out = String::new();
        tree.render(root, &mut out);
        out
    }

    /// Whether the node still exists in the tree.
    pub fn contains(&self, node: NodeHandle) -> bool {
        self.tree.lock().nodes.contains_key(&node)
    }

    pub fn offset_of(&self, node: NodeHandle) -> Option<f64> {
        self.tree.lock().nodes.get(&node).map(|n| n.offset)
    }

    /// Number of live nodes, containers included.
    pub fn node_count(&self) -> usize {
        self.tree.lock().nodes.len()
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TextRenderer {
    fn create_container(&self) -> NodeHandle {
        self.tree
            .lock()
            .insert(NodeContent::Container, String::new())
    }

    fn create_symbol_node(&self, column: &SymbolColumn, class_hints: &str) -> NodeHandle {
        let content = match column {
            SymbolColumn::Static(symbol) => NodeContent::Static(*symbol),
            SymbolColumn::Rotating { sequence, .. } => NodeContent::Rotating(sequence.clone()),
        };
        self.tree.lock().insert(content, class_hints.to_string())
    }

    fn attach(&self, parent: NodeHandle, child: NodeHandle) {
        let mut tree = self.tree.lock();
        if !tree.nodes.contains_key(&parent) || !tree.nodes.contains_key(&child) {
            tracing::trace!(?parent, ?child, "attach on missing node ignored");
            return;
        }
        tree.detach(child);
        if let Some(n) = tree.nodes.get_mut(&child) {
            n.parent = Some(parent);
        }
        if let Some(p) = tree.nodes.get_mut(&parent) {
            p.children.push(child);
        }
    }

    fn remove(&self, node: NodeHandle) {
        let mut tree = self.tree.lock();
        if !tree.nodes.contains_key(&node) {
            tracing::trace!(?node, "remove on missing node ignored");
            return;
        }
        tree.detach(node);
        tree.drop_subtree(node);
    }

    fn set_offset(&self, node: NodeHandle, offset: f64) {
        let mut tree = self.tree.lock();
        match tree.nodes.get_mut(&node) {
            Some(n) => n.offset = offset,
            None => tracing::trace!(?node, "set_offset on missing node ignored"),
        }
    }

    fn render_error(&self, target: NodeHandle, message: &str) {
        let mut tree = self.tree.lock();
        let children = tree
            .nodes
            .get(&target)
            .map(|n| n.children.clone())
            .unwrap_or_default();
        for child in children {
            tree.drop_subtree(child);
        }
        if let Some(n) = tree.nodes.get_mut(&target) {
            n.children.clear();
        }
        let error_node = tree.insert(NodeContent::Text(message.to_string()), "odo-error".to_string());
        if let Some(n) = tree.nodes.get_mut(&error_node) {
            n.parent = Some(target);
        }
        if let Some(t) = tree.nodes.get_mut(&target) {
            t.children.push(error_node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::column::SpinDirection;

    #[test]
    fn test_display_string_follows_offsets() {
        let renderer = TextRenderer::new();
        let root = renderer.create_container();

        let fixed = renderer.create_symbol_node(&SymbolColumn::Static('1'), "_1e1 integer");
        let spinning = renderer.create_symbol_node(
            &SymbolColumn::rotating(0, 5, 0, SpinDirection::Ascending),
            "_1e0 integer",
        );
        renderer.attach(root, fixed);
        renderer.attach(root, spinning);

        assert_eq!(renderer.display_string(root), "10");

        renderer.set_offset(spinning, -3.0);
        assert_eq!(renderer.display_string(root), "13");

        renderer.set_offset(spinning, -5.0);
        assert_eq!(renderer.display_string(root), "15");
    }

    #[test]
    fn test_remove_drops_subtree() {
        let renderer = TextRenderer::new();
        let root = renderer.create_container();
        let wrapper = renderer.create_container();
        let symbol = renderer.create_symbol_node(&SymbolColumn::Static('7'), "");
        renderer.attach(root, wrapper);
        renderer.attach(wrapper, symbol);

        renderer.remove(wrapper);
        assert!(!renderer.contains(wrapper));
        assert!(!renderer.contains(symbol));
        assert_eq!(renderer.display_string(root), "");
    }

    #[test]
    fn test_operations_on_missing_nodes_are_noops() {
        let renderer = TextRenderer::new();
        let root = renderer.create_container();
        let ghost = NodeHandle::new();

        renderer.set_offset(ghost, 3.0);
        renderer.remove(ghost);
        renderer.attach(root, ghost);
        assert_eq!(renderer.display_string(root), "");
    }

    #[test]
    fn test_render_error_replaces_content() {
        let renderer = TextRenderer::new();
        let root = renderer.create_container();
        let digit = renderer.create_symbol_node(&SymbolColumn::Static('1'), "");
        renderer.attach(root, digit);

        renderer.render_error(root, "unsupported radix mark: '#'");
        assert_eq!(
            renderer.display_string(root),
            "unsupported radix mark: '#'"
        );
        assert!(!renderer.contains(digit));
    }

    #[test]
    fn test_noop_renderer_hands_out_distinct_handles() {
        let renderer = NoOpRenderer;
        assert_ne!(renderer.create_container(), renderer.create_container());
    }
}
