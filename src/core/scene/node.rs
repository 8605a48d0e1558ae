//=========================================================================
// Scene Nodes
//=========================================================================
//
// Minimal node tree a scene exposes to the manager.
//
// The manager needs two things from it: child enumeration and lookup by
// path. Paths are '/'-separated child names relative to the node searched
// from ("PlayerArea/PlayerHealthText").
//
// Anchor resolution order:
//   1. direct path           "Camera2D"
//   2. scene-qualified path  "<root name>#Camera2D"
//   3. first immediate child that is a camera
//   4. synthesize "BackupCamera2D" and attach it to the root
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{trace, warn};

//=== Constants ===========================================================

/// Name the anchor is expected under.
pub(crate) const CAMERA_NAME: &str = "Camera2D";

/// Name of a synthesized anchor.
pub(crate) const BACKUP_CAMERA_NAME: &str = "BackupCamera2D";

/// Position of a synthesized anchor (center of a 720x1280 portrait view).
pub(crate) const BACKUP_CAMERA_POSITION: (f32, f32) = (360.0, 640.0);

//=== Camera ==============================================================

/// Presentation viewpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: (f32, f32),
    pub current: bool,
    pub visible: bool,
}

impl Camera {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: (x, y),
            current: false,
            visible: true,
        }
    }
}

//=== NodeKind ============================================================

/// What a node represents.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Grouping node with no payload.
    Container,
    Camera(Camera),
    Label(String),
    Button(String),

    /// Fill level of a gauge, in `0.0..=1.0`.
    Bar(f32),
}

//=== SceneNode ===========================================================

/// A named node with ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    children: Vec<SceneNode>,
}

impl SceneNode {
    //--- Construction -----------------------------------------------------

    pub fn container(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Container)
    }

    pub fn camera(name: impl Into<String>, camera: Camera) -> Self {
        Self::new(name, NodeKind::Camera(camera))
    }

    pub fn label(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Label(text.into()))
    }

    pub fn button(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Button(text.into()))
    }

    pub fn bar(name: impl Into<String>, fraction: f32) -> Self {
        Self::new(name, NodeKind::Bar(fraction.clamp(0.0, 1.0)))
    }

    fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            children: Vec::new(),
        }
    }

    /// Builder-style child attachment.
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    //--- Tree Access ------------------------------------------------------

    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    pub fn children(&self) -> &[SceneNode] {
        &self.children
    }

    /// Looks up a descendant by '/'-separated path.
    pub fn get_node(&self, path: &str) -> Option<&SceneNode> {
        path.split('/')
            .try_fold(self, |node, segment| node.children.iter().find(|c| c.name == segment))
    }

    pub fn get_node_mut(&mut self, path: &str) -> Option<&mut SceneNode> {
        let mut node = self;
        for segment in path.split('/') {
            node = node.children.iter_mut().find(|c| c.name == segment)?;
        }
        Some(node)
    }

    pub fn as_camera(&self) -> Option<&Camera> {
        match &self.kind {
            NodeKind::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    /// Text of a label or button node.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Label(text) | NodeKind::Button(text) => Some(text),
            _ => None,
        }
    }

    /// Replaces the text of a label or button node. Other kinds are left
    /// untouched.
    pub fn set_text(&mut self, text: impl Into<String>) {
        if let NodeKind::Label(current) | NodeKind::Button(current) = &mut self.kind {
            *current = text.into();
        }
    }

    pub fn fraction(&self) -> Option<f32> {
        match self.kind {
            NodeKind::Bar(fraction) => Some(fraction),
            _ => None,
        }
    }

    /// Sets the fill of a bar node, clamped to `0.0..=1.0`. Other kinds
    /// are left untouched.
    pub fn set_fraction(&mut self, fraction: f32) {
        if let NodeKind::Bar(current) = &mut self.kind {
            *current = fraction.clamp(0.0, 1.0);
        }
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SceneNode::node_count).sum::<usize>()
    }

    /// Dumps the subtree at trace level, one line per node.
    pub fn log_structure(&self) {
        self.log_structure_at(&self.name, 0);
    }

    fn log_structure_at(&self, path: &str, depth: usize) {
        trace!("{:indent$}{}: {:?}", "", path, self.kind, indent = depth * 2);
        for child in &self.children {
            child.log_structure_at(&format!("{}/{}", path, child.name), depth + 1);
        }
    }

    //--- Anchor Resolution ------------------------------------------------

    /// Finds or synthesizes the presentation anchor and makes it current.
    ///
    /// Afterwards exactly one camera in the tree is current.
    pub fn resolve_anchor(&mut self) -> Anchor {
        let path = self.find_anchor_path();
        let synthesized = path.is_none();

        let path = path.unwrap_or_else(|| {
            warn!(
                "No camera found in scene {}, synthesizing {}",
                self.name, BACKUP_CAMERA_NAME
            );
            let (x, y) = BACKUP_CAMERA_POSITION;
            self.add_child(SceneNode::camera(BACKUP_CAMERA_NAME, Camera::at(x, y)));
            BACKUP_CAMERA_NAME.to_string()
        });

        self.clear_current_cameras();
        if let Some(NodeKind::Camera(camera)) = self.get_node_mut(&path).map(|n| &mut n.kind) {
            camera.current = true;
            camera.visible = true;
        }

        Anchor { path, synthesized }
    }

    fn find_anchor_path(&self) -> Option<String> {
        let is_camera = |node: &SceneNode| node.as_camera().is_some();

        if self.get_node(CAMERA_NAME).is_some_and(is_camera) {
            return Some(CAMERA_NAME.to_string());
        }

        let qualified = format!("{}#{}", self.name, CAMERA_NAME);
        if self.get_node(&qualified).is_some_and(is_camera) {
            return Some(qualified);
        }

        self.children
            .iter()
            .find(|child| is_camera(child))
            .map(|child| child.name.clone())
    }

    fn clear_current_cameras(&mut self) {
        if let NodeKind::Camera(camera) = &mut self.kind {
            camera.current = false;
        }
        for child in &mut self.children {
            child.clear_current_cameras();
        }
    }
}

//=== Anchor ==============================================================

/// The resolved presentation anchor of an active scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// Path of the camera node relative to the scene root.
    pub path: String,

    /// Whether the camera was created because none was found.
    pub synthesized: bool,
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn current_cameras(node: &SceneNode) -> usize {
        let own = node.as_camera().map_or(0, |c| usize::from(c.current));
        own + node.children().iter().map(current_cameras).sum::<usize>()
    }

    #[test]
    fn get_node_walks_paths() {
        let root = SceneNode::container("Battle").with_child(
            SceneNode::container("PlayerArea").with_child(SceneNode::label("PlayerHealthText", "100/100")),
        );

        assert_eq!(
            root.get_node("PlayerArea/PlayerHealthText").and_then(SceneNode::text),
            Some("100/100")
        );
        assert!(root.get_node("PlayerArea/Missing").is_none());
        assert!(root.get_node("Nope").is_none());
    }

    #[test]
    fn set_text_only_touches_text_nodes() {
        let mut root = SceneNode::container("Root")
            .with_child(SceneNode::label("Label", "a"))
            .with_child(SceneNode::camera("Cam", Camera::at(0.0, 0.0)));

        root.get_node_mut("Label").unwrap().set_text("b");
        root.get_node_mut("Cam").unwrap().set_text("ignored");

        assert_eq!(root.get_node("Label").and_then(SceneNode::text), Some("b"));
        assert!(root.get_node("Cam").unwrap().as_camera().is_some());
    }

    #[test]
    fn bar_fraction_is_clamped() {
        let mut root = SceneNode::container("Root")
            .with_child(SceneNode::bar("Bar", 1.5))
            .with_child(SceneNode::label("Label", "a"));
        assert_eq!(root.get_node("Bar").and_then(SceneNode::fraction), Some(1.0));

        root.get_node_mut("Bar").unwrap().set_fraction(-0.25);
        root.get_node_mut("Label").unwrap().set_fraction(0.5);

        assert_eq!(root.get_node("Bar").and_then(SceneNode::fraction), Some(0.0));
        assert_eq!(root.get_node("Label").and_then(SceneNode::fraction), None);
        assert_eq!(root.get_node("Bar").and_then(SceneNode::text), None);
    }

    #[test]
    fn anchor_prefers_direct_path() {
        let mut root = SceneNode::container("Dojo")
            .with_child(SceneNode::camera("Other", Camera::at(0.0, 0.0)))
            .with_child(SceneNode::camera(CAMERA_NAME, Camera::at(1.0, 1.0)));

        let anchor = root.resolve_anchor();

        assert_eq!(anchor.path, CAMERA_NAME);
        assert!(!anchor.synthesized);
        assert!(root.get_node(CAMERA_NAME).unwrap().as_camera().unwrap().current);
        assert_eq!(current_cameras(&root), 1);
    }

    #[test]
    fn anchor_falls_back_to_scene_qualified_path() {
        let mut root = SceneNode::container("BattleScene")
            .with_child(SceneNode::camera("BattleScene#Camera2D", Camera::at(0.0, 0.0)));

        let anchor = root.resolve_anchor();

        assert_eq!(anchor.path, "BattleScene#Camera2D");
        assert!(!anchor.synthesized);
    }

    #[test]
    fn anchor_scans_immediate_children() {
        let mut root = SceneNode::container("Town")
            .with_child(SceneNode::label("Title", "Town"))
            .with_child(SceneNode::camera("StreetCam", Camera::at(5.0, 5.0)));

        let anchor = root.resolve_anchor();

        assert_eq!(anchor.path, "StreetCam");
        assert_eq!(root.node_count(), 3);
    }

    #[test]
    fn a_node_named_camera_that_is_not_a_camera_is_skipped() {
        let mut root = SceneNode::container("Odd").with_child(SceneNode::label(CAMERA_NAME, "text"));

        let anchor = root.resolve_anchor();

        assert!(anchor.synthesized);
        assert_eq!(anchor.path, BACKUP_CAMERA_NAME);
    }

    #[test]
    fn missing_anchor_is_synthesized_once() {
        let mut root = SceneNode::container("City");

        let first = root.resolve_anchor();
        assert!(first.synthesized);
        let backup = root.get_node(BACKUP_CAMERA_NAME).unwrap().as_camera().unwrap();
        assert_eq!(backup.position, BACKUP_CAMERA_POSITION);
        assert!(backup.current && backup.visible);

        // A second resolution finds the synthesized camera by scan.
        let second = root.resolve_anchor();
        assert!(!second.synthesized);
        assert_eq!(root.children().len(), 1);
        assert_eq!(current_cameras(&root), 1);
    }
}
