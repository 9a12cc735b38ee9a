//! Scene graph and hierarchical scene organization.
//!
//! A [`Scene`] owns every node in a flat arena and hands out copyable
//! [`NodeId`] handles instead of references, so callers can keep a handle to
//! a node across frames without fighting the borrow checker. Each node keeps
//! a (local, world) transform pair; [`Scene::update_world_transforms`]
//! propagates locals down the hierarchy into the world slots.

pub mod material;
pub mod mesh;
pub mod transform;

pub use material::{Material, rgb};
pub use mesh::{Geometry, LineGeometry};
pub use transform::Transform;

use crate::{camera::Camera, lighting::Light};

/// Handle to a node inside a [`Scene`].
///
/// Ids are only ever produced by the scene that owns the node and stay valid
/// for the scene's whole lifetime (nodes are never removed from the arena).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// What a node contributes to the rendered frame, if anything.
#[derive(Clone, Debug)]
pub enum Renderable {
    Mesh {
        geometry: Geometry,
        material: Material,
        cast_shadow: bool,
        receive_shadow: bool,
    },
    Lines {
        geometry: LineGeometry,
    },
}

#[derive(Clone, Debug)]
struct Node {
    local: Transform,
    world: Transform,
    children: Vec<NodeId>,
    renderable: Option<Renderable>,
}

impl Node {
    fn empty() -> Self {
        Self {
            local: Transform::new(),
            world: Transform::new(),
            children: Vec::new(),
            renderable: None,
        }
    }
}

/// A renderable scene: node hierarchy, camera, lights and clear color.
#[derive(Clone, Debug)]
pub struct Scene {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    pub camera: Camera,
    pub lights: Vec<Light>,
    pub clear_color: wgpu::Color,
}

impl Scene {
    pub fn new(camera: Camera) -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            camera,
            lights: Vec::new(),
            clear_color: wgpu::Color::BLACK,
        }
    }

    /// Add an empty node (a pure transform, useful as a pivot or group).
    pub fn add_node(&mut self, parent: Option<NodeId>) -> NodeId {
        self.insert(parent, Node::empty())
    }

    /// Add a node carrying a triangle mesh. Shadows are off by default.
    pub fn add_mesh(
        &mut self,
        parent: Option<NodeId>,
        geometry: Geometry,
        material: Material,
    ) -> NodeId {
        let mut node = Node::empty();
        node.renderable = Some(Renderable::Mesh {
            geometry,
            material,
            cast_shadow: false,
            receive_shadow: false,
        });
        self.insert(parent, node)
    }

    /// Add a node carrying unlit line segments.
    pub fn add_lines(&mut self, parent: Option<NodeId>, geometry: LineGeometry) -> NodeId {
        let mut node = Node::empty();
        node.renderable = Some(Renderable::Lines { geometry });
        self.insert(parent, node)
    }

    fn insert(&mut self, parent: Option<NodeId>, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn transform(&self, id: NodeId) -> &Transform {
        &self.nodes[id.0].local
    }

    pub fn transform_mut(&mut self, id: NodeId) -> &mut Transform {
        &mut self.nodes[id.0].local
    }

    /// The node's world transform as of the last
    /// [`update_world_transforms`](Self::update_world_transforms) call.
    pub fn world_transform(&self, id: NodeId) -> Transform {
        self.nodes[id.0].world
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn renderable(&self, id: NodeId) -> Option<&Renderable> {
        self.nodes[id.0].renderable.as_ref()
    }

    /// Toggle whether a mesh node is drawn into the shadow map.
    pub fn set_cast_shadow(&mut self, id: NodeId, cast: bool) {
        if let Some(Renderable::Mesh { cast_shadow, .. }) = self.nodes[id.0].renderable.as_mut() {
            *cast_shadow = cast;
        } else {
            log::warn!("set_cast_shadow called on a node without a mesh");
        }
    }

    /// Toggle whether a mesh node samples the shadow map when lit.
    pub fn set_receive_shadow(&mut self, id: NodeId, receive: bool) {
        if let Some(Renderable::Mesh { receive_shadow, .. }) = self.nodes[id.0].renderable.as_mut()
        {
            *receive_shadow = receive;
        } else {
            log::warn!("set_receive_shadow called on a node without a mesh");
        }
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Propagate local transforms into world transforms, depth-first from
    /// the roots. Locals are left untouched.
    pub fn update_world_transforms(&mut self) {
        let mut stack: Vec<(NodeId, Transform)> = self
            .roots
            .iter()
            .map(|&id| (id, Transform::new()))
            .collect();
        while let Some((id, parent_world)) = stack.pop() {
            let world = &parent_world * &self.nodes[id.0].local;
            self.nodes[id.0].world = world;
            for &child in &self.nodes[id.0].children {
                stack.push((child, world));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{Camera, Projection};
    use approx::assert_relative_eq;
    use cgmath::{Deg, Point3, Rotation3};

    fn empty_scene() -> Scene {
        let projection = Projection::new(800, 600, Deg(75.0), 0.1, 100.0);
        let camera = Camera::looking_at(Point3::new(0.0, 0.0, 5.0), Point3::new(0.0, 0.0, 0.0), projection);
        Scene::new(camera)
    }

    #[test]
    fn world_transforms_chain_through_parents() {
        let mut scene = empty_scene();
        let root = scene.add_node(None);
        let orbit = scene.add_node(Some(root));
        scene.transform_mut(orbit).position.x = 10.0;
        let child = scene.add_node(Some(orbit));
        scene.transform_mut(child).position.x = 2.0;

        scene.update_world_transforms();
        assert_relative_eq!(scene.world_transform(child).position.x, 12.0);
        // locals stay untouched
        assert_relative_eq!(scene.transform(child).position.x, 2.0);
    }

    #[test]
    fn root_rotation_swings_descendants() {
        let mut scene = empty_scene();
        let root = scene.add_node(None);
        scene.transform_mut(root).rotation = cgmath::Quaternion::from_angle_y(Deg(90.0));
        let child = scene.add_node(Some(root));
        scene.transform_mut(child).position.x = 1.0;

        scene.update_world_transforms();
        let world = scene.world_transform(child);
        assert_relative_eq!(world.position.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(world.position.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn handles_stay_valid_as_nodes_are_added() {
        let mut scene = empty_scene();
        let first = scene.add_node(None);
        for _ in 0..16 {
            scene.add_node(Some(first));
        }
        scene.transform_mut(first).position.y = 4.0;
        assert_relative_eq!(scene.transform(first).position.y, 4.0);
        assert_eq!(scene.children(first).len(), 16);
    }

    #[test]
    fn shadow_flags_only_apply_to_meshes() {
        let mut scene = empty_scene();
        let pivot = scene.add_node(None);
        // must not panic, just warn
        scene.set_cast_shadow(pivot, true);
        let mesh = scene.add_mesh(None, Geometry::default(), Material::default());
        scene.set_cast_shadow(mesh, true);
        match scene.renderable(mesh) {
            Some(Renderable::Mesh { cast_shadow, .. }) => assert!(cast_shadow),
            _ => panic!("expected a mesh"),
        }
    }
}
