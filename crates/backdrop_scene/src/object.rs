//! Decorative scene objects

use crate::animator::{Animator, FloatMotion, ObjectBase, Pose};
use crate::geometry::{Geometry, GeometryKind};
use crate::material::MaterialLayer;
use backdrop_core::{Color, Transform};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Material layers of one object, usually a solid and a wireframe
pub type Layers = SmallVec<[MaterialLayer; 2]>;

/// One decorative primitive
///
/// Static attributes are fixed at build time. `transform`, `opacity` and
/// `color` are the retained-mode outputs that [`SceneObject::tick`] writes in
/// place every frame.
#[derive(Clone, Debug)]
pub struct SceneObject {
    geometry: Geometry,
    base: ObjectBase,
    layers: Layers,
    animator: Animator,
    float: Option<FloatMotion>,
    transform: Transform,
    opacity: f32,
    color: Color,
}

impl SceneObject {
    pub fn new(geometry: Geometry, base: ObjectBase) -> Self {
        Self {
            geometry,
            base,
            layers: SmallVec::new(),
            animator: Animator::default(),
            float: None,
            transform: Transform::at(base.position),
            opacity: 1.0,
            color: base.color,
        }
    }

    pub fn with_layer(mut self, layer: MaterialLayer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn with_animator(mut self, animator: Animator) -> Self {
        self.animator = animator;
        self.transform.rotation = animator.rotation.sample(0.0);
        self
    }

    pub fn with_float(mut self, float: FloatMotion) -> Self {
        self.float = Some(float);
        self
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn kind(&self) -> GeometryKind {
        self.geometry.kind()
    }

    pub fn base(&self) -> &ObjectBase {
        &self.base
    }

    pub fn layers(&self) -> &[MaterialLayer] {
        &self.layers
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn float(&self) -> Option<&FloatMotion> {
        self.float.as_ref()
    }

    /// Current transform handle
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable transform handle; the next tick overwrites it
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Opacity multiplier written by the last tick
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Effective opacity of layer `index` this frame
    pub fn layer_opacity(&self, index: usize) -> Option<f32> {
        self.layers.get(index).map(|layer| layer.opacity * self.opacity)
    }

    /// Pose at `elapsed` seconds, without touching the retained state
    pub fn pose_at(&self, elapsed: f32) -> Pose {
        let mut pose = self.animator.sample(elapsed * self.base.speed, &self.base);
        if let Some(float) = &self.float {
            let (sway, bob) = float.sample(elapsed);
            pose.rotation = pose.rotation.compose(sway);
            pose.offset += bob;
        }
        pose
    }

    /// Write this frame's transform, opacity and color
    pub fn tick(&mut self, elapsed: f32) {
        let pose = self.pose_at(elapsed);
        self.transform.position = self.base.position + pose.offset;
        self.transform.rotation = pose.rotation;
        self.opacity = pose.opacity;
        self.color = pose.color;
    }
}

/// Serializable view of an object for one frame
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectFrame {
    pub geometry: Geometry,
    pub transform: Transform,
    pub color: Color,
    pub opacity: f32,
    pub layers: Vec<MaterialLayer>,
}

impl From<&SceneObject> for ObjectFrame {
    fn from(object: &SceneObject) -> Self {
        Self {
            geometry: object.geometry,
            transform: object.transform,
            color: object.color,
            opacity: object.opacity,
            layers: object.layers.to_vec(),
        }
    }
}
