//! Frustum and software-occlusion culling (§4.3/§4.4).

pub mod cell;
pub mod classify;
pub mod engine;
pub mod occlusion;

pub use cell::{CullCell, CullCellKind};
pub use classify::{classify_aabb_vs_cell, classify_sphere_vs_cell, cull_class_is_visible, CullClass};
pub use engine::{cull_instances_frustum_only, cull_instances_with_occlusion, cull_lights, CullVerdict, InstanceCullResult};
pub use occlusion::{OccluderProxy, ScreenRect, SoftwareOcclusionBuffer};
