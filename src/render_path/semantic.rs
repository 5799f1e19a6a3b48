//! Pass resource semantics.

/// Closed set tagging a resource's *meaning*, independent of its exact GPU
/// format. The planner type-checks pass connectivity against these tags
/// rather than concrete image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PassSemantic {
    Depth,
    Albedo,
    Normal,
    Material,
    AmbientOcclusion,
    LightGrid,
    LightIndexList,
    LightClusters,
    ShadowMap,
    ColorHdr,
    ColorLdr,
    MotionVectors,
    HistoryColor,
    HistoryDepth,
    HistoryMotion,
}

impl PassSemantic {
    /// The format class a resource producing this semantic should use.
    #[must_use]
    pub const fn format_class(self) -> super::resource_plan::FormatClass {
        use super::resource_plan::FormatClass;
        match self {
            PassSemantic::Depth | PassSemantic::ShadowMap | PassSemantic::HistoryDepth => {
                FormatClass::Depth
            }
            PassSemantic::ColorHdr | PassSemantic::HistoryColor => FormatClass::ColorHdr,
            PassSemantic::ColorLdr | PassSemantic::Albedo => FormatClass::ColorLdr,
            PassSemantic::AmbientOcclusion => FormatClass::Mono,
            PassSemantic::Normal | PassSemantic::Material | PassSemantic::MotionVectors
            | PassSemantic::HistoryMotion => FormatClass::ColorLdr,
            PassSemantic::LightGrid | PassSemantic::LightIndexList | PassSemantic::LightClusters => {
                FormatClass::Mono
            }
        }
    }
}
