//! # Attribute Channels
//!
//! The fixed set of per-vertex channels a store can hold, and the static
//! descriptor table every table-driven operation iterates.

use std::fmt;

use config::constants::{
    COLOR_STRIDE, DEFAULT_ATTRIBUTE_FILL, DEFAULT_COLOR_FILL, NORMAL_STRIDE, POSITION_STRIDE,
    SKIN_STRIDE, TANGENT_STRIDE, UV_STRIDE,
};

/// One named per-vertex data stream.
///
/// The names returned by [`ChannelKind::name`] match the engine's vertex
/// buffer kind strings, so targets keyed by string can map them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChannelKind {
    Position,
    Normal,
    Tangent,
    Uv,
    Uv2,
    Uv3,
    Uv4,
    Uv5,
    Uv6,
    Color,
    MatricesIndices,
    MatricesWeights,
    MatricesIndicesExtra,
    MatricesWeightsExtra,
}

/// Static layout information for a channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelDescriptor {
    /// Scalar components per vertex.
    pub stride: usize,
    /// Value written when the channel is allocated during merge completion.
    pub default_fill: f32,
    /// Engine vertex buffer kind name.
    pub name: &'static str,
}

const fn descriptor(stride: usize, default_fill: f32, name: &'static str) -> ChannelDescriptor {
    ChannelDescriptor {
        stride,
        default_fill,
        name,
    }
}

/// Descriptor table, indexed by `ChannelKind as usize`.
const DESCRIPTORS: [ChannelDescriptor; ChannelKind::COUNT] = [
    descriptor(POSITION_STRIDE, DEFAULT_ATTRIBUTE_FILL, "position"),
    descriptor(NORMAL_STRIDE, DEFAULT_ATTRIBUTE_FILL, "normal"),
    descriptor(TANGENT_STRIDE, DEFAULT_ATTRIBUTE_FILL, "tangent"),
    descriptor(UV_STRIDE, DEFAULT_ATTRIBUTE_FILL, "uv"),
    descriptor(UV_STRIDE, DEFAULT_ATTRIBUTE_FILL, "uv2"),
    descriptor(UV_STRIDE, DEFAULT_ATTRIBUTE_FILL, "uv3"),
    descriptor(UV_STRIDE, DEFAULT_ATTRIBUTE_FILL, "uv4"),
    descriptor(UV_STRIDE, DEFAULT_ATTRIBUTE_FILL, "uv5"),
    descriptor(UV_STRIDE, DEFAULT_ATTRIBUTE_FILL, "uv6"),
    descriptor(COLOR_STRIDE, DEFAULT_COLOR_FILL, "color"),
    descriptor(SKIN_STRIDE, DEFAULT_ATTRIBUTE_FILL, "matricesIndices"),
    descriptor(SKIN_STRIDE, DEFAULT_ATTRIBUTE_FILL, "matricesWeights"),
    descriptor(SKIN_STRIDE, DEFAULT_ATTRIBUTE_FILL, "matricesIndicesExtra"),
    descriptor(SKIN_STRIDE, DEFAULT_ATTRIBUTE_FILL, "matricesWeightsExtra"),
];

impl ChannelKind {
    /// Number of channel kinds.
    pub const COUNT: usize = 14;

    /// Every channel, in canonical order (position first).
    pub const ALL: [ChannelKind; Self::COUNT] = [
        ChannelKind::Position,
        ChannelKind::Normal,
        ChannelKind::Tangent,
        ChannelKind::Uv,
        ChannelKind::Uv2,
        ChannelKind::Uv3,
        ChannelKind::Uv4,
        ChannelKind::Uv5,
        ChannelKind::Uv6,
        ChannelKind::Color,
        ChannelKind::MatricesIndices,
        ChannelKind::MatricesWeights,
        ChannelKind::MatricesIndicesExtra,
        ChannelKind::MatricesWeightsExtra,
    ];

    /// Every channel except position, in canonical order.
    pub fn optional() -> impl Iterator<Item = ChannelKind> {
        Self::ALL.into_iter().skip(1)
    }

    /// Returns the static descriptor for this channel.
    #[inline]
    pub fn descriptor(self) -> &'static ChannelDescriptor {
        &DESCRIPTORS[self as usize]
    }

    /// Scalar components per vertex.
    #[inline]
    pub fn stride(self) -> usize {
        self.descriptor().stride
    }

    /// Fill value used by merge completion.
    #[inline]
    pub fn default_fill(self) -> f32 {
        self.descriptor().default_fill
    }

    /// Engine vertex buffer kind name.
    #[inline]
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Looks up a channel by its engine kind name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// True for the channels the transform engine rewrites.
    #[inline]
    pub fn is_transformable(self) -> bool {
        matches!(
            self,
            ChannelKind::Position | ChannelKind::Normal | ChannelKind::Tangent
        )
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
