//! # Serialized Form
//!
//! A plain record with one flat numeric array per present channel, for
//! persistence and interchange. Field names follow the engine's scene
//! format (`camelCase`, `uvs2`..`uvs6`, `materialInfos`).

use config::constants::MAX_U16_INDEX;
use serde::{Deserialize, Serialize};

use crate::channel::ChannelKind;
use crate::error::VertexDataResult;
use crate::indices::Indices;
use crate::material::MaterialRange;
use crate::vertex_data::VertexData;

/// Serialized vertex data.
///
/// The `*Expanded` markers are written whenever the matching skinning
/// indices channel is present and are ignored on read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedVertexData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normals: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tangents: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uvs: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uvs2: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uvs3: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uvs4: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uvs5: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uvs6: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_vertex_alpha: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrices_indices: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrices_indices_expanded: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrices_weights: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrices_indices_extra: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrices_indices_extra_expanded: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrices_weights_extra: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indices: Option<Vec<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_infos: Option<Vec<MaterialRange>>,
}

impl SerializedVertexData {
    /// The record field holding `kind`.
    fn channel_mut(&mut self, kind: ChannelKind) -> &mut Option<Vec<f32>> {
        match kind {
            ChannelKind::Position => &mut self.positions,
            ChannelKind::Normal => &mut self.normals,
            ChannelKind::Tangent => &mut self.tangents,
            ChannelKind::Uv => &mut self.uvs,
            ChannelKind::Uv2 => &mut self.uvs2,
            ChannelKind::Uv3 => &mut self.uvs3,
            ChannelKind::Uv4 => &mut self.uvs4,
            ChannelKind::Uv5 => &mut self.uvs5,
            ChannelKind::Uv6 => &mut self.uvs6,
            ChannelKind::Color => &mut self.colors,
            ChannelKind::MatricesIndices => &mut self.matrices_indices,
            ChannelKind::MatricesWeights => &mut self.matrices_weights,
            ChannelKind::MatricesIndicesExtra => &mut self.matrices_indices_extra,
            ChannelKind::MatricesWeightsExtra => &mut self.matrices_weights_extra,
        }
    }
}

impl VertexData {
    /// Converts the store to its serialized record.
    pub fn serialize(&self) -> SerializedVertexData {
        let mut record = SerializedVertexData::default();
        for (kind, values) in self.channels() {
            *record.channel_mut(kind) = Some(values.to_vec());
        }

        let expanded = |kind: ChannelKind| self.is_present(kind).then_some(true);
        record.matrices_indices_expanded = expanded(ChannelKind::MatricesIndices);
        record.matrices_indices_extra_expanded = expanded(ChannelKind::MatricesIndicesExtra);

        record.has_vertex_alpha = self.vertex_alpha_flag();
        record.indices = self.indices().map(Indices::to_u32_vec);
        record.material_infos = self.material_ranges().map(<[MaterialRange]>::to_vec);
        record
    }

    /// Builds a store from a serialized record under a fresh id.
    ///
    /// Indices come back 16-bit when every value fits, 32-bit otherwise.
    pub fn deserialize(mut record: SerializedVertexData) -> VertexData {
        let mut data = VertexData::new();
        for kind in ChannelKind::ALL {
            if let Some(values) = record.channel_mut(kind).take() {
                data.set(kind, values);
            }
        }

        if let Some(indices) = record.indices {
            data.set_indices(narrowest_indices(indices));
        }
        if let Some(has_vertex_alpha) = record.has_vertex_alpha {
            data.set_has_vertex_alpha(has_vertex_alpha);
        }
        if let Some(ranges) = record.material_infos {
            data.set_material_ranges(ranges);
        }
        data
    }

    /// Serializes the store to a JSON string.
    pub fn to_json(&self) -> VertexDataResult<String> {
        Ok(serde_json::to_string(&self.serialize())?)
    }

    /// Parses a store from a JSON string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vertex_data::VertexData;
    ///
    /// let data = VertexData::from_json(r#"{"positions":[0,0,0,1,0,0,0,1,0]}"#)?;
    /// assert_eq!(data.vertex_count(), 3);
    /// assert!(data.indices().is_none());
    /// # Ok::<(), vertex_data::VertexDataError>(())
    /// ```
    pub fn from_json(json: &str) -> VertexDataResult<VertexData> {
        let record: SerializedVertexData = serde_json::from_str(json)?;
        Ok(VertexData::deserialize(record))
    }
}

fn narrowest_indices(indices: Vec<u32>) -> Indices {
    if indices.iter().all(|&index| index <= MAX_U16_INDEX) {
        Indices::U16(indices.into_iter().map(|index| index as u16).collect())
    } else {
        Indices::U32(indices)
    }
}
