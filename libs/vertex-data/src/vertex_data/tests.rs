//! # Vertex Data Store Tests

use super::*;

fn triangle() -> VertexData {
    VertexData::new()
        .with(
            ChannelKind::Position,
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        )
        .with_indices(vec![0u32, 1, 2])
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

/// Test that an injected allocator hands out ids in order.
#[test]
fn test_ids_from_injected_allocator() {
    let ids = IdAllocator::new();
    let a = VertexData::with_ids(&ids);
    let b = VertexData::with_ids(&ids);
    assert_eq!(a.unique_id(), 0);
    assert_eq!(b.unique_id(), 1);
}

/// Test creating an empty store.
#[test]
fn test_new_is_empty() {
    let data = VertexData::new();
    assert_eq!(data.vertex_count(), 0);
    assert_eq!(data.index_count(), 0);
    assert_eq!(data.channels().count(), 0);
    assert!(!data.has_vertex_alpha());
    assert!(data.material_ranges().is_none());
}

/// Test that empty data is still assigned.
#[test]
fn test_set_empty_still_assigns() {
    let mut data = VertexData::new();
    data.set(ChannelKind::Normal, Vec::new());
    assert!(data.is_present(ChannelKind::Normal));
    assert_eq!(data.normals(), Some(&[][..]));
}

/// Test removing a channel.
#[test]
fn test_take_removes_channel() {
    let mut data = triangle();
    let positions = data.take(ChannelKind::Position).unwrap();
    assert_eq!(positions.len(), 9);
    assert!(!data.is_present(ChannelKind::Position));
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Test validating a store whose channels all match.
#[test]
fn test_validate_ok() {
    let data = triangle()
        .with(ChannelKind::Normal, vec![0.0; 9])
        .with(ChannelKind::Uv, vec![0.0; 6])
        .with(ChannelKind::Color, vec![1.0; 12]);
    assert!(data.validate().is_ok());
}

/// Test that a store without positions is invalid.
#[test]
fn test_validate_missing_positions() {
    let data = VertexData::new().with(ChannelKind::Normal, vec![0.0; 9]);
    assert!(matches!(
        data.validate(),
        Err(VertexDataError::MissingPositions)
    ));
}

/// Test four normals against three vertices.
#[test]
fn test_validate_normal_count_mismatch() {
    let data = triangle().with(ChannelKind::Normal, vec![0.0; 4]);
    match data.validate() {
        Err(VertexDataError::ElementCountMismatch {
            kind,
            expected,
            actual,
        }) => {
            assert_eq!(kind, ChannelKind::Normal);
            assert_eq!(expected, 9);
            assert_eq!(actual, 4);
        }
        other => panic!("expected ElementCountMismatch, got {other:?}"),
    }
}

/// Test that ten normals against three vertices report the raw lengths.
#[test]
fn test_validate_rejects_ragged_normals() {
    let data = triangle().with(ChannelKind::Normal, vec![0.0; 10]);
    assert!(matches!(
        data.validate(),
        Err(VertexDataError::ElementCountMismatch {
            kind: ChannelKind::Normal,
            expected: 9,
            actual: 10,
        })
    ));
}

/// Test that positions holding a partial vertex are rejected on their own.
#[test]
fn test_validate_rejects_ragged_positions() {
    let data = VertexData::new().with(ChannelKind::Position, vec![0.0; 10]);
    assert!(matches!(
        data.validate(),
        Err(VertexDataError::ElementCountMismatch {
            kind: ChannelKind::Position,
            expected: 9,
            actual: 10,
        })
    ));
}

/// Test that ragged positions fail even when the normals hold whole vertices.
#[test]
fn test_validate_rejects_ragged_positions_with_normals() {
    let data = VertexData::new()
        .with(ChannelKind::Position, vec![0.0; 10])
        .with(ChannelKind::Normal, vec![0.0; 9]);
    assert!(matches!(
        data.validate(),
        Err(VertexDataError::ElementCountMismatch {
            kind: ChannelKind::Position,
            ..
        })
    ));
}

/// Test that a present but empty channel is invalid.
#[test]
fn test_validate_rejects_empty_channel() {
    let mut data = triangle();
    data.set(ChannelKind::Uv3, Vec::new());
    assert!(matches!(
        data.validate(),
        Err(VertexDataError::ElementCountMismatch {
            kind: ChannelKind::Uv3,
            ..
        })
    ));
}

/// Test validation of the skinning channels.
#[test]
fn test_validate_skin_channels() {
    let data = triangle()
        .with(ChannelKind::MatricesIndices, vec![0.0; 12])
        .with(ChannelKind::MatricesWeights, vec![0.25; 12])
        .with(ChannelKind::MatricesWeightsExtra, vec![0.0; 8]);
    assert!(matches!(
        data.validate(),
        Err(VertexDataError::ElementCountMismatch {
            kind: ChannelKind::MatricesWeightsExtra,
            ..
        })
    ));
}

// =============================================================================
// CLONE AND COMPLETION
// =============================================================================

/// Test that a clone owns its buffers and gets a new id.
#[test]
fn test_clone_is_independent_with_fresh_id() {
    let original = triangle().with(ChannelKind::Color, vec![0.5; 12]);
    let mut copy = original.clone();
    assert_eq!(copy, original);
    assert_ne!(copy.unique_id(), original.unique_id());

    copy.get_mut(ChannelKind::Color).unwrap()[0] = 0.0;
    assert_eq!(original.colors().unwrap()[0], 0.5);
}

/// Test completion with default fill values.
#[test]
fn test_complete_channel_fills_defaults() {
    let mut data = triangle();
    data.complete_channel(ChannelKind::Color);
    data.complete_channel(ChannelKind::Tangent);
    assert_eq!(data.colors(), Some(&[1.0; 12][..]));
    assert_eq!(data.tangents(), Some(&[0.0; 12][..]));
    assert!(data.validate().is_ok());
}

/// Test that completion leaves existing channels alone.
#[test]
fn test_complete_channel_keeps_existing() {
    let mut data = triangle().with(ChannelKind::Uv, vec![0.5; 6]);
    data.complete_channel(ChannelKind::Uv);
    assert_eq!(data.get(ChannelKind::Uv), Some(&[0.5; 6][..]));
}

/// Test the material index used for sorting.
#[test]
fn test_leading_material_index() {
    let mut data = triangle();
    assert_eq!(data.leading_material_index(), 0);
    data.set_material_ranges(vec![MaterialRange::new(4, 0, 3, 0, 3)]);
    assert_eq!(data.leading_material_index(), 4);
}
