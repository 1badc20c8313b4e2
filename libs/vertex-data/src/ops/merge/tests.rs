//! # Merge Engine Tests

use super::*;
use approx::assert_relative_eq;
use glam::Vec3;

fn triangle_at(origin: [f32; 3]) -> VertexData {
    let [x, y, z] = origin;
    VertexData::new()
        .with(
            ChannelKind::Position,
            vec![x, y, z, x + 1.0, y, z, x, y + 1.0, z],
        )
        .with_indices(vec![0u16, 1, 2])
}

fn with_material(mut data: VertexData, material_index: u32) -> VertexData {
    let vertex_count = data.vertex_count();
    let index_count = data.index_count();
    data.set_material_ranges(vec![MaterialRange::new(
        material_index,
        0,
        vertex_count,
        0,
        index_count,
    )]);
    data
}

// =============================================================================
// BASIC MERGE
// =============================================================================

/// Test merging two triangles.
#[test]
fn test_merge_two_triangles() {
    let mut a = triangle_at([0.0, 0.0, 0.0]);
    let mut b = triangle_at([2.0, 2.0, 2.0]);

    a.merge(&mut [&mut b], MergeOptions::default()).unwrap();

    assert_eq!(a.positions().unwrap().len(), 18);
    assert_eq!(a.indices().unwrap().to_u32_vec(), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(&a.positions().unwrap()[9..12], &[2.0, 2.0, 2.0]);
}

/// Test that the root keeps its id.
#[test]
fn test_merge_keeps_unique_id() {
    let mut a = triangle_at([0.0; 3]);
    let mut b = triangle_at([1.0; 3]);
    let id = a.unique_id();
    a.merge(&mut [&mut b], MergeOptions::default()).unwrap();
    assert_eq!(a.unique_id(), id);
}

/// Test that participants are only read.
#[test]
fn test_merge_leaves_others_untouched() {
    let mut a = triangle_at([0.0; 3]);
    let mut b = triangle_at([5.0; 3]);
    let before = b.clone();
    a.merge(&mut [&mut b], MergeOptions::default()).unwrap();
    assert_eq!(b, before);
}

/// Test index offsets across three participants.
#[test]
fn test_merge_index_offsets_accumulate() {
    let mut a = triangle_at([0.0; 3]);
    let mut b = triangle_at([1.0; 3]);
    let mut c = triangle_at([2.0; 3]).with_indices(vec![2u16, 1, 0]);

    a.merge(&mut [&mut b, &mut c], MergeOptions::default())
        .unwrap();

    assert_eq!(
        a.indices().unwrap().to_u32_vec(),
        vec![0, 1, 2, 3, 4, 5, 8, 7, 6]
    );
}

/// Test that an unindexed participant still shifts later indices.
#[test]
fn test_merge_participant_without_indices_still_offsets() {
    let mut a = triangle_at([0.0; 3]);
    let mut b = triangle_at([1.0; 3]);
    b.take_indices();
    let mut c = triangle_at([2.0; 3]);

    a.merge(&mut [&mut b, &mut c], MergeOptions::default())
        .unwrap();

    assert_eq!(a.vertex_count(), 9);
    assert_eq!(a.indices().unwrap().to_u32_vec(), vec![0, 1, 2, 6, 7, 8]);
}

/// Test merging stores that have no indices.
#[test]
fn test_merge_without_any_indices() {
    let mut a = triangle_at([0.0; 3]);
    a.take_indices();
    let mut b = triangle_at([1.0; 3]);
    b.take_indices();

    a.merge(&mut [&mut b], MergeOptions::default()).unwrap();
    assert!(a.indices().is_none());
    assert_eq!(a.vertex_count(), 6);
}

/// Test vertex alpha combination.
#[test]
fn test_merge_vertex_alpha_is_ored() {
    let mut a = triangle_at([0.0; 3]);
    let mut b = triangle_at([1.0; 3]);
    b.set_has_vertex_alpha(true);

    a.merge(&mut [&mut b], MergeOptions::default()).unwrap();
    assert!(a.has_vertex_alpha());
}

/// Test that a plain merge drops material ranges.
#[test]
fn test_plain_merge_clears_material_ranges() {
    let mut a = with_material(triangle_at([0.0; 3]), 2);
    let mut b = triangle_at([1.0; 3]);
    a.merge(&mut [&mut b], MergeOptions::default()).unwrap();
    assert!(a.material_ranges().is_none());
}

// =============================================================================
// VALIDATION AND RECONCILIATION
// =============================================================================

/// Test mismatched channel sets without completion.
#[test]
fn test_merge_attribute_set_mismatch() {
    let mut a = triangle_at([0.0; 3]).with(ChannelKind::Normal, vec![0.0; 9]);
    let mut b = triangle_at([1.0; 3]);

    let err = a.merge(&mut [&mut b], MergeOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        VertexDataError::AttributeSetMismatch {
            kind: ChannelKind::Normal
        }
    ));
}

/// Test that an invalid root is refused.
#[test]
fn test_merge_validates_root() {
    let mut a = triangle_at([0.0; 3]).with(ChannelKind::Uv, vec![0.0; 5]);
    let mut b = triangle_at([1.0; 3]).with(ChannelKind::Uv, vec![0.0; 6]);
    assert!(matches!(
        a.merge(&mut [&mut b], MergeOptions::default()),
        Err(VertexDataError::ElementCountMismatch { .. })
    ));
}

/// Test that a root with a trailing partial position is refused before
/// anything is modified.
#[test]
fn test_merge_rejects_ragged_root_positions() {
    let mut a = VertexData::new()
        .with(ChannelKind::Position, vec![0.0; 10])
        .with_indices(vec![0u16, 1, 2]);
    let mut b = triangle_at([1.0; 3]);
    let before = a.clone();

    assert!(matches!(
        a.merge(&mut [&mut b], MergeOptions::default()),
        Err(VertexDataError::ElementCountMismatch {
            kind: ChannelKind::Position,
            expected: 9,
            actual: 10,
        })
    ));
    assert_eq!(a, before);
}

/// Test that an invalid participant is refused.
#[test]
fn test_merge_validates_others() {
    let mut a = triangle_at([0.0; 3]);
    let mut b = VertexData::new().with_indices(vec![0u16, 1, 2]);
    assert!(matches!(
        a.merge(&mut [&mut b], MergeOptions::default()),
        Err(VertexDataError::MissingPositions)
    ));
}

/// Test completion in both directions.
#[test]
fn test_merge_completion_fills_both_sides() {
    let mut a = triangle_at([0.0; 3]).with(ChannelKind::Normal, vec![0.0f32, 0.0, 1.0].repeat(3));
    let mut b = triangle_at([1.0; 3]).with(ChannelKind::Color, vec![0.5; 12]);

    let options = MergeOptions {
        enable_completion: true,
        ..MergeOptions::default()
    };
    a.merge(&mut [&mut b], options).unwrap();

    // b was completed with zero normals
    assert_eq!(b.normals(), Some(&[0.0; 9][..]));
    assert!(a.validate().is_ok());

    let colors = a.colors().unwrap();
    assert_eq!(colors.len(), 24);
    assert!(colors[..12].iter().all(|&c| c == 1.0));
    assert!(colors[12..].iter().all(|&c| c == 0.5));

    let normals = a.normals().unwrap();
    assert_eq!(&normals[..3], &[0.0, 0.0, 1.0]);
    assert_eq!(&normals[9..12], &[0.0, 0.0, 0.0]);
}

// =============================================================================
// TRANSFORMS
// =============================================================================

/// Test that a participant transform only affects the merged copy.
#[test]
fn test_merge_applies_participant_transform_to_copy() {
    let mut a = triangle_at([0.0; 3]);
    let mut b = triangle_at([0.0; 3]);
    let original_b = b.clone();

    let mut sources = [MergeSource::transformed(
        &mut b,
        Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)),
    )];
    a.merge_with_transforms(None, &mut sources, MergeOptions::default())
        .unwrap();

    let positions = a.positions().unwrap();
    assert_relative_eq!(positions[9], 10.0);
    assert_relative_eq!(positions[12], 11.0);
    assert_relative_eq!(positions[0], 0.0);
    assert_eq!(b, original_b);
}

/// Test the root transform.
#[test]
fn test_merge_root_transform() {
    let mut a = triangle_at([0.0; 3]);
    let mut b = triangle_at([0.0; 3]);
    let mut sources = [MergeSource::new(&mut b)];

    a.merge_with_transforms(
        Some(Mat4::from_translation(Vec3::Y)),
        &mut sources,
        MergeOptions::default(),
    )
    .unwrap();

    let positions = a.positions().unwrap();
    assert_relative_eq!(positions[1], 1.0);
    assert_relative_eq!(positions[10], 0.0);
}

/// Test winding flip for a mirrored participant.
#[test]
fn test_merge_mirrored_participant_flips_only_its_range() {
    let mut a = triangle_at([0.0; 3]);
    let mut b = triangle_at([0.0; 3]);
    let mut sources = [MergeSource::transformed(
        &mut b,
        Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0)),
    )];

    a.merge_with_transforms(None, &mut sources, MergeOptions::default())
        .unwrap();

    assert_eq!(a.indices().unwrap().to_u32_vec(), vec![0, 1, 2, 3, 5, 4]);
}

/// Test direction channels under a non-uniform scale.
#[test]
fn test_merge_transforms_normals_and_tangents() {
    let mut a = triangle_at([0.0; 3])
        .with(ChannelKind::Normal, vec![1.0f32, 0.0, 0.0].repeat(3))
        .with(ChannelKind::Tangent, vec![0.0f32, 1.0, 0.0, -1.0].repeat(3));
    let mut b = a.clone();
    let mut sources = [MergeSource::transformed(
        &mut b,
        Mat4::from_scale(Vec3::new(2.0, 4.0, 1.0)),
    )];

    a.merge_with_transforms(None, &mut sources, MergeOptions::default())
        .unwrap();

    let normals = a.normals().unwrap();
    assert_relative_eq!(normals[9], 0.5);
    let tangents = a.tangents().unwrap();
    assert_relative_eq!(tangents[13], 0.25);
    assert_eq!(tangents[15], -1.0);
}

// =============================================================================
// INDEX WIDTH
// =============================================================================

/// Test default index width.
#[test]
fn test_merge_keeps_16bit_by_default() {
    let mut a = triangle_at([0.0; 3]);
    let mut b = triangle_at([1.0; 3]);
    a.merge(&mut [&mut b], MergeOptions::default()).unwrap();
    assert!(!a.indices().unwrap().is_32bit());
}

/// Test forced 32-bit output.
#[test]
fn test_merge_use_32bit_indices() {
    let mut a = triangle_at([0.0; 3]);
    let mut b = triangle_at([1.0; 3]);
    let options = MergeOptions {
        use_32bit_indices: true,
        ..MergeOptions::default()
    };
    a.merge(&mut [&mut b], options).unwrap();
    assert_eq!(a.indices(), Some(&Indices::U32(vec![0, 1, 2, 3, 4, 5])));
}

/// Test widening from a 32-bit participant.
#[test]
fn test_merge_any_32bit_participant_widens() {
    let mut a = triangle_at([0.0; 3]);
    let mut b = triangle_at([1.0; 3]).with_indices(vec![0u32, 1, 2]);
    a.merge(&mut [&mut b], MergeOptions::default()).unwrap();
    assert!(a.indices().unwrap().is_32bit());
}

/// Test widening when offset indices pass 65535.
#[test]
fn test_merge_widens_when_offsets_overflow_u16() {
    let vertex_count = 40_000;
    let mut a = VertexData::new()
        .with(ChannelKind::Position, vec![0.0; vertex_count * 3])
        .with_indices(vec![0u16, 1, 39_999]);
    let mut b = a.clone();

    a.merge(&mut [&mut b], MergeOptions::default()).unwrap();

    let indices = a.indices().unwrap();
    assert!(indices.is_32bit());
    assert_eq!(indices.get(5), Some(79_999));
}

/// Test that cloning indices gives the same buffer.
#[test]
fn test_merge_force_clone_indices_same_result() {
    let mut a = triangle_at([0.0; 3]);
    let mut b = triangle_at([1.0; 3]);
    let options = MergeOptions {
        force_clone_indices: true,
        ..MergeOptions::default()
    };
    a.merge(&mut [&mut b], options).unwrap();
    assert_eq!(a.indices(), Some(&Indices::U16(vec![0, 1, 2, 3, 4, 5])));
}

// =============================================================================
// MATERIAL MERGE
// =============================================================================

/// Test material sorting.
#[test]
fn test_material_merge_sorts_by_material() {
    let mut a = with_material(triangle_at([0.0; 3]), 2);
    let mut b = with_material(triangle_at([1.0; 3]), 0);
    let mut c = with_material(triangle_at([2.0; 3]), 1);

    let options = MergeOptions {
        merge_material_ids: true,
        ..MergeOptions::default()
    };
    a.merge(&mut [&mut b, &mut c], options).unwrap();

    let positions = a.positions().unwrap();
    assert_eq!(positions[0], 1.0);
    assert_eq!(positions[9], 2.0);
    assert_eq!(positions[18], 0.0);

    let materials: Vec<u32> = a
        .material_ranges()
        .unwrap()
        .iter()
        .map(|range| range.material_index)
        .collect();
    assert_eq!(materials, vec![0, 1, 2]);
    assert_eq!(a.indices().unwrap().to_u32_vec(), (0..9u32).collect::<Vec<_>>());
}

/// Test coalescing adjacent equal materials.
#[test]
fn test_material_merge_coalesces_equal_materials() {
    let mut a = with_material(triangle_at([0.0; 3]), 1);
    let mut b = with_material(triangle_at([1.0; 3]), 1);
    let mut c = with_material(triangle_at([2.0; 3]), 0);

    let options = MergeOptions {
        merge_material_ids: true,
        ..MergeOptions::default()
    };
    a.merge(&mut [&mut b, &mut c], options).unwrap();

    assert_eq!(
        a.material_ranges().unwrap(),
        &[
            MaterialRange::new(0, 0, 3, 0, 3),
            MaterialRange::new(1, 3, 6, 3, 6),
        ]
    );
}

/// Test material merge of a multi-range input.
#[test]
fn test_material_merge_splits_multi_material_inputs() {
    let mut a = triangle_at([0.0; 3]);
    let mut second = triangle_at([1.0; 3]);
    a.merge(&mut [&mut second], MergeOptions::default()).unwrap();
    a.set_material_ranges(vec![
        MaterialRange::new(5, 0, 3, 0, 3),
        MaterialRange::new(0, 3, 3, 3, 3),
    ]);
    let mut b = with_material(triangle_at([7.0; 3]), 5);

    let options = MergeOptions {
        merge_material_ids: true,
        ..MergeOptions::default()
    };
    a.merge(&mut [&mut b], options).unwrap();

    assert_eq!(
        a.material_ranges().unwrap(),
        &[
            MaterialRange::new(0, 0, 3, 0, 3),
            MaterialRange::new(5, 3, 6, 3, 6),
        ]
    );
    // The material 0 slice came from the second half of `a`
    assert_eq!(a.positions().unwrap()[0], 1.0);
    assert_eq!(a.indices().unwrap().to_u32_vec(), (0..9u32).collect::<Vec<_>>());
}

/// Test material 0 for stores without ranges.
#[test]
fn test_material_merge_treats_missing_ranges_as_material_zero() {
    let mut a = with_material(triangle_at([0.0; 3]), 3);
    let mut b = triangle_at([1.0; 3]);

    let options = MergeOptions {
        merge_material_ids: true,
        ..MergeOptions::default()
    };
    a.merge(&mut [&mut b], options).unwrap();

    let ranges = a.material_ranges().unwrap();
    assert_eq!(ranges[0].material_index, 0);
    assert_eq!(ranges[1].material_index, 3);
}

/// Test that each slice keeps its own transform when sorted by material.
#[test]
fn test_material_merge_with_transforms() {
    let mut a = with_material(triangle_at([0.0; 3]), 1);
    let mut b = with_material(triangle_at([0.0; 3]), 0);
    let mut c = with_material(triangle_at([0.0; 3]), 2);

    let mut sources = [
        MergeSource::transformed(&mut b, Mat4::from_scale(Vec3::new(-1.0, 1.0, 1.0))),
        MergeSource::new(&mut c),
    ];
    let options = MergeOptions {
        merge_material_ids: true,
        ..MergeOptions::default()
    };
    a.merge_with_transforms(None, &mut sources, options).unwrap();

    // Mirrored material 0 triangle leads, with its winding flipped
    assert_eq!(
        a.indices().unwrap().to_u32_vec(),
        vec![0, 2, 1, 3, 4, 5, 6, 7, 8]
    );
    let positions = a.positions().unwrap();
    assert_relative_eq!(positions[3], -1.0);
    assert_relative_eq!(positions[12], 1.0);
    assert_relative_eq!(positions[21], 1.0);
    assert_eq!(
        a.material_ranges().unwrap(),
        &[
            MaterialRange::new(0, 0, 3, 0, 3),
            MaterialRange::new(1, 3, 3, 3, 3),
            MaterialRange::new(2, 6, 3, 6, 3),
        ]
    );
}
