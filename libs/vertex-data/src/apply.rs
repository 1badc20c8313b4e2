//! # Apply and Update
//!
//! Pushes a store into a [`GeometryTarget`].
//!
//! Applying is an explicit list of steps so a caller can spread the work
//! over several frames: one step per present channel, one for the index
//! buffer, and a final step for the vertex-alpha flag and submeshes.
//!
//! ```text
//! Channel(position) → Channel(normal) → ... → Indices → Finish
//! ```

use std::collections::VecDeque;

use crate::channel::ChannelKind;
use crate::indices::Indices;
use crate::target::{GeometryTarget, SubMesh};
use crate::vertex_data::VertexData;

/// One unit of work in an [`ApplyTask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyStep {
    /// Install one attribute buffer.
    Channel(ChannelKind),
    /// Install the index buffer, or an empty one.
    Indices,
    /// Set the vertex-alpha flag and submeshes.
    Finish,
}

/// An in-flight apply of a store to a target.
///
/// The task borrows the store, so the store cannot change while steps
/// remain. Each call to [`ApplyTask::step`] performs exactly one step.
///
/// # Example
///
/// ```rust
/// use vertex_data::{ChannelKind, Geometry, VertexData};
///
/// let data = VertexData::new()
///     .with(ChannelKind::Position, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0])
///     .with_indices(vec![0u16, 1, 2]);
///
/// let mut geometry = Geometry::new();
/// let mut task = data.apply_task(false);
/// while task.step(&mut geometry) {}
/// assert_eq!(geometry.vertex_count(), 3);
/// ```
#[derive(Debug)]
pub struct ApplyTask<'a> {
    data: &'a VertexData,
    updatable: bool,
    steps: VecDeque<ApplyStep>,
}

impl<'a> ApplyTask<'a> {
    fn new(data: &'a VertexData, updatable: bool) -> Self {
        let mut steps: VecDeque<ApplyStep> =
            data.channels().map(|(kind, _)| ApplyStep::Channel(kind)).collect();
        steps.push_back(ApplyStep::Indices);
        steps.push_back(ApplyStep::Finish);

        Self {
            data,
            updatable,
            steps,
        }
    }

    /// Number of steps not yet performed.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }

    /// The step the next call to [`ApplyTask::step`] performs.
    #[inline]
    pub fn peek(&self) -> Option<ApplyStep> {
        self.steps.front().copied()
    }

    /// Performs the next step. Returns true while steps remain.
    pub fn step(&mut self, target: &mut dyn GeometryTarget) -> bool {
        let Some(step) = self.steps.pop_front() else {
            return false;
        };
        log::trace!("Apply vertex data {}: {step:?}", self.data.unique_id());

        match step {
            ApplyStep::Channel(kind) => {
                if let Some(values) = self.data.get(kind) {
                    target.set_vertices_data(kind, values, self.updatable);
                }
            }
            ApplyStep::Indices => match self.data.indices() {
                Some(indices) => target.set_indices(indices, None, self.updatable),
                None => target.set_indices(&Indices::default(), None, self.updatable),
            },
            ApplyStep::Finish => self.finish(target),
        }

        !self.steps.is_empty()
    }

    /// Performs every remaining step.
    pub fn run(&mut self, target: &mut dyn GeometryTarget) {
        while self.step(target) {}
    }

    fn finish(&self, target: &mut dyn GeometryTarget) {
        if self.data.has_vertex_alpha() {
            target.set_has_vertex_alpha(true);
        }

        if let Some(ranges) = self.data.material_ranges().filter(|r| r.len() > 1) {
            target.set_sub_meshes(ranges.iter().copied().map(SubMesh::from).collect());
        }
    }
}

impl VertexData {
    /// Applies every channel, the index buffer, the vertex-alpha flag and
    /// submeshes to `target` in one go.
    pub fn apply_to(&self, target: &mut dyn GeometryTarget, updatable: bool) -> &Self {
        log::debug!(
            "Applying vertex data {} ({} vertices)",
            self.unique_id(),
            self.vertex_count()
        );
        self.apply_task(updatable).run(target);
        self
    }

    /// Returns an incremental apply for callers that want to spread the
    /// work over several calls.
    pub fn apply_task(&self, updatable: bool) -> ApplyTask<'_> {
        ApplyTask::new(self, updatable)
    }

    /// Updates the buffers of a target this store was already applied to.
    ///
    /// `update_extends` is passed only for positions; every other channel
    /// receives `false`. Indices are re-set when present.
    pub fn update(
        &self,
        target: &mut dyn GeometryTarget,
        update_extends: bool,
        make_unique: bool,
    ) -> &Self {
        for (kind, values) in self.channels() {
            let extends = update_extends && kind == ChannelKind::Position;
            target.update_vertices_data(kind, values, extends, make_unique);
        }

        if let Some(indices) = self.indices() {
            target.set_indices(indices, None, false);
        }

        self
    }
}
