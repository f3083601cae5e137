//! Per-point label state machine.
//!
//! Labels move `Unvisited -> Noise -> Assigned` or `Unvisited -> Assigned`.
//! Nothing leaves `Assigned`.

use std::fmt;

use crate::{
    error::{DbscanError, Result},
    result::ClusterId,
};

/// State of a single point during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Label {
    /// Not yet examined by the engine.
    #[default]
    Unvisited,
    /// Failed the core-point test and has not been reached by any cluster.
    ///
    /// Noise is provisional: a later expansion may reclaim the point as a
    /// border member.
    Noise,
    /// Member of the given cluster.
    Assigned(ClusterId),
}

impl Label {
    /// Returns the cluster when the label is [`Label::Assigned`].
    #[must_use]
    pub fn cluster(self) -> Option<ClusterId> {
        match self {
            Self::Assigned(id) => Some(id),
            Self::Unvisited | Self::Noise => None,
        }
    }

    /// Returns whether the engine has examined the point.
    #[must_use]
    pub fn is_visited(self) -> bool {
        !matches!(self, Self::Unvisited)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unvisited => f.write_str("unvisited"),
            Self::Noise => f.write_str("noise"),
            Self::Assigned(id) => write!(f, "cluster {}", id.get()),
        }
    }
}

/// Owns one [`Label`] per point for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelStore {
    labels: Vec<Label>,
}

impl LabelStore {
    /// Creates a store with every point [`Label::Unvisited`].
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            labels: vec![Label::Unvisited; len],
        }
    }

    /// Returns the number of points tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns whether the store tracks no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the label of `point`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, point: usize) -> Option<Label> {
        self.labels.get(point).copied()
    }

    /// Read-only view of every label in dataset order.
    #[must_use]
    pub fn as_slice(&self) -> &[Label] {
        &self.labels
    }

    /// Marks `point` as noise.
    ///
    /// Marking a noise point again is a no-op.
    ///
    /// # Errors
    /// Returns [`DbscanError::RelabelConflict`] when the point already
    /// belongs to a cluster.
    pub fn set_noise(&mut self, point: usize) -> Result<()> {
        let slot = self.slot(point, Label::Noise)?;
        match *slot {
            Label::Unvisited | Label::Noise => {
                *slot = Label::Noise;
                Ok(())
            }
            current @ Label::Assigned(_) => Err(DbscanError::RelabelConflict {
                point,
                current,
                requested: Label::Noise,
            }),
        }
    }

    /// Assigns `point` to `cluster` and returns the label it held before.
    ///
    /// Assigning the same cluster twice is a no-op.
    ///
    /// # Errors
    /// Returns [`DbscanError::RelabelConflict`] when the point already
    /// belongs to a different cluster.
    pub fn set_cluster(&mut self, point: usize, cluster: ClusterId) -> Result<Label> {
        let requested = Label::Assigned(cluster);
        let slot = self.slot(point, requested)?;
        let previous = *slot;
        match previous {
            Label::Assigned(existing) if existing != cluster => Err(DbscanError::RelabelConflict {
                point,
                current: previous,
                requested,
            }),
            _ => {
                *slot = requested;
                Ok(previous)
            }
        }
    }

    /// Consumes the store, returning the labels in dataset order.
    #[must_use]
    pub fn into_labels(self) -> Vec<Label> {
        self.labels
    }

    fn slot(&mut self, point: usize, requested: Label) -> Result<&mut Label> {
        // An index outside the store can only come from a broken caller, so
        // it is reported as the same invariant violation.
        self.labels
            .get_mut(point)
            .ok_or(DbscanError::RelabelConflict {
                point,
                current: Label::Unvisited,
                requested,
            })
    }
}
