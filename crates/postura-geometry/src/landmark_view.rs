//! Projection of a [`PoseFrame`] onto 2-D point arrays.
//!
//! The view never reorders, deduplicates, or interprets the requested
//! indices: position `i` of every output array corresponds to `indices[i]`.
//! Callers that pass three indices for an angle rely on this ordering to pick
//! the vertex.

use postura_types::{Joint, Point2, PoseFrame, PostureError};

/// Points plus their confidence scores, one entry per requested landmark.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LandmarkView {
    pub points: Vec<Point2>,
    pub visibility: Vec<f32>,
    pub presence: Vec<f32>,
}

impl LandmarkView {
    /// Project the landmarks at `indices`, in that order.
    ///
    /// An empty `indices` slice selects every landmark in native order.
    ///
    /// # Errors
    ///
    /// Returns [`PostureError::IndexOutOfRange`] for the first index that is
    /// not inside `frame`.
    pub fn from_indices(frame: &PoseFrame, indices: &[usize]) -> Result<Self, PostureError> {
        if indices.is_empty() {
            return Ok(Self::all(frame));
        }

        let mut view = Self::with_capacity(indices.len());
        for &index in indices {
            let record = frame.get(index)?;
            view.points.push(Point2::from(record));
            view.visibility.push(record.visibility);
            view.presence.push(record.presence);
        }
        Ok(view)
    }

    /// Project named joints, in the order given.
    pub fn from_joints(frame: &PoseFrame, joints: &[Joint]) -> Result<Self, PostureError> {
        let indices: Vec<usize> = joints.iter().map(|j| j.index()).collect();
        Self::from_indices(frame, &indices)
    }

    /// Every landmark of `frame` in native order.
    pub fn all(frame: &PoseFrame) -> Self {
        let records = frame.records();
        let mut view = Self::with_capacity(records.len());
        for record in records {
            view.points.push(Point2::from(record));
            view.visibility.push(record.visibility);
            view.presence.push(record.presence);
        }
        view
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            visibility: Vec::with_capacity(capacity),
            presence: Vec::with_capacity(capacity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postura_types::LandmarkRecord;

    fn frame() -> PoseFrame {
        PoseFrame::new(vec![
            LandmarkRecord::new(0.0, 0.5, 0.0).with_confidence(0.9, 0.8),
            LandmarkRecord::new(0.25, 0.75, 0.1).with_confidence(0.7, 0.6),
            LandmarkRecord::new(1.0, 0.0, -0.2).with_confidence(0.1, 0.2),
        ])
    }

    #[test]
    fn empty_indices_select_everything_in_order() {
        let view = LandmarkView::from_indices(&frame(), &[]).unwrap();
        assert_eq!(view.len(), 3);
        assert_eq!(view.points[0], Point2::new(0.0, 0.5));
        assert_eq!(view.points[2], Point2::new(1.0, 0.0));
        assert_eq!(view, LandmarkView::all(&frame()));
    }

    #[test]
    fn requested_order_is_preserved() {
        let view = LandmarkView::from_indices(&frame(), &[2, 0, 1]).unwrap();
        assert_eq!(view.points[0], Point2::new(1.0, 0.0));
        assert_eq!(view.points[1], Point2::new(0.0, 0.5));
        assert_eq!(view.points[2], Point2::new(0.25, 0.75));
        assert!((view.visibility[0] - 0.1).abs() < f32::EPSILON);
        assert!((view.presence[1] - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn duplicates_are_kept() {
        let view = LandmarkView::from_indices(&frame(), &[1, 1]).unwrap();
        assert_eq!(view.len(), 2);
        assert_eq!(view.points[0], view.points[1]);
    }

    #[test]
    fn out_of_range_index_is_error() {
        let err = LandmarkView::from_indices(&frame(), &[0, 7]).unwrap_err();
        assert_eq!(err, PostureError::IndexOutOfRange { index: 7, len: 3 });
    }

    #[test]
    fn joints_beyond_short_frame_are_errors() {
        assert!(LandmarkView::from_joints(&frame(), &[Joint::Nose]).is_ok());
        assert!(matches!(
            LandmarkView::from_joints(&frame(), &[Joint::RightHip]),
            Err(PostureError::IndexOutOfRange { index: 24, .. })
        ));
    }

    #[test]
    fn frame_is_not_modified() {
        let original = frame();
        let copy = original.clone();
        let _ = LandmarkView::from_indices(&original, &[2, 1, 0]).unwrap();
        assert_eq!(original, copy);
    }
}
