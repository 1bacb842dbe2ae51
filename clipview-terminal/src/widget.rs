/// Wireframe box handle
use clipview_core::{BoxBounds, BoxWidget};

/// Corner index pairs for the twelve box edges. Corners follow
/// `BoxBounds::corners`.
pub const BOX_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// The clip box as drawn in the viewport
#[derive(Debug, Default)]
pub struct BoxOutline {
    bounds: Option<BoxBounds>,
    highlighted: bool,
}

impl BoxOutline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(&self) -> Option<BoxBounds> {
        self.bounds
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Edge segments of the outline, empty until first placed
    pub fn edges(&self) -> Vec<([f64; 3], [f64; 3])> {
        self.bounds.map(|b| box_edges(&b)).unwrap_or_default()
    }
}

/// The twelve edges of `bounds` as segment end points
pub fn box_edges(bounds: &BoxBounds) -> Vec<([f64; 3], [f64; 3])> {
    let corners = bounds.corners();
    BOX_EDGES
        .iter()
        .map(|&(a, b)| (corners[a], corners[b]))
        .collect()
}

impl BoxWidget for BoxOutline {
    fn place(&mut self, bounds: &BoxBounds) {
        self.bounds = Some(*bounds);
    }

    fn set_interaction_opacity(&mut self, visible: bool) {
        self.highlighted = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_axis_aligned() {
        let bounds = BoxBounds::from_array([0.0, 1.0, 0.0, 2.0, 0.0, 3.0]);
        let edges = box_edges(&bounds);
        assert_eq!(edges.len(), 12);
        for (a, b) in edges {
            let differing = (0..3).filter(|&i| a[i] != b[i]).count();
            assert_eq!(differing, 1);
        }
    }

    #[test]
    fn test_outline_follows_placement() {
        let mut outline = BoxOutline::new();
        assert!(outline.edges().is_empty());

        let bounds = BoxBounds::unit();
        outline.place(&bounds);
        outline.set_interaction_opacity(true);
        assert_eq!(outline.bounds(), Some(bounds));
        assert!(outline.is_highlighted());
        assert_eq!(outline.edges().len(), 12);
    }
}
