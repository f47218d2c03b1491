//! Truss mesh data normalized for rendering, and the bounding sphere the
//! camera frames.

use glam::DVec3;

use crate::error::{Result, ViewerError};

/// Bounding sphere of a mesh: node centroid and the largest distance from
/// it to any node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshBounds {
    /// Mean of all node positions.
    pub centroid: DVec3,
    /// Max distance from the centroid to any node (>= 0).
    pub radius: f64,
}

impl MeshBounds {
    /// Bounds of a point set. Empty input yields a zero sphere at the
    /// origin.
    #[must_use]
    pub fn from_points(points: &[DVec3]) -> Self {
        if points.is_empty() {
            return Self {
                centroid: DVec3::ZERO,
                radius: 0.0,
            };
        }
        let centroid = points.iter().copied().sum::<DVec3>() / points.len() as f64;
        let radius = points
            .iter()
            .map(|p| p.distance(centroid))
            .fold(0.0f64, f64::max);
        Self { centroid, radius }
    }
}

/// The one capability the camera core needs from the geometry side.
pub trait BoundsProvider {
    /// Bounding sphere used to frame the model.
    fn bounds(&self) -> MeshBounds;
}

impl BoundsProvider for MeshBounds {
    fn bounds(&self) -> MeshBounds {
        *self
    }
}

/// Where a scalar field is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldLocation {
    /// One value per node.
    Node,
    /// One value per element.
    Element,
}

/// Node/element arrays of a truss result, padded to 3D.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    nodes: Vec<DVec3>,
    elements: Vec<Vec<u32>>,
    displacements: Option<Vec<DVec3>>,
    field: Option<(FieldLocation, Vec<f64>)>,
}

impl MeshData {
    /// Build from node rows (2 or 3 components each, uniform across rows)
    /// and element connectivity rows (uniform arity, at least 2 nodes).
    ///
    /// # Errors
    ///
    /// [`ViewerError::InvalidConfiguration`] on ragged or out-of-range input.
    pub fn new(nodes: &[Vec<f64>], elements: &[Vec<u32>]) -> Result<Self> {
        let nodes = to_3d("nodes", nodes)?;
        if let Some(first) = elements.first() {
            if first.len() < 2 {
                return Err(ViewerError::config(
                    "elements need at least two nodes",
                ));
            }
        }
        for (i, elem) in elements.iter().enumerate() {
            if elem.len() != elements[0].len() {
                return Err(ViewerError::config(format!(
                    "element {i} has {} nodes, expected {}",
                    elem.len(),
                    elements[0].len()
                )));
            }
            if let Some(&bad) = elem.iter().find(|&&n| n as usize >= nodes.len()) {
                return Err(ViewerError::config(format!(
                    "element {i} references node {bad}, mesh has {}",
                    nodes.len()
                )));
            }
        }
        Ok(Self {
            nodes,
            elements: elements.to_vec(),
            displacements: None,
            field: None,
        })
    }

    /// Attach nodal displacements.
    ///
    /// # Errors
    ///
    /// See [`update_displacements`](Self::update_displacements).
    pub fn with_displacements(mut self, disp: &[Vec<f64>]) -> Result<Self> {
        self.update_displacements(disp)?;
        Ok(self)
    }

    /// Attach a scalar field.
    ///
    /// # Errors
    ///
    /// See [`update_field`](Self::update_field).
    pub fn with_field(mut self, field: Vec<f64>) -> Result<Self> {
        self.update_field(field)?;
        Ok(self)
    }

    /// Replace the displacements (one 2D or 3D row per node).
    ///
    /// # Errors
    ///
    /// [`ViewerError::InvalidConfiguration`] if the row count or width is
    /// wrong.
    pub fn update_displacements(&mut self, disp: &[Vec<f64>]) -> Result<()> {
        let disp = to_3d("displacements", disp)?;
        if disp.len() != self.nodes.len() {
            return Err(ViewerError::config(format!(
                "{} displacement rows for {} nodes",
                disp.len(),
                self.nodes.len()
            )));
        }
        self.displacements = Some(disp);
        Ok(())
    }

    /// Replace the scalar field; its length decides whether it is nodal or
    /// elemental (nodal wins when both counts match).
    ///
    /// # Errors
    ///
    /// [`ViewerError::InvalidConfiguration`] if the length matches neither.
    pub fn update_field(&mut self, field: Vec<f64>) -> Result<()> {
        let location = if field.len() == self.nodes.len() {
            FieldLocation::Node
        } else if field.len() == self.elements.len() {
            FieldLocation::Element
        } else {
            return Err(ViewerError::config(format!(
                "field has {} values; expected {} (nodes) or {} (elements)",
                field.len(),
                self.nodes.len(),
                self.elements.len()
            )));
        };
        self.field = Some((location, field));
        Ok(())
    }

    /// Node positions in 3D.
    #[must_use]
    pub fn nodes(&self) -> &[DVec3] {
        &self.nodes
    }

    /// Element connectivity.
    #[must_use]
    pub fn elements(&self) -> &[Vec<u32>] {
        &self.elements
    }

    /// Nodal displacements, if any.
    #[must_use]
    pub fn displacements(&self) -> Option<&[DVec3]> {
        self.displacements.as_deref()
    }

    /// Scalar field and where it is sampled, if any.
    #[must_use]
    pub fn field(&self) -> Option<(FieldLocation, &[f64])> {
        self.field.as_ref().map(|(loc, v)| (*loc, v.as_slice()))
    }

    /// Min/max of the scalar field.
    #[must_use]
    pub fn field_range(&self) -> Option<(f64, f64)> {
        let (_, values) = self.field()?;
        values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Flattened `xyz` node buffer.
    #[must_use]
    pub fn node_buffer(&self) -> Vec<f32> {
        flatten(&self.nodes)
    }

    /// Flattened `xyz` displacement buffer.
    #[must_use]
    pub fn displacement_buffer(&self) -> Option<Vec<f32>> {
        self.displacements.as_deref().map(flatten)
    }

    /// Flattened deformed positions: `node + scale * displacement`.
    #[must_use]
    pub fn deformed_buffer(&self, scale: f64) -> Option<Vec<f32>> {
        let disp = self.displacements.as_deref()?;
        let deformed: Vec<DVec3> = self
            .nodes
            .iter()
            .zip(disp)
            .map(|(n, d)| *n + *d * scale)
            .collect();
        Some(flatten(&deformed))
    }

    /// Flattened element index buffer.
    #[must_use]
    pub fn index_buffer(&self) -> Vec<u32> {
        self.elements.iter().flatten().copied().collect()
    }
}

impl BoundsProvider for MeshData {
    fn bounds(&self) -> MeshBounds {
        MeshBounds::from_points(&self.nodes)
    }
}

fn to_3d(what: &str, rows: &[Vec<f64>]) -> Result<Vec<DVec3>> {
    let width = rows.first().map_or(3, Vec::len);
    if width != 2 && width != 3 {
        return Err(ViewerError::config(format!(
            "{what} rows must have 2 or 3 components, got {width}"
        )));
    }
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            if row.len() != width {
                return Err(ViewerError::config(format!(
                    "{what} row {i} has {} components, expected {width}",
                    row.len()
                )));
            }
            let v = DVec3::new(row[0], row[1], row.get(2).copied().unwrap_or(0.0));
            if v.is_finite() {
                Ok(v)
            } else {
                Err(ViewerError::config(format!("{what} row {i} is not finite")))
            }
        })
        .collect()
}

fn flatten(points: &[DVec3]) -> Vec<f32> {
    points
        .iter()
        .flat_map(|p| p.as_vec3().to_array())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pyramid() -> MeshData {
        let nodes = vec![
            vec![0.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0],
            vec![1.0, 0.0, 1.0],
            vec![0.0, 0.0, 1.0],
            vec![0.5, 1.0, 0.5],
        ];
        let elems = vec![
            vec![0, 1],
            vec![1, 2],
            vec![2, 3],
            vec![3, 0],
            vec![0, 4],
            vec![1, 4],
            vec![2, 4],
            vec![3, 4],
        ];
        MeshData::new(&nodes, &elems).unwrap()
    }

    #[test]
    fn bounds_are_centroid_and_max_distance() {
        let bounds = pyramid().bounds();
        assert!((bounds.centroid - DVec3::new(0.5, 0.2, 0.5)).length() < 1e-12);
        // apex sits 0.8 above the centroid; base corners are closer
        assert!((bounds.radius - 0.8).abs() < 1e-12);
    }

    #[test]
    fn empty_bounds_are_zero() {
        let bounds = MeshBounds::from_points(&[]);
        assert_eq!(bounds.radius, 0.0);
        assert_eq!(bounds.centroid, DVec3::ZERO);
    }

    #[test]
    fn planar_nodes_are_padded() {
        let mesh = MeshData::new(&[vec![1.0, 2.0], vec![3.0, 4.0]], &[vec![0, 1]])
            .unwrap()
            .with_displacements(&[vec![0.5, 0.0], vec![0.0, -0.5]])
            .unwrap();
        assert_eq!(mesh.node_buffer(), vec![1.0, 2.0, 0.0, 3.0, 4.0, 0.0]);
        assert_eq!(
            mesh.deformed_buffer(2.0).unwrap(),
            vec![2.0, 2.0, 0.0, 3.0, 3.0, 0.0]
        );
        assert_eq!(mesh.index_buffer(), vec![0, 1]);
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert!(MeshData::new(&[vec![1.0]], &[]).is_err());
        assert!(MeshData::new(&[vec![1.0, 2.0], vec![1.0, 2.0, 3.0]], &[]).is_err());
        assert!(MeshData::new(&[vec![0.0, 0.0]], &[vec![0, 1]]).is_err());
        assert!(pyramid().with_displacements(&[vec![0.0, 0.0, 0.0]]).is_err());
        assert!(pyramid().with_field(vec![1.0; 3]).is_err());
    }

    #[test]
    fn field_location_follows_length() {
        let nodal = pyramid().with_field(vec![0.0, 0.25, 0.5, 0.75, 1.0]).unwrap();
        assert_eq!(nodal.field().unwrap().0, FieldLocation::Node);
        assert_eq!(nodal.field_range(), Some((0.0, 1.0)));

        let elemental = pyramid().with_field(vec![2.0; 8]).unwrap();
        assert_eq!(elemental.field().unwrap().0, FieldLocation::Element);
    }
}
