//! Hanging-sheet scene description.
//!
//! A [`SceneConfig`] is what the CLI reads from TOML: solver settings, the
//! timestep, a procedural sheet and optional obstacles.
//!
//! ```toml
//! dt = 0.016666
//! steps = 120
//!
//! [solver]
//! iterations = 20
//!
//! [cloth]
//! cols = 10
//! rows = 10
//! pin = "top_corners"
//!
//! [ground]
//! height = -1.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use drape_contact::{ContactQuery, GroundPlane, SphereCollider};
use drape_mesh::generators::quad_grid;
use drape_mesh::Mesh;
use drape_types::constants::{DEFAULT_DT, DEFAULT_THICKNESS};
use drape_types::{DrapeError, DrapeResult, Scalar, Vec3, VertexId};

use crate::config::SolverConfig;

/// Which vertices of the sheet are held in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinMode {
    /// Nothing pinned; the sheet falls freely.
    None,
    /// The two top corners.
    #[default]
    TopCorners,
    /// The whole top row.
    TopEdge,
}

/// Procedural sheet in the XY plane, its top edge at `top`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClothConfig {
    pub cols: usize,
    pub rows: usize,
    pub width: Scalar,
    pub height: Scalar,
    /// Y coordinate of the top row.
    pub top: Scalar,
    /// Mass per vertex (kg).
    pub vertex_mass: Scalar,
    pub thickness: Scalar,
    pub pin: PinMode,
}

impl Default for ClothConfig {
    fn default() -> Self {
        Self {
            cols: 10,
            rows: 10,
            width: 1.0,
            height: 1.0,
            top: 1.0,
            vertex_mass: 0.01,
            thickness: DEFAULT_THICKNESS,
            pin: PinMode::TopCorners,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundConfig {
    pub height: Scalar,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereConfig {
    pub center: [Scalar; 3],
    pub radius: Scalar,
}

/// Full simulation input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Timestep (seconds).
    pub dt: Scalar,
    /// Number of steps to run.
    pub steps: u32,
    pub solver: SolverConfig,
    pub cloth: ClothConfig,
    pub ground: Option<GroundConfig>,
    pub sphere: Option<SphereConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            steps: 120,
            solver: SolverConfig::default(),
            cloth: ClothConfig::default(),
            ground: None,
            sphere: None,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> DrapeResult<()> {
        self.solver.validate()?;
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(DrapeError::InvalidConfig(format!(
                "dt must be positive and finite, got {}",
                self.dt
            )));
        }
        let c = &self.cloth;
        if c.cols == 0 || c.rows == 0 {
            return Err(DrapeError::InvalidConfig(
                "cloth must have at least one column and one row".into(),
            ));
        }
        if !(c.width > 0.0 && c.height > 0.0) {
            return Err(DrapeError::InvalidConfig(
                "cloth width and height must be positive".into(),
            ));
        }
        if !(c.thickness >= 0.0) {
            return Err(DrapeError::InvalidConfig(
                "cloth thickness must be non-negative".into(),
            ));
        }
        if let Some(s) = &self.sphere {
            if !(s.radius > 0.0) {
                return Err(DrapeError::InvalidConfig(format!(
                    "sphere radius must be positive, got {}",
                    s.radius
                )));
            }
        }
        Ok(())
    }

    pub fn from_toml_str(s: &str) -> DrapeResult<Self> {
        let scene: Self =
            toml::from_str(s).map_err(|e| DrapeError::Serialization(e.to_string()))?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn to_toml_string(&self) -> DrapeResult<String> {
        toml::to_string(self).map_err(|e| DrapeError::Serialization(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> DrapeResult<Self> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Generates the sheet, moves it into place and pins it.
    pub fn build_mesh(&self) -> DrapeResult<Mesh> {
        let c = &self.cloth;
        let mut mesh = quad_grid(c.cols, c.rows, c.width, c.height, c.vertex_mass)?
            .with_thickness(c.thickness);

        let lift = Vec3::new(0.0, c.top - 0.5 * c.height, 0.0);
        for v in mesh.vertices.iter_mut() {
            v.position += lift;
            v.predicted = v.position;
        }

        // Row 0 holds ids 0..=cols.
        let top_row = (c.cols + 1) as u32;
        let pinned: Vec<u32> = match c.pin {
            PinMode::None => Vec::new(),
            PinMode::TopCorners => vec![0, top_row - 1],
            PinMode::TopEdge => (0..top_row).collect(),
        };
        for id in pinned {
            mesh.vertices.pin(VertexId(id))?;
        }
        Ok(mesh)
    }

    /// Obstacles in a fixed order: ground, then sphere.
    pub fn colliders(&self) -> Vec<Box<dyn ContactQuery>> {
        let mut out: Vec<Box<dyn ContactQuery>> = Vec::new();
        if let Some(g) = self.ground {
            out.push(Box::new(GroundPlane::new(g.height)));
        }
        if let Some(s) = self.sphere {
            out.push(Box::new(SphereCollider::new(
                Vec3::from_array(s.center),
                s.radius,
            )));
        }
        out
    }
}
