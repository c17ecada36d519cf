//! CLI command implementations.

use serde::Serialize;

use drape_mesh::{Mesh, Topology};
use drape_solver::{GaussSeidelSolver, SceneConfig, SolverStrategy, StepResult};
use drape_telemetry::{EventBus, TracingSink};

/// Final state written by `simulate --output`.
#[derive(Debug, Serialize)]
struct SimulationReport {
    steps: u32,
    sim_time: f64,
    final_residual: f64,
    contacts: usize,
    total_wall_time: f64,
    positions: Vec<[f64; 3]>,
    pinned: Vec<u32>,
}

impl SimulationReport {
    fn new(mesh: &Mesh, solver: &GaussSeidelSolver, last: Option<&StepResult>, total_wall_time: f64) -> Self {
        Self {
            steps: solver.timestep(),
            sim_time: solver.sim_time(),
            final_residual: last.map_or(0.0, |r| r.final_residual),
            contacts: last.map_or(0, |r| r.contacts),
            total_wall_time,
            positions: mesh.vertices.iter().map(|v| v.position.to_array()).collect(),
            pinned: mesh
                .vertices
                .iter()
                .filter(|v| v.is_pinned())
                .map(|v| v.id.0)
                .collect(),
        }
    }
}

fn load_scene(config_path: Option<&str>) -> Result<SceneConfig, Box<dyn std::error::Error>> {
    let scene = match config_path {
        Some(path) => SceneConfig::load(path).map_err(|e| format!("{path}: {e}"))?,
        None => SceneConfig::default(),
    };
    Ok(scene)
}

/// Run a scene to completion.
pub fn simulate(
    config_path: Option<&str>,
    steps: Option<u32>,
    output_path: Option<&str>,
    telemetry: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let scene = load_scene(config_path)?;
    let steps = steps.unwrap_or(scene.steps);

    let mut mesh = scene.build_mesh()?;
    let topology = Topology::build(&mesh);

    let mut solver = GaussSeidelSolver::new();
    for collider in scene.colliders() {
        solver.add_collider(collider);
    }
    if telemetry {
        let mut bus = EventBus::new();
        bus.add_sink(Box::new(TracingSink::new(tracing::Level::INFO)));
        solver = solver.with_event_bus(bus);
    }
    solver.init(&mesh, &topology, &scene.solver)?;

    eprintln!("Drape Simulation");
    eprintln!("────────────────");
    eprintln!("Config:      {}", config_path.unwrap_or("<built-in hanging sheet>"));
    eprintln!(
        "Mesh:        {} verts, {} tris, {} constraints",
        mesh.vertex_count(),
        mesh.triangle_count(),
        solver.constraints().len()
    );
    eprintln!("Steps:       {steps} (dt = {:.5}s)", scene.dt);

    let mut last = None;
    let mut total_wall_time = 0.0;
    for _ in 0..steps {
        let result = solver.step(&mut mesh, scene.dt)?;
        total_wall_time += result.wall_time;
        last = Some(result);
    }
    if let Some(bus) = solver.event_bus_mut() {
        bus.finish();
    }

    let report = SimulationReport::new(&mesh, &solver, last.as_ref(), total_wall_time);
    eprintln!("Residual:    {:.3e}", report.final_residual);
    eprintln!("Contacts:    {}", report.contacts);
    eprintln!("Wall time:   {:.3}s", report.total_wall_time);

    if let Some(path) = output_path {
        let json = serde_json::to_string_pretty(&report)?;
        if path == "-" {
            println!("{json}");
        } else {
            std::fs::write(path, json)?;
            eprintln!("State written to: {path}");
        }
    }

    Ok(())
}

/// Check a scene config and the mesh it describes.
pub fn validate(config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let scene = load_scene(Some(config_path))?;
    let mesh = scene.build_mesh()?;
    let topology = Topology::build(&mesh);

    println!("Config OK: {config_path}");
    println!("  Vertices:       {}", mesh.vertex_count());
    println!("  Triangles:      {}", mesh.triangle_count());
    println!("  Edges:          {}", topology.edges.len());
    println!("  Interior edges: {}", topology.interior_edges.len());
    println!("  Colliders:      {}", scene.colliders().len());
    Ok(())
}
