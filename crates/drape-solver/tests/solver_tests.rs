//! Integration tests for drape-solver.

use drape_contact::{GroundPlane, SphereCollider};
use drape_mesh::generators::{horizontal_grid, quad_grid};
use drape_mesh::{Mesh, Topology};
use drape_solver::config::SolverConfig;
use drape_solver::gauss_seidel::GaussSeidelSolver;
use drape_solver::integration;
use drape_solver::scene::{PinMode, SceneConfig};
use drape_solver::strategy::SolverStrategy;
use drape_telemetry::{EventBus, EventKind, VecSink};
use drape_types::constants::DEFAULT_DT;
use drape_types::{DrapeError, Vec3, VertexId};

fn init(solver: &mut GaussSeidelSolver, mesh: &Mesh, config: &SolverConfig) {
    let topology = Topology::build(mesh);
    solver.init(mesh, &topology, config).unwrap();
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn default_config_is_valid() {
    let config = SolverConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.gravity_vector(), Vec3::new(0.0, -9.81, 0.0));
    assert!(SolverConfig::debug().iterations < config.iterations);
    assert!(SolverConfig::high_quality().iterations > config.iterations);
}

#[test]
fn config_toml_roundtrip() {
    let config = SolverConfig {
        iterations: 7,
        damping: 0.25,
        ..SolverConfig::high_quality()
    };
    let text = config.to_toml_string().unwrap();
    let back = SolverConfig::from_toml_str(&text).unwrap();
    assert_eq!(back, config);
}

#[test]
fn partial_toml_uses_defaults() {
    let config = SolverConfig::from_toml_str("iterations = 5\n").unwrap();
    assert_eq!(config.iterations, 5);
    assert_eq!(config.stretch_stiffness, SolverConfig::default().stretch_stiffness);
}

#[test]
fn config_validation_errors() {
    let zero = SolverConfig {
        iterations: 0,
        ..Default::default()
    };
    assert!(matches!(zero.validate(), Err(DrapeError::InvalidConfig(_))));

    let nan = SolverConfig {
        gravity: [0.0, f64::NAN, 0.0],
        ..Default::default()
    };
    assert!(matches!(nan.validate(), Err(DrapeError::InvalidConfig(_))));

    let damping = SolverConfig {
        damping: 1.5,
        ..Default::default()
    };
    assert!(damping.validate().is_err());

    assert!(matches!(
        SolverConfig::from_toml_str("iterations = 0"),
        Err(DrapeError::InvalidConfig(_))
    ));
    assert!(matches!(
        SolverConfig::from_toml_str("iterations = \"many\""),
        Err(DrapeError::Serialization(_))
    ));
}

#[test]
fn config_load_missing_file() {
    let err = SolverConfig::load("/nonexistent/drape/solver.toml").unwrap_err();
    assert!(matches!(err, DrapeError::Io(_)));
}

// ─── Integration Tests ────────────────────────────────────────

#[test]
fn predict_applies_gravity() {
    let mut mesh = quad_grid(2, 2, 1.0, 1.0, 0.1).unwrap();
    let dt = DEFAULT_DT;
    let g = Vec3::new(0.0, -9.81, 0.0);
    let before = mesh.vertices.positions();

    integration::predict(&mut mesh.vertices, dt, g);

    for (v, p0) in mesh.vertices.iter().zip(before) {
        let expected = p0 + g * dt * dt;
        assert!((v.predicted - expected).length() < 1e-12);
        assert!((v.velocity - g * dt).length() < 1e-12);
        assert_eq!(v.position, p0, "committed position untouched");
    }
}

#[test]
fn predict_holds_pinned() {
    let mut mesh = quad_grid(2, 2, 1.0, 1.0, 0.1).unwrap();
    mesh.vertices.pin(VertexId(0)).unwrap();
    integration::predict(&mut mesh.vertices, DEFAULT_DT, Vec3::new(0.0, -9.81, 0.0));
    let v = &mesh.vertices[VertexId(0)];
    assert_eq!(v.predicted, v.position);
    assert_eq!(v.velocity, Vec3::ZERO);
}

#[test]
fn derive_damp_commit() {
    let mut mesh = quad_grid(1, 1, 1.0, 1.0, 2.0).unwrap();
    mesh.vertices.pin(VertexId(3)).unwrap();
    for v in mesh.vertices.iter_mut() {
        v.predicted = v.position + Vec3::new(0.0, 0.0, 0.5);
    }

    integration::derive_velocities(&mut mesh.vertices, 0.5);
    assert!((mesh.vertices[VertexId(0)].velocity - Vec3::Z).length() < 1e-12);
    assert_eq!(mesh.vertices[VertexId(3)].velocity, Vec3::ZERO);

    // 3 movable vertices, m = 2, |v| = 1
    assert!((integration::kinetic_energy(&mesh.vertices) - 3.0).abs() < 1e-12);

    integration::damp(&mut mesh.vertices, 0.5);
    assert!((mesh.vertices[VertexId(0)].velocity.z - 0.5).abs() < 1e-12);

    integration::commit(&mut mesh.vertices);
    for v in mesh.vertices.iter() {
        assert_eq!(v.position, v.predicted);
    }
}

// ─── Solver Tests ─────────────────────────────────────────────

#[test]
fn step_before_init_fails() {
    let mut mesh = quad_grid(2, 2, 1.0, 1.0, 0.1).unwrap();
    let mut solver = GaussSeidelSolver::new();
    let err = solver.step(&mut mesh, DEFAULT_DT).unwrap_err();
    assert!(matches!(err, DrapeError::InvalidConfig(_)));
}

#[test]
fn init_rejects_invalid_config() {
    let mesh = quad_grid(2, 2, 1.0, 1.0, 0.1).unwrap();
    let topology = Topology::build(&mesh);
    let config = SolverConfig {
        iterations: 0,
        ..Default::default()
    };
    let mut solver = GaussSeidelSolver::new();
    assert!(solver.init(&mesh, &topology, &config).is_err());
}

#[test]
fn step_rejects_bad_dt() {
    let mut mesh = quad_grid(2, 2, 1.0, 1.0, 0.1).unwrap();
    let mut solver = GaussSeidelSolver::new();
    init(&mut solver, &mesh, &SolverConfig::default());
    assert!(solver.step(&mut mesh, 0.0).is_err());
    assert!(solver.step(&mut mesh, f64::NAN).is_err());
}

#[test]
fn init_builds_persistent_constraints() {
    let mesh = quad_grid(2, 2, 1.0, 1.0, 0.1).unwrap();
    let mut solver = GaussSeidelSolver::new();
    init(&mut solver, &mesh, &SolverConfig::default());
    // 16 edges + 8 interior edges
    assert_eq!(solver.constraints().persistent().len(), 24);
    assert!(solver.constraints().transient().is_empty());
    assert_eq!(solver.name(), "gauss_seidel_pbd");
}

#[test]
fn rest_state_without_gravity_stays_put() {
    let mut mesh = quad_grid(3, 3, 1.0, 1.0, 0.1).unwrap();
    let before = mesh.vertices.positions();
    let config = SolverConfig {
        gravity: [0.0; 3],
        ..Default::default()
    };
    let mut solver = GaussSeidelSolver::new();
    init(&mut solver, &mesh, &config);

    for _ in 0..5 {
        let result = solver.step(&mut mesh, DEFAULT_DT).unwrap();
        assert_eq!(result.iterations, config.iterations);
        assert_eq!(result.final_residual, 0.0);
    }
    assert_eq!(mesh.vertices.positions(), before);
}

#[test]
fn pinned_vertices_never_move() {
    let mut mesh = quad_grid(4, 4, 1.0, 1.0, 0.01).unwrap();
    mesh.vertices.pin(VertexId(0)).unwrap();
    mesh.vertices.pin(VertexId(4)).unwrap();
    let anchors = [mesh.vertices[VertexId(0)].position, mesh.vertices[VertexId(4)].position];

    let mut solver = GaussSeidelSolver::new();
    init(&mut solver, &mesh, &SolverConfig::default());

    for _ in 0..100 {
        solver.step(&mut mesh, DEFAULT_DT).unwrap();
        assert_eq!(mesh.vertices[VertexId(0)].position, anchors[0]);
        assert_eq!(mesh.vertices[VertexId(4)].position, anchors[1]);
    }

    // The sheet hangs from its corners instead of falling away.
    for v in mesh.vertices.iter() {
        assert!(v.position.is_finite());
        assert!(v.position.y > -2.0, "vertex {:?} fell to {}", v.id, v.position.y);
    }
    assert_eq!(solver.timestep(), 100);
    assert!((solver.sim_time() - 100.0 * DEFAULT_DT).abs() < 1e-9);
}

#[test]
fn sheet_rests_on_ground() {
    let mut mesh = horizontal_grid(4, 4, 1.0, 1.0, 0.1, 0.01).unwrap();
    let surface = mesh.thickness;

    let mut solver = GaussSeidelSolver::new().with_collider(GroundPlane::new(0.0));
    init(&mut solver, &mesh, &SolverConfig::default());

    let mut touched = false;
    for _ in 0..60 {
        let result = solver.step(&mut mesh, DEFAULT_DT).unwrap();
        touched |= result.contacts > 0;
        for v in mesh.vertices.iter() {
            assert!(
                v.position.y >= surface - 1e-9,
                "vertex {:?} below ground: {}",
                v.id,
                v.position.y
            );
        }
    }
    assert!(touched);

    for v in mesh.vertices.iter() {
        assert!((v.position.y - surface).abs() < 1e-9);
        assert!(v.velocity.y.abs() < 1e-9, "normal velocity removed");
    }
}

#[test]
fn sphere_generates_contacts() {
    let mut mesh = horizontal_grid(6, 6, 1.0, 1.0, 0.6, 0.01).unwrap();
    let mut solver =
        GaussSeidelSolver::new().with_collider(SphereCollider::new(Vec3::ZERO, 0.5));
    init(&mut solver, &mesh, &SolverConfig::default());

    let mut max_contacts = 0;
    for _ in 0..60 {
        let result = solver.step(&mut mesh, DEFAULT_DT).unwrap();
        max_contacts = max_contacts.max(result.contacts);
        assert!(result.final_residual.is_finite());
    }
    assert!(max_contacts > 0);
    for v in mesh.vertices.iter() {
        assert!(v.position.is_finite());
    }
}

#[test]
fn telemetry_events_in_order() {
    let mut mesh = quad_grid(2, 2, 1.0, 1.0, 0.1).unwrap();
    let sink = VecSink::new();
    let events = sink.events();
    let mut bus = EventBus::new();
    bus.add_sink(Box::new(sink));

    let config = SolverConfig {
        iterations: 3,
        ..Default::default()
    };
    let mut solver = GaussSeidelSolver::new().with_event_bus(bus);
    init(&mut solver, &mesh, &config);
    solver.step(&mut mesh, DEFAULT_DT).unwrap();

    {
        let got = events.lock().unwrap();
        assert_eq!(got.len(), 8);
        assert!(got.iter().all(|e| e.timestep == 0));
        assert!(matches!(got[0].kind, EventKind::TimestepBegin { sim_time } if sim_time == 0.0));
        assert!(matches!(got[1].kind, EventKind::ContactDetection { contact_count: 0, .. }));
        for (i, e) in got[2..5].iter().enumerate() {
            assert!(
                matches!(e.kind, EventKind::SolverIteration { iteration, .. } if iteration == i as u32)
            );
        }
        assert!(matches!(got[5].kind, EventKind::Convergence { iterations: 3, .. }));
        assert!(matches!(got[6].kind, EventKind::Energy { .. }));
        assert!(matches!(got[7].kind, EventKind::TimestepEnd { .. }));
    }

    solver.step(&mut mesh, DEFAULT_DT).unwrap();
    let got = events.lock().unwrap();
    assert_eq!(got.len(), 16);
    assert_eq!(got[8].timestep, 1);
}

#[test]
fn reinit_resets_clock() {
    let mut mesh = quad_grid(2, 2, 1.0, 1.0, 0.1).unwrap();
    let mut solver = GaussSeidelSolver::new();
    init(&mut solver, &mesh, &SolverConfig::debug());
    solver.step(&mut mesh, DEFAULT_DT).unwrap();
    assert_eq!(solver.timestep(), 1);

    init(&mut solver, &mesh, &SolverConfig::debug());
    assert_eq!(solver.timestep(), 0);
    assert_eq!(solver.sim_time(), 0.0);
}

// ─── Scene Tests ──────────────────────────────────────────────

#[test]
fn default_scene_builds_hanging_sheet() {
    let scene = SceneConfig::default();
    assert!(scene.validate().is_ok());
    let mesh = scene.build_mesh().unwrap();

    assert_eq!(mesh.vertex_count(), 121);
    let pinned: Vec<u32> = mesh
        .vertices
        .iter()
        .filter(|v| v.is_pinned())
        .map(|v| v.id.0)
        .collect();
    assert_eq!(pinned, vec![0, 10]);
    assert!((mesh.vertices[VertexId(0)].position.y - 1.0).abs() < 1e-12);
    assert!((mesh.vertices[VertexId(120)].position.y).abs() < 1e-12);
    assert!(scene.colliders().is_empty());
}

#[test]
fn scene_from_toml() {
    let text = r#"
        dt = 0.01
        steps = 5

        [solver]
        iterations = 8

        [cloth]
        cols = 3
        rows = 2
        pin = "top_edge"

        [ground]
        height = -0.5

        [sphere]
        center = [0.0, 0.0, 0.3]
        radius = 0.2
    "#;
    let scene = SceneConfig::from_toml_str(text).unwrap();
    assert_eq!(scene.steps, 5);
    assert_eq!(scene.solver.iterations, 8);
    assert_eq!(scene.cloth.pin, PinMode::TopEdge);

    let mesh = scene.build_mesh().unwrap();
    assert_eq!(mesh.vertices.iter().filter(|v| v.is_pinned()).count(), 4);

    let names: Vec<String> = scene.colliders().iter().map(|c| c.name().to_string()).collect();
    assert_eq!(names, vec!["ground_plane", "sphere_collider"]);

    let back = SceneConfig::from_toml_str(&scene.to_toml_string().unwrap()).unwrap();
    assert_eq!(back, scene);
}

#[test]
fn scene_validation_errors() {
    let mut scene = SceneConfig::default();
    scene.dt = -1.0;
    assert!(matches!(scene.validate(), Err(DrapeError::InvalidConfig(_))));

    let mut scene = SceneConfig::default();
    scene.cloth.cols = 0;
    assert!(scene.validate().is_err());

    assert!(SceneConfig::from_toml_str("[sphere]\ncenter = [0.0, 0.0, 0.0]\nradius = 0.0\n").is_err());
}
