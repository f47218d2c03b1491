use std::path::PathBuf;

use glam::DVec3;
use trussview::{
    BoundsProvider, CameraConfig, DisplayState, FieldLocation, MeshData,
    ProjectionMode, ViewerBuilder, ViewerOptions,
};

/// Square-based pyramid: four base bars and four bars to the apex.
fn example_truss() -> trussview::Result<MeshData> {
    let nodes = [
        vec![0.0, 0.0, 0.0],
        vec![1.0, 0.0, 0.0],
        vec![1.0, 0.0, 1.0],
        vec![0.0, 0.0, 1.0],
        vec![0.5, 1.0, 0.5],
    ];
    let elements = [
        vec![0, 1],
        vec![1, 2],
        vec![2, 3],
        vec![3, 0],
        vec![0, 4],
        vec![1, 4],
        vec![2, 4],
        vec![3, 4],
    ];
    let field = (0..nodes.len()).map(|i| i as f64 / 4.0).collect();
    MeshData::new(&nodes, &elements)?
        .with_displacements(&vec![vec![0.0; 3]; nodes.len()])?
        .with_field(field)
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> trussview::Result<()> {
    let options = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            log::info!("loading options from {}", path.display());
            ViewerOptions::load(&path)?
        }
        None => ViewerOptions::default(),
    };

    let mesh = example_truss()?;
    if let Some((FieldLocation::Node, _)) = mesh.field() {
        log::info!("field range: {:?}", mesh.field_range());
    }
    let bounds = mesh.bounds();
    log::info!(
        "truss: {} nodes, {} elements, centroid {}, radius {:.3}",
        mesh.nodes().len(),
        mesh.elements().len(),
        bounds.centroid,
        bounds.radius
    );

    let camera = CameraConfig {
        position: DVec3::ONE,
        target: bounds.centroid,
        up: DVec3::Y,
        mode: ProjectionMode::Perspective,
        fov: 45f64.to_radians(),
        ortho_size: 1.0,
        near: 0.1,
        far: 10.0,
    };
    let initial_view = options.initial_view.clone().unwrap_or_else(|| "Iso".to_owned());

    ViewerBuilder::new(camera)
        .with_options(options)
        .bounds_from(&mesh)
        .initial_view(initial_view)
        .run(DisplayState::new(0), "trussview")
}
