//! Roundchain debug runner: builds capsule chains for a few reference
//! shapes and prints the resulting segments.
//!
//! Usage:
//! ```text
//! cargo run --example debug                         # all shapes, default params
//! cargo run --example debug -- blob                 # one shape
//! cargo run --example debug -- blob preset.json     # params from a JSON preset
//! RUST_LOG=roundchain=trace cargo run --example debug -- square
//! ```

use roundchain::math::{Point2, Vector2};
use roundchain::{CapsuleChain2D, ChainParams, ControlPoint, RoundchainError};

const KAPPA: f64 = 0.552_284_749_830_793_4;

fn circle(r: f64, half_thickness: f64) -> Vec<ControlPoint> {
    let k = KAPPA * r;
    vec![
        ControlPoint::new(
            Point2::new(r, 0.0),
            Vector2::new(0.0, k),
            Vector2::new(0.0, -k),
            half_thickness,
        ),
        ControlPoint::new(
            Point2::new(0.0, r),
            Vector2::new(-k, 0.0),
            Vector2::new(k, 0.0),
            half_thickness,
        ),
        ControlPoint::new(
            Point2::new(-r, 0.0),
            Vector2::new(0.0, -k),
            Vector2::new(0.0, k),
            half_thickness,
        ),
        ControlPoint::new(
            Point2::new(0.0, -r),
            Vector2::new(k, 0.0),
            Vector2::new(-k, 0.0),
            half_thickness,
        ),
    ]
}

fn square(side: f64) -> Vec<ControlPoint> {
    vec![
        ControlPoint::corner(Point2::new(0.0, 0.0), 0.0),
        ControlPoint::corner(Point2::new(side, 0.0), 0.0),
        ControlPoint::corner(Point2::new(side, side), 0.0),
        ControlPoint::corner(Point2::new(0.0, side), 0.0),
    ]
}

/// Lumpy platform: smooth top, tapering thickness toward the ends.
fn blob() -> Vec<ControlPoint> {
    vec![
        ControlPoint::new(
            Point2::new(0.0, 0.0),
            Vector2::new(1.5, -0.5),
            Vector2::new(-0.5, 1.0),
            0.1,
        ),
        ControlPoint::new(
            Point2::new(6.0, -0.5),
            Vector2::new(1.5, 0.5),
            Vector2::new(-1.5, -0.5),
            0.4,
        ),
        ControlPoint::new(
            Point2::new(8.0, 1.5),
            Vector2::new(-1.0, 1.5),
            Vector2::new(0.5, -1.0),
            0.2,
        ),
        ControlPoint::new(
            Point2::new(3.0, 2.5),
            Vector2::new(-2.0, 0.0),
            Vector2::new(2.0, 0.0),
            0.6,
        ),
    ]
}

fn shapes() -> Vec<(&'static str, Vec<ControlPoint>)> {
    vec![
        ("circle", circle(2.0, 0.2)),
        ("square", square(4.0)),
        ("blob", blob()),
    ]
}

fn load_params(path: Option<&String>) -> ChainParams {
    let Some(path) = path else {
        return ChainParams::default();
    };
    match std::fs::read_to_string(path).map(|text| serde_json::from_str(&text)) {
        Ok(Ok(params)) => params,
        Ok(Err(err)) => {
            tracing::warn!(%path, %err, "invalid preset, using defaults");
            ChainParams::default()
        }
        Err(err) => {
            tracing::warn!(%path, %err, "unreadable preset, using defaults");
            ChainParams::default()
        }
    }
}

fn main() -> Result<(), RoundchainError> {
    // Default: WARN for everything, INFO for roundchain.
    // Override with RUST_LOG env var (e.g. RUST_LOG=roundchain=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("roundchain=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let params = load_params(args.get(1));

    for (name, points) in shapes() {
        if args.first().is_some_and(|wanted| wanted != name) {
            continue;
        }
        let out = CapsuleChain2D::new(points, params).execute()?;
        println!(
            "{name}: {} samples, {} selected, {} clusters",
            out.ring.len(),
            out.selected.len(),
            out.cluster_count
        );
        for (i, segment) in out.segments.iter().enumerate() {
            println!(
                "  segment {i}: radius {:.4}, {} points, {} edges{}",
                segment.radius,
                segment.points.len(),
                segment.edge_count(),
                if segment.closed { ", closed" } else { "" }
            );
        }
    }
    Ok(())
}
