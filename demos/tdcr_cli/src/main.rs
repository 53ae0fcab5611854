use argh::FromArgs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tdcr::kinematics::{
    actuator_to_configuration, compute_backbone, configuration_to_actuator, Configuration,
    RobotGeometry, TendonCount,
};
use tdcr::pso::{solve_inverse_kinematics_with_cancel, AngleBounds, DVec3, IkOutcome, PsoParams};

mod io;

#[derive(FromArgs)]
/// Kinematics of tendon-driven continuum robots
struct Args {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Forward(ForwardArgs),
    Actuate(ActuateArgs),
    Configure(ConfigureArgs),
    Solve(SolveArgs),
}

#[derive(FromArgs)]
/// compute the backbone curve from the configuration angles
#[argh(subcommand, name = "forward")]
struct ForwardArgs {
    /// segment length [m], once per segment
    #[argh(option)]
    seg_len: Vec<f64>,

    /// number of elements per segment, once or once per segment
    #[argh(option, default = "vec![10]")]
    elements: Vec<usize>,

    /// tendon connection radius [m]
    #[argh(option, default = "0.003")]
    tendon_radius: f64,

    /// bending angle of each segment [deg]
    #[argh(option)]
    theta: Vec<f64>,

    /// bending plane angle of each segment [deg]
    #[argh(option)]
    phi: Vec<f64>,

    /// path to write the backbone poses as json
    #[argh(option)]
    output: Option<PathBuf>,
}

#[derive(FromArgs)]
/// compute the tendon length changes from the configuration angles
#[argh(subcommand, name = "actuate")]
struct ActuateArgs {
    /// segment length [m], once per segment
    #[argh(option)]
    seg_len: Vec<f64>,

    /// number of elements per segment, once or once per segment
    #[argh(option, default = "vec![10]")]
    elements: Vec<usize>,

    /// tendon connection radius [m]
    #[argh(option, default = "0.003")]
    tendon_radius: f64,

    /// number of tendons per segment (3 or 4)
    #[argh(option, default = "3")]
    tendons: usize,

    /// bending angle of each segment [deg]
    #[argh(option)]
    theta: Vec<f64>,

    /// bending plane angle of each segment [deg]
    #[argh(option)]
    phi: Vec<f64>,

    /// tendons routed through spacer disks
    #[argh(switch)]
    partial: bool,
}

#[derive(FromArgs)]
/// compute the configuration angles from the tendon length changes
#[argh(subcommand, name = "configure")]
struct ConfigureArgs {
    /// segment length [m], once per segment
    #[argh(option)]
    seg_len: Vec<f64>,

    /// number of elements per segment, once or once per segment
    #[argh(option, default = "vec![10]")]
    elements: Vec<usize>,

    /// tendon connection radius [m]
    #[argh(option, default = "0.003")]
    tendon_radius: f64,

    /// number of tendons per segment (3 or 4)
    #[argh(option, default = "3")]
    tendons: usize,

    /// tendon length change [m], segment by segment
    #[argh(option)]
    change: Vec<f64>,

    /// tendons routed through spacer disks
    #[argh(switch)]
    partial: bool,
}

#[derive(FromArgs)]
/// search the configuration angles reaching a target position
#[argh(subcommand, name = "solve")]
struct SolveArgs {
    /// segment length [m], once per segment
    #[argh(option)]
    seg_len: Vec<f64>,

    /// number of elements per segment, once or once per segment
    #[argh(option, default = "vec![10]")]
    elements: Vec<usize>,

    /// tendon connection radius [m]
    #[argh(option, default = "0.003")]
    tendon_radius: f64,

    /// target position [m], given three times as x, y and z
    #[argh(option)]
    target: Vec<f64>,

    /// upper limit of the bending angles [deg]
    #[argh(option, default = "90.0")]
    theta_limit: f64,

    /// upper limit of the bending plane angles [deg]
    #[argh(option, default = "360.0")]
    phi_limit: f64,

    /// path to a json file with the swarm parameters
    #[argh(option)]
    config: Option<PathBuf>,

    /// seed of the random generator
    #[argh(option)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    match args.command {
        Command::Forward(args) => forward(args),
        Command::Actuate(args) => actuate(args),
        Command::Configure(args) => configure(args),
        Command::Solve(args) => solve(args),
    }
}

fn forward(args: ForwardArgs) -> Result<(), Box<dyn std::error::Error>> {
    let phi: Vec<f64> = args.phi.iter().map(|p| p.to_radians()).collect();
    let backbone = compute_backbone(
        &args.theta,
        &phi,
        &args.seg_len,
        args.tendon_radius,
        &args.elements,
    )?;

    if let Some(tip) = backbone.tip() {
        let t = tip.translation() * 1000.0;
        println!("End-effector: ({:.2}, {:.2}, {:.2}) mm", t.x, t.y, t.z);
    }

    if let Some(path) = args.output {
        io::write_backbone_json(&path, &backbone)?;
        println!("Wrote {} poses to {}", backbone.len(), path.display());
    }

    Ok(())
}

fn actuate(args: ActuateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let tendons = TendonCount::try_from(args.tendons)?;
    let geometry = RobotGeometry::new(args.seg_len, args.elements, args.tendon_radius);
    if args.theta.len() != args.phi.len() {
        return Err("theta and phi must be given once per segment".into());
    }
    let configurations: Vec<Configuration> = args
        .theta
        .iter()
        .zip(&args.phi)
        .map(|(&theta, &phi)| Configuration::new(theta, phi))
        .collect();

    let changes = configuration_to_actuator(tendons, &geometry, &configurations, args.partial)?;
    for (i, row) in changes.iter().enumerate() {
        println!("Segment {}:", i + 1);
        for (j, change) in row.iter().enumerate() {
            println!("  tendon {}: {:.4} mm", j + 1, change * 1000.0);
        }
    }

    Ok(())
}

fn configure(args: ConfigureArgs) -> Result<(), Box<dyn std::error::Error>> {
    let tendons = TendonCount::try_from(args.tendons)?;
    let geometry = RobotGeometry::new(args.seg_len, args.elements, args.tendon_radius);
    if args.change.len() % tendons.count() != 0 {
        return Err(format!(
            "expected a multiple of {} tendon length changes, got {}",
            tendons.count(),
            args.change.len()
        )
        .into());
    }
    let changes: Vec<Vec<f64>> = args
        .change
        .chunks(tendons.count())
        .map(<[f64]>::to_vec)
        .collect();

    let configurations = actuator_to_configuration(tendons, &geometry, &changes, args.partial)?;
    for (i, config) in configurations.iter().enumerate() {
        println!(
            "Segment {}: theta = {} deg, phi = {} deg",
            i + 1,
            config.theta,
            config.phi
        );
    }

    Ok(())
}

fn solve(args: SolveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let &[x, y, z] = args.target.as_slice() else {
        return Err("target must be given as exactly three coordinates".into());
    };

    let mut params = match args.config {
        Some(path) => io::read_params_json(path)?,
        None => PsoParams::default(),
    };
    if args.seed.is_some() {
        params.random_seed = args.seed;
    }

    let geometry = RobotGeometry::new(args.seg_len, args.elements, args.tendon_radius);
    let bounds = AngleBounds::from_limits(args.theta_limit, args.phi_limit);

    let cancel = Arc::new(AtomicBool::new(false));
    ctrlc::set_handler({
        let cancel = cancel.clone();
        move || {
            cancel.store(true, Ordering::Relaxed);
        }
    })?;

    log::info!("Solving inverse kinematics with {:?}", params);
    let outcome = solve_inverse_kinematics_with_cancel(
        &geometry,
        &bounds,
        DVec3::new(x, y, z),
        &params,
        &cancel,
    )?;

    match outcome {
        IkOutcome::Solved(solution) => {
            for (i, config) in solution.configurations().iter().enumerate() {
                println!(
                    "Segment {}: theta = {:.2} deg, phi = {:.2} deg",
                    i + 1,
                    config.theta,
                    config.phi
                );
            }
            println!(
                "Error: {:.4} mm after {} restarts",
                solution.error * 1000.0,
                solution.restarts
            );
        }
        IkOutcome::Unreachable => {
            println!(
                "Solution not found. Please ensure that the target is inside the reachable workspace."
            );
        }
    }

    Ok(())
}
