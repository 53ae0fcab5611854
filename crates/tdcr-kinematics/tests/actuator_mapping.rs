use approx::assert_abs_diff_eq;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tdcr_kinematics::{
    actuator_to_configuration, configuration_to_actuator, Configuration, KinematicsError,
    RobotGeometry, TendonCount,
};

#[test]
fn test_equal_tendon_lengths() -> Result<(), KinematicsError> {
    let geometry = RobotGeometry::new(vec![0.025], vec![1], 0.003);
    let configs =
        actuator_to_configuration(TendonCount::Three, &geometry, &[vec![0.0, 0.0, 0.0]], false)?;
    assert_eq!(configs, vec![Configuration::new(0.0, 0.0)]);
    Ok(())
}

fn assert_round_trip(tendons: TendonCount, seed: u64) -> Result<(), KinematicsError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let num_seg = 3;
    let geometry = RobotGeometry::new(vec![0.025, 0.02, 0.03], vec![10], 0.003);

    for _ in 0..200 {
        let configs: Vec<Configuration> = (0..num_seg)
            .map(|_| Configuration::new(rng.random_range(0.0..=90.0), rng.random_range(0.0..360.0)))
            .collect();

        let changes = configuration_to_actuator(tendons, &geometry, &configs, false)?;
        let recovered = actuator_to_configuration(tendons, &geometry, &changes, false)?;

        for (expected, actual) in configs.iter().zip(&recovered) {
            assert_abs_diff_eq!(expected.theta, actual.theta, epsilon = 1e-4);
            assert_abs_diff_eq!(expected.phi, actual.phi, epsilon = 1e-4);
        }
    }
    Ok(())
}

#[test]
fn test_round_trip_three_tendons() -> Result<(), KinematicsError> {
    assert_round_trip(TendonCount::Three, 42)
}

#[test]
fn test_round_trip_four_tendons() -> Result<(), KinematicsError> {
    assert_round_trip(TendonCount::Four, 1234)
}

#[test]
fn test_partial_path_shortens_bent_tendons() -> Result<(), KinematicsError> {
    let geometry = RobotGeometry::new(vec![0.025], vec![5], 0.003);
    let configs = [Configuration::new(60.0, 0.0)];
    let full = configuration_to_actuator(TendonCount::Four, &geometry, &configs, false)?;
    let partial = configuration_to_actuator(TendonCount::Four, &geometry, &configs, true)?;

    // chords along the spacer disks are shorter than the arcs
    for (f, p) in full[0].iter().zip(&partial[0]) {
        assert!(p < f);
    }
    Ok(())
}

#[test]
fn test_partial_path_mapping_chain() -> Result<(), KinematicsError> {
    // the correction rescales the tendon lengths only, so mapping back does not
    // recover the input angles
    let geometry = RobotGeometry::new(vec![0.025], vec![5], 0.003);
    let cases = [
        (Configuration::new(60.0, 30.0), Configuration::new(30.521508, 80.172498)),
        (Configuration::new(45.0, 90.0), Configuration::new(45.160341, 274.696466)),
    ];

    for (config, expected) in cases {
        let changes = configuration_to_actuator(TendonCount::Three, &geometry, &[config], true)?;
        let recovered = actuator_to_configuration(TendonCount::Three, &geometry, &changes, true)?;
        assert_abs_diff_eq!(recovered[0].theta, expected.theta, epsilon = 1e-6);
        assert_abs_diff_eq!(recovered[0].phi, expected.phi, epsilon = 1e-6);
    }
    Ok(())
}
