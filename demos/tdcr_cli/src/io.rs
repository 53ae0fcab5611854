use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use tdcr::kinematics::Backbone;
use tdcr::pso::PsoParams;

/// Write the backbone as a JSON array with one row of 16 column-major values per pose.
pub fn write_backbone_json(
    path: impl AsRef<Path>,
    backbone: &Backbone,
) -> Result<(), Box<dyn std::error::Error>> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &backbone.to_column_major())?;
    Ok(())
}

/// Read the swarm parameters from a JSON file. Missing fields keep their default.
pub fn read_params_json(path: impl AsRef<Path>) -> Result<PsoParams, Box<dyn std::error::Error>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
