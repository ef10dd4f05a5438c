use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use thermal_envelope::io::extract_all_from_idf_file;
use thermal_envelope::{
    Error as LibError, HasName, OpaqueConstruction, ProfileConditions, TemperatureProfile,
    temperature_profiles,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Steady-state heat transfer through opaque constructions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the opaque constructions found in an IDF file.
    List {
        /// Path to the IDF file.
        idf: PathBuf,
    },
    /// Compute the temperature profile through one construction.
    Profile {
        /// Path to the IDF file.
        idf: PathBuf,
        /// Name of the construction to solve.
        #[arg(long)]
        construction: String,
        #[command(flatten)]
        conditions: ConditionArgs,
        /// Print the profile as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Boundary condition overrides. Unset flags keep the file or default value.
#[derive(Args, Debug)]
struct ConditionArgs {
    /// JSON file with boundary conditions.
    #[arg(long = "conditions", value_name = "FILE")]
    conditions_file: Option<PathBuf>,
    /// Outdoor air temperature (°C).
    #[arg(long, allow_hyphen_values = true)]
    outside: Option<f64>,
    /// Indoor air temperature (°C).
    #[arg(long, allow_hyphen_values = true)]
    inside: Option<f64>,
    /// Outdoor wind speed (m/s).
    #[arg(long)]
    wind: Option<f64>,
    /// Surface height (m).
    #[arg(long)]
    height: Option<f64>,
    /// Surface tilt (degrees, 0 to 180).
    #[arg(long)]
    angle: Option<f64>,
    /// Air pressure (Pa).
    #[arg(long)]
    pressure: Option<f64>,
}

impl ConditionArgs {
    fn resolve(&self) -> Result<ProfileConditions> {
        let mut conditions = match &self.conditions_file {
            Some(path) => read_conditions(path)?,
            None => ProfileConditions::new(),
        };
        let overrides = [
            (self.outside, &mut conditions.outside_temperature),
            (self.inside, &mut conditions.inside_temperature),
            (self.wind, &mut conditions.wind_speed),
            (self.height, &mut conditions.height),
            (self.angle, &mut conditions.angle),
            (self.pressure, &mut conditions.pressure),
        ];
        for (value, field) in overrides {
            if let Some(v) = value {
                *field = v;
            }
        }
        Ok(conditions)
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::List { idf } => handle_list(&idf),
        Command::Profile {
            idf,
            construction,
            conditions,
            json,
        } => handle_profile(&idf, &construction, &conditions.resolve()?, json),
    }
}

fn load_constructions(path: &Path) -> Result<Vec<OpaqueConstruction>> {
    let (constructions, materials) = extract_all_from_idf_file(path)
        .with_context(|| format!("failed to read constructions from {}", path.display()))?;
    info!(
        "Loaded {} constructions and {} materials from {}",
        constructions.len(),
        materials.len(),
        path.display()
    );
    Ok(constructions)
}

fn read_conditions(path: &Path) -> Result<ProfileConditions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse conditions from {}", path.display()))
}

fn handle_list(path: &Path) -> Result<()> {
    let constructions = load_constructions(path)?;
    let conditions = ProfileConditions::new();
    let profiles = temperature_profiles(&constructions, &conditions);

    println!(
        "{:<40} {:>10} {:>10} {:>10} {:>12}",
        "Construction", "R [m2K/W]", "U [W/m2K]", "t [m]", "R @ NFRC"
    );
    for (c, profile) in constructions.iter().zip(profiles) {
        let r_nfrc = match profile {
            Ok(p) => format!("{:.3}", p.r_factor()),
            Err(e) => {
                tracing::warn!("Profile of {} failed: {e}", c.get_name());
                "-".to_string()
            }
        };
        println!(
            "{:<40} {:>10.3} {:>10.3} {:>10.4} {:>12}",
            c.get_name(),
            c.r_value(),
            c.u_factor(),
            c.thickness(),
            r_nfrc
        );
    }
    Ok(())
}

fn handle_profile(
    path: &Path,
    name: &str,
    conditions: &ProfileConditions,
    json: bool,
) -> Result<()> {
    let constructions = load_constructions(path)?;
    let construction = constructions
        .iter()
        .find(|c| c.get_name() == name)
        .ok_or_else(|| LibError::Lookup {
            name: name.to_string(),
            source_name: path.display().to_string(),
        })?;
    let profile = construction
        .temperature_profile(conditions)
        .with_context(|| format!("failed to solve {name}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        print_profile(construction, &profile);
    }
    Ok(())
}

fn print_profile(construction: &OpaqueConstruction, profile: &TemperatureProfile) {
    let mut labels = vec!["outside air".to_string(), "exterior surface".to_string()];
    let names = construction.layer_names();
    for pair in names.windows(2) {
        labels.push(format!("{} | {}", pair[0], pair[1]));
    }
    labels.push("interior surface".to_string());
    labels.push("inside air".to_string());

    let mut resistance_labels = vec!["exterior film".to_string()];
    resistance_labels.extend(names.iter().map(|n| n.to_string()));
    resistance_labels.push("interior film".to_string());

    println!("{}", construction.get_name());
    println!("{:<50} {:>10}", "Node", "T [°C]");
    for (label, t) in labels.iter().zip(profile.temperatures()) {
        println!("{label:<50} {t:>10.2}");
    }
    println!();
    println!("{:<50} {:>10}", "Resistance", "[m2K/W]");
    for (label, r) in resistance_labels.iter().zip(profile.resistances()) {
        println!("{label:<50} {r:>10.4}");
    }
    println!();
    println!("R-factor: {:.4} m2K/W", profile.r_factor());
    println!("Heat flux: {:.2} W/m2", profile.heat_flux());
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
