use bridge_core::{convert_message, AdtGenerator, AdtRegistration, CoreConfig, InsuranceInfo};
use clap::{Parser, Subcommand};
use hl7_v2::MessageInfo;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "hl7-bridge")]
#[command(about = "HL7 v2 ADT <-> FHIR R4 bridge CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an HL7 message file to FHIR Patient/Coverage JSON
    Convert {
        /// Path to the HL7 message
        file: PathBuf,
        /// Persisted Patient id to use as the Coverage beneficiary
        #[arg(long)]
        patient_id: Option<String>,
    },
    /// List the segment codes of an HL7 message file
    Inspect {
        /// Path to the HL7 message
        file: PathBuf,
    },
    /// Generate an ADT^A04 registration message
    Generate {
        /// Last name
        #[arg(long)]
        last: String,
        /// First name
        #[arg(long)]
        first: String,
        /// Date of birth (MM/DD/YYYY)
        #[arg(long)]
        dob: String,
        /// Gender ("Male"/"M" codes as M, anything else as F)
        #[arg(long)]
        gender: String,
        /// Medical record number (synthesized when omitted)
        #[arg(long)]
        mrn: Option<String>,
        /// Insurance company name
        #[arg(long, requires = "member_id")]
        insurance_name: Option<String>,
        /// Insurance member id
        #[arg(long, requires = "insurance_name")]
        member_id: Option<String>,
        /// Insurance plan name
        #[arg(long)]
        plan: Option<String>,
        /// Insurance group number
        #[arg(long)]
        group_number: Option<String>,
    },
    /// Find a Patient by identifier in a FHIR search Bundle
    Lookup {
        /// Path to the Bundle JSON
        bundle: PathBuf,
        /// Identifier value to match
        identifier: String,
    },
}

fn main() -> CliResult<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bridge_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'hl7-bridge --help' for commands");
        return Ok(());
    };

    let config = CoreConfig::from_env_values(|key| std::env::var(key).ok())?;
    println!("{}", run(command, config)?);

    Ok(())
}

fn run(command: Commands, config: CoreConfig) -> CliResult<String> {
    match command {
        Commands::Convert { file, patient_id } => {
            let raw = read_file(&file)?;
            let mut conversion = convert_message(&raw)?;
            if conversion.is_empty() {
                return Err("No patient data found in HL7 message".into());
            }
            if let Some(id) = patient_id.as_deref() {
                conversion.resolve_patient_id(id);
            }
            Ok(serde_json::to_string_pretty(&conversion.to_json()?)?)
        }
        Commands::Inspect { file } => {
            let info = MessageInfo::inspect(&read_file(&file)?)?;
            Ok(format!(
                "Segments ({}): {}",
                info.segment_count,
                info.segments.join(", ")
            ))
        }
        Commands::Generate {
            last,
            first,
            dob,
            gender,
            mrn,
            insurance_name,
            member_id,
            plan,
            group_number,
        } => {
            let insurance = match (insurance_name, member_id) {
                (Some(name), Some(member_id)) => Some(InsuranceInfo {
                    name,
                    member_id,
                    plan,
                    group_number,
                }),
                _ => None,
            };
            let registration = AdtRegistration {
                mrn,
                last_name: last,
                first_name: first,
                dob,
                gender,
                insurance,
            };
            let message = AdtGenerator::new(config).generate(&registration)?;
            // One segment per line for the terminal.
            Ok(message.replace('\r', "\n"))
        }
        Commands::Lookup { bundle, identifier } => {
            let json = read_file(&bundle)?;
            match fhir::bundle::find_patient_by_identifier(&json, &identifier)? {
                Some(patient) => Ok(serde_json::to_string_pretty(&patient)?),
                None => Ok(format!("No patient found with identifier {identifier}")),
            }
        }
    }
}

fn read_file(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()).into())
}
