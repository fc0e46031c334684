use crate::core::conflicts::DEFAULT_THRESHOLD_KM;
use crate::core::{ColumnMapping, ConfigProvider, OutputFormat, StrategyKind};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "proximity-slots")]
#[command(about = "Assign separate days to entities that are too close to each other")]
pub struct CliConfig {
    /// CSV file with one entity per row
    #[arg(long, default_value = "data2.csv")]
    pub input: String,

    /// Directory for report files
    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Pairs closer than this many kilometers conflict
    #[arg(long, default_value_t = DEFAULT_THRESHOLD_KM)]
    pub threshold_km: f64,

    #[arg(long, value_enum, default_value = "largest_first")]
    pub strategy: StrategyKind,

    /// Output files to write
    #[arg(long, value_enum, value_delimiter = ',', default_value = "text")]
    pub formats: Vec<OutputFormat>,

    #[arg(long, default_value = "Team")]
    pub name_column: String,

    #[arg(long, default_value = "Latitude")]
    pub latitude_column: String,

    #[arg(long, default_value = "Longitude")]
    pub longitude_column: String,

    /// Reject latitudes outside [-90, 90] and longitudes outside [-180, 180]
    #[arg(long)]
    pub strict_coordinates: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn columns(&self) -> ColumnMapping {
        ColumnMapping {
            name: self.name_column.clone(),
            latitude: self.latitude_column.clone(),
            longitude: self.longitude_column.clone(),
        }
    }

    fn threshold_km(&self) -> f64 {
        self.threshold_km
    }

    fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    fn strict_coordinates(&self) -> bool {
        self.strict_coordinates
    }

    fn output_formats(&self) -> Vec<OutputFormat> {
        self.formats.clone()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_csv_path("input", &self.input)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_positive_finite("threshold_km", self.threshold_km)?;
        validation::validate_non_empty_string("name_column", &self.name_column)?;
        validation::validate_non_empty_string("latitude_column", &self.latitude_column)?;
        validation::validate_non_empty_string("longitude_column", &self.longitude_column)?;
        Ok(())
    }
}
