use clap::Parser;

/// This program computes the priorities of alternatives from pairwise comparisons (AHP).
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON configuration file describing the computation.
    /// For more information about the file format, read the manual of the ahp_priorities crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference file containing the expected priorities in JSON format. If provided, pwtab will
    /// check that the computed output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the priorities will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) The Excel workbook with the judgments. Setting this option overrides
    /// the input file that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default info) The name of the worksheet that describes the groups of users.
    #[clap(long, value_parser)]
    pub info_sheet: Option<String>,

    /// (default 3) The ratio of a moderate preference ('>' and '<').
    #[clap(long, value_parser)]
    pub moderate: Option<f64>,

    /// (default 9) The ratio of a strong preference ('>>' and '<<').
    #[clap(long, value_parser)]
    pub strong: Option<f64>,

    /// (default 1e-8) The convergence tolerance of the eigenvector computation.
    #[clap(long, value_parser)]
    pub tolerance: Option<f64>,

    /// (default 10000) The maximum number of iterations of the eigenvector computation.
    #[clap(long, value_parser)]
    pub max_iterations: Option<u32>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
