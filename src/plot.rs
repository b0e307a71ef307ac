use super::VERSION;
use clap::{App, Arg};
use std::path::PathBuf;

/// Recognized options for the overlay plot; the defaults reproduce the
/// historical fixed paths and record layout.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub inputs: Vec<PathBuf>,
    pub reference_path: PathBuf,
    pub output_path: PathBuf,
    pub stride: usize,
    pub xs_token_index: i64,
    pub strict: bool,
}

/// Takes the CLI arguments that control the cross-section overlay plot.
pub fn parse_cli() -> PlotConfig {
    let arg_inputs = Arg::with_name("input_files")
        .help("input files with fixed-stride cross-section records")
        .multiple(true);
    let arg_reference = Arg::with_name("reference_file")
        .help("reference dataset, whitespace-delimited numeric table")
        .short("r")
        .long("reference")
        .takes_value(true)
        .default_value(super::DEFAULT_REFERENCE_FILE);
    let arg_output = Arg::with_name("output_file")
        .help("name of the output image file")
        .short("o")
        .long("output")
        .takes_value(true)
        .default_value(super::DEFAULT_OUTPUT_FILE);
    let arg_stride = Arg::with_name("stride")
        .help("number of lines per record block in the input files")
        .short("s")
        .long("stride")
        .takes_value(true)
        .default_value("8");
    let arg_column = Arg::with_name("xs_token_index")
        .help("token index of the cross section on its record line, negative counts from the end")
        .short("c")
        .long("column")
        .takes_value(true)
        .allow_hyphen_values(true)
        .default_value("-1");
    let arg_strict = Arg::with_name("strict")
        .help("reject input files whose line count is not a multiple of the stride")
        .long("strict");
    let cli_args = App::new("photoxs_plot")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to overlay cubic-spline interpolated cross sections")
        .arg(arg_inputs)
        .arg(arg_reference)
        .arg(arg_output)
        .arg(arg_stride)
        .arg(arg_column)
        .arg(arg_strict)
        .get_matches();
    let inputs = match cli_args.values_of("input_files") {
        Some(values) => values.map(PathBuf::from).collect(),
        None => Vec::new(),
    };
    let reference_path = PathBuf::from(cli_args.value_of("reference_file").unwrap_or_default());
    let output_path = PathBuf::from(cli_args.value_of("output_file").unwrap_or_default());
    let stride = cli_args
        .value_of("stride")
        .unwrap_or_default()
        .parse::<usize>()
        .unwrap();
    let xs_token_index = cli_args
        .value_of("xs_token_index")
        .unwrap_or_default()
        .parse::<i64>()
        .unwrap();
    let strict = cli_args.is_present("strict");
    return PlotConfig {
        inputs,
        reference_path,
        output_path,
        stride,
        xs_token_index,
        strict,
    };
}
