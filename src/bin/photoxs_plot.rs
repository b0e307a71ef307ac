use photoxs_plot::plot::parse_cli;
use photoxs_plot::{plot_overlay, EnergyXs};

fn main() {
    let config = parse_cli();
    println!(
        "read reference data from {} and plot to {}",
        config.reference_path.to_str().unwrap(),
        config.output_path.to_str().unwrap()
    );
    let reference = EnergyXs::from_table(&config.reference_path);
    let mut inputs: Vec<(String, EnergyXs)> = Vec::with_capacity(config.inputs.len());
    for fin in &config.inputs {
        let series = EnergyXs::from_blocks(fin, config.stride, config.xs_token_index, config.strict);
        println!("{}: {} records", fin.to_str().unwrap(), series.energy.len());
        inputs.push((fin.to_str().unwrap().to_string(), series));
    }
    plot_overlay(&reference, &inputs, &config.output_path).unwrap();
}
