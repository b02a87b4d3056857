use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};
use massing_cli::batch::{PreviewOutcome, process_batch};
use massing_cli::config::CliConfig;
use massing_cli::io;
use massing_cli::io::cli::Cli;
use massing_cli::io::output::PreviewOutput;
use massing_rs::io::ext_repr::ExtPreviewBatch;
use massing_rs::io::svg::preview_to_svg;
use thousands::Separable;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            CliConfig::default()
        }
        Some(config_file) => {
            let file = File::open(config_file)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };

    info!("Successfully parsed CliConfig: {config:?}");

    let input_file_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no valid file name")?;

    if !args.output_folder.exists() {
        fs::create_dir_all(&args.output_folder).with_context(|| {
            format!("could not create output folder: {}", args.output_folder.display())
        })?;
    }

    let batch: ExtPreviewBatch = io::read_json(&args.input_file)?;
    info!(
        "[MAIN] {} preview requests read from {}",
        batch.requests.len().separate_with_commas(),
        args.input_file.display()
    );

    let outcomes = process_batch(&batch.requests, &config);

    {
        let output = PreviewOutput::new(&outcomes, config, jiff::Timestamp::now().to_string());
        let output_path = args.output_folder.join(format!("previews_{input_file_stem}.json"));
        io::write_json(&output, Path::new(&output_path))?;
    }

    if config.write_svg {
        write_svgs(&outcomes, config, input_file_stem, args.output_folder)?;
    }

    Ok(())
}

fn write_svgs(
    outcomes: &[PreviewOutcome],
    config: CliConfig,
    input_stem: &str,
    output_folder: PathBuf,
) -> Result<()> {
    for outcome in outcomes.iter().filter(|o| o.preview.is_valid) {
        let Some(buildable) = outcome.buildable.as_ref() else {
            continue;
        };
        let svg = preview_to_svg(buildable, &outcome.preview, config.svg_draw_options, &outcome.id);
        let svg_path = output_folder.join(io::svg_file_name(input_stem, &outcome.id));
        io::write_svg(&svg, Path::new(&svg_path))?;
    }
    Ok(())
}
