mod cli;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::mpsc;

use cli::Cli;
use vocalis::render::view::PngSnapshot;
use vocalis::{BandGains, Command, PathChoice, Pipeline, PickMode, Session};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    let mut pipeline_config = vocalis::PipelineConfig::default();
    if let Some(ref path) = config::find_config_path(cli.config.as_deref()) {
        if let Some(cfg) = config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            // Merge: config values apply only when CLI is at its default
            if cli.fft_size == 4096 { cli.fft_size = cfg.analysis.fft_size; }
            if cli.view_width == 800 { cli.view_width = cfg.analysis.view_width; }
            if cli.low == 1.0 { cli.low = cfg.separation.low_gain; }
            if cli.mid == 0.0 { cli.mid = cfg.separation.mid_gain; }
            if cli.high == 0.0 { cli.high = cfg.separation.high_gain; }
            pipeline_config = cfg.pipeline_config();
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }
    pipeline_config.fft_size = cli.fft_size;
    pipeline_config.view_width = cli.view_width;

    if !cli.input.exists() {
        anyhow::bail!("Input file not found: {}", cli.input.display());
    }

    log::info!("vocalis - spectrogram and stereo vocal isolation");
    log::info!("Input: {}", cli.input.display());
    log::info!(
        "FFT size: {}, view width: {}",
        pipeline_config.fft_size,
        pipeline_config.view_width
    );

    let mut pipeline = Pipeline::new(pipeline_config)
        .context("Invalid pipeline configuration")?
        .with_progress(progress_bar(cli.quiet));
    if let Some(ref png) = cli.spectrogram {
        pipeline = pipeline.with_view(Box::new(PngSnapshot::new(png)));
    }

    // The command line stands in for the file choosers: each path argument
    // arrives as an already-made choice.
    let (tx, rx) = mpsc::channel();
    let open = PathChoice::Selected(cli.input.clone()).into_command(PickMode::Open);
    let save = match cli.output {
        Some(ref path) => PathChoice::Selected(path.clone()),
        None => PathChoice::Cancelled,
    }
    .into_command(PickMode::Save);

    let isolate = cli.isolate.then(|| {
        Command::ApplySeparation(BandGains {
            low: cli.low,
            mid: cli.mid,
            high: cli.high,
        })
    });

    for command in [open, isolate, save].into_iter().flatten() {
        tx.send(command).context("Command queue closed")?;
    }
    drop(tx);

    let mut session = Session::new(pipeline);
    let summary = session.run(rx);

    if summary.failed > 0 {
        anyhow::bail!(
            "{} of {} command(s) failed",
            summary.failed,
            summary.failed + summary.completed
        );
    }

    log::info!("Done ({} command(s))", summary.completed);
    Ok(())
}

fn progress_bar(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} blocks ({eta} remaining)")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb
}
