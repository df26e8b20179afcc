use std::path::PathBuf;
use anyhow::{bail, Context};
use clap::{crate_version, Parser};
use raylib::core::audio::RaylibAudio;
use raylib::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod audio;
mod catalog;
mod constants;
mod engine;
mod error;
mod paged;
mod pager;
mod presenter;
mod resources;
mod slide;
mod state;
mod tracker;
mod zoom;

use crate::audio::mock::MockSource;
use crate::audio::music::MusicSource;
use crate::audio::{AudioPlaybackController, TrackSource};
use crate::catalog::SlideCatalog;
use crate::constants::*;
use crate::engine::Engine;
use crate::paged::engine::PagedEngine;
use crate::presenter::SlideshowPresenter;
use crate::resources::ResourceBundle;

#[derive(Parser)]
#[clap(
    version = crate_version!(),
    about = "A paged, zoomable image slideshow with narration."
)]
struct Cli {
    /// Directory holding the slide images, narration tracks and an optional slides.yaml.
    directory: PathBuf,
    /// Slide manifest to use instead of <DIRECTORY>/slides.yaml.
    #[arg(short, long)]
    manifest: Option<PathBuf>,
    /// File extension of the narration tracks.
    #[arg(short, long, default_value = DEFAULT_AUDIO_EXTENSION)]
    audio_extension: String,
    /// Run without opening an audio device.
    #[arg(long)]
    mute: bool,
    /// Initial window width.
    #[arg(long, default_value_t = WINDOW_WIDTH)]
    width: i32,
    /// Initial window height.
    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    height: i32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    // --- Load Slides ---
    let bundle = ResourceBundle::new(&cli.directory, &cli.audio_extension);
    let catalog = match &cli.manifest {
        Some(path) => SlideCatalog::from_manifest(path)
            .with_context(|| format!("Error loading manifest {:?}", path))?,
        None => SlideCatalog::load(&bundle)
            .with_context(|| format!("Error loading slides from {:?}", cli.directory))?,
    };
    if catalog.count() == 0 {
        bail!("No slides to show.");
    }
    info!(dir = ?cli.directory, slides = catalog.count(), "Slides loaded.");

    let (mut rl, thread) = raylib::init()
        .size(cli.width, cli.height)
        .title("Slideshow")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- Audio Device ---
    let device = if cli.mute {
        None
    } else {
        match RaylibAudio::init_audio_device() {
            Ok(device) => Some(device),
            Err(e) => {
                warn!(err = ?e, "No audio device, narration disabled.");
                None
            }
        }
    };

    match &device {
        Some(device) => run(&mut rl, &thread, catalog, bundle, MusicSource::new(device)),
        None => run(&mut rl, &thread, catalog, bundle, MockSource::default()),
    }
}

fn run<S: TrackSource>(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    catalog: SlideCatalog,
    bundle: ResourceBundle,
    source: S,
) -> anyhow::Result<()> {
    let audio = AudioPlaybackController::new(bundle.clone(), source);
    let mut engine = PagedEngine::new(SlideshowPresenter::new(catalog, audio), bundle);
    if !engine.initialize(rl, thread) {
        bail!("No slides could be shown.");
    }

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        if !engine.render_frame(dt, rl, thread) {
            break;
        }
    }
    Ok(())
}
