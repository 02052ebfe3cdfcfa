//! nether-action - Nethercore action sampler
//!
//! Samples the actions of a recorded authoring scene into export-ready bone
//! tracks and reports what would be exported.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use nether_action::{sample_actions, Action, ActionHost, RecordedScene, SamplerConfig};

#[derive(Parser)]
#[command(name = "nether-action")]
#[command(about = "Nethercore action sampler")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample actions from a scene recording
    Sample {
        /// Scene recording (JSON)
        scene: PathBuf,

        /// Sampler config (sampler.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Frame rate (overrides config and scene)
        #[arg(short, long)]
        frame_rate: Option<f32>,

        /// Only sample the named action
        #[arg(short, long)]
        action: Option<String>,

        /// Fail if any action could not be sampled
        #[arg(long)]
        strict: bool,
    },

    /// List actions in a scene recording
    List {
        /// Scene recording (JSON)
        scene: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sample {
            scene,
            config,
            frame_rate,
            action,
            strict,
        } => {
            let mut host = RecordedScene::load(&scene)?;

            let mut sampler_config = match config {
                Some(path) => SamplerConfig::load(&path)?,
                None => SamplerConfig::default(),
            };
            if sampler_config.frame_rate.is_none() {
                sampler_config.update_frame_rate(&host);
            }
            if frame_rate.is_some() {
                sampler_config.frame_rate = frame_rate;
            }

            if let Some(name) = &action {
                if !host.clips().iter().any(|c| &c.name == name) {
                    anyhow::bail!("Action '{}' not found in {:?}", name, scene);
                }
            }

            tracing::info!(
                "Sampling {:?} at {} fps",
                scene,
                sampler_config.frame_rate.unwrap_or_default()
            );
            let armature = host.armature();
            let batch = sample_actions(&mut host, armature, &sampler_config, |clip| {
                action.as_ref().is_none_or(|name| &clip.name == name)
            });

            for sampled in &batch.actions {
                report_action(sampled);
            }
            for name in &batch.discarded {
                tracing::info!("  '{}': discarded (no significant frames or channels)", name);
            }
            for err in &batch.failed {
                tracing::info!("  '{}': failed ({} error)", err.action(), err.kind());
            }

            tracing::info!(
                "{} exported, {} discarded, {} failed",
                batch.actions.len(),
                batch.discarded.len(),
                batch.failed.len()
            );
            if strict && !batch.is_clean() {
                anyhow::bail!("{} action(s) failed to sample", batch.failed.len());
            }
        }

        Commands::List { scene } => {
            let host = RecordedScene::load(&scene)?;
            let recording = host.recording();
            if recording.actions.is_empty() {
                tracing::info!("No actions found in {:?}", scene);
                return Ok(());
            }

            tracing::info!("Actions in {:?}:", scene);
            for (i, action) in recording.actions.iter().enumerate() {
                tracing::info!(
                    "  [{}] '{}': {} channels, frames {}..={}, {} recorded poses",
                    i,
                    action.clip.name,
                    action.clip.channels.len(),
                    action.start_frame,
                    action.end_frame,
                    action.poses.len()
                );
            }
        }
    }

    Ok(())
}

fn report_action(action: &Action) {
    let mut channels: Vec<_> = action.channel_names().into_iter().collect();
    channels.sort();
    let times = action.keyframe_times().unwrap_or_default();
    tracing::info!(
        "  '{}': {} channels, {} keyframes ({:.2}s), playback {:?}..={:?}, rest pose frame {:?}",
        action.name(),
        action.channels().unwrap_or(0),
        times.len(),
        times.last().copied().unwrap_or(0.0),
        action.start_frame(),
        action.end_frame(),
        action.rest_pose_frame()
    );
    tracing::debug!("    channels: {}", channels.join(", "));
}
