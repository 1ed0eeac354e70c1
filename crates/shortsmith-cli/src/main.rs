use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::Result;
use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use shortsmith_core::{
    FileTranscriptSource, GenerateResponse, IdeaGenerator, LinkTarget, VideoIdeas, YtDlp,
    YtDlpConfig, format_channel_readable, format_ideas_readable, parse_link,
};

#[derive(Parser)]
#[command(name = "shortsmith")]
#[command(about = "Turn a YouTube video or channel into short-form clip ideas")]
struct Cli {
    /// Video or channel URL
    url: String,

    /// Subtitle language to request from YouTube
    #[arg(short, long, default_value = "en")]
    lang: String,

    /// Use a local Whisper JSON transcript instead of YouTube captions (video links only)
    #[arg(short, long)]
    transcript: Option<PathBuf>,

    /// Force re-fetching even if cached metadata or transcripts exist
    #[arg(short, long)]
    force: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Verbose diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// A local transcript belongs to one video, so it cannot stand in for a
/// whole channel.
fn check_transcript_target(target: &LinkTarget, transcript: Option<&Path>) -> Result<()> {
    if let (LinkTarget::Channel { channel_id, .. }, Some(path)) = (target, transcript) {
        anyhow::bail!(
            "--transcript {} only applies to a single video, not channel {channel_id}",
            path.display()
        );
    }
    Ok(())
}

fn ensure_has_ideas(result: &VideoIdeas) -> Result<()> {
    if result.ideas.is_empty() {
        anyhow::bail!(
            "Nothing to work with for video {}: no usable transcript or description",
            result.video_id
        );
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "shortsmith={default_level},shortsmith_core={default_level}"
        ))
    });

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .with(env_filter)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Reject unusable links before touching the network
    let target = match parse_link(&cli.url) {
        Ok(target) => target,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };
    debug!(?target, "link recognized");
    check_transcript_target(&target, cli.transcript.as_deref())?;

    let config = YtDlpConfig {
        sub_langs: cli.lang.clone(),
        force: cli.force,
        ..YtDlpConfig::from_env()
    };
    let mut generator = IdeaGenerator::from_yt_dlp(YtDlp::new(config));
    if let Some(path) = &cli.transcript {
        generator = generator.with_transcripts(Arc::new(FileTranscriptSource::new(path)));
    }

    if !cli.json {
        println!(
            "\n{}  {}\n",
            style("shortsmith").cyan().bold(),
            style("Clip Idea Generator").dim()
        );
    }

    let (response, readable) = match target {
        LinkTarget::Video { video_id } => {
            let spinner = create_spinner(&format!("Analyzing video {video_id}..."));
            let result = generator
                .generate_ideas_for_video(&video_id)
                .await
                .map_err(anyhow::Error::from)
                .and_then(|result| ensure_has_ideas(&result).map(|()| result));
            let result = match result {
                Ok(result) => result,
                Err(e) => {
                    spinner.finish_and_clear();
                    return Err(e);
                }
            };
            spinner.finish_with_message(format!(
                "{} Generated {} ideas for {}",
                style("✓").green().bold(),
                result.ideas.len(),
                style(&result.video_title).yellow()
            ));
            let readable = format_ideas_readable(&result);
            (GenerateResponse::from(result), readable)
        }
        LinkTarget::Channel { channel_id, kind } => {
            let spinner = create_spinner(&format!("Analyzing channel {channel_id}..."));
            let result = generator.generate_ideas_for_channel(&channel_id, kind).await;
            let result = match result {
                Ok(result) => result,
                Err(e) => {
                    spinner.finish_and_clear();
                    return Err(e.into());
                }
            };
            spinner.finish_with_message(format!(
                "{} Picked {} ideas from {} videos of {}",
                style("✓").green().bold(),
                result.ideas.len(),
                result.videos.len(),
                style(&result.channel_name).yellow()
            ));
            let readable = format_channel_readable(&result);
            (GenerateResponse::from(result), readable)
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{}", style("─".repeat(60)).dim());
    println!("{}", readable);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shortsmith_core::{ChannelIdKind, Idea};

    #[test]
    fn transcript_file_is_rejected_for_channels() {
        let channel = LinkTarget::Channel {
            channel_id: "rustlang".to_string(),
            kind: ChannelIdKind::Handle,
        };
        let video = LinkTarget::Video {
            video_id: "dQw4w9WgXcQ".to_string(),
        };
        let path = Path::new("talk.json");

        assert!(check_transcript_target(&channel, Some(path)).is_err());
        assert!(check_transcript_target(&channel, None).is_ok());
        assert!(check_transcript_target(&video, Some(path)).is_ok());
    }

    #[test]
    fn video_without_ideas_is_an_error() {
        let mut result = VideoIdeas {
            video_id: "dQw4w9WgXcQ".to_string(),
            video_title: "YouTube Video".to_string(),
            channel_name: None,
            ideas: Vec::new(),
        };
        assert!(ensure_has_ideas(&result).is_err());

        result.ideas.push(Idea {
            clip_time: "00:00-00:45".to_string(),
            title: "Must-See Clip To Remember Today".to_string(),
            description: "Hello.".to_string(),
            hashtags: vec!["#shorts".to_string()],
            captions: "⚡ Hello.".to_string(),
        });
        assert!(ensure_has_ideas(&result).is_ok());
    }
}
