//! ar_story entry point.

use std::path::PathBuf;
use std::time::Duration;

use ar_story::app::{run, AppConfig};
use clap::Parser;
use env_logger::Env;

#[derive(Parser, Debug)]
#[command(name = "ar_story", about = "Gesture-driven AR storytelling demo")]
struct Args {
    /// Story configuration (JSON list of scenes).
    #[arg(default_value = "stories/story_config.json")]
    config: PathBuf,

    /// Still image to use as the camera feed instead of the procedural figure.
    #[arg(long)]
    camera_image: Option<PathBuf>,

    /// Display width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Gesture cooldown in seconds.
    #[arg(long, default_value = "1.5", value_parser = parse_cooldown)]
    cooldown: Duration,

    /// Show the camera unmirrored.
    #[arg(long)]
    no_mirror: bool,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║           AR Story — gesture-driven story scenes             ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("  Story: {}", args.config.display());
    println!("  Mode:  simulated camera (hold 1/2/3 for palm/victory/index)");
    println!();

    let cfg = AppConfig {
        story_path:    args.config,
        camera_image:  args.camera_image,
        display_width: args.width.max(1),
        cooldown:      args.cooldown,
        mirror:        !args.no_mirror,
        ..AppConfig::default()
    };

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Seconds as a non-negative, finite number.
fn parse_cooldown(s: &str) -> Result<Duration, String> {
    let secs: f64 = s.trim().parse().map_err(|e| format!("{}", e))?;
    Duration::try_from_secs_f64(secs)
        .map_err(|_| format!("cooldown must be a finite number of seconds >= 0, got {}", s))
}
