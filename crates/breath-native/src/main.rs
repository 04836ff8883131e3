use anyhow::Context;
use breath_core::{
    BreathingSession, Catalog, FrameLoop, Pattern, RenderSink, Settings, SystemTime, TimeSource,
    DEFAULT_FRAMES_PER_SECOND,
};
use clap::Parser;
use std::path::{Path, PathBuf};

mod terminal;

use terminal::{theme_swatch, TerminalSink};

#[derive(Parser, Debug)]
#[command(name = "breath-hud", about = "Guided breathing animation in the terminal")]
struct Args {
    /// Pattern id (see --list)
    #[arg(long)]
    pattern: Option<String>,
    /// Sequence id to run instead of a single pattern
    #[arg(long)]
    sequence: Option<String>,
    #[arg(long)]
    shape: Option<String>,
    #[arg(long)]
    theme: Option<String>,
    /// Custom pattern, e.g. "inhale:4:0.8,hold:2,exhale:6"
    #[arg(long)]
    custom: Option<String>,
    #[arg(long)]
    reduce_motion: bool,
    /// Stop after this many seconds
    #[arg(long, default_value_t = 60.0)]
    seconds: f64,
    #[arg(long, default_value_t = DEFAULT_FRAMES_PER_SECOND)]
    fps: u32,
    /// JSON settings file to load
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Write the final settings to this path
    #[arg(long)]
    save: Option<PathBuf>,
    /// Disable ANSI colours
    #[arg(long)]
    no_color: bool,
    /// Print the preset catalog and exit
    #[arg(long)]
    list: bool,
}

fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing settings in {}", path.display()))
}

fn save_settings(path: &Path, settings: &Settings) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, text).with_context(|| format!("writing settings to {}", path.display()))
}

fn print_catalog(catalog: &Catalog) {
    println!("patterns:");
    for p in catalog.patterns() {
        println!(
            "  {:<16} {:<18} {:>5.1}s  {}",
            p.id(),
            p.name(),
            p.total_duration_sec(),
            p.description()
        );
    }
    println!("sequences:");
    for s in catalog.sequences() {
        println!("  {:<20} {:<18} {} cycles", s.id(), s.name(), s.total_cycles());
    }
    println!("shapes:");
    for s in catalog.shapes() {
        println!("  {:<10} {}", s.id, s.description);
    }
    println!("themes:");
    for t in catalog.themes() {
        println!("  {}", t.id);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let catalog = Catalog::builtin().context("building preset catalog")?;
    if args.list {
        print_catalog(&catalog);
        return Ok(());
    }

    let settings = match &args.settings {
        Some(path) if path.exists() => load_settings(path)?,
        _ => Settings::default(),
    };
    let mut session = BreathingSession::new(catalog, &settings)?;

    session
        .sequences_mut()
        .set_pattern_observer(|pattern, info| {
            log::info!("now breathing {}: {info}", pattern.name());
            Ok(())
        });

    let time = SystemTime::new();
    let now = time.now_ms();
    if let Some(id) = &args.shape {
        session.select_shape(id)?;
    }
    if let Some(id) = &args.theme {
        session.select_theme(id)?;
    }
    if args.reduce_motion {
        session.set_reduce_motion(true);
    }
    if let Some(text) = &args.custom {
        let pattern = Pattern::custom("custom", text).context("parsing --custom")?;
        session.add_custom_pattern(pattern, now);
    } else if let Some(id) = &args.pattern {
        session.select_pattern(id, now)?;
    }
    if let Some(id) = &args.sequence {
        session.select_sequence(id, now)?;
        session.toggle_sequence(now);
    }

    let color = !args.no_color;
    println!(
        "{} | {} | {}",
        session.pattern().name(),
        session.shape().map_or("-", |s| s.name),
        theme_swatch(session.theme(), color)
    );

    let mut sink = TerminalSink::new(std::io::stdout(), color);
    let frames = FrameLoop::new(args.fps);
    let deadline = now + args.seconds * 1000.0;
    session.start(now);
    frames.run(&time, |now_ms| {
        if session.sequences().is_active() {
            sink.set_label(session.sequences().sequence_info());
        } else {
            sink.set_label(session.pattern().name());
        }
        session.tick(now_ms, Some(&mut sink as &mut dyn RenderSink));
        now_ms < deadline
    });
    session.stop();
    sink.finish()?;

    if let Some(path) = &args.save {
        save_settings(path, &session.settings())?;
        log::info!("settings saved to {}", path.display());
    }
    Ok(())
}
