use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "stampfx", version)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an animated sticker (APNG).
    Render(RenderArgs),
    /// Render a single frame of a sticker as a static PNG.
    Frame(FrameArgs),
    /// Print an effect's frame schedule and duration plan as JSON.
    Schedule(ScheduleArgs),
}

#[derive(Args, Debug)]
struct StickerArgs {
    /// Background-removed foreground image (PNG).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Caption drawn above the subject.
    #[arg(long, default_value = "")]
    text: String,

    /// Effect name; unknown names fall back to a two-frame still.
    #[arg(long, default_value = "pulsing")]
    effect: String,

    /// Size preset: `main` (240x240) or `stamp` (320x270).
    #[arg(long, default_value = "main")]
    variant: String,

    /// Caption font (TTF/OTF). Overrides the config file.
    #[arg(long)]
    font: Option<PathBuf>,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Total loop duration in milliseconds. Overrides the config file.
    #[arg(long)]
    total_ms: Option<u32>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    sticker: StickerArgs,

    /// Directory for the output file; its name follows `{basename}_anim_{variant}_{w}x{h}.png`.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    sticker: StickerArgs,

    /// Frame index (0-based).
    #[arg(long)]
    index: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct ScheduleArgs {
    /// Effect name.
    #[arg(long)]
    effect: String,

    /// Total loop duration in milliseconds.
    #[arg(long, default_value_t = stampfx::DEFAULT_TOTAL_MS)]
    total_ms: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Schedule(args) => cmd_schedule(args),
    }
}

fn init_logging(json: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(env_filter).with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }
}

struct Prepared {
    foreground: image::RgbaImage,
    font: stampfx::CaptionFont,
    config: stampfx::StickerConfig,
    effect: stampfx::EffectKind,
    variant: stampfx::Variant,
}

fn prepare(args: &StickerArgs) -> anyhow::Result<Prepared> {
    let mut config = match &args.config {
        Some(path) => stampfx::StickerConfig::from_json_file(path)?,
        None => stampfx::StickerConfig::default(),
    };
    if let Some(font) = &args.font {
        config.font_path = font.clone();
    }
    if let Some(total_ms) = args.total_ms {
        config.total_ms = total_ms;
    }

    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read foreground '{}'", args.in_path.display()))?;
    let foreground = stampfx::decode_foreground(&bytes)?;
    let font = stampfx::CaptionFont::load_or_builtin(&config.font_path);

    Ok(Prepared {
        foreground,
        font,
        config,
        effect: stampfx::EffectKind::from_name(&args.effect),
        variant: stampfx::Variant::from_name(&args.variant),
    })
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let p = prepare(&args.sticker)?;
    let sticker = stampfx::create_sticker(
        &stampfx::AnimationRequest {
            foreground: &p.foreground,
            text: &args.sticker.text,
            effect: p.effect,
            variant: p.variant,
        },
        &p.font,
        &p.config,
    )?;

    let out = args.out_dir.join(sticker.file_name(&basename(&args.sticker.in_path)));
    ensure_parent_dir(&out)?;
    std::fs::write(&out, &sticker.bytes)
        .with_context(|| format!("write sticker '{}'", out.display()))?;

    tracing::info!(
        frames = sticker.frame_count(),
        bytes = sticker.bytes.len(),
        "wrote sticker"
    );
    println!("{}", out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let p = prepare(&args.sticker)?;
    let schedule = stampfx::build_schedule(p.effect);
    let transform = schedule.transforms.get(args.index).with_context(|| {
        format!(
            "frame {} out of range, '{}' has {} frames",
            args.index,
            p.effect,
            schedule.len()
        )
    })?;

    let renderer = stampfx::FrameRenderer::new(
        &p.foreground,
        &args.sticker.text,
        p.variant.geometry(),
        &p.font,
        &p.config,
    )?;
    let frame = renderer.render(transform)?;

    ensure_parent_dir(&args.out)?;
    frame
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write frame '{}'", args.out.display()))?;
    println!("{}", args.out.display());
    Ok(())
}

fn cmd_schedule(args: ScheduleArgs) -> anyhow::Result<()> {
    let schedule = stampfx::build_schedule(stampfx::EffectKind::from_name(&args.effect));
    let durations = stampfx::allocate_durations(args.total_ms, schedule.len().max(2))?;
    let doc = serde_json::json!({
        "schedule": schedule,
        "durations_ms": durations,
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn basename(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("upload")
        .to_string()
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
