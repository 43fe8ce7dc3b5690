use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "framesmith", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the design preview as a PNG.
    Frame(FrameArgs),
    /// Print the itemized price of the design.
    Price(PriceArgs),
    /// Render successive animation steps as numbered PNGs.
    Animate(AnimateArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input design JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Render in high-contrast mode regardless of the design.
    #[arg(long, default_value_t = false)]
    high_contrast: bool,
}

#[derive(Parser, Debug)]
struct PriceArgs {
    /// Input design JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Print the breakdown as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindArg {
    Room,
    Lighting,
    Styles,
}

impl From<KindArg> for framesmith::AnimationKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Room => Self::Room,
            KindArg::Lighting => Self::Lighting,
            KindArg::Styles => Self::Styles,
        }
    }
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    /// Input design JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// What to animate.
    #[arg(long, value_enum)]
    kind: KindArg,

    /// Number of advances to render.
    #[arg(long, default_value_t = 4)]
    steps: u32,

    /// Animation speed (10..=100); defaults to the design's setting.
    #[arg(long)]
    speed: Option<u8>,

    /// Output directory for `step_NNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Price(args) => cmd_price(args),
        Command::Animate(args) => cmd_animate(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn open_session(
    in_path: &Path,
    clock: framesmith::ManualFrameClock,
) -> anyhow::Result<framesmith::DesignerSession> {
    let design = framesmith::DesignFile::from_path(in_path)?;
    let base_dir = in_path.parent().unwrap_or_else(|| Path::new("."));

    let mut sess = framesmith::DesignerSession::new(
        design.artwork,
        design.catalog(),
        design.opts.clone(),
        Box::new(clock),
    )?;
    sess.set_selection(design.selection.clone());

    if let Some(path) = design.image_path(base_dir) {
        sess.set_artwork_pending();
        let bytes =
            std::fs::read(&path).with_context(|| format!("read artwork '{}'", path.display()))?;
        sess.set_artwork_bytes(&bytes);
    }
    Ok(sess)
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut sess = open_session(&args.in_path, framesmith::ManualFrameClock::new())?;
    if args.high_contrast {
        sess.selection_mut().high_contrast = true;
    }
    ensure_parent(&args.out)?;
    sess.render()?.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_price(args: PriceArgs) -> anyhow::Result<()> {
    let sess = open_session(&args.in_path, framesmith::ManualFrameClock::new())?;
    let breakdown = sess.breakdown();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }
    for line in &breakdown.lines {
        println!("{:<32} {:>10}", line.label, line.amount.to_string());
    }
    println!("{:<32} {:>10}", "Total", breakdown.total.to_string());
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let clock = framesmith::ManualFrameClock::new();
    let mut sess = open_session(&args.in_path, clock.clone())?;
    if let Some(speed) = args.speed {
        sess.set_speed(speed);
    }
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let write = |sess: &mut framesmith::DesignerSession, step: u32| -> anyhow::Result<()> {
        let out = args.out_dir.join(format!("step_{step:03}.png"));
        sess.render()?.save_png(&out)?;
        eprintln!("wrote {}", out.display());
        Ok(())
    };

    write(&mut sess, 0)?;
    sess.start_animation(args.kind.into());

    // Simulated host clock: one callback per delay period, just past the threshold.
    let step_ms = sess.scheduler().frame_delay_ms() + 1.0;
    let mut now = 0.0;
    let mut step = 0;
    while step < args.steps {
        let token = clock
            .fire()
            .context("animation stopped before all steps were rendered")?;
        if sess.on_frame(token, now)? {
            step += 1;
            write(&mut sess, step)?;
        }
        now += step_ms;
    }
    sess.teardown();
    Ok(())
}
