use std::io::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scrollwork::{FrameOutput, InputEvent, Page, Route, Viewport};

#[derive(Parser, Debug)]
#[command(name = "scrollwork", version)]
struct Cli {
    /// Log level written to stderr (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scroll a page spec and print one JSON frame per scroll offset.
    Simulate(SimulateArgs),
    /// Print the active section of a built-in page at a scroll offset.
    Resolve(ResolveArgs),
    /// Print the built-in page spec for a route as JSON.
    Dump(DumpArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input page spec JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// First scroll offset.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Last scroll offset (inclusive).
    #[arg(long, default_value_t = 0.0)]
    to: f64,

    /// Scroll increment between samples.
    #[arg(long, default_value_t = 100.0)]
    step: f64,

    /// Pointer position as `X,Y` in viewport coordinates.
    #[arg(long, value_parser = parse_point)]
    pointer: Option<(f64, f64)>,

    /// Milliseconds between animation frames.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,

    /// Print the first frame after each scroll instead of waiting for animations to settle.
    #[arg(long, default_value_t = false)]
    no_settle: bool,
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Route pathname.
    #[arg(long)]
    route: String,

    /// Scroll offset.
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,

    /// Viewport width.
    #[arg(long, default_value_t = 1440.0)]
    width: f64,

    /// Viewport height.
    #[arg(long, default_value_t = 900.0)]
    height: f64,
}

#[derive(Parser, Debug)]
struct DumpArgs {
    /// Route pathname.
    #[arg(long)]
    route: String,

    /// Viewport width.
    #[arg(long, default_value_t = 1440.0)]
    width: f64,

    /// Viewport height.
    #[arg(long, default_value_t = 900.0)]
    height: f64,
}

/// Upper bound on frames rendered while waiting for one scroll step to settle.
const MAX_SETTLE_FRAMES: usize = 2_000;

fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate '{v}': {e}"))
    };
    Ok((parse(x)?, parse(y)?))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Resolve(args) => cmd_resolve(args),
        Command::Dump(args) => cmd_dump(args),
    }
}

/// Render frames until the page stops requesting them; returns the last one.
fn settle(
    page: &mut Page,
    geometry: &dyn scrollwork::Geometry,
    now: &mut Duration,
    frame: Duration,
    once: bool,
) -> Option<FrameOutput> {
    let mut last = None;
    for _ in 0..MAX_SETTLE_FRAMES {
        let Some(out) = page.frame(geometry, *now) else {
            break;
        };
        last = Some(out);
        *now += frame;
        if once || !page.frame_pending() {
            break;
        }
    }
    last
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.step.is_finite() && args.step > 0.0,
        "--step must be > 0, got {}",
        args.step
    );
    anyhow::ensure!(args.to >= args.from, "--to must be >= --from");
    let spec = scrollwork::PageSpec::from_path(&args.in_path)?;
    let mut page = Page::from_spec(&spec)
        .with_context(|| format!("build page from '{}'", args.in_path.display()))?;
    if let Some((x, y)) = args.pointer {
        page.handle(InputEvent::PointerMove { x, y });
    }

    let frame = Duration::from_millis(args.frame_ms);
    let mut now = Duration::ZERO;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let steps = ((args.to - args.from) / args.step).floor() as u64;
    for i in 0..=steps {
        let y = args.from + i as f64 * args.step;
        page.handle(InputEvent::Scroll { y });
        // Nothing changed since the last step (e.g. clamped at the end of a static page).
        let Some(sample) = settle(&mut page, &spec.layout, &mut now, frame, args.no_settle) else {
            continue;
        };
        serde_json::to_writer(&mut out, &sample).context("serialize frame")?;
        writeln!(out).context("write frame")?;
    }
    page.teardown();
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let route = Route::parse(&args.route);
    let viewport = Viewport::new(args.width, args.height)?;
    let spec = scrollwork::site::page_spec(&route, viewport);
    let mut page = Page::from_spec(&spec).context("build built-in page")?;
    page.handle(InputEvent::Scroll { y: args.scroll });
    let mut now = Duration::ZERO;
    settle(&mut page, &spec.layout, &mut now, Duration::from_millis(16), false);
    println!("{}", page.active_section());
    Ok(())
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let route = Route::parse(&args.route);
    let viewport = Viewport::new(args.width, args.height)?;
    let spec = scrollwork::site::page_spec(&route, viewport);
    println!("{}", spec.to_json()?);
    Ok(())
}
