use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use hollow_forge::{
    CHARACTER_FILE_NAME, CharacterProfile, Configurable, Direction, ForgeSession, ForgeSettings,
    ReactionState, SHEET_FILE_NAME, SheetAnimation, SheetProfile, SheetSession, save_png,
};

#[derive(Parser, Debug)]
#[command(name = "hollow-forge", version, about = "Render a pixel-art character to PNG")]
struct Cli {
    /// Character profile JSON. Without it a random character is rolled.
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Seed for the random character.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Animation time in milliseconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Export upscale (1-8). Defaults to the settings file value.
    #[arg(long)]
    scale: Option<u32>,

    /// Settings JSON.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Render the sprite-sheet variant instead of the procedural one.
    #[arg(long, default_value_t = false)]
    sheet: bool,

    /// Sprite root for `--sheet`. Defaults to the settings file value.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Sheet animation (`idle`, `walk`, `slash`, ...).
    #[arg(long, default_value = "idle")]
    animation: String,

    /// Facing direction (`up`, `left`, `down`, `right`).
    #[arg(long, default_value = "down")]
    direction: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = match &cli.settings {
        Some(path) => ForgeSettings::from_path(path)
            .with_context(|| format!("read settings '{}'", path.display()))?,
        None => ForgeSettings::default(),
    };
    if let Some(scale) = cli.scale {
        settings.render.export_scale = scale;
        settings.sheet.export_scale = scale;
    }
    settings.validate()?;

    if cli.sheet {
        cmd_sheet(&cli, &settings)
    } else {
        cmd_character(&cli, &settings)
    }
}

fn read_profile(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read profile '{}'", path.display()))
}

fn prepare_out(out: Option<&PathBuf>, default_name: &str) -> anyhow::Result<PathBuf> {
    let out = out.cloned().unwrap_or_else(|| PathBuf::from(default_name));
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(out)
}

fn cmd_character(cli: &Cli, settings: &ForgeSettings) -> anyhow::Result<()> {
    let mut session = ForgeSession::new(Default::default(), settings.render);
    match &cli.profile {
        Some(path) => session.apply_profile(&CharacterProfile::from_json(&read_profile(path)?)?),
        None => session.randomize(&mut StdRng::seed_from_u64(cli.seed), cli.time),
    }

    let out = prepare_out(cli.out.as_ref(), CHARACTER_FILE_NAME)?;
    let surface = session.render_still(cli.time);
    save_png(surface.image(), settings.render.export_scale, &out)
        .with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {} ({})", out.display(), session.class_title());
    Ok(())
}

fn cmd_sheet(cli: &Cli, settings: &ForgeSettings) -> anyhow::Result<()> {
    let root = cli
        .assets
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.asset_root));
    let mut session = SheetSession::from_dir(&root, settings.sheet);

    match &cli.profile {
        Some(path) => session.apply_profile(&SheetProfile::from_json(&read_profile(path)?)?),
        None => session.randomize(&mut StdRng::seed_from_u64(cli.seed), 0.0),
    }
    let loaded = session.preload();
    let wanted = session.config().asset_requests().len();
    if loaded < wanted {
        tracing::warn!(loaded, wanted, root = %root.display(), "some sheets are missing");
    }

    let animation = SheetAnimation::from_id(&cli.animation)
        .with_context(|| format!("unknown animation '{}'", cli.animation))?;
    let direction = Direction::from_id(&cli.direction)
        .with_context(|| format!("unknown direction '{}'", cli.direction))?;
    session.set_animation(animation);
    session.set_direction(direction);

    // Let the selection reaction finish, then step `time` into the animation.
    let start = ReactionState::DURATION_MS;
    session.render_frame(0.0);
    session.render_frame(start);
    session.render_frame(start + cli.time.max(0.0));

    let out = prepare_out(cli.out.as_ref(), SHEET_FILE_NAME)?;
    session
        .save(cli.time, &out)
        .with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {} ({})", out.display(), session.class_title());
    Ok(())
}
