// What you SEE:
// • A grid page (plus any images passed with --image) behind a liquid glass panel.
// • Hold Left Mouse on the glass and drag: it follows the cursor. Scroll resizes it.
// • 1-9 animate the glass to the n-th preset. G toggles the grid, C the rainbow rim.
// • Backspace removes the top-most image. ESC quits.
// With --output the frame is written to a PNG instead and no window opens.

use clap::Parser;
use liquid_glass::animation::Animator;
use liquid_glass::background::BackgroundImage;
use liquid_glass::compositor::{render, save_png};
use liquid_glass::config::{GlassConfig, DEFAULT_CONFIG_PATH};
use liquid_glass::draw::{draw_text_5x7, Drawer};
use liquid_glass::error::Error;
use liquid_glass::raster::Raster;
use liquid_glass::scene::Scene;
use liquid_glass::types::{FrameBuffer, Vec2};
use liquid_glass::ParamTarget;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Smallest glass side reachable by scrolling.
const MIN_GLASS_SIDE: f32 = 40.0;

/// Interactive liquid glass renderer
#[derive(Parser, Debug)]
#[command(name = "liquid-glass")]
#[command(about = "Liquid glass panels over a grid and your images")]
#[command(version)]
struct Args {
    /// Config file (window, scene, presets)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Background image to place behind the glass (repeatable, up to 8)
    #[arg(short, long)]
    image: Vec<PathBuf>,

    /// Preset to apply at startup
    #[arg(short, long)]
    preset: Option<String>,

    /// Render one frame to this PNG and exit
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Canvas width override
    #[arg(long)]
    width: Option<usize>,

    /// Canvas height override
    #[arg(long)]
    height: Option<usize>,
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    /* --- Config + scene ---
       Visual: nothing yet; this decides sizes, colors and presets. */
    let mut config = GlassConfig::load(&args.config);
    if let Some(w) = args.width { config.window.width = w; }
    if let Some(h) = args.height { config.window.height = h; }
    let mut scene = Scene::new(&config.scene, config.canvas());

    /* --- Uploads ---
       Visual: each image lands a little up and right of the previous one. */
    for (i, path) in args.image.iter().enumerate() {
        let raster = Raster::load(path)?;
        let (iw, ih) = raster.dimensions();
        let position = Vec2::new(40.0 + 60.0 * i as f32, 40.0 + 40.0 * i as f32);
        let entry = BackgroundImage::new(Arc::new(raster), position, 240.0);
        match scene.background.push(entry) {
            Ok(index) => tracing::info!(index, iw, ih, path = %path.display(), "background image added"),
            Err(e) => {
                tracing::warn!(path = %path.display(), "{e}; skipping");
                break;
            }
        }
    }

    /* --- Headless mode ---
       Visual: a PNG on disk, no window. Presets apply instantly. */
    if let Some(out) = args.output.as_ref() {
        if let Some(name) = args.preset.as_deref() {
            for (param, value) in config.preset(name)? {
                scene.set_param(param, value);
            }
        }
        save_png(&scene, out)?;
        tracing::info!(path = %out.display(), "frame written");
        return Ok(());
    }

    run_window(&config, scene, args.preset.as_deref())
}

fn run_window(config: &GlassConfig, mut scene: Scene, startup_preset: Option<&str>) -> Result<(), Error> {
    let (w, h) = (config.window.width, config.window.height);
    let mut drawer = Drawer::new(&config.window.title, w, h)?;

    /* --- Reusable screen buffer ---
       Visual: this is the image you actually see each frame. */
    let mut screen = FrameBuffer::new(w, h);

    /* --- Animation ---
       Visual: presets glide over one second instead of jumping. */
    let mut animator = Animator::new();
    let preset_names = config.preset_names();
    if let Some(name) = startup_preset {
        animator.start(&scene, config.preset(name)?.clone(), Instant::now());
    }

    /* --- Drag state ---
       Visual: the grab point stays under the cursor while dragging. */
    let mut grab: Option<Vec2> = None;

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        /* 1) Inputs (between frames only; the scene is read-only during render) */
        let mouse = drawer
            .mouse_pos()
            .map(|(mx, my)| Vec2::new(mx, h as f32 - my)); // window is top-left origin

        if drawer.left_mouse_down() {
            if let Some(m) = mouse {
                match grab {
                    Some(offset) => scene.main_glass.center = m - offset,
                    None if scene.main_glass.contains(m) => grab = Some(m - scene.main_glass.center),
                    None => {}
                }
            }
        } else {
            grab = None;
        }

        let scroll = drawer.scroll_delta();
        if scroll != 0.0 {
            let factor = (1.0 + scroll * 0.05).max(0.5);
            let size = scene.main_glass.size * factor;
            scene.main_glass.size = Vec2::new(size.x.max(MIN_GLASS_SIDE), size.y.max(MIN_GLASS_SIDE));
        }

        if let Some(i) = drawer.preset_key_pressed() {
            if let Some(name) = preset_names.get(i) {
                tracing::info!(preset = %name, "applying preset");
                animator.start(&scene, config.preset(name)?.clone(), now);
            }
        }
        if drawer.g_pressed_once() {
            scene.background.grid.visible = !scene.background.grid.visible;
        }
        if drawer.c_pressed_once() {
            scene.material.chromatic_enabled = !scene.material.chromatic_enabled;
        }
        if drawer.backspace_pressed_once() {
            let top = scene.background.images().len();
            if top > 0 {
                scene.background.remove(top - 1)?;
                tracing::info!(index = top - 1, "background image removed");
            }
        }

        /* 2) Advance the tween (writes straight into the scene) */
        animator.tick(&mut scene, now);

        /* 3) Composite every pixel */
        render(&scene, &mut screen);

        /* 4) HUD text */
        let status = match animator.progress(now) {
            Some(p) => format!("ANIM {:.0}%", p * 100.0),
            None => String::from("IDLE"),
        };
        let hud = format!("{} | IMG {} | {}", status, scene.background.images().len(), hud_fps_text);
        draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_FF_FF_FF);

        /* 5) Present to the window (this is when the on-screen image updates). */
        drawer.present(&screen)?;

        /* 6) FPS counter (logs + HUD once per second) */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            tracing::debug!(fps, "frame rate");
            hud_fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    Ok(())
}
