use std::rc::Rc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use easel_debug::memory::{MemoryDialogs, MemoryEditor, MemoryToasts};
use easel_debug::{DebugAction, DebugHost, DebugPanel, Editor, FlagRegistry, OverlayConfig, ShapeId, ShapeInfo};
use easel_engine::coords::Vec2;
use easel_engine::logging::{init_logging, LoggingConfig};
use easel_engine::scene::{DrawCmd, DrawList};
use easel_engine::time::FrameScheduler;
use easel_ui::scene::UiInput;

const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

/// One stretch of the demo: `frames` frames presented `interval` apart.
struct Phase {
    name: &'static str,
    interval: Duration,
    frames: u32,
}

const PHASES: &[Phase] = &[
    Phase { name: "steady 60 Hz", interval: Duration::from_micros(16_667), frames: 90 },
    Phase { name: "heavy scene, 20 Hz", interval: Duration::from_millis(50), frames: 20 },
    Phase { name: "recovered, 55 Hz", interval: Duration::from_micros(18_182), frames: 60 },
];

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(err) = run() {
        log::error!("easel-studio failed: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = OverlayConfig::from_env().context("reading overlay configuration")?;
    log::info!("overlay config: {config:?}");

    let editor = Rc::new(MemoryEditor::new());
    let toasts = Rc::new(MemoryToasts::new());
    let dialogs = Rc::new(MemoryDialogs::new());

    let reset_target = editor.clone();
    let host = DebugHost::new(editor.clone(), toasts.clone(), dialogs.clone())
        .on_hard_reset(move || reset_target.clear());

    let flags = FlagRegistry::with_debug_flags(config.environment);
    let mut panel = DebugPanel::new(config, host, flags).context("creating debug panel")?;

    let font = load_font();
    if font.is_empty() {
        log::warn!("no system font found; using fallback text metrics");
    } else if let Err(err) = panel.load_font(&font) {
        log::warn!("font rejected ({err}); using fallback text metrics");
    }

    seed_editor(&editor);

    let mut scheduler = FrameScheduler::new();
    let mut frames: u64 = 0;
    let mut last_fps = String::new();

    for phase in PHASES {
        log::info!("phase: {}", phase.name);
        for _ in 0..phase.frames {
            let time = scheduler.run_frame();
            let frame = time.frame_index;

            let input = script(&panel, &editor, frame);
            match panel.frame(&mut scheduler, VIEWPORT, &input) {
                Ok(list) => {
                    let fps = fps_label(list);
                    if fps != last_fps {
                        log::info!("#{frame} dt {:.1} ms: {}", time.dt * 1000.0, overlay_line(list));
                        last_fps = fps;
                    }
                }
                Err(err) => log::error!("overlay frame {frame} failed: {err}"),
            }

            frames = frame + 1;
            thread::sleep(phase.interval);
        }
    }

    log::info!(
        "done after {frames} frames: {} shapes, {} toasts, {} dialogs",
        editor.rendering_shape_count(),
        toasts.toasts().len(),
        dialogs.dialogs().len(),
    );
    Ok(())
}

fn seed_editor(editor: &MemoryEditor) {
    editor.add_shape(
        ShapeInfo { id: ShapeId(1), kind: "geo".into(), geo: Some("ellipse".into()) },
        Vec2::new(200.0, 150.0),
    );
    editor.set_hovered(Some(ShapeInfo { id: ShapeId(1), kind: "geo".into(), geo: Some("ellipse".into()) }));
    editor.set_pointer(Vec2::new(240.0, 180.0), Vec2::new(240.0, 180.0));
}

/// Scripted interactions: a drag, then a few menu actions.
fn script(panel: &DebugPanel, editor: &MemoryEditor, frame: u64) -> UiInput {
    match frame {
        20 => {
            editor.set_path("select.translating");
            editor.set_pointer(Vec2::new(300.0, 220.0), Vec2::new(240.0, 180.0));
        }
        30 => editor.set_path("select.idle"),
        40 => return click_text(panel.draw_list(), "Debug"),
        // The popup first paints on the frame after the trigger click.
        42 => return click_text(panel.draw_list(), "Show toast"),
        50 => {
            if let Err(err) = panel.menu().run_action(DebugAction::CreateShapes) {
                log::error!("create shapes failed: {err}");
            }
        }
        60 => {
            if let Err(err) = panel.menu().run_action(DebugAction::ThrowError) {
                log::error!("throw error failed: {err}");
            }
        }
        _ => {}
    }
    UiInput::default()
}

fn click_text(list: &DrawList, text: &str) -> UiInput {
    match list.find_text(text) {
        Some(cmd) => UiInput::click(cmd.origin + Vec2::new(1.0, 1.0)),
        None => {
            log::warn!("`{text}` not on screen; skipping click");
            UiInput::default()
        }
    }
}

fn fps_label(list: &DrawList) -> String {
    list.texts()
        .find(|t| t.text.starts_with("FPS "))
        .map(|t| t.text.clone())
        .unwrap_or_default()
}

/// Text of the overlay as it would be composited, back to front.
fn overlay_line(list: &DrawList) -> String {
    list.iter_in_paint_order()
        .filter_map(|item| match &item.cmd {
            DrawCmd::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

fn load_font() -> Vec<u8> {
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok())
    .unwrap_or_default()
}
