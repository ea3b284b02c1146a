use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;
use std::time::Instant;

use easel_engine::reactive::Subscription;
use easel_engine::scene::DrawList;
use easel_engine::text::FontLoadError;
use easel_engine::time::FrameScheduler;
use easel_ui::prelude::*;

use crate::actions::{ActionRunner, ErrorLatch};
use crate::config::OverlayConfig;
use crate::error::{DebugError, DebugResult};
use crate::flags::{FlagRegistry, SHOW_FPS};
use crate::fps::{FpsMeter, FpsMonitor};
use crate::host::DebugHost;
use crate::menu::{DebugMenu, MenuStyle};
use crate::readout::Readouts;

/// The debug bar pinned to the bottom of the viewport.
///
/// Left to right: current editor state, FPS meter (while `showFps` is on),
/// shape count and the debug menu. The panel owns its UI scene and rebuilds
/// its widgets every frame; [`frame`](Self::frame) should be called once per
/// presented frame, after the host ran its [`FrameScheduler`].
pub struct DebugPanel {
    config: OverlayConfig,
    flags: Rc<FlagRegistry>,
    readouts: Readouts,
    menu: DebugMenu,
    latch: ErrorLatch,
    frame_items: Rc<Cell<usize>>,
    monitor: Rc<RefCell<Option<FpsMonitor>>>,
    _show_fps: Option<Subscription>,
    scene: UiScene,
    style: MenuStyle,
    background: Color,
}

impl DebugPanel {
    pub fn new(config: OverlayConfig, host: DebugHost, flags: FlagRegistry) -> DebugResult<Self> {
        config.validate()?;
        if flags.environment() != config.environment {
            log::warn!(
                "flag registry built for {} but overlay configured for {}",
                flags.environment(),
                config.environment
            );
        }

        let flags = Rc::new(flags);
        let latch = ErrorLatch::default();
        let frame_items = Rc::new(Cell::new(0));
        let runner = ActionRunner::new(
            host.clone(),
            flags.clone(),
            latch.clone(),
            config.create_shape_count,
            frame_items.clone(),
        );

        // Unmounts right away; mounting needs the scheduler and waits for a frame.
        let monitor: Rc<RefCell<Option<FpsMonitor>>> = Rc::default();
        let show_fps = {
            let monitor = Rc::downgrade(&monitor);
            flags
                .subscribe(SHOW_FPS, move |on| {
                    if on {
                        return;
                    }
                    if let Some(monitor) = monitor.upgrade() {
                        monitor.borrow_mut().take();
                    }
                })
                .ok()
        };

        Ok(Self {
            readouts: Readouts::mount(&host.editor),
            menu: DebugMenu::new(runner, flags.clone()),
            style: MenuStyle::new(FontId::DEFAULT, config.font_size),
            background: Color::from_straight(0.08, 0.08, 0.1, 0.92),
            monitor,
            _show_fps: show_fps,
            scene: UiScene::new(),
            config,
            flags,
            latch,
            frame_items,
        })
    }

    /// Loads the overlay font. Without one, text is laid out with fixed
    /// fallback metrics.
    pub fn load_font(&mut self, data: &[u8]) -> Result<FontId, FontLoadError> {
        let id = self.scene.load_font(data)?;
        self.style.font = id;
        Ok(id)
    }

    pub fn flags(&self) -> &FlagRegistry {
        &self.flags
    }

    pub fn menu(&self) -> &DebugMenu {
        &self.menu
    }

    pub fn readouts(&self) -> &Readouts {
        &self.readouts
    }

    pub fn fps_monitor(&self) -> Option<Ref<'_, FpsMonitor>> {
        Ref::filter_map(self.monitor.borrow(), Option::as_ref).ok()
    }

    /// Draw list of the last successful frame.
    pub fn draw_list(&self) -> &DrawList {
        &self.scene.draw_list
    }

    pub fn frame(
        &mut self,
        scheduler: &mut FrameScheduler,
        viewport: Vec2,
        input: &UiInput,
    ) -> DebugResult<&DrawList> {
        self.frame_at(scheduler, Instant::now(), viewport, input)
    }

    /// Like [`frame`](Self::frame) with an explicit timestamp, used when a
    /// newly mounted FPS monitor opens its first window.
    pub fn frame_at(
        &mut self,
        scheduler: &mut FrameScheduler,
        now: Instant,
        viewport: Vec2,
        input: &UiInput,
    ) -> DebugResult<&DrawList> {
        if self.latch.take() {
            self.scene.draw_list.clear();
            log::error!("debug panel: {}", DebugError::InjectedFailure);
            return Err(DebugError::InjectedFailure);
        }

        self.sync_fps_monitor(scheduler, now);

        let root = self.build();
        let list = self.scene.frame(root, viewport, input);
        self.frame_items.set(list.len());
        Ok(list)
    }

    /// Mounts or unmounts the FPS monitor to match the `showFps` flag.
    fn sync_fps_monitor(&mut self, scheduler: &mut FrameScheduler, now: Instant) {
        let show = self.flags.get(SHOW_FPS).unwrap_or(false);
        let mut monitor = self.monitor.borrow_mut();
        match (show, monitor.is_some()) {
            (true, false) => *monitor = Some(FpsMonitor::start_at(scheduler, &self.config.fps, now)),
            // Drop stops it.
            (false, true) => *monitor = None,
            _ => {}
        }
    }

    fn build(&self) -> Element {
        let s = &self.style;
        let fps = self
            .monitor
            .borrow()
            .as_ref()
            .map(|m| FpsMeter::new(m.sample(), s.font, s.font_size));

        let bar = Row::new()
            .spacing(12.0)
            .cross_align(Align::Center)
            .child(Text::new(self.readouts.current_state(), s.font, s.font_size, s.text))
            .child_opt(fps)
            .child(Text::new(self.readouts.shape_count(), s.font, s.font_size, s.text))
            .child(self.menu.build(s));

        Anchor::new(
            Corner::BottomLeft,
            Container::new()
                .padding(Edges::symmetric(2.0, 8.0))
                .background(self.background)
                .child(bar),
        )
        .fill_width(true)
        .into()
    }
}
