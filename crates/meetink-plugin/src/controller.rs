//! The whiteboard controller: one owner for all session state.
//!
//! Wires local capture, the committed picture, the replication engine and
//! the renderer to the host runtime and the messaging channel. All mutation
//! happens on the host's single-threaded event timeline, so no locking is
//! involved; cross-participant concurrency is handled (loosely, by design)
//! at the protocol level.

use chrono::Utc;
use meetink_core::{
    EventBroadcast, PointerEvent, RemoteChange, ReplicationEngine, SessionIdentity,
    StrokeCapture, ToolSettings, WhiteboardError, WhiteboardEvent, WhiteboardState, time,
};
use meetink_render::{DrawSurface, PixelSurface, RenderContext, export_png};

use crate::host::{ContainerInfo, HostUi, launcher_button};
use crate::toolbar::ToolbarAction;

pub struct WhiteboardController {
    session: SessionIdentity,
    tools: ToolSettings,
    board: WhiteboardState,
    capture: StrokeCapture,
    engine: ReplicationEngine,
    /// The live overlay canvas; present exactly while the whiteboard is
    /// open.
    surface: Option<PixelSurface>,
    host: Box<dyn HostUi>,
    transport: Box<dyn EventBroadcast>,
}

impl WhiteboardController {
    /// Create a controller with a fresh local identity.
    pub fn new(host: Box<dyn HostUi>, transport: Box<dyn EventBroadcast>) -> Self {
        let session = SessionIdentity::new();
        let engine = ReplicationEngine::new(session.user_id());
        Self {
            session,
            tools: ToolSettings::new(),
            board: WhiteboardState::new(),
            capture: StrokeCapture::new(),
            engine,
            surface: None,
            host,
            transport,
        }
    }

    /// Register the launcher button with the host toolbar. Called once at
    /// plugin load.
    pub fn install(&mut self) -> Result<(), WhiteboardError> {
        self.host.add_toolbar_button(launcher_button())
    }

    /// Apply a late participant-name resolution from the host.
    ///
    /// Affects future strokes and labels only; nothing already drawn is
    /// relabeled.
    pub fn set_display_name(&mut self, name: impl Into<String>) {
        self.session.set_display_name(name);
    }

    pub fn session(&self) -> &SessionIdentity {
        &self.session
    }

    pub fn tools(&self) -> &ToolSettings {
        &self.tools
    }

    pub fn is_open(&self) -> bool {
        self.board.is_active()
    }

    /// The live overlay canvas, for the host to composite. `None` while
    /// closed.
    pub fn surface(&self) -> Option<&PixelSurface> {
        self.surface.as_ref()
    }

    /// Launcher button press: open the overlay, or close it when already
    /// open.
    pub fn toggle(&mut self) -> Result<(), WhiteboardError> {
        if self.is_open() {
            self.close();
            Ok(())
        } else {
            self.open()
        }
    }

    /// Open the whiteboard for everyone.
    ///
    /// Environment failures (missing video container, unusable surface)
    /// abort before any state changes, leaving no partial overlay behind.
    pub fn open(&mut self) -> Result<(), WhiteboardError> {
        if self.is_open() {
            return Ok(());
        }
        let container = self.host.video_container().ok_or(WhiteboardError::ContainerNotFound)?;
        let surface = Self::create_surface(container)?;

        self.board.open();
        self.surface = Some(surface);
        self.redraw_full();
        self.engine.queue_open(self.session.display_name());
        self.flush();
        Ok(())
    }

    /// Close the whiteboard for everyone and discard all state.
    pub fn close(&mut self) {
        if !self.is_open() {
            return;
        }
        self.teardown();
        self.engine.queue_close();
        self.flush();
    }

    /// Wipe the shared picture.
    pub fn clear(&mut self) {
        if !self.is_open() {
            return;
        }
        self.board.clear();
        self.redraw_full();
        self.engine.queue_clear();
        self.flush();
    }

    /// Remove the most recent committed stroke, whoever drew it.
    pub fn undo(&mut self) {
        if !self.is_open() {
            return;
        }
        // An undo on an empty picture changes nothing locally and is not
        // worth a broadcast.
        if self.board.undo() {
            self.redraw_full();
            self.engine.queue_undo();
            self.flush();
        }
    }

    /// Export the picture as a PNG and hand it to the host as a download.
    ///
    /// The one failure that is surfaced to the user, as a transient
    /// notification.
    pub fn export(&mut self) {
        let Some(surface) = self.surface.as_ref() else {
            return;
        };
        let (width, height) = (surface.width(), surface.height());
        let ctx = self.render_ctx();
        match export_png(&ctx, width, height, Utc::now()) {
            Ok(image) => {
                if let Err(err) = self.host.deliver_download(&image.filename, &image.bytes) {
                    log::warn!("download delivery failed: {err}");
                    self.host.show_notification("Whiteboard export failed");
                }
            }
            Err(err) => {
                log::warn!("whiteboard export failed: {err}");
                self.host.show_notification("Whiteboard export failed");
            }
        }
    }

    /// Dispatch a press on one of the on-canvas toolbar controls.
    pub fn handle_action(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::Close => self.close(),
            ToolbarAction::Clear => self.clear(),
            ToolbarAction::Undo => self.undo(),
            ToolbarAction::Export => self.export(),
            ToolbarAction::SelectColor(index) => {
                self.tools.select_color(index);
            }
            ToolbarAction::ToggleEraser => self.tools.toggle_eraser(),
            ToolbarAction::TogglePresentation => {
                self.tools.toggle_presentation();
                self.redraw_full();
            }
            ToolbarAction::ToggleBackground => {
                if self.tools.toggle_background() {
                    self.redraw_full();
                }
            }
        }
    }

    /// Feed a normalized pointer gesture event from the input binding.
    ///
    /// Every extension renders immediately and broadcasts the accumulated
    /// stroke; the gesture end commits locally without a further broadcast
    /// (peers already hold the final point list from the last extension).
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if !self.is_open() {
            return;
        }
        match event {
            PointerEvent::Down(point) => {
                if self.capture.begin(point, &self.tools, &self.session, time::now_millis()) {
                    self.redraw_in_progress();
                }
            }
            PointerEvent::Move(point) => {
                if let Some(snapshot) = self.capture.extend(point) {
                    self.engine.queue_draw(snapshot.clone());
                    self.redraw_in_progress();
                    self.flush();
                }
            }
            PointerEvent::Up => {
                if let Some(stroke) = self.capture.end() {
                    if self.board.commit(stroke) {
                        self.redraw_last();
                    }
                }
            }
        }
    }

    /// Feed an inbound broadcast payload from the messaging channel.
    pub fn handle_remote(&mut self, payload: &str) {
        let Some(event) = WhiteboardEvent::decode(payload) else {
            return;
        };
        match self.engine.apply(&mut self.board, event) {
            Some(RemoteChange::Opened { author_name }) => {
                match self.host.video_container().ok_or(WhiteboardError::ContainerNotFound)
                    .and_then(Self::create_surface)
                {
                    Ok(surface) => {
                        self.surface = Some(surface);
                        self.redraw_full();
                        self.host
                            .show_notification(&format!("{author_name} opened the whiteboard"));
                    }
                    Err(err) => {
                        // Abort the open without leaving half an overlay.
                        log::warn!("cannot open overlay for remote peer: {err}");
                        self.board.close();
                    }
                }
            }
            Some(RemoteChange::Closed) => {
                self.teardown();
                self.host.show_notification("The whiteboard was closed");
            }
            Some(RemoteChange::StrokeAdded) => self.redraw_last(),
            Some(RemoteChange::Cleared) | Some(RemoteChange::Undone) => self.redraw_full(),
            None => {}
        }
    }

    // --- Internals ---

    fn create_surface(container: ContainerInfo) -> Result<PixelSurface, WhiteboardError> {
        PixelSurface::new(container.width, container.height)
    }

    fn teardown(&mut self) {
        self.board.close();
        self.capture.cancel();
        self.surface = None;
    }

    fn flush(&mut self) {
        self.engine.flush(self.transport.as_ref());
    }

    fn render_ctx(&self) -> RenderContext<'_> {
        RenderContext::new(self.board.strokes(), time::now_millis())
            .with_background(self.tools.background)
            .with_presentation(self.tools.presentation)
    }

    /// Recompute the whole canvas, then keep the local in-progress stroke
    /// visible on top (it is not part of the committed list and survives
    /// remote clears untouched).
    fn redraw_full(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let ctx = RenderContext::new(self.board.strokes(), time::now_millis())
            .with_background(self.tools.background)
            .with_presentation(self.tools.presentation);
        ctx.render_full(surface);
        if let Some(stroke) = self.capture.current() {
            ctx.render_in_progress(surface, stroke);
        }
    }

    /// Incremental render of the newest committed stroke.
    fn redraw_last(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let Some(stroke) = self.board.last() else {
            return;
        };
        let ctx = RenderContext::new(self.board.strokes(), time::now_millis())
            .with_background(self.tools.background)
            .with_presentation(self.tools.presentation);
        ctx.render_incremental(surface, stroke);
    }

    /// Incremental render of the local in-progress stroke (no label).
    fn redraw_in_progress(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let Some(stroke) = self.capture.current() else {
            return;
        };
        let ctx = RenderContext::new(self.board.strokes(), time::now_millis())
            .with_background(self.tools.background)
            .with_presentation(self.tools.presentation);
        ctx.render_in_progress(surface, stroke);
    }
}
