//! MeetInk rendering.
//!
//! Surface abstraction, the offscreen raster implementation, the full and
//! incremental render paths with the author-label policy, and PNG export.

pub mod export;
pub mod font;
pub mod renderer;
pub mod surface;

pub use export::{ExportError, ExportImage, export_filename, export_png};
pub use renderer::{LABEL_LINGER_MS, RenderContext};
pub use surface::{DrawSurface, PixelSurface};
