//! Freehand capture of signatures and sketches
//!
//! A [`CaptureSession`] turns pointer events into line segments on a
//! [`DrawingSurface`]. Pointer positions arrive in client coordinates and are
//! translated into surface-local coordinates using the surface offset from
//! the last [`CaptureSession::sync_layout`].
//!
//! The session handles a single pointer. It holds `&mut` state between a
//! pointer-down and the following up/leave, so it is owned by one caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::attachment::Attachment;

/// Pressure used when the device reports none (or reports zero)
pub const FALLBACK_PRESSURE: f64 = 0.5;

/// Thinnest stroke drawn, in CSS pixels
pub const MIN_STROKE_WIDTH: f64 = 1.5;

/// Stroke width per unit of pressure
pub const PRESSURE_WIDTH_FACTOR: f64 = 4.0;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("invalid device pixel ratio: {0}")]
    InvalidScale(f64),

    #[error("surface snapshot failed: {0}")]
    Snapshot(String),
}

/// A point in surface-local CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// On-screen placement of the surface, as reported by layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// A pointer sample in client coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub client_x: f64,
    pub client_y: f64,
    /// Normalized pressure in `0.0..=1.0`; `None` when the device has no sensor
    pub pressure: Option<f64>,
}

impl PointerSample {
    pub fn at(client_x: f64, client_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            pressure: None,
        }
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    /// Reported pressure, or [`FALLBACK_PRESSURE`] when absent or zero
    pub fn effective_pressure(&self) -> f64 {
        match self.pressure {
            Some(p) if p > 0.0 => p,
            _ => FALLBACK_PRESSURE,
        }
    }
}

/// Width of a segment drawn at `pressure`
pub fn stroke_width(pressure: f64) -> f64 {
    (PRESSURE_WIDTH_FACTOR * pressure).max(MIN_STROKE_WIDTH)
}

/// Raster target of a capture session
pub trait DrawingSurface: Send {
    /// Resize the backing store to `css × dpr` and scale drawing by `dpr`
    fn resize(&mut self, css_width: f64, css_height: f64, dpr: f64) -> Result<(), CaptureError>;

    /// Draw a round-capped straight segment
    fn stroke(&mut self, from: Point, to: Point, width: f64);

    fn clear(&mut self);

    /// Encode the current content as an embeddable image
    fn snapshot(&self) -> Result<Attachment, CaptureError>;
}

/// A recorded segment of an [`InMemorySurface`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub width: f64,
}

/// Surface that records segments and snapshots them as SVG
#[derive(Debug, Clone, Default)]
pub struct InMemorySurface {
    css_width: f64,
    css_height: f64,
    backing_width: u32,
    backing_height: u32,
    segments: Vec<Segment>,
}

impl InMemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Backing-store size in device pixels
    pub fn backing_size(&self) -> (u32, u32) {
        (self.backing_width, self.backing_height)
    }

    fn to_svg(&self) -> String {
        let mut svg = format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}" fill="none" stroke="#111" stroke-linecap="round" stroke-linejoin="round">"##,
            self.backing_width, self.backing_height, self.css_width, self.css_height
        );
        for s in &self.segments {
            svg.push_str(&format!(
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke-width="{:.2}"/>"#,
                s.from.x, s.from.y, s.to.x, s.to.y, s.width
            ));
        }
        svg.push_str("</svg>");
        svg
    }
}

impl DrawingSurface for InMemorySurface {
    fn resize(&mut self, css_width: f64, css_height: f64, dpr: f64) -> Result<(), CaptureError> {
        if !dpr.is_finite() || dpr <= 0.0 {
            return Err(CaptureError::InvalidScale(dpr));
        }
        self.css_width = css_width.max(0.0);
        self.css_height = css_height.max(0.0);
        self.backing_width = (self.css_width * dpr).round() as u32;
        self.backing_height = (self.css_height * dpr).round() as u32;
        // A resized canvas loses its content.
        self.segments.clear();
        Ok(())
    }

    fn stroke(&mut self, from: Point, to: Point, width: f64) {
        self.segments.push(Segment { from, to, width });
    }

    fn clear(&mut self) {
        self.segments.clear();
    }

    fn snapshot(&self) -> Result<Attachment, CaptureError> {
        Ok(Attachment::from_bytes("image/svg+xml", self.to_svg().as_bytes()))
    }
}

/// Pointer-driven drawing over a [`DrawingSurface`]
pub struct CaptureSession<S: DrawingSurface> {
    surface: S,
    draw_mode: bool,
    drawing: bool,
    last_point: Option<Point>,
    offset: Point,
    saved: Option<Attachment>,
}

impl<S: DrawingSurface> CaptureSession<S> {
    /// Start a session with draw mode off
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            draw_mode: false,
            drawing: false,
            last_point: None,
            offset: Point::default(),
            saved: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn draw_mode(&self) -> bool {
        self.draw_mode
    }

    pub fn set_draw_mode(&mut self, enabled: bool) {
        self.draw_mode = enabled;
        if !enabled {
            self.end_stroke();
        }
    }

    pub fn toggle_draw_mode(&mut self) -> bool {
        self.set_draw_mode(!self.draw_mode);
        self.draw_mode
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn saved(&self) -> Option<&Attachment> {
        self.saved.as_ref()
    }

    /// Follow a layout change of the surface
    pub fn sync_layout(&mut self, rect: SurfaceRect, dpr: f64) -> Result<(), CaptureError> {
        self.surface.resize(rect.width, rect.height, dpr)?;
        self.offset = Point::new(rect.left, rect.top);
        Ok(())
    }

    fn local(&self, sample: &PointerSample) -> Point {
        Point::new(
            sample.client_x - self.offset.x,
            sample.client_y - self.offset.y,
        )
    }

    pub fn pointer_down(&mut self, sample: PointerSample) {
        if !self.draw_mode {
            return;
        }
        self.drawing = true;
        self.last_point = Some(self.local(&sample));
    }

    pub fn pointer_move(&mut self, sample: PointerSample) {
        if !self.draw_mode || !self.drawing {
            return;
        }
        let point = self.local(&sample);
        if let Some(from) = self.last_point {
            let width = stroke_width(sample.effective_pressure());
            self.surface.stroke(from, point, width);
        }
        self.last_point = Some(point);
    }

    pub fn pointer_up(&mut self) {
        self.end_stroke();
    }

    pub fn pointer_leave(&mut self) {
        self.end_stroke();
    }

    fn end_stroke(&mut self) {
        self.drawing = false;
        self.last_point = None;
    }

    /// Erase the surface and forget any saved snapshot
    pub fn clear(&mut self) {
        self.surface.clear();
        self.saved = None;
        self.end_stroke();
    }

    /// Keep the current content for the next submit
    pub fn save(&mut self) -> Result<&Attachment, CaptureError> {
        let snapshot = self.surface.snapshot()?;
        Ok(self.saved.insert(snapshot))
    }

    /// The saved snapshot, or the current content if nothing was saved
    pub fn attachment_for_submit(&self) -> Result<Attachment, CaptureError> {
        match &self.saved {
            Some(saved) => Ok(saved.clone()),
            None => self.surface.snapshot(),
        }
    }
}

impl Default for CaptureSession<InMemorySurface> {
    fn default() -> Self {
        Self::new(InMemorySurface::new())
    }
}
