//! Off-screen color-keyed picking surface.
//!
//! The hit canvas answers "which interactive region is under point P" in
//! O(1), without geometric hit testing. It is a second drawing surface, the
//! same size as the visible one, never displayed. Widget drawing code
//! mirrors its path geometry onto it with a reserved flat color per region,
//! so occlusion resolves exactly like visible z-order: last drawn wins.
//!
//! The region registry is a per-frame arena: cleared and rebuilt on every
//! draw pass, so regions of disposed widgets can never leak across frames.

use crate::event::Cursor;
use crate::render::surface::{FillStyle, Surface};
use crate::render::RasterSurface;
use crate::property::Color;

// ---------------------------------------------------------------------------
// HitRegion
// ---------------------------------------------------------------------------

/// An interactive footprint registered for the duration of one draw pass.
///
/// The region id is derived from the owning widget's `wuid` plus a role
/// discriminator, so re-registration across frames overwrites rather than
/// accumulates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HitRegion {
    pub wuid: String,
    pub role: String,
    pub cursor: Cursor,
    /// Whether the owning widget handles clicks on this region.
    pub click: bool,
    /// Whether the owning widget handles press/release on this region.
    pub press: bool,
}

impl HitRegion {
    /// Create a passive region (attributes the area, handles nothing).
    pub fn new(wuid: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            wuid: wuid.into(),
            role: role.into(),
            cursor: Cursor::Default,
            click: false,
            press: false,
        }
    }

    /// Mark the region as click-handling with a pointer cursor (builder).
    pub fn clickable(mut self) -> Self {
        self.click = true;
        self.cursor = Cursor::Pointer;
        self
    }

    /// Mark the region as press-handling with a pointer cursor (builder).
    pub fn pressable(mut self) -> Self {
        self.press = true;
        self.cursor = Cursor::Pointer;
        self
    }

    /// The stable region id: `{wuid}-{role}`.
    pub fn id(&self) -> String {
        format!("{}-{}", self.wuid, self.role)
    }
}

// ---------------------------------------------------------------------------
// HitCanvas
// ---------------------------------------------------------------------------

/// The picking surface plus its per-frame color → region registry.
///
/// Reserved colors come from a monotonic counter; color zero is the cleared
/// background and is never handed out, so one frame supports 2^24 - 1
/// distinct regions without collision.
pub struct HitCanvas {
    surface: RasterSurface,
    regions: Vec<HitRegion>,
}

impl HitCanvas {
    /// Create a hit canvas matching the visible surface dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { surface: RasterSurface::new(width, height), regions: Vec::new() }
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Resize the backing store (contents reset).
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
        self.regions.clear();
    }

    /// Clear the surface and reset the region registry for a new frame.
    pub fn clear(&mut self) {
        self.surface.clear();
        self.regions.clear();
    }

    /// Number of regions registered so far this frame.
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Reserve the next unused color for `region` and make it the active
    /// fill and stroke color for subsequent mirrored drawing calls.
    pub fn begin_region(&mut self, region: HitRegion) {
        let color = Self::color_for(self.regions.len());
        self.regions.push(region);
        self.surface.set_fill_style(FillStyle::Solid(color));
        self.surface.set_stroke_style(color);
    }

    /// The drawing context widgets mirror their path geometry into.
    pub fn ctx(&mut self) -> &mut dyn Surface {
        &mut self.surface
    }

    /// Resolve the region under a point, or `None` over background.
    pub fn resolve(&self, x: f64, y: f64) -> Option<&HitRegion> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let pixel = self.surface.read_pixel(x as u32, y as u32);
        if pixel.is_transparent() {
            return None;
        }
        self.regions.get(Self::index_for(pixel)?)
    }

    fn color_for(index: usize) -> Color {
        let key = (index + 1) as u32; // zero is background-reserved
        Color::new((key >> 16) as u8, (key >> 8) as u8, key as u8)
    }

    fn index_for(color: Color) -> Option<usize> {
        let key =
            ((color.red as u32) << 16) | ((color.green as u32) << 8) | color.blue as u32;
        (key > 0).then(|| (key - 1) as usize)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Bounds;

    #[test]
    fn region_id_is_wuid_plus_role() {
        let r = HitRegion::new("w42", "shaft");
        assert_eq!(r.id(), "w42-shaft");
    }

    #[test]
    fn reserved_colors_are_distinct_and_opaque() {
        let mut seen = std::collections::HashSet::new();
        for i in 0..1000 {
            let c = HitCanvas::color_for(i);
            assert_eq!(c.alpha, 255);
            assert!(seen.insert(c), "color reused for index {i}");
        }
    }

    #[test]
    fn resolve_finds_filled_region() {
        let mut hit = HitCanvas::new(50, 50);
        hit.begin_region(HitRegion::new("a", "holder").clickable());
        hit.ctx().fill_rect(Bounds::new(10.0, 10.0, 20.0, 20.0));

        let found = hit.resolve(15.0, 15.0).expect("inside the footprint");
        assert_eq!(found.wuid, "a");
        assert!(found.click);
        assert!(hit.resolve(45.0, 45.0).is_none());
    }

    #[test]
    fn overlapping_regions_resolve_to_last_drawn() {
        let mut hit = HitCanvas::new(50, 50);
        hit.begin_region(HitRegion::new("below", "holder"));
        hit.ctx().fill_rect(Bounds::new(0.0, 0.0, 40.0, 40.0));
        hit.begin_region(HitRegion::new("above", "holder"));
        hit.ctx().fill_rect(Bounds::new(10.0, 10.0, 10.0, 10.0));

        assert_eq!(hit.resolve(15.0, 15.0).unwrap().wuid, "above");
        assert_eq!(hit.resolve(35.0, 35.0).unwrap().wuid, "below");
    }

    #[test]
    fn one_region_never_resolves_as_another() {
        let mut hit = HitCanvas::new(60, 20);
        hit.begin_region(HitRegion::new("a", "holder"));
        hit.ctx().fill_rect(Bounds::new(0.0, 0.0, 20.0, 20.0));
        hit.begin_region(HitRegion::new("b", "holder"));
        hit.ctx().fill_rect(Bounds::new(30.0, 0.0, 20.0, 20.0));

        assert_eq!(hit.resolve(10.0, 10.0).unwrap().wuid, "a");
        assert_eq!(hit.resolve(40.0, 10.0).unwrap().wuid, "b");
        assert!(hit.resolve(25.0, 10.0).is_none());
    }

    #[test]
    fn clear_resets_registry_and_pixels() {
        let mut hit = HitCanvas::new(20, 20);
        hit.begin_region(HitRegion::new("a", "holder"));
        hit.ctx().fill_rect(Bounds::new(0.0, 0.0, 20.0, 20.0));
        hit.clear();
        assert_eq!(hit.region_count(), 0);
        assert!(hit.resolve(10.0, 10.0).is_none());
    }

    #[test]
    fn mirrored_path_geometry_matches_footprint() {
        let mut hit = HitCanvas::new(40, 40);
        hit.begin_region(HitRegion::new("sw", "shaft").pressable());
        let ctx = hit.ctx();
        ctx.begin_path();
        ctx.ellipse(20.0, 20.0, 12.0, 8.0);
        ctx.fill();

        assert_eq!(hit.resolve(20.0, 20.0).unwrap().role, "shaft");
        assert!(hit.resolve(2.0, 2.0).is_none());
    }

    #[test]
    fn negative_coordinates_miss() {
        let hit = HitCanvas::new(10, 10);
        assert!(hit.resolve(-1.0, 5.0).is_none());
    }
}
