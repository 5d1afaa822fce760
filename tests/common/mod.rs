// Mock rasterizer and recording device
#![allow(dead_code)]

use glyph_text::raster::{Bitmap, FaceFlags, Outline, RasterError, RasterFace, Rasterizer};
use glyph_text::raster::{RenderedGlyph, StrokeStyle, Stroker};
use glyph_text::{Device, GlyphId, ImageError, Rgba, Vec2};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Metrics of a mock glyph, independent of size
#[derive(Clone, Copy, Debug)]
pub struct GlyphSpec {
    pub id: u16,
    pub width: u32,
    pub rows: u32,
    pub left: i32,
    pub top: i32,
    pub advance: i32,
}

#[derive(Clone, Debug)]
pub struct FaceSpec {
    pub flags: FaceFlags,
    pub glyphs: HashMap<char, GlyphSpec>,
    /// Kerning at 32px, scaled linearly with size
    pub kerning: HashMap<(u16, u16), i32>,
    pub missing: GlyphSpec,
    pub fail_render: Vec<char>,
    pub fail_outline_raster: bool,
}

/// A face with 'A', 'B', 'V', 'a' and ' '
pub fn latin_face() -> FaceSpec {
    let mut glyphs = HashMap::new();
    #[rustfmt::skip]
    let specs = [
        ('A', GlyphSpec { id: 1, width: 20, rows: 22, left: 1, top: 22, advance: 21 }),
        ('B', GlyphSpec { id: 2, width: 17, rows: 22, left: 2, top: 22, advance: 20 }),
        ('V', GlyphSpec { id: 3, width: 21, rows: 22, left: 0, top: 22, advance: 21 }),
        ('a', GlyphSpec { id: 4, width: 15, rows: 17, left: 1, top: 17, advance: 17 }),
        (' ', GlyphSpec { id: 5, width: 0, rows: 0, left: 0, top: 0, advance: 9 }),
    ];
    glyphs.extend(specs);

    let mut kerning = HashMap::new();
    kerning.insert((1, 3), -4); // A V
    kerning.insert((3, 1), -4); // V A
    kerning.insert((1, 2), -2); // A B

    FaceSpec {
        flags: FaceFlags::SCALABLE | FaceFlags::CHARMAP | FaceFlags::KERNING,
        glyphs,
        kerning,
        missing: GlyphSpec {
            id: 0,
            width: 14,
            rows: 20,
            left: 2,
            top: 20,
            advance: 18,
        },
        fail_render: vec![],
        fail_outline_raster: false,
    }
}

/// Shared state of the mock library, for inspection by tests
#[derive(Debug, Default)]
pub struct MockState {
    pub faces: RefCell<HashMap<PathBuf, FaceSpec>>,
    pub fail_open: Cell<bool>,
    pub fail_stroker: Cell<bool>,
    pub libraries_open: Cell<i32>,
    pub faces_open: Cell<i32>,
    pub set_size_calls: RefCell<Vec<u32>>,
    pub stroker_sets: RefCell<Vec<StrokeStyle>>,
    pub renders: RefCell<Vec<(u16, u32)>>,
    pub outline_rasters: RefCell<Vec<(u16, u32)>>,
    pub outlines_loaded: Cell<usize>,
    pub outlines_dropped: Cell<usize>,
}

impl MockState {
    pub fn new() -> Rc<Self> {
        Rc::new(MockState::default())
    }

    pub fn add_face(&self, path: &str, spec: FaceSpec) {
        self.faces.borrow_mut().insert(PathBuf::from(path), spec);
    }

    pub fn render_count(&self) -> usize {
        self.renders.borrow().len()
    }

    pub fn outline_count(&self) -> usize {
        self.outline_rasters.borrow().len()
    }
}

pub struct MockRasterizer {
    state: Rc<MockState>,
}

impl Drop for MockRasterizer {
    fn drop(&mut self) {
        self.state.libraries_open.set(self.state.libraries_open.get() - 1);
    }
}

impl Rasterizer for MockRasterizer {
    type Config = Rc<MockState>;
    type Face = MockFace;
    type Stroker = MockStroker;

    fn open(config: &Rc<MockState>) -> Result<Self, RasterError> {
        if config.fail_open.get() {
            return Err(RasterError::Stroker);
        }
        config.libraries_open.set(config.libraries_open.get() + 1);
        Ok(MockRasterizer {
            state: config.clone(),
        })
    }

    fn open_face(&self, path: &Path) -> Result<MockFace, RasterError> {
        let spec = self.state.faces.borrow().get(path).cloned().ok_or_else(|| {
            RasterError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "no such face"))
        })?;
        self.state.faces_open.set(self.state.faces_open.get() + 1);
        Ok(MockFace {
            state: self.state.clone(),
            spec,
            px_size: 0,
        })
    }

    fn new_stroker(&self) -> Result<MockStroker, RasterError> {
        if self.state.fail_stroker.get() {
            return Err(RasterError::Stroker);
        }
        Ok(MockStroker {
            state: self.state.clone(),
            style: StrokeStyle::default(),
        })
    }
}

pub struct MockStroker {
    state: Rc<MockState>,
    style: StrokeStyle,
}

impl Stroker for MockStroker {
    fn set(&mut self, style: StrokeStyle) {
        self.state.stroker_sets.borrow_mut().push(style);
        self.style = style;
    }
}

pub struct MockOutline {
    state: Rc<MockState>,
    spec: GlyphSpec,
    radius: u32,
}

impl Drop for MockOutline {
    fn drop(&mut self) {
        self.state
            .outlines_dropped
            .set(self.state.outlines_dropped.get() + 1);
    }
}

impl Outline for MockOutline {
    type Stroker = MockStroker;

    fn stroke(mut self, stroker: &MockStroker) -> Result<Self, RasterError> {
        if !(stroker.style.radius > 0.0) {
            return Err(RasterError::Stroker);
        }
        self.radius = stroker.style.radius as u32;
        Ok(self)
    }
}

pub struct MockFace {
    state: Rc<MockState>,
    spec: FaceSpec,
    px_size: u32,
}

impl Drop for MockFace {
    fn drop(&mut self) {
        self.state.faces_open.set(self.state.faces_open.get() - 1);
    }
}

impl MockFace {
    fn lookup(&self, id: GlyphId) -> GlyphSpec {
        self.spec
            .glyphs
            .values()
            .find(|g| g.id == id.0)
            .copied()
            .unwrap_or(self.spec.missing)
    }

    fn char_of(&self, id: GlyphId) -> Option<char> {
        self.spec
            .glyphs
            .iter()
            .find(|(_, g)| g.id == id.0)
            .map(|(c, _)| *c)
    }
}

fn bitmap(width: u32, rows: u32) -> Bitmap {
    Bitmap {
        width,
        rows,
        pitch: width,
        buffer: vec![0x80; (width * rows) as usize],
    }
}

impl RasterFace for MockFace {
    type Stroker = MockStroker;
    type Outline = MockOutline;

    fn flags(&self) -> FaceFlags {
        self.spec.flags
    }

    fn set_pixel_size(&mut self, px: u32) -> Result<(), RasterError> {
        self.state.set_size_calls.borrow_mut().push(px);
        self.px_size = px;
        Ok(())
    }

    fn glyph_index(&self, c: char) -> GlyphId {
        GlyphId(self.spec.glyphs.get(&c).map(|g| g.id).unwrap_or(0))
    }

    fn render_glyph(&mut self, id: GlyphId) -> Result<RenderedGlyph, RasterError> {
        if let Some(c) = self.char_of(id) {
            if self.spec.fail_render.contains(&c) {
                return Err(RasterError::Render(id));
            }
        }
        self.state.renders.borrow_mut().push((id.0, self.px_size));
        let g = self.lookup(id);
        Ok(RenderedGlyph {
            bitmap: bitmap(g.width, g.rows),
            left: g.left,
            top: g.top,
            advance: g.advance,
        })
    }

    fn load_outline(&mut self, id: GlyphId) -> Result<MockOutline, RasterError> {
        self.state
            .outlines_loaded
            .set(self.state.outlines_loaded.get() + 1);
        Ok(MockOutline {
            state: self.state.clone(),
            spec: self.lookup(id),
            radius: 0,
        })
    }

    fn rasterize_outline(&mut self, outline: MockOutline) -> Result<RenderedGlyph, RasterError> {
        if self.spec.fail_outline_raster {
            return Err(RasterError::NoOutline(GlyphId(outline.spec.id)));
        }
        self.state
            .outline_rasters
            .borrow_mut()
            .push((outline.spec.id, self.px_size));
        let g = outline.spec;
        let r = outline.radius;
        let (width, rows) = if g.width == 0 || g.rows == 0 {
            (0, 0)
        } else {
            (g.width + 2 * r, g.rows + 2 * r)
        };
        Ok(RenderedGlyph {
            bitmap: bitmap(width, rows),
            left: g.left - r as i32,
            top: g.top + r as i32,
            advance: g.advance,
        })
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> Option<(i32, i32)> {
        let k = *self.spec.kerning.get(&(left.0, right.0))?;
        Some((k * self.px_size as i32 / 32, 0))
    }
}

/// A draw call recorded by [`RecordingDevice`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCall {
    pub image: usize,
    pub size: (u32, u32),
    pub pos: Vec2,
    pub color: Rgba,
}

#[derive(Debug)]
pub struct MockImage {
    id: usize,
    size: (u32, u32),
    live: Rc<Cell<usize>>,
}

impl Drop for MockImage {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

#[derive(Default)]
pub struct RecordingDevice {
    pub created: Cell<usize>,
    pub live: Rc<Cell<usize>>,
    pub draws: RefCell<Vec<DrawCall>>,
    pub fail: Cell<bool>,
}

impl RecordingDevice {
    pub fn take_draws(&self) -> Vec<DrawCall> {
        std::mem::take(&mut *self.draws.borrow_mut())
    }
}

impl Device for RecordingDevice {
    type Image = MockImage;

    fn create_image(&self, size: (u32, u32), rgba: &[u8]) -> Result<MockImage, ImageError> {
        assert_eq!(rgba.len(), (4 * size.0 * size.1) as usize);
        if self.fail.get() {
            return Err(ImageError {
                width: size.0,
                height: size.1,
            });
        }
        let id = self.created.get();
        self.created.set(id + 1);
        self.live.set(self.live.get() + 1);
        Ok(MockImage {
            id,
            size,
            live: self.live.clone(),
        })
    }

    fn draw(&self, image: &MockImage, pos: Vec2, color: Rgba) {
        self.draws.borrow_mut().push(DrawCall {
            image: image.id,
            size: image.size,
            pos,
            color,
        });
    }
}

pub const FONT: &str = "fonts/Mock.ttf";

pub type Manager<'a> = glyph_text::FontManager<'a, MockRasterizer, RecordingDevice>;
