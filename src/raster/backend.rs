// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Rasterizer over `ttf-parser` and `swash`

use super::{Bitmap, Config, FaceFlags, LineCap, LineJoin, Outline, RasterError};
use super::{RasterFace, Rasterizer, RenderedGlyph, StrokeStyle, Stroker};
use crate::conv::{round_px, DPU};
use crate::GlyphId;
use easy_cast::{Cast, Conv};
use std::path::Path;
use std::sync::Arc;
use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::{self, Format};
use ttf_parser::{Face, FaceParsingError};

/// Rasterizer library using `swash`
///
/// Font data is parsed with `ttf-parser`, which also supplies glyph
/// mapping, advances and kerning (from the `kern` table). Glyphs are rastered
/// and stroked by `swash`; with the `ab_glyph` feature, filled glyphs are
/// rastered by `ab_glyph` instead.
#[derive(Debug)]
pub struct SwashRasterizer {
    config: Config,
}

impl Rasterizer for SwashRasterizer {
    type Config = Config;
    type Face = SwashFace;
    type Stroker = SwashStroker;

    fn open(config: &Config) -> Result<Self, RasterError> {
        log::debug!("opening rasterizer: {config:?}");
        Ok(SwashRasterizer {
            config: config.clone(),
        })
    }

    fn open_face(&self, path: &Path) -> Result<SwashFace, RasterError> {
        let data: Arc<[u8]> = std::fs::read(path)?.into();
        let face = SwashFace::new(data, self.config.face_index, self.config.hinting)?;
        log::debug!("loaded face {}: {:?}", path.display(), face.flags);
        Ok(face)
    }

    fn new_stroker(&self) -> Result<SwashStroker, RasterError> {
        Ok(SwashStroker::default())
    }
}

impl Drop for SwashRasterizer {
    fn drop(&mut self) {
        log::debug!("closing rasterizer");
    }
}

/// Stroker for [`SwashRasterizer`]
#[derive(Clone, Copy, Debug, Default)]
pub struct SwashStroker {
    style: StrokeStyle,
}

impl Stroker for SwashStroker {
    fn set(&mut self, style: StrokeStyle) {
        self.style = style;
    }
}

fn zeno_stroke(style: StrokeStyle) -> zeno::Stroke<'static> {
    let mut stroke = zeno::Stroke::new(2.0 * style.radius);
    stroke
        .cap(match style.cap {
            LineCap::Butt => zeno::Cap::Butt,
            LineCap::Round => zeno::Cap::Round,
            LineCap::Square => zeno::Cap::Square,
        })
        .join(match style.join {
            LineJoin::Miter => zeno::Join::Miter,
            LineJoin::Round => zeno::Join::Round,
            LineJoin::Bevel => zeno::Join::Bevel,
        });
    stroke
}

/// Outline handle for [`SwashFace`]
///
/// The outline itself is scaled from the face when rastered; the handle
/// records which glyph to raster and the stroke (if any) to apply.
#[derive(Clone, Copy, Debug)]
pub struct SwashOutline {
    id: GlyphId,
    stroke: Option<StrokeStyle>,
}

impl Outline for SwashOutline {
    type Stroker = SwashStroker;

    fn stroke(self, stroker: &SwashStroker) -> Result<Self, RasterError> {
        if !(stroker.style.radius > 0.0) {
            return Err(RasterError::Stroker);
        }
        Ok(SwashOutline {
            stroke: Some(stroker.style),
            ..self
        })
    }
}

/// A face loaded by [`SwashRasterizer`]
pub struct SwashFace {
    // Safety: `face` and `ab_glyph` borrow from `data`. They are declared
    // first so that they are dropped first; `data` is never modified.
    face: Face<'static>,
    #[cfg(feature = "ab_glyph")]
    ab_glyph: ab_glyph::FontRef<'static>,
    swash: (u32, swash::CacheKey), // (offset, key)
    data: Arc<[u8]>,
    context: ScaleContext,
    flags: FaceFlags,
    px_size: u32,
    hinting: bool,
}

impl SwashFace {
    fn new(data: Arc<[u8]>, index: u32, hinting: bool) -> Result<Self, RasterError> {
        // Safety: the returned SwashFace holds onto `data`, which is
        // reference counted and thus does not move.
        let slice = unsafe { extend_lifetime(&data[..]) };

        let face = Face::parse(slice, index)?;

        let tables = face.tables();
        let mut flags = FaceFlags::empty();
        if tables.glyf.is_some() || tables.cff.is_some() || tables.cff2.is_some() {
            flags |= FaceFlags::SCALABLE;
        }
        if tables.cmap.is_some() {
            flags |= FaceFlags::CHARMAP;
        }
        if tables.kern.is_some() {
            flags |= FaceFlags::KERNING;
        }

        let swash = swash::FontRef::from_index(slice, index.cast())
            .map(|f| (f.offset, f.key))
            .ok_or(RasterError::Parse(FaceParsingError::MalformedFont))?;

        Ok(SwashFace {
            #[cfg(feature = "ab_glyph")]
            ab_glyph: ab_glyph::FontRef::try_from_slice_and_index(slice, index)
                .map_err(|_| RasterError::Parse(FaceParsingError::MalformedFont))?,
            face,
            swash,
            data,
            context: ScaleContext::new(),
            flags,
            px_size: 0,
            hinting,
        })
    }

    fn dpu(&self) -> DPU {
        DPU::from_px_size(self.px_size, self.face.units_per_em())
    }

    fn advance(&self, id: GlyphId) -> i32 {
        let x = self
            .face
            .glyph_hor_advance(ttf_parser::GlyphId(id.0))
            .unwrap_or(0);
        round_px(self.dpu().u16_to_px(x))
    }

    fn has_ink(&self, id: GlyphId) -> bool {
        self.face
            .glyph_bounding_box(ttf_parser::GlyphId(id.0))
            .is_some()
    }

    fn empty_glyph(&self, id: GlyphId) -> RenderedGlyph {
        RenderedGlyph {
            bitmap: Bitmap::empty(),
            left: 0,
            top: 0,
            advance: self.advance(id),
        }
    }

    fn render_swash(
        &mut self,
        id: GlyphId,
        stroke: Option<StrokeStyle>,
    ) -> Result<RenderedGlyph, RasterError> {
        if self.px_size == 0 {
            return Err(RasterError::InvalidSize(0));
        }
        let advance = self.advance(id);
        let has_ink = self.has_ink(id);

        let font = swash::FontRef {
            data: &self.data[..],
            offset: self.swash.0,
            key: self.swash.1,
        };
        let mut scaler = self
            .context
            .builder(font)
            .size(f32::conv(self.px_size))
            .hint(self.hinting)
            .build();

        let sources = [Source::Outline];
        let mut render = Render::new(&sources);
        render.format(Format::Alpha);
        if let Some(style) = stroke {
            render.style(zeno_stroke(style));
        }

        match render.render(&mut scaler, id.0) {
            Some(image) => Ok(RenderedGlyph {
                bitmap: Bitmap {
                    width: image.placement.width,
                    rows: image.placement.height,
                    pitch: image.placement.width,
                    buffer: image.data,
                },
                left: image.placement.left,
                top: image.placement.top,
                advance,
            }),
            None if !has_ink => Ok(self.empty_glyph(id)),
            None => Err(RasterError::Render(id)),
        }
    }

    #[cfg(feature = "ab_glyph")]
    fn render_ab(&self, id: GlyphId) -> Result<RenderedGlyph, RasterError> {
        use crate::conv::to_usize;
        use ab_glyph::Font;
        use easy_cast::{CastFloat, ConvFloat};

        if self.px_size == 0 {
            return Err(RasterError::InvalidSize(0));
        }

        let font = &self.ab_glyph;
        let units_per_em = font.units_per_em().ok_or(RasterError::Render(id))?;
        let scale = f32::conv(self.px_size) * font.height_unscaled() / units_per_em;
        let glyph = ab_glyph::Glyph {
            id: ab_glyph::GlyphId(id.0),
            scale: scale.into(),
            position: ab_glyph::point(0.0, 0.0),
        };
        let Some(outline) = font.outline_glyph(glyph) else {
            return Ok(self.empty_glyph(id));
        };

        let bounds = outline.px_bounds();
        let width = u32::conv_trunc(bounds.width());
        let rows = u32::conv_trunc(bounds.height());
        let mut buffer = vec![0; to_usize(width * rows)];
        outline.draw(|x, y, c| {
            // Convert to u8 with saturating conversion, rounding down:
            buffer[to_usize((y * width) + x)] = (c * 256.0) as u8;
        });

        Ok(RenderedGlyph {
            bitmap: Bitmap {
                width,
                rows,
                pitch: width,
                buffer,
            },
            left: bounds.min.x.cast_trunc(),
            top: -i32::conv_trunc(bounds.min.y),
            advance: self.advance(id),
        })
    }
}

impl RasterFace for SwashFace {
    type Stroker = SwashStroker;
    type Outline = SwashOutline;

    fn flags(&self) -> FaceFlags {
        self.flags
    }

    fn set_pixel_size(&mut self, px: u32) -> Result<(), RasterError> {
        if px == 0 {
            return Err(RasterError::InvalidSize(px));
        }
        self.px_size = px;
        Ok(())
    }

    #[inline]
    fn glyph_index(&self, c: char) -> GlyphId {
        GlyphId(self.face.glyph_index(c).map(|id| id.0).unwrap_or(0))
    }

    fn render_glyph(&mut self, id: GlyphId) -> Result<RenderedGlyph, RasterError> {
        log::trace!("render_glyph: {id:?} at {}px", self.px_size);
        cfg_if::cfg_if! {
            if #[cfg(feature = "ab_glyph")] {
                self.render_ab(id)
            } else {
                self.render_swash(id, None)
            }
        }
    }

    fn load_outline(&mut self, id: GlyphId) -> Result<SwashOutline, RasterError> {
        if !self.flags.contains(FaceFlags::SCALABLE) {
            return Err(RasterError::NoOutline(id));
        }
        Ok(SwashOutline { id, stroke: None })
    }

    fn rasterize_outline(&mut self, outline: SwashOutline) -> Result<RenderedGlyph, RasterError> {
        log::trace!(
            "rasterize_outline: {:?} at {}px, stroke {:?}",
            outline.id,
            self.px_size,
            outline.stroke
        );
        self.render_swash(outline.id, outline.stroke)
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> Option<(i32, i32)> {
        if !self.flags.contains(FaceFlags::KERNING) || self.px_size == 0 {
            return None;
        }
        let kern = self.face.tables().kern?;
        let (left, right) = (ttf_parser::GlyphId(left.0), ttf_parser::GlyphId(right.0));
        let value = kern
            .subtables
            .into_iter()
            .filter(|st| st.horizontal && !st.variable)
            .find_map(|st| st.glyphs_kerning(left, right))?;
        Some((round_px(self.dpu().i16_to_px(value)), 0))
    }
}

unsafe fn extend_lifetime<'b, T: ?Sized>(r: &'b T) -> &'static T {
    std::mem::transmute::<&'b T, &'static T>(r)
}
