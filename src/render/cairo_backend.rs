use std::f64::consts::TAU;
use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::core::SurfaceSize;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, Color, DrawingSurface, LinePrimitive, RectPrimitive, TextHAlign,
    TextPrimitive,
};

/// Cairo + Pango + PangoCairo drawing surface.
///
/// Either owns an offscreen ARGB image (`CairoSurface::offscreen`) or paints
/// onto an external context such as a GTK `DrawingArea` callback
/// (`CairoSurface::on_context`).
#[derive(Debug)]
pub struct CairoSurface {
    context: Context,
    image: Option<ImageSurface>,
    size: SurfaceSize,
}

impl CairoSurface {
    pub fn offscreen(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidSurface {
                width: f64::from(width),
                height: f64::from(height),
            });
        }

        let image = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&image)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok(Self {
            context,
            image: Some(image),
            size: SurfaceSize::new(f64::from(width), f64::from(height)),
        })
    }

    pub fn on_context(context: Context, size: SurfaceSize) -> ChartResult<Self> {
        size.validate()?;
        Ok(Self {
            context,
            image: None,
            size,
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    /// Writes the offscreen image as PNG. Fails for context-backed surfaces.
    pub fn write_png(&self, path: &Path) -> ChartResult<()> {
        let image = self.image.as_ref().ok_or_else(|| {
            ChartError::Backend("surface is not backed by an offscreen image".to_owned())
        })?;
        image.flush();
        let mut file = File::create(path)?;
        image
            .write_to_png(&mut file)
            .map_err(|err| ChartError::Backend(format!("failed to write png: {err}")))
    }
}

impl DrawingSurface for CairoSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self, color: Color) -> ChartResult<()> {
        apply_color(&self.context, color);
        self.context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))
    }

    fn fill_rect(&mut self, rect: &RectPrimitive) -> ChartResult<()> {
        apply_color(&self.context, rect.color);
        self.context.rectangle(
            rect.rect.x,
            rect.rect.y,
            rect.rect.width,
            rect.rect.height,
        );
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))
    }

    fn draw_line(&mut self, line: &LinePrimitive) -> ChartResult<()> {
        apply_color(&self.context, line.color);
        self.context.set_line_width(line.stroke_width);
        self.context
            .move_to(line.segment.start.x, line.segment.start.y);
        self.context.line_to(line.segment.end.x, line.segment.end.y);
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke line", err))
    }

    fn fill_circle(&mut self, circle: &CirclePrimitive) -> ChartResult<()> {
        apply_color(&self.context, circle.color);
        self.context.new_sub_path();
        self.context
            .arc(circle.center.x, circle.center.y, circle.radius, 0.0, TAU);
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill circle", err))
    }

    fn draw_text(&mut self, text: &TextPrimitive) -> ChartResult<()> {
        let layout = pangocairo::functions::create_layout(&self.context);
        let font_description = FontDescription::from_string(&format!("Sans {}", text.font_size_px));
        layout.set_font_description(Some(&font_description));
        layout.set_text(&text.text);

        let (text_width, _text_height) = layout.pixel_size();
        let x = match text.h_align {
            TextHAlign::Left => text.position.x,
            TextHAlign::Center => text.position.x - f64::from(text_width) / 2.0,
            TextHAlign::Right => text.position.x - f64::from(text_width),
        };

        apply_color(&self.context, text.color);
        self.context.move_to(x, text.position.y);
        pangocairo::functions::show_layout(&self.context, &layout);
        Ok(())
    }
}

fn apply_color(context: &Context, color: Color) {
    let (red, green, blue) = color.to_unit();
    context.set_source_rgb(red, green, blue);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
