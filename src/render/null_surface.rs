use crate::core::SurfaceSize;
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, Color, DrawCommand, DrawingSurface, FrameStats, LinePrimitive, RectPrimitive,
    TextPrimitive,
};

/// No-op surface used by tests and headless sessions.
///
/// It still validates every primitive so tests catch invalid geometry before
/// a real backend sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NullSurface {
    size: SurfaceSize,
    pub last_clear: Option<Color>,
    pub stats: FrameStats,
}

impl NullSurface {
    #[must_use]
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            last_clear: None,
            stats: FrameStats::default(),
        }
    }

    pub fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
    }
}

impl DrawingSurface for NullSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self, color: Color) -> ChartResult<()> {
        self.last_clear = Some(color);
        self.stats = FrameStats::default();
        Ok(())
    }

    fn fill_rect(&mut self, rect: &RectPrimitive) -> ChartResult<()> {
        rect.validate()?;
        self.stats.rects += 1;
        Ok(())
    }

    fn draw_line(&mut self, line: &LinePrimitive) -> ChartResult<()> {
        line.validate()?;
        self.stats.lines += 1;
        Ok(())
    }

    fn fill_circle(&mut self, circle: &CirclePrimitive) -> ChartResult<()> {
        circle.validate()?;
        self.stats.circles += 1;
        Ok(())
    }

    fn draw_text(&mut self, text: &TextPrimitive) -> ChartResult<()> {
        text.validate()?;
        self.stats.texts += 1;
        Ok(())
    }
}

/// Surface that keeps every call of the last frame, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSurface {
    size: SurfaceSize,
    pub background: Option<Color>,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            background: None,
            commands: Vec::new(),
        }
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text(text) => Some(text),
            _ => None,
        })
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self, color: Color) -> ChartResult<()> {
        self.background = Some(color);
        self.commands.clear();
        Ok(())
    }

    fn fill_rect(&mut self, rect: &RectPrimitive) -> ChartResult<()> {
        self.commands.push(DrawCommand::Rect(*rect));
        Ok(())
    }

    fn draw_line(&mut self, line: &LinePrimitive) -> ChartResult<()> {
        self.commands.push(DrawCommand::Line(*line));
        Ok(())
    }

    fn fill_circle(&mut self, circle: &CirclePrimitive) -> ChartResult<()> {
        self.commands.push(DrawCommand::Circle(*circle));
        Ok(())
    }

    fn draw_text(&mut self, text: &TextPrimitive) -> ChartResult<()> {
        self.commands.push(DrawCommand::Text(text.clone()));
        Ok(())
    }
}
