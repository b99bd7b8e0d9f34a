use serde::{Deserialize, Serialize};

use crate::core::SurfaceSize;
use crate::error::ChartResult;
use crate::render::{
    CirclePrimitive, Color, DrawingSurface, LinePrimitive, RectPrimitive, TextPrimitive,
};

/// One ordered draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Circle(CirclePrimitive),
    Text(TextPrimitive),
}

impl DrawCommand {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Line(line) => line.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Circle(circle) => circle.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}

/// Per-kind command totals, handy for logging and headless checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrameStats {
    pub lines: usize,
    pub rects: usize,
    pub circles: usize,
    pub texts: usize,
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Commands are replayed in insertion order, so later commands paint over
/// earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub size: SurfaceSize,
    pub background: Color,
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(size: SurfaceSize, background: Color) -> Self {
        Self {
            size,
            background,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    #[must_use]
    pub fn with_command(mut self, command: DrawCommand) -> Self {
        self.commands.push(command);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.size.validate()?;
        for command in &self.commands {
            command.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> FrameStats {
        self.commands
            .iter()
            .fold(FrameStats::default(), |mut stats, command| {
                match command {
                    DrawCommand::Line(_) => stats.lines += 1,
                    DrawCommand::Rect(_) => stats.rects += 1,
                    DrawCommand::Circle(_) => stats.circles += 1,
                    DrawCommand::Text(_) => stats.texts += 1,
                }
                stats
            })
    }

    /// Clears `surface` to the background and replays every command.
    pub fn submit<S: DrawingSurface + ?Sized>(&self, surface: &mut S) -> ChartResult<()> {
        surface.clear(self.background)?;
        for command in &self.commands {
            match command {
                DrawCommand::Line(line) => surface.draw_line(line)?,
                DrawCommand::Rect(rect) => surface.fill_rect(rect)?,
                DrawCommand::Circle(circle) => surface.fill_circle(circle)?,
                DrawCommand::Text(text) => surface.draw_text(text)?,
            }
        }
        Ok(())
    }
}
