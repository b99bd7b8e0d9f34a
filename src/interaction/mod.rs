use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::{Point, SurfaceSize, Vector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning,
}

/// How the chart origin is moved by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanMode {
    /// Arrow keys scroll while held.
    #[default]
    Keys,
    /// Pressing and dragging the pointer scrolls the chart under it.
    PointerDrag,
}

/// Key identifiers the chart reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// Zoom out one step.
    Minus,
    /// Zoom in one step.
    Equals,
    /// Toggles the debug overlay.
    F3,
    /// Requests exit.
    F12,
    Other(u32),
}

impl Key {
    /// Unit pan direction in chart orientation for arrow keys.
    #[must_use]
    pub fn pan_direction(self) -> Option<Vector> {
        match self {
            Self::ArrowUp => Some(Vector::new(0.0, -1.0)),
            Self::ArrowDown => Some(Vector::new(0.0, 1.0)),
            Self::ArrowLeft => Some(Vector::new(-1.0, 0.0)),
            Self::ArrowRight => Some(Vector::new(1.0, 0.0)),
            _ => None,
        }
    }
}

/// Discrete input delivered by the host event loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerDown { position: Point },
    PointerMove { position: Point },
    PointerUp { position: Point },
    KeyDown { key: Key },
    KeyUp { key: Key },
    /// Positive deltas zoom in.
    Wheel { delta: f64 },
    Resize { size: SurfaceSize },
    Close,
}

/// What the host should do after an event was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventOutcome {
    Continue,
    Exit,
}

/// Keyboard/pointer state owned by the chart session and handed to input
/// handlers by reference.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputState {
    held_keys: IndexSet<Key>,
    pointer: Option<Point>,
    debug_overlay: bool,
    exit_requested: bool,
}

impl InputState {
    #[must_use]
    pub fn with_debug_overlay(debug_overlay: bool) -> Self {
        Self {
            debug_overlay,
            ..Self::default()
        }
    }

    /// Records a key press. Returns `false` for auto-repeat of a held key.
    pub fn press(&mut self, key: Key) -> bool {
        self.held_keys.insert(key)
    }

    pub fn release(&mut self, key: Key) {
        self.held_keys.shift_remove(&key);
    }

    #[must_use]
    pub fn is_held(&self, key: Key) -> bool {
        self.held_keys.contains(&key)
    }

    /// Keys currently held, in press order.
    pub fn held_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.held_keys.iter().copied()
    }

    /// Sum of the pan directions of all held arrow keys.
    #[must_use]
    pub fn held_pan_direction(&self) -> Vector {
        self.held_keys
            .iter()
            .filter_map(|key| key.pan_direction())
            .fold(Vector::ZERO, |acc, dir| Vector::new(acc.x + dir.x, acc.y + dir.y))
    }

    #[must_use]
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn set_pointer(&mut self, position: Point) {
        self.pointer = Some(position);
    }

    #[must_use]
    pub fn debug_overlay(&self) -> bool {
        self.debug_overlay
    }

    pub fn toggle_debug_overlay(&mut self) -> bool {
        self.debug_overlay = !self.debug_overlay;
        self.debug_overlay
    }

    #[must_use]
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }
}
