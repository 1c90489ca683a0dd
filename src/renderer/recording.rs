//! Surface that records draw calls instead of rasterizing them

use super::{Streak, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f32, height: f32 },
    Stroke(Streak),
    Resize { width: u32, height: u32 },
}

/// In-memory surface for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    /// Current backing store size
    pub size: (u32, u32),
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            commands: Vec::new(),
            size: (width, height),
        }
    }

    /// Strokes issued since the most recent clear
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear { .. }))
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear { .. }))
            .count()
    }

    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke(_)))
            .count()
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn stroke_streak(&mut self, streak: &Streak) {
        self.commands.push(DrawCommand::Stroke(*streak));
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.commands.push(DrawCommand::Resize { width, height });
    }
}
