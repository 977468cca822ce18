use aviary_protocol::DrawCommand;

/// Something that can execute draw commands: a canvas, a terminal cell
/// grid, or a plain recorder.
pub trait DrawingSurface {
    fn submit(&mut self, command: &DrawCommand);

    fn submit_all(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            self.submit(command);
        }
    }
}

/// Keeps every submitted command. Used by tests and the SVG export.
#[derive(Debug, Default, Clone)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands since the most recent `Clear`, i.e. the last full frame.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear))
            .unwrap_or(0);
        &self.commands[start..]
    }
}

impl DrawingSurface for CommandRecorder {
    fn submit(&mut self, command: &DrawCommand) {
        self.commands.push(command.clone());
    }
}
