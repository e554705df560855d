use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use crate::audio::bands::BandGains;
use crate::error::PipelineError;
use crate::pipeline::Pipeline;

/// Work the interaction layer can ask of the pipeline.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    LoadAndProcess(PathBuf),
    ApplySeparation(BandGains),
    Export(PathBuf),
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Command::LoadAndProcess(_) => "load",
            Command::ApplySeparation(_) => "isolate",
            Command::Export(_) => "export",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickMode {
    Open,
    Save,
}

/// Outcome of a file chooser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathChoice {
    Selected(PathBuf),
    Cancelled,
}

impl PathChoice {
    /// The command a chooser result should trigger. Cancelling triggers
    /// nothing.
    pub fn into_command(self, mode: PickMode) -> Option<Command> {
        match (self, mode) {
            (PathChoice::Selected(path), PickMode::Open) => Some(Command::LoadAndProcess(path)),
            (PathChoice::Selected(path), PickMode::Save) => Some(Command::Export(path)),
            (PathChoice::Cancelled, _) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub completed: usize,
    pub failed: usize,
}

/// Serial command loop over one pipeline.
///
/// A failing command is reported and the loop moves on; nothing is retried.
pub struct Session {
    pipeline: Pipeline,
}

impl Session {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn into_pipeline(self) -> Pipeline {
        self.pipeline
    }

    pub fn dispatch(&mut self, command: &Command) -> Result<(), PipelineError> {
        match command {
            Command::LoadAndProcess(path) => self.pipeline.load_and_process(path),
            Command::ApplySeparation(gains) => self.pipeline.apply_separation(*gains),
            Command::Export(path) => self.pipeline.export_current_buffer(path),
        }
    }

    /// Run commands until every sender is dropped.
    pub fn run(&mut self, commands: Receiver<Command>) -> RunSummary {
        let mut summary = RunSummary::default();
        for command in commands.iter() {
            match self.dispatch(&command) {
                Ok(()) => summary.completed += 1,
                Err(err) => {
                    log::warn!("{} failed: {}", command.label(), err);
                    summary.failed += 1;
                }
            }
        }
        summary
    }
}
