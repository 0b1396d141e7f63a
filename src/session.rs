//! Interactive front-end state.
//!
//! The dialog flow is driven through the [`Dialogs`] trait so the selection
//! rules can run without a display. [`RfdDialogs`] provides native dialogs when
//! the `dialogs` feature is enabled.

use crate::artifact::SeenNames;
use crate::error::ProcessError;
use crate::model::RunSummary;
use crate::processor;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

pub const WINDOW_TITLE: &str = "QR Code Generator";
pub const COMPLETION_MESSAGE: &str = "QR codes generated and inserted into the Excel file.";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Please select both the Excel file and output folder.")]
    MissingSelection {
        missing_file: bool,
        missing_folder: bool,
    },

    #[error(transparent)]
    Process(#[from] ProcessError),
}

/// Selections made through the pickers. Both must be set before a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    source: Option<PathBuf>,
    output_folder: Option<PathBuf>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selections(source: Option<PathBuf>, output_folder: Option<PathBuf>) -> Self {
        Self {
            source,
            output_folder,
        }
    }

    /// A cancelled picker (`None`) keeps the previous selection.
    pub fn select_file(&mut self, path: Option<PathBuf>) -> bool {
        match path {
            Some(path) => {
                self.source = Some(path);
                true
            }
            None => false,
        }
    }

    pub fn select_folder(&mut self, path: Option<PathBuf>) -> bool {
        match path {
            Some(path) => {
                self.output_folder = Some(path);
                true
            }
            None => false,
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn output_folder(&self) -> Option<&Path> {
        self.output_folder.as_deref()
    }

    pub fn selections(&self) -> Result<(&Path, &Path), SessionError> {
        match (self.source(), self.output_folder()) {
            (Some(source), Some(folder)) => Ok((source, folder)),
            (source, folder) => Err(SessionError::MissingSelection {
                missing_file: source.is_none(),
                missing_folder: folder.is_none(),
            }),
        }
    }

    /// Processes the selected workbook with a fresh seen-name set.
    pub fn run(&self) -> Result<RunSummary, SessionError> {
        let (source, folder) = self.selections()?;
        let mut seen = SeenNames::new();
        Ok(processor::process(source, folder, &mut seen)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectFile,
    SelectFolder,
    Run,
    Close,
}

pub trait Dialogs {
    fn choose_action(&mut self, session: &Session) -> Action;
    fn pick_file(&mut self) -> Option<PathBuf>;
    fn pick_folder(&mut self) -> Option<PathBuf>;
    fn info(&mut self, title: &str, message: &str);
    fn warn(&mut self, title: &str, message: &str);
    fn error(&mut self, title: &str, message: &str);
    fn confirm(&mut self, title: &str, message: &str) -> bool;
}

/// Runs the dialog loop until a close is confirmed. Returns the summaries of
/// successful runs in order.
pub fn run_interactive<D: Dialogs>(session: &mut Session, dialogs: &mut D) -> Vec<RunSummary> {
    let mut completed = Vec::new();
    loop {
        match dialogs.choose_action(session) {
            Action::SelectFile => {
                let picked = dialogs.pick_file();
                if session.select_file(picked) {
                    info!(source = ?session.source(), "workbook selected");
                }
            }
            Action::SelectFolder => {
                let picked = dialogs.pick_folder();
                if session.select_folder(picked) {
                    info!(folder = ?session.output_folder(), "output folder selected");
                }
            }
            Action::Run => match session.run() {
                Ok(summary) => {
                    dialogs.info("Info", COMPLETION_MESSAGE);
                    completed.push(summary);
                }
                Err(err @ SessionError::MissingSelection { .. }) => {
                    dialogs.warn("Warning", &err.to_string());
                }
                Err(SessionError::Process(err)) => {
                    warn!(kind = %err.kind(), error = %err, "run failed");
                    dialogs.error("Error", &err.to_string());
                }
            },
            Action::Close => {
                if dialogs.confirm("Quit", "Do you want to quit?") {
                    return completed;
                }
            }
        }
    }
}

#[cfg(feature = "dialogs")]
pub use native::RfdDialogs;

#[cfg(feature = "dialogs")]
mod native {
    use super::{Action, Dialogs, Session, WINDOW_TITLE};
    use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
    use std::path::PathBuf;

    const SELECT_FILE: &str = "Select File";
    const SELECT_FOLDER: &str = "Select Folder";
    const RUN: &str = "Run Script";

    #[derive(Debug, Default)]
    pub struct RfdDialogs;

    fn describe(session: &Session) -> String {
        let file = session
            .source()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Select Excel file:".to_string());
        let folder = session
            .output_folder()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Select output folder:".to_string());
        format!("{file}\n{folder}")
    }

    fn message(
        level: MessageLevel,
        title: &str,
        text: &str,
        buttons: MessageButtons,
    ) -> MessageDialogResult {
        MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(text)
            .set_buttons(buttons)
            .show()
    }

    impl Dialogs for RfdDialogs {
        fn choose_action(&mut self, session: &Session) -> Action {
            let buttons = MessageButtons::YesNoCancelCustom(
                SELECT_FILE.to_string(),
                SELECT_FOLDER.to_string(),
                RUN.to_string(),
            );
            match message(MessageLevel::Info, WINDOW_TITLE, &describe(session), buttons) {
                MessageDialogResult::Custom(label) => match label.as_str() {
                    SELECT_FILE => Action::SelectFile,
                    SELECT_FOLDER => Action::SelectFolder,
                    RUN => Action::Run,
                    _ => Action::Close,
                },
                _ => Action::Close,
            }
        }

        fn pick_file(&mut self) -> Option<PathBuf> {
            FileDialog::new()
                .add_filter("Excel files", &["xlsx"])
                .add_filter("All files", &["*"])
                .pick_file()
        }

        fn pick_folder(&mut self) -> Option<PathBuf> {
            FileDialog::new().pick_folder()
        }

        fn info(&mut self, title: &str, text: &str) {
            message(MessageLevel::Info, title, text, MessageButtons::Ok);
        }

        fn warn(&mut self, title: &str, text: &str) {
            message(MessageLevel::Warning, title, text, MessageButtons::Ok);
        }

        fn error(&mut self, title: &str, text: &str) {
            message(MessageLevel::Error, title, text, MessageButtons::Ok);
        }

        fn confirm(&mut self, title: &str, text: &str) -> bool {
            matches!(
                message(MessageLevel::Info, title, text, MessageButtons::OkCancel),
                MessageDialogResult::Ok
            )
        }
    }
}
