use anyhow::Result;

use crate::cell::ParameterCell;

use super::{options::UiOptions, runtime::App};

/// Interactive terminal front end for a [`ParameterCell`].
#[derive(Debug)]
pub struct CellUi {
    cell: ParameterCell,
    title: Option<String>,
    options: UiOptions,
}

impl CellUi {
    pub fn new(cell: ParameterCell) -> Self {
        Self {
            cell,
            title: None,
            options: UiOptions::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs until the user submits or quits. Returns the cell on submit.
    pub fn run(self) -> Result<Option<ParameterCell>> {
        let CellUi {
            mut cell,
            title,
            options,
        } = self;
        if !cell.is_started() {
            cell.start()?;
        }
        let title = title.unwrap_or_else(|| cell.method().name.clone());
        let mut app = App::new(cell, title, options);
        app.run()?;
        Ok(app.into_submission())
    }
}
