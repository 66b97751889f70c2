//! Session - The collaborators every workflow is handed

use crate::console::{Prompter, Reporter};
use crate::error::FlowResult;
use crate::lister::ResourceLister;
use crate::provider::NetworkProvider;
use crate::selector::Selector;

/// Provider, prompt service and reporter for one run of the wizard.
///
/// Built once by the caller and passed into each workflow entry point.
#[derive(Clone, Copy)]
pub struct Session<'a> {
    pub provider: &'a dyn NetworkProvider,
    pub prompter: &'a dyn Prompter,
    pub reporter: &'a dyn Reporter,
}

impl<'a> Session<'a> {
    pub fn new(
        provider: &'a dyn NetworkProvider,
        prompter: &'a dyn Prompter,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            provider,
            prompter,
            reporter,
        }
    }

    pub fn lister(&self) -> ResourceLister<'a> {
        ResourceLister::new(self.provider, self.reporter)
    }

    pub fn selector(&self) -> Selector<'a> {
        Selector::new(self.lister(), self.prompter, self.reporter)
    }

    /// Report a failed step once; pass a successful value through
    pub fn finish<T>(&self, result: FlowResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                e.report(self.reporter);
                None
            }
        }
    }
}
