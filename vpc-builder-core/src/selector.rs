//! Resource Selector - Turn listed resources into operator choices

use crate::access::{AccessDecision, verify_vpc_access};
use crate::console::{Prompter, Reporter};
use crate::lister::ResourceLister;
use crate::resource::{Descriptor, ResourceKind};

#[derive(Clone, Copy)]
pub struct Selector<'a> {
    lister: ResourceLister<'a>,
    prompter: &'a dyn Prompter,
    reporter: &'a dyn Reporter,
}

impl<'a> Selector<'a> {
    pub fn new(
        lister: ResourceLister<'a>,
        prompter: &'a dyn Prompter,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            lister,
            prompter,
            reporter,
        }
    }

    /// Re-query `kind` inside `vpc_id` and let the operator pick one.
    ///
    /// `None` when nothing exists (reported as a failure) or the prompt was
    /// cancelled (silent).
    pub async fn choose(&self, kind: ResourceKind, vpc_id: Option<&str>) -> Option<Descriptor> {
        let descriptors = match vpc_id {
            Some(vpc_id) => self.lister.list_in(kind, vpc_id).await,
            None => self.lister.list(kind, None).await,
        };
        if descriptors.is_empty() {
            self.reporter
                .failure(&format!("No {} found.", kind.plural()));
            return None;
        }

        let labels: Vec<String> = descriptors.iter().map(Descriptor::label).collect();
        let index = self
            .prompter
            .select_one(&format!("Select a {}:", kind.singular()), &labels)?;
        descriptors.into_iter().nth(index)
    }

    /// Like `choose`, returning only the identifier
    pub async fn choose_id(&self, kind: ResourceKind, vpc_id: Option<&str>) -> Option<String> {
        self.choose(kind, vpc_id)
            .await
            .map(|d| d.id().to_string())
    }

    /// Pick a VPC and run the access check on it
    pub async fn choose_vpc(&self) -> Option<String> {
        let vpc_id = self.choose_id(ResourceKind::Vpc, None).await?;
        match verify_vpc_access(&vpc_id) {
            AccessDecision::Granted => Some(vpc_id),
            AccessDecision::Denied => {
                self.reporter
                    .failure(&format!("No access to VPC {}", vpc_id));
                None
            }
        }
    }

    /// Multi-select over an already listed set; empty on cancel
    pub fn pick_many<T>(&self, prompt: &str, items: Vec<T>, label: impl Fn(&T) -> String) -> Vec<T> {
        if items.is_empty() {
            return Vec::new();
        }
        let labels: Vec<String> = items.iter().map(label).collect();
        let mut chosen = self.prompter.select_many(prompt, &labels);
        chosen.sort_unstable();
        chosen.dedup();
        items
            .into_iter()
            .enumerate()
            .filter(|(i, _)| chosen.binary_search(i).is_ok())
            .map(|(_, item)| item)
            .collect()
    }
}
