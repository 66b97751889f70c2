//! Access flow - Locate an existing VPC by id or name

use crate::console::trimmed_text;
use crate::error::{FlowError, FlowResult};
use crate::lister::ResourceLister;
use crate::provider::Filter;
use crate::resource::Vpc;
use crate::session::Session;

/// Outcome of the VPC access capability check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    Denied,
}

/// Capability check consulted whenever a workflow picks a VPC.
///
/// There is no authorization model behind it: access is always granted and
/// real permission problems surface as provider errors on the next call.
pub fn verify_vpc_access(_vpc_id: &str) -> AccessDecision {
    AccessDecision::Granted
}

/// Look a VPC up by id first, then by its `Name` tag
pub async fn find_vpc(lister: &ResourceLister<'_>, id_or_name: &str) -> Option<Vpc> {
    if let Some(vpc) = lister
        .vpcs(Some(&Filter::vpc(id_or_name)))
        .await
        .into_iter()
        .next()
    {
        return Some(vpc);
    }
    lister
        .vpcs(Some(&Filter::name_tag(id_or_name)))
        .await
        .into_iter()
        .next()
}

/// The "Access" menu entry
pub struct AccessFlow<'a> {
    session: Session<'a>,
}

impl<'a> AccessFlow<'a> {
    pub fn new(session: Session<'a>) -> Self {
        Self { session }
    }

    pub async fn run(&self) {
        self.session
            .reporter
            .info("You chose to access an existing VPC.");
        let result = self.lookup().await;
        self.session.finish(result);
    }

    pub async fn lookup(&self) -> FlowResult<Vpc> {
        let s = &self.session;
        let input =
            trimmed_text(s.prompter, "Enter the VPC ID or Name:").ok_or(FlowError::Cancelled)?;
        if input.is_empty() {
            return Err(FlowError::not_found("VPC ID or Name cannot be empty."));
        }

        s.reporter.info(&format!(
            "Searching for VPC: {} in region {}...",
            input,
            s.provider.region()
        ));

        let vpc = find_vpc(&s.lister(), &input)
            .await
            .ok_or_else(|| FlowError::not_found("VPC not found."))?;

        s.reporter.success(&format!(
            "Found VPC: {} (CIDR: {})",
            vpc.id, vpc.cidr_block
        ));
        Ok(vpc)
    }
}
