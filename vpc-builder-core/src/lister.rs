//! Resource Lister - Uncached queries over live provider state

use crate::console::Reporter;
use crate::provider::{Filter, NetworkProvider};
use crate::resource::{
    Descriptor, InternetGateway, NatGateway, ResourceKind, RouteTable, SecurityGroup, Subnet, Vpc,
};

/// Query layer shared by every workflow.
///
/// A failed describe is reported and yields an empty list; callers treat
/// empty as "nothing found".
#[derive(Clone, Copy)]
pub struct ResourceLister<'a> {
    provider: &'a dyn NetworkProvider,
    reporter: &'a dyn Reporter,
}

impl<'a> ResourceLister<'a> {
    pub fn new(provider: &'a dyn NetworkProvider, reporter: &'a dyn Reporter) -> Self {
        Self { provider, reporter }
    }

    pub async fn list(&self, kind: ResourceKind, filter: Option<&Filter>) -> Vec<Descriptor> {
        match kind.list(self.provider, filter).await {
            Ok(descriptors) => {
                log::debug!("listed {} {}", descriptors.len(), kind.plural());
                descriptors
            }
            Err(e) => {
                log::warn!("describe {} failed: {:?}", kind.plural(), e);
                self.reporter
                    .failure(&format!("Failed to list {}: {}", kind.plural(), e));
                Vec::new()
            }
        }
    }

    /// Everything of `kind` inside `vpc_id` (all VPCs when `kind` is VPC)
    pub async fn list_in(&self, kind: ResourceKind, vpc_id: &str) -> Vec<Descriptor> {
        let filter = kind.container_filter(vpc_id);
        self.list(kind, filter.as_ref()).await
    }

    pub async fn vpcs(&self, filter: Option<&Filter>) -> Vec<Vpc> {
        self.list(ResourceKind::Vpc, filter)
            .await
            .into_iter()
            .filter_map(|d| match d {
                Descriptor::Vpc(v) => Some(v),
                _ => None,
            })
            .collect()
    }

    pub async fn subnets(&self, vpc_id: &str) -> Vec<Subnet> {
        self.list_in(ResourceKind::Subnet, vpc_id)
            .await
            .into_iter()
            .filter_map(|d| match d {
                Descriptor::Subnet(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub async fn route_tables(&self, filter: &Filter) -> Vec<RouteTable> {
        self.list(ResourceKind::RouteTable, Some(filter))
            .await
            .into_iter()
            .filter_map(|d| match d {
                Descriptor::RouteTable(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    pub async fn internet_gateways(&self, vpc_id: &str) -> Vec<InternetGateway> {
        self.list_in(ResourceKind::InternetGateway, vpc_id)
            .await
            .into_iter()
            .filter_map(|d| match d {
                Descriptor::InternetGateway(g) => Some(g),
                _ => None,
            })
            .collect()
    }

    pub async fn security_groups(&self, vpc_id: &str) -> Vec<SecurityGroup> {
        self.list_in(ResourceKind::SecurityGroup, vpc_id)
            .await
            .into_iter()
            .filter_map(|d| match d {
                Descriptor::SecurityGroup(g) => Some(g),
                _ => None,
            })
            .collect()
    }

    pub async fn nat_gateways(&self, vpc_id: &str) -> Vec<NatGateway> {
        self.list_in(ResourceKind::NatGateway, vpc_id)
            .await
            .into_iter()
            .filter_map(|d| match d {
                Descriptor::NatGateway(n) => Some(n),
                _ => None,
            })
            .collect()
    }
}
