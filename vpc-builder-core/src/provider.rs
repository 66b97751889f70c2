//! Provider - Trait abstracting the cloud resource API
//!
//! A `NetworkProvider` issues request/response calls against live provider
//! state. Workflows receive one explicitly constructed provider and never
//! cache what it returns.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::resource::{
    Descriptor, InternetGateway, NatGateway, ResourceKind, RouteTable, SecurityGroup, Subnet, Tag,
    Vpc,
};

/// Error codes reported when a resource no longer exists
const NOT_FOUND_CODES: &[&str] = &[
    "InvalidVpcID.NotFound",
    "InvalidSubnetID.NotFound",
    "InvalidRouteTableID.NotFound",
    "InvalidAssociationID.NotFound",
    "InvalidInternetGatewayID.NotFound",
    "InvalidGroup.NotFound",
    "InvalidAllocationID.NotFound",
    "NatGatewayNotFound",
    "InvalidRoute.NotFound",
];

/// Error codes for detaching a gateway that is not attached
const NOT_ATTACHED_CODES: &[&str] = &["Gateway.NotAttached"];

/// Error codes for resources that still have dependents
const DEPENDENCY_CODES: &[&str] = &["DependencyViolation"];

/// Error codes for rate limiting
const THROTTLING_CODES: &[&str] = &["Throttling", "ThrottlingException", "RequestLimitExceeded"];

/// Category of a provider error, derived from its machine-readable code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    /// Gateway detach on a gateway that is already detached
    NotAttached,
    DependencyViolation,
    Throttled,
    Other,
}

impl ErrorKind {
    /// Short operator-facing explanation appended to failure messages
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ErrorKind::NotFound => Some("it no longer exists"),
            ErrorKind::DependencyViolation => Some("other resources still depend on it"),
            ErrorKind::Throttled => Some("request was throttled, run the deletion again"),
            ErrorKind::NotAttached | ErrorKind::Other => None,
        }
    }
}

/// Error returned by a provider call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProviderError {
    /// Machine-readable code, e.g. `DependencyViolation`
    pub code: Option<String>,
    /// Human-readable message, reported verbatim
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        classify_code(self.code.as_deref())
    }

    pub fn is_not_attached(&self) -> bool {
        self.kind() == ErrorKind::NotAttached
    }
}

/// Classify a provider error code.
pub fn classify_code(code: Option<&str>) -> ErrorKind {
    match code {
        Some(c) if NOT_ATTACHED_CODES.contains(&c) => ErrorKind::NotAttached,
        Some(c) if NOT_FOUND_CODES.contains(&c) => ErrorKind::NotFound,
        Some(c) if DEPENDENCY_CODES.contains(&c) => ErrorKind::DependencyViolation,
        Some(c) if THROTTLING_CODES.contains(&c) => ErrorKind::Throttled,
        _ => ErrorKind::Other,
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Return type for async operations
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A single describe filter clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub name: String,
    pub values: Vec<String>,
}

impl Filter {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Resources that belong to `vpc_id`
    pub fn vpc(vpc_id: &str) -> Self {
        Self::new("vpc-id", vec![vpc_id.to_string()])
    }

    /// Gateways attached to `vpc_id`
    pub fn attached_vpc(vpc_id: &str) -> Self {
        Self::new("attachment.vpc-id", vec![vpc_id.to_string()])
    }

    /// Route tables explicitly associated with `subnet_id`
    pub fn associated_subnet(subnet_id: &str) -> Self {
        Self::new("association.subnet-id", vec![subnet_id.to_string()])
    }

    /// Resources whose `Name` tag equals `name`
    pub fn name_tag(name: &str) -> Self {
        Self::new("tag:Name", vec![name.to_string()])
    }
}

/// Cloud resource API used by every workflow
///
/// Each method maps to exactly one provider request. Implementations must not
/// retry; errors carry the provider's code and message unchanged.
pub trait NetworkProvider: Send + Sync {
    /// Region this provider is bound to
    fn region(&self) -> &str;

    fn describe_vpcs(&self, filter: Option<&Filter>) -> BoxFuture<'_, ProviderResult<Vec<Vpc>>>;

    fn describe_subnets(
        &self,
        filter: Option<&Filter>,
    ) -> BoxFuture<'_, ProviderResult<Vec<Subnet>>>;

    fn describe_route_tables(
        &self,
        filter: Option<&Filter>,
    ) -> BoxFuture<'_, ProviderResult<Vec<RouteTable>>>;

    fn describe_internet_gateways(
        &self,
        filter: Option<&Filter>,
    ) -> BoxFuture<'_, ProviderResult<Vec<InternetGateway>>>;

    fn describe_security_groups(
        &self,
        filter: Option<&Filter>,
    ) -> BoxFuture<'_, ProviderResult<Vec<SecurityGroup>>>;

    fn describe_nat_gateways(
        &self,
        filter: Option<&Filter>,
    ) -> BoxFuture<'_, ProviderResult<Vec<NatGateway>>>;

    fn create_vpc(&self, cidr_block: &str) -> BoxFuture<'_, ProviderResult<Vpc>>;

    fn create_subnet(&self, vpc_id: &str, cidr_block: &str)
    -> BoxFuture<'_, ProviderResult<Subnet>>;

    fn create_route_table(&self, vpc_id: &str) -> BoxFuture<'_, ProviderResult<RouteTable>>;

    fn create_internet_gateway(&self) -> BoxFuture<'_, ProviderResult<InternetGateway>>;

    /// Returns the new group id
    fn create_security_group(
        &self,
        vpc_id: &str,
        name: &str,
        description: &str,
    ) -> BoxFuture<'_, ProviderResult<String>>;

    /// Allocate an Elastic IP in the VPC domain; returns the allocation id
    fn allocate_address(&self) -> BoxFuture<'_, ProviderResult<String>>;

    /// Creation completes asynchronously on the provider side
    fn create_nat_gateway(
        &self,
        subnet_id: &str,
        allocation_id: &str,
    ) -> BoxFuture<'_, ProviderResult<NatGateway>>;

    /// Apply (or overwrite) tags on a resource
    fn create_tags(&self, resource_id: &str, tags: &[Tag]) -> BoxFuture<'_, ProviderResult<()>>;

    fn attach_internet_gateway(
        &self,
        gateway_id: &str,
        vpc_id: &str,
    ) -> BoxFuture<'_, ProviderResult<()>>;

    fn detach_internet_gateway(
        &self,
        gateway_id: &str,
        vpc_id: &str,
    ) -> BoxFuture<'_, ProviderResult<()>>;

    /// Returns the new association id
    fn associate_route_table(
        &self,
        subnet_id: &str,
        route_table_id: &str,
    ) -> BoxFuture<'_, ProviderResult<String>>;

    fn disassociate_route_table(&self, association_id: &str)
    -> BoxFuture<'_, ProviderResult<()>>;

    fn create_route(
        &self,
        route_table_id: &str,
        destination_cidr_block: &str,
        gateway_id: &str,
    ) -> BoxFuture<'_, ProviderResult<()>>;

    fn delete_route(
        &self,
        route_table_id: &str,
        destination_cidr_block: &str,
    ) -> BoxFuture<'_, ProviderResult<()>>;

    fn set_map_public_ip_on_launch(
        &self,
        subnet_id: &str,
        enabled: bool,
    ) -> BoxFuture<'_, ProviderResult<()>>;

    fn delete_vpc(&self, vpc_id: &str) -> BoxFuture<'_, ProviderResult<()>>;

    fn delete_subnet(&self, subnet_id: &str) -> BoxFuture<'_, ProviderResult<()>>;

    fn delete_route_table(&self, route_table_id: &str) -> BoxFuture<'_, ProviderResult<()>>;

    fn delete_internet_gateway(&self, gateway_id: &str) -> BoxFuture<'_, ProviderResult<()>>;

    fn delete_security_group(&self, group_id: &str) -> BoxFuture<'_, ProviderResult<()>>;

    fn delete_nat_gateway(&self, nat_gateway_id: &str) -> BoxFuture<'_, ProviderResult<()>>;
}

impl ResourceKind {
    /// The filter selecting resources of this kind inside `vpc_id`.
    ///
    /// VPCs themselves are listed unfiltered.
    pub fn container_filter(&self, vpc_id: &str) -> Option<Filter> {
        match self {
            ResourceKind::Vpc => None,
            ResourceKind::InternetGateway => Some(Filter::attached_vpc(vpc_id)),
            _ => Some(Filter::vpc(vpc_id)),
        }
    }

    /// Describe resources of this kind through the matching typed call
    pub async fn list(
        &self,
        provider: &dyn NetworkProvider,
        filter: Option<&Filter>,
    ) -> ProviderResult<Vec<Descriptor>> {
        let descriptors = match self {
            ResourceKind::Vpc => provider
                .describe_vpcs(filter)
                .await?
                .into_iter()
                .map(Descriptor::Vpc)
                .collect(),
            ResourceKind::Subnet => provider
                .describe_subnets(filter)
                .await?
                .into_iter()
                .map(Descriptor::Subnet)
                .collect(),
            ResourceKind::RouteTable => provider
                .describe_route_tables(filter)
                .await?
                .into_iter()
                .map(Descriptor::RouteTable)
                .collect(),
            ResourceKind::InternetGateway => provider
                .describe_internet_gateways(filter)
                .await?
                .into_iter()
                .map(Descriptor::InternetGateway)
                .collect(),
            ResourceKind::SecurityGroup => provider
                .describe_security_groups(filter)
                .await?
                .into_iter()
                .map(Descriptor::SecurityGroup)
                .collect(),
            ResourceKind::NatGateway => provider
                .describe_nat_gateways(filter)
                .await?
                .into_iter()
                .map(Descriptor::NatGateway)
                .collect(),
        };
        Ok(descriptors)
    }

    /// Delete one resource of this kind.
    ///
    /// Dependencies (associations, attachments) are not touched here; callers
    /// sequence those first.
    pub async fn delete(&self, provider: &dyn NetworkProvider, id: &str) -> ProviderResult<()> {
        match self {
            ResourceKind::Vpc => provider.delete_vpc(id).await,
            ResourceKind::Subnet => provider.delete_subnet(id).await,
            ResourceKind::RouteTable => provider.delete_route_table(id).await,
            ResourceKind::InternetGateway => provider.delete_internet_gateway(id).await,
            ResourceKind::SecurityGroup => provider.delete_security_group(id).await,
            ResourceKind::NatGateway => provider.delete_nat_gateway(id).await,
        }
    }
}
