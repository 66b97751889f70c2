//! Resource - Descriptors of remote network resources
//!
//! Nothing here is authoritative: every value is a snapshot of the provider's
//! live inventory taken by a describe call and dropped at the end of a flow.

use std::fmt;

/// Tag key holding a resource's display name
pub const NAME_TAG: &str = "Name";

/// Tag key holding a subnet or route table's public/private classification
pub const TYPE_TAG: &str = "Type";

/// Name of the provider-created security group every VPC owns
pub const DEFAULT_SECURITY_GROUP: &str = "default";

/// Destination of a default egress route
pub const DEFAULT_ROUTE_CIDR: &str = "0.0.0.0/0";

/// A key/value tag attached to a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn name(value: impl Into<String>) -> Self {
        Self::new(NAME_TAG, value)
    }
}

/// Resolve a display name from a tag list.
///
/// Returns the value of the first tag keyed `Name`, or an empty string.
pub fn name_from_tags(tags: &[Tag]) -> String {
    tags.iter()
        .find(|tag| tag.key == NAME_TAG)
        .map(|tag| tag.value.clone())
        .unwrap_or_default()
}

/// Advisory public/private classification of a subnet or route table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Public,
    Private,
}

impl Classification {
    pub const ALL: [Classification; 2] = [Classification::Public, Classification::Private];

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Public => "public",
            Classification::Private => "private",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Classification::Public => "Public",
            Classification::Private => "Private",
        }
    }

    pub fn tag(&self) -> Tag {
        Tag::new(TYPE_TAG, self.as_str())
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vpc {
    pub id: String,
    pub cidr_block: String,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subnet {
    pub id: String,
    pub vpc_id: String,
    pub cidr_block: String,
    pub map_public_ip_on_launch: bool,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Route {
    pub destination_cidr_block: String,
    /// Gateway, NAT gateway or `local` target
    pub target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteTableAssociation {
    pub id: String,
    pub route_table_id: String,
    /// `None` for the main association
    pub subnet_id: Option<String>,
    pub main: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteTable {
    pub id: String,
    pub vpc_id: String,
    pub routes: Vec<Route>,
    pub associations: Vec<RouteTableAssociation>,
    pub tags: Vec<Tag>,
}

impl RouteTable {
    /// True when any association on this table is the VPC's main association
    pub fn is_main(&self) -> bool {
        self.associations.iter().any(|assoc| assoc.main)
    }

    /// Associations that may be explicitly disassociated
    pub fn explicit_associations(&self) -> impl Iterator<Item = &RouteTableAssociation> {
        self.associations.iter().filter(|assoc| !assoc.main)
    }

    /// The explicit association binding `subnet_id` to this table, if any
    pub fn association_for_subnet(&self, subnet_id: &str) -> Option<&RouteTableAssociation> {
        self.explicit_associations()
            .find(|assoc| assoc.subnet_id.as_deref() == Some(subnet_id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayAttachment {
    pub vpc_id: String,
    /// Provider attachment state, e.g. `available`, `attached`, `detaching`
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct InternetGateway {
    pub id: String,
    pub attachments: Vec<GatewayAttachment>,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SecurityGroup {
    pub id: String,
    pub vpc_id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<Tag>,
}

impl SecurityGroup {
    /// The provider-created group that bulk deletion must never target
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_SECURITY_GROUP
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NatGateway {
    pub id: String,
    pub vpc_id: String,
    pub subnet_id: String,
    pub allocation_id: Option<String>,
    pub state: String,
    pub tags: Vec<Tag>,
}

/// Closed set of resource kinds the wizard manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Vpc,
    Subnet,
    RouteTable,
    InternetGateway,
    SecurityGroup,
    NatGateway,
}

impl ResourceKind {
    /// Singular human name, e.g. "route table"
    pub fn singular(&self) -> &'static str {
        match self {
            ResourceKind::Vpc => "VPC",
            ResourceKind::Subnet => "subnet",
            ResourceKind::RouteTable => "route table",
            ResourceKind::InternetGateway => "internet gateway",
            ResourceKind::SecurityGroup => "security group",
            ResourceKind::NatGateway => "NAT gateway",
        }
    }

    /// Plural human name, e.g. "route tables"
    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Vpc => "VPCs",
            ResourceKind::Subnet => "subnets",
            ResourceKind::RouteTable => "route tables",
            ResourceKind::InternetGateway => "internet gateways",
            ResourceKind::SecurityGroup => "security groups",
            ResourceKind::NatGateway => "NAT gateways",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

/// A described resource of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    Vpc(Vpc),
    Subnet(Subnet),
    RouteTable(RouteTable),
    InternetGateway(InternetGateway),
    SecurityGroup(SecurityGroup),
    NatGateway(NatGateway),
}

impl Descriptor {
    pub fn id(&self) -> &str {
        match self {
            Descriptor::Vpc(r) => &r.id,
            Descriptor::Subnet(r) => &r.id,
            Descriptor::RouteTable(r) => &r.id,
            Descriptor::InternetGateway(r) => &r.id,
            Descriptor::SecurityGroup(r) => &r.id,
            Descriptor::NatGateway(r) => &r.id,
        }
    }

    pub fn tags(&self) -> &[Tag] {
        match self {
            Descriptor::Vpc(r) => &r.tags,
            Descriptor::Subnet(r) => &r.tags,
            Descriptor::RouteTable(r) => &r.tags,
            Descriptor::InternetGateway(r) => &r.tags,
            Descriptor::SecurityGroup(r) => &r.tags,
            Descriptor::NatGateway(r) => &r.tags,
        }
    }

    /// Display name resolved from the `Name` tag (empty when untagged)
    pub fn display_name(&self) -> String {
        name_from_tags(self.tags())
    }

    /// Selection label: `"{id} ({name})"` when named, otherwise `"{id}"`
    pub fn label(&self) -> String {
        label_for(self.id(), &self.display_name())
    }
}

/// Build a selection label from an id and a possibly empty name
pub fn label_for(id: &str, name: &str) -> String {
    if name.is_empty() {
        id.to_string()
    } else {
        format!("{} ({})", id, name)
    }
}
