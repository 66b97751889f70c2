//! In-memory provider, scripted prompter and recording reporter for tests

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::console::{Prompter, Reporter};
use crate::provider::{BoxFuture, Filter, NetworkProvider, ProviderError, ProviderResult};
use crate::resource::{
    GatewayAttachment, InternetGateway, NatGateway, Route, RouteTable, RouteTableAssociation,
    SecurityGroup, Subnet, Tag, Vpc,
};

#[derive(Debug, Default, Clone)]
pub struct Inventory {
    pub vpcs: Vec<Vpc>,
    pub subnets: Vec<Subnet>,
    pub route_tables: Vec<RouteTable>,
    pub internet_gateways: Vec<InternetGateway>,
    pub security_groups: Vec<SecurityGroup>,
    pub nat_gateways: Vec<NatGateway>,
    pub addresses: Vec<String>,
}

/// Provider backed by an in-memory inventory.
///
/// Every call is recorded as `"<operation> <args>"`; a failure registered for
/// that exact string is returned instead of touching the inventory.
#[derive(Default)]
pub struct FakeProvider {
    inventory: Mutex<Inventory>,
    calls: Mutex<Vec<String>>,
    failures: Mutex<HashMap<String, ProviderError>>,
    counter: Mutex<u32>,
}

fn named(name: Option<&str>) -> Vec<Tag> {
    name.map(|n| vec![Tag::name(n)]).unwrap_or_default()
}

fn not_found(code: &str, id: &str) -> ProviderError {
    ProviderError::with_code(code, format!("The ID '{}' does not exist", id))
}

fn tags_of<'a>(inv: &'a mut Inventory, id: &str) -> Option<&'a mut Vec<Tag>> {
    if let Some(r) = inv.vpcs.iter_mut().find(|r| r.id == id) {
        return Some(&mut r.tags);
    }
    if let Some(r) = inv.subnets.iter_mut().find(|r| r.id == id) {
        return Some(&mut r.tags);
    }
    if let Some(r) = inv.route_tables.iter_mut().find(|r| r.id == id) {
        return Some(&mut r.tags);
    }
    if let Some(r) = inv.internet_gateways.iter_mut().find(|r| r.id == id) {
        return Some(&mut r.tags);
    }
    if let Some(r) = inv.security_groups.iter_mut().find(|r| r.id == id) {
        return Some(&mut r.tags);
    }
    inv.nat_gateways
        .iter_mut()
        .find(|r| r.id == id)
        .map(|r| &mut r.tags)
}

fn filter_label(filter: Option<&Filter>) -> String {
    match filter {
        Some(f) => format!(" {}={}", f.name, f.values.join(",")),
        None => String::new(),
    }
}

fn filter_matches(filter: Option<&Filter>, field: &str, value: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(f) if f.name == field => value.is_some_and(|v| f.values.iter().any(|x| x == v)),
        Some(_) => true,
    }
}

fn tag_matches(filter: Option<&Filter>, tags: &[Tag]) -> bool {
    match filter {
        Some(f) if f.name == "tag:Name" => tags
            .iter()
            .any(|t| t.key == "Name" && f.values.contains(&t.value)),
        _ => true,
    }
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, call: &str, error: ProviderError) {
        self.failures
            .lock()
            .unwrap()
            .insert(call.to_string(), error);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded calls whose operation name starts with `prefix`
    pub fn calls_matching(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    pub fn inventory(&self) -> Inventory {
        self.inventory.lock().unwrap().clone()
    }

    pub fn add_vpc(&self, id: &str, cidr: &str, name: Option<&str>) {
        self.inventory.lock().unwrap().vpcs.push(Vpc {
            id: id.to_string(),
            cidr_block: cidr.to_string(),
            tags: named(name),
        });
    }

    pub fn add_subnet(&self, id: &str, vpc_id: &str, cidr: &str, name: Option<&str>) {
        self.inventory.lock().unwrap().subnets.push(Subnet {
            id: id.to_string(),
            vpc_id: vpc_id.to_string(),
            cidr_block: cidr.to_string(),
            map_public_ip_on_launch: false,
            tags: named(name),
        });
    }

    pub fn add_route_table(&self, id: &str, vpc_id: &str, name: Option<&str>, main: bool) {
        let associations = if main {
            vec![RouteTableAssociation {
                id: format!("{}-main", id),
                route_table_id: id.to_string(),
                subnet_id: None,
                main: true,
            }]
        } else {
            Vec::new()
        };
        self.inventory.lock().unwrap().route_tables.push(RouteTable {
            id: id.to_string(),
            vpc_id: vpc_id.to_string(),
            routes: vec![Route {
                destination_cidr_block: "10.0.0.0/16".to_string(),
                target: Some("local".to_string()),
            }],
            associations,
            tags: named(name),
        });
    }

    pub fn add_association(&self, route_table_id: &str, association_id: &str, subnet_id: &str) {
        let mut inv = self.inventory.lock().unwrap();
        if let Some(table) = inv.route_tables.iter_mut().find(|t| t.id == route_table_id) {
            table.associations.push(RouteTableAssociation {
                id: association_id.to_string(),
                route_table_id: route_table_id.to_string(),
                subnet_id: Some(subnet_id.to_string()),
                main: false,
            });
        }
    }

    pub fn add_internet_gateway(&self, id: &str, attached_to: Option<&str>, name: Option<&str>) {
        self.inventory
            .lock()
            .unwrap()
            .internet_gateways
            .push(InternetGateway {
                id: id.to_string(),
                attachments: attached_to
                    .map(|vpc| {
                        vec![GatewayAttachment {
                            vpc_id: vpc.to_string(),
                            state: "available".to_string(),
                        }]
                    })
                    .unwrap_or_default(),
                tags: named(name),
            });
    }

    pub fn add_security_group(&self, id: &str, vpc_id: &str, name: &str) {
        self.inventory
            .lock()
            .unwrap()
            .security_groups
            .push(SecurityGroup {
                id: id.to_string(),
                vpc_id: vpc_id.to_string(),
                name: name.to_string(),
                description: format!("{} group", name),
                tags: Vec::new(),
            });
    }

    pub fn add_nat_gateway(&self, id: &str, vpc_id: &str, subnet_id: &str) {
        self.inventory.lock().unwrap().nat_gateways.push(NatGateway {
            id: id.to_string(),
            vpc_id: vpc_id.to_string(),
            subnet_id: subnet_id.to_string(),
            allocation_id: None,
            state: "available".to_string(),
            tags: Vec::new(),
        });
    }

    fn next_id(&self, prefix: &str) -> String {
        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        format!("{}-new{}", prefix, *counter)
    }

    /// Record the call; return the injected failure for it, if any
    fn record(&self, call: String) -> ProviderResult<()> {
        let failure = self.failures.lock().unwrap().get(&call).cloned();
        self.calls.lock().unwrap().push(call);
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn run<T, F>(&self, call: String, op: F) -> BoxFuture<'_, ProviderResult<T>>
    where
        T: Send + 'static,
        F: FnOnce(&mut Inventory) -> ProviderResult<T>,
    {
        let result = self
            .record(call)
            .and_then(|_| op(&mut *self.inventory.lock().unwrap()));
        Box::pin(async move { result })
    }
}

impl NetworkProvider for FakeProvider {
    fn region(&self) -> &str {
        "us-east-1"
    }

    fn describe_vpcs(&self, filter: Option<&Filter>) -> BoxFuture<'_, ProviderResult<Vec<Vpc>>> {
        let call = format!("describe_vpcs{}", filter_label(filter));
        let filter = filter.cloned();
        self.run(call, move |inv| {
            let f = filter.as_ref();
            Ok(inv
                .vpcs
                .iter()
                .filter(|v| filter_matches(f, "vpc-id", Some(v.id.as_str())) && tag_matches(f, &v.tags))
                .cloned()
                .collect())
        })
    }

    fn describe_subnets(
        &self,
        filter: Option<&Filter>,
    ) -> BoxFuture<'_, ProviderResult<Vec<Subnet>>> {
        let call = format!("describe_subnets{}", filter_label(filter));
        let filter = filter.cloned();
        self.run(call, move |inv| {
            let f = filter.as_ref();
            Ok(inv
                .subnets
                .iter()
                .filter(|s| filter_matches(f, "vpc-id", Some(s.vpc_id.as_str())) && tag_matches(f, &s.tags))
                .cloned()
                .collect())
        })
    }

    fn describe_route_tables(
        &self,
        filter: Option<&Filter>,
    ) -> BoxFuture<'_, ProviderResult<Vec<RouteTable>>> {
        let call = format!("describe_route_tables{}", filter_label(filter));
        let filter = filter.cloned();
        self.run(call, move |inv| {
            let f = filter.as_ref();
            Ok(inv
                .route_tables
                .iter()
                .filter(|t| {
                    filter_matches(f, "vpc-id", Some(t.vpc_id.as_str()))
                        && tag_matches(f, &t.tags)
                        && match f {
                            Some(f) if f.name == "association.subnet-id" => {
                                t.associations.iter().any(|a| {
                                    a.subnet_id.as_ref().is_some_and(|s| f.values.contains(s))
                                })
                            }
                            _ => true,
                        }
                })
                .cloned()
                .collect())
        })
    }

    fn describe_internet_gateways(
        &self,
        filter: Option<&Filter>,
    ) -> BoxFuture<'_, ProviderResult<Vec<InternetGateway>>> {
        let call = format!("describe_internet_gateways{}", filter_label(filter));
        let filter = filter.cloned();
        self.run(call, move |inv| {
            let f = filter.as_ref();
            Ok(inv
                .internet_gateways
                .iter()
                .filter(|g| {
                    tag_matches(f, &g.tags)
                        && match f {
                            Some(f) if f.name == "attachment.vpc-id" => {
                                g.attachments.iter().any(|a| f.values.contains(&a.vpc_id))
                            }
                            _ => true,
                        }
                })
                .cloned()
                .collect())
        })
    }

    fn describe_security_groups(
        &self,
        filter: Option<&Filter>,
    ) -> BoxFuture<'_, ProviderResult<Vec<SecurityGroup>>> {
        let call = format!("describe_security_groups{}", filter_label(filter));
        let filter = filter.cloned();
        self.run(call, move |inv| {
            let f = filter.as_ref();
            Ok(inv
                .security_groups
                .iter()
                .filter(|g| filter_matches(f, "vpc-id", Some(g.vpc_id.as_str())))
                .cloned()
                .collect())
        })
    }

    fn describe_nat_gateways(
        &self,
        filter: Option<&Filter>,
    ) -> BoxFuture<'_, ProviderResult<Vec<NatGateway>>> {
        let call = format!("describe_nat_gateways{}", filter_label(filter));
        let filter = filter.cloned();
        self.run(call, move |inv| {
            let f = filter.as_ref();
            Ok(inv
                .nat_gateways
                .iter()
                .filter(|n| filter_matches(f, "vpc-id", Some(n.vpc_id.as_str())))
                .cloned()
                .collect())
        })
    }

    fn create_vpc(&self, cidr_block: &str) -> BoxFuture<'_, ProviderResult<Vpc>> {
        let id = self.next_id("vpc");
        let cidr = cidr_block.to_string();
        self.run(format!("create_vpc {}", cidr_block), move |inv| {
            let vpc = Vpc {
                id,
                cidr_block: cidr,
                tags: Vec::new(),
            };
            inv.vpcs.push(vpc.clone());
            Ok(vpc)
        })
    }

    fn create_subnet(
        &self,
        vpc_id: &str,
        cidr_block: &str,
    ) -> BoxFuture<'_, ProviderResult<Subnet>> {
        let id = self.next_id("subnet");
        let (vpc, cidr) = (vpc_id.to_string(), cidr_block.to_string());
        self.run(format!("create_subnet {} {}", vpc_id, cidr_block), move |inv| {
            let subnet = Subnet {
                id,
                vpc_id: vpc,
                cidr_block: cidr,
                ..Default::default()
            };
            inv.subnets.push(subnet.clone());
            Ok(subnet)
        })
    }

    fn create_route_table(&self, vpc_id: &str) -> BoxFuture<'_, ProviderResult<RouteTable>> {
        let id = self.next_id("rtb");
        let vpc = vpc_id.to_string();
        self.run(format!("create_route_table {}", vpc_id), move |inv| {
            let table = RouteTable {
                id,
                vpc_id: vpc,
                ..Default::default()
            };
            inv.route_tables.push(table.clone());
            Ok(table)
        })
    }

    fn create_internet_gateway(&self) -> BoxFuture<'_, ProviderResult<InternetGateway>> {
        let id = self.next_id("igw");
        self.run("create_internet_gateway".to_string(), move |inv| {
            let gateway = InternetGateway {
                id,
                ..Default::default()
            };
            inv.internet_gateways.push(gateway.clone());
            Ok(gateway)
        })
    }

    fn create_security_group(
        &self,
        vpc_id: &str,
        name: &str,
        description: &str,
    ) -> BoxFuture<'_, ProviderResult<String>> {
        let id = self.next_id("sg");
        let (vpc, group_name, desc) = (vpc_id.to_string(), name.to_string(), description.to_string());
        self.run(
            format!("create_security_group {} {}", vpc_id, name),
            move |inv| {
                inv.security_groups.push(SecurityGroup {
                    id: id.clone(),
                    vpc_id: vpc,
                    name: group_name,
                    description: desc,
                    tags: Vec::new(),
                });
                Ok(id)
            },
        )
    }

    fn allocate_address(&self) -> BoxFuture<'_, ProviderResult<String>> {
        let id = self.next_id("eipalloc");
        self.run("allocate_address".to_string(), move |inv| {
            inv.addresses.push(id.clone());
            Ok(id)
        })
    }

    fn create_nat_gateway(
        &self,
        subnet_id: &str,
        allocation_id: &str,
    ) -> BoxFuture<'_, ProviderResult<NatGateway>> {
        let id = self.next_id("nat");
        let (subnet, allocation) = (subnet_id.to_string(), allocation_id.to_string());
        self.run(
            format!("create_nat_gateway {} {}", subnet_id, allocation_id),
            move |inv| {
                let vpc_id = inv
                    .subnets
                    .iter()
                    .find(|s| s.id == subnet)
                    .map(|s| s.vpc_id.clone())
                    .ok_or_else(|| not_found("InvalidSubnetID.NotFound", &subnet))?;
                let gateway = NatGateway {
                    id,
                    vpc_id,
                    subnet_id: subnet,
                    allocation_id: Some(allocation),
                    state: "pending".to_string(),
                    tags: Vec::new(),
                };
                inv.nat_gateways.push(gateway.clone());
                Ok(gateway)
            },
        )
    }

    fn create_tags(&self, resource_id: &str, tags: &[Tag]) -> BoxFuture<'_, ProviderResult<()>> {
        let rendered: Vec<String> = tags.iter().map(|t| format!("{}={}", t.key, t.value)).collect();
        let id = resource_id.to_string();
        let tags = tags.to_vec();
        self.run(
            format!("create_tags {} {}", resource_id, rendered.join(",")),
            move |inv| {
                let target =
                    tags_of(inv, &id).ok_or_else(|| not_found("InvalidID.NotFound", &id))?;
                for tag in tags {
                    match target.iter_mut().find(|t| t.key == tag.key) {
                        Some(existing) => existing.value = tag.value,
                        None => target.push(tag),
                    }
                }
                Ok(())
            },
        )
    }

    fn attach_internet_gateway(
        &self,
        gateway_id: &str,
        vpc_id: &str,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        let (igw, vpc) = (gateway_id.to_string(), vpc_id.to_string());
        self.run(
            format!("attach_internet_gateway {} {}", gateway_id, vpc_id),
            move |inv| {
                let gateway = inv
                    .internet_gateways
                    .iter_mut()
                    .find(|g| g.id == igw)
                    .ok_or_else(|| not_found("InvalidInternetGatewayID.NotFound", &igw))?;
                gateway.attachments.push(GatewayAttachment {
                    vpc_id: vpc,
                    state: "available".to_string(),
                });
                Ok(())
            },
        )
    }

    fn detach_internet_gateway(
        &self,
        gateway_id: &str,
        vpc_id: &str,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        let (igw, vpc) = (gateway_id.to_string(), vpc_id.to_string());
        self.run(
            format!("detach_internet_gateway {} {}", gateway_id, vpc_id),
            move |inv| {
                let gateway = inv
                    .internet_gateways
                    .iter_mut()
                    .find(|g| g.id == igw)
                    .ok_or_else(|| not_found("InvalidInternetGatewayID.NotFound", &igw))?;
                if !gateway.attachments.iter().any(|a| a.vpc_id == vpc) {
                    return Err(ProviderError::with_code(
                        "Gateway.NotAttached",
                        format!("resource {} is not attached to network {}", igw, vpc),
                    ));
                }
                gateway.attachments.retain(|a| a.vpc_id != vpc);
                Ok(())
            },
        )
    }

    fn associate_route_table(
        &self,
        subnet_id: &str,
        route_table_id: &str,
    ) -> BoxFuture<'_, ProviderResult<String>> {
        let id = self.next_id("rtbassoc");
        let (subnet, table_id) = (subnet_id.to_string(), route_table_id.to_string());
        self.run(
            format!("associate_route_table {} {}", subnet_id, route_table_id),
            move |inv| {
                let taken = inv.route_tables.iter().any(|t| {
                    t.associations
                        .iter()
                        .any(|a| a.subnet_id.as_deref() == Some(subnet.as_str()))
                });
                if taken {
                    return Err(ProviderError::with_code(
                        "Resource.AlreadyAssociated",
                        format!("the specified association for route table already exists for subnet {}", subnet),
                    ));
                }
                let table = inv
                    .route_tables
                    .iter_mut()
                    .find(|t| t.id == table_id)
                    .ok_or_else(|| not_found("InvalidRouteTableID.NotFound", &table_id))?;
                table.associations.push(RouteTableAssociation {
                    id: id.clone(),
                    route_table_id: table_id.clone(),
                    subnet_id: Some(subnet),
                    main: false,
                });
                Ok(id)
            },
        )
    }

    fn disassociate_route_table(
        &self,
        association_id: &str,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        let assoc = association_id.to_string();
        self.run(
            format!("disassociate_route_table {}", association_id),
            move |inv| {
                for table in inv.route_tables.iter_mut() {
                    if let Some(pos) = table.associations.iter().position(|a| a.id == assoc) {
                        if table.associations[pos].main {
                            return Err(ProviderError::with_code(
                                "InvalidParameterValue",
                                "cannot disassociate the main route table association",
                            ));
                        }
                        table.associations.remove(pos);
                        return Ok(());
                    }
                }
                Err(not_found("InvalidAssociationID.NotFound", &assoc))
            },
        )
    }

    fn create_route(
        &self,
        route_table_id: &str,
        destination_cidr_block: &str,
        gateway_id: &str,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        let (table_id, dest, target) = (
            route_table_id.to_string(),
            destination_cidr_block.to_string(),
            gateway_id.to_string(),
        );
        self.run(
            format!(
                "create_route {} {} {}",
                route_table_id, destination_cidr_block, gateway_id
            ),
            move |inv| {
                let table = inv
                    .route_tables
                    .iter_mut()
                    .find(|t| t.id == table_id)
                    .ok_or_else(|| not_found("InvalidRouteTableID.NotFound", &table_id))?;
                table.routes.push(Route {
                    destination_cidr_block: dest,
                    target: Some(target),
                });
                Ok(())
            },
        )
    }

    fn delete_route(
        &self,
        route_table_id: &str,
        destination_cidr_block: &str,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        let (table_id, dest) = (route_table_id.to_string(), destination_cidr_block.to_string());
        self.run(
            format!("delete_route {} {}", route_table_id, destination_cidr_block),
            move |inv| {
                let table = inv
                    .route_tables
                    .iter_mut()
                    .find(|t| t.id == table_id)
                    .ok_or_else(|| not_found("InvalidRouteTableID.NotFound", &table_id))?;
                let before = table.routes.len();
                table.routes.retain(|r| r.destination_cidr_block != dest);
                if table.routes.len() == before {
                    return Err(not_found("InvalidRoute.NotFound", &dest));
                }
                Ok(())
            },
        )
    }

    fn set_map_public_ip_on_launch(
        &self,
        subnet_id: &str,
        enabled: bool,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        let subnet = subnet_id.to_string();
        self.run(
            format!("set_map_public_ip_on_launch {} {}", subnet_id, enabled),
            move |inv| {
                let target = inv
                    .subnets
                    .iter_mut()
                    .find(|s| s.id == subnet)
                    .ok_or_else(|| not_found("InvalidSubnetID.NotFound", &subnet))?;
                target.map_public_ip_on_launch = enabled;
                Ok(())
            },
        )
    }

    fn delete_vpc(&self, vpc_id: &str) -> BoxFuture<'_, ProviderResult<()>> {
        let id = vpc_id.to_string();
        self.run(format!("delete_vpc {}", vpc_id), move |inv| {
            let before = inv.vpcs.len();
            inv.vpcs.retain(|v| v.id != id);
            if inv.vpcs.len() == before {
                return Err(not_found("InvalidVpcID.NotFound", &id));
            }
            Ok(())
        })
    }

    fn delete_subnet(&self, subnet_id: &str) -> BoxFuture<'_, ProviderResult<()>> {
        let id = subnet_id.to_string();
        self.run(format!("delete_subnet {}", subnet_id), move |inv| {
            let before = inv.subnets.len();
            inv.subnets.retain(|s| s.id != id);
            if inv.subnets.len() == before {
                return Err(not_found("InvalidSubnetID.NotFound", &id));
            }
            Ok(())
        })
    }

    fn delete_route_table(&self, route_table_id: &str) -> BoxFuture<'_, ProviderResult<()>> {
        let id = route_table_id.to_string();
        self.run(format!("delete_route_table {}", route_table_id), move |inv| {
            let table = inv
                .route_tables
                .iter()
                .find(|t| t.id == id)
                .ok_or_else(|| not_found("InvalidRouteTableID.NotFound", &id))?;
            if !table.associations.is_empty() {
                return Err(ProviderError::with_code(
                    "DependencyViolation",
                    format!("The routeTable '{}' has dependencies and cannot be deleted.", id),
                ));
            }
            inv.route_tables.retain(|t| t.id != id);
            Ok(())
        })
    }

    fn delete_internet_gateway(&self, gateway_id: &str) -> BoxFuture<'_, ProviderResult<()>> {
        let id = gateway_id.to_string();
        self.run(format!("delete_internet_gateway {}", gateway_id), move |inv| {
            let gateway = inv
                .internet_gateways
                .iter()
                .find(|g| g.id == id)
                .ok_or_else(|| not_found("InvalidInternetGatewayID.NotFound", &id))?;
            if !gateway.attachments.is_empty() {
                return Err(ProviderError::with_code(
                    "DependencyViolation",
                    format!("The internetGateway '{}' has dependencies and cannot be deleted.", id),
                ));
            }
            inv.internet_gateways.retain(|g| g.id != id);
            Ok(())
        })
    }

    fn delete_security_group(&self, group_id: &str) -> BoxFuture<'_, ProviderResult<()>> {
        let id = group_id.to_string();
        self.run(format!("delete_security_group {}", group_id), move |inv| {
            let before = inv.security_groups.len();
            inv.security_groups.retain(|g| g.id != id);
            if inv.security_groups.len() == before {
                return Err(not_found("InvalidGroup.NotFound", &id));
            }
            Ok(())
        })
    }

    fn delete_nat_gateway(&self, nat_gateway_id: &str) -> BoxFuture<'_, ProviderResult<()>> {
        let id = nat_gateway_id.to_string();
        self.run(format!("delete_nat_gateway {}", nat_gateway_id), move |inv| {
            let gateway = inv
                .nat_gateways
                .iter_mut()
                .find(|n| n.id == id)
                .ok_or_else(|| not_found("NatGatewayNotFound", &id))?;
            gateway.state = "deleting".to_string();
            Ok(())
        })
    }
}

/// A queued answer for `ScriptedPrompter`
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Select(Option<usize>),
    Many(Vec<usize>),
    Text(Option<String>),
    Confirm(bool),
}

impl Answer {
    pub fn text(s: &str) -> Self {
        Answer::Text(Some(s.to_string()))
    }

    pub fn pick(index: usize) -> Self {
        Answer::Select(Some(index))
    }
}

/// Prompter that replays queued answers and records every prompt shown
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<Answer>>,
    prompts: Mutex<Vec<String>>,
    options: Mutex<Vec<Vec<String>>>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            ..Default::default()
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Option lists shown by select prompts, in order
    pub fn options_shown(&self) -> Vec<Vec<String>> {
        self.options.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.lock().unwrap().len()
    }

    fn next(&self, prompt: &str) -> Answer {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted answer for prompt: {prompt}"))
    }
}

impl Prompter for ScriptedPrompter {
    fn select_one(&self, prompt: &str, options: &[String]) -> Option<usize> {
        self.options.lock().unwrap().push(options.to_vec());
        match self.next(prompt) {
            Answer::Select(choice) => choice,
            other => panic!("expected select answer for '{prompt}', got {other:?}"),
        }
    }

    fn select_many(&self, prompt: &str, options: &[String]) -> Vec<usize> {
        self.options.lock().unwrap().push(options.to_vec());
        match self.next(prompt) {
            Answer::Many(choices) => choices,
            other => panic!("expected multi-select answer for '{prompt}', got {other:?}"),
        }
    }

    fn text(&self, prompt: &str) -> Option<String> {
        match self.next(prompt) {
            Answer::Text(text) => text,
            other => panic!("expected text answer for '{prompt}', got {other:?}"),
        }
    }

    fn confirm(&self, prompt: &str) -> bool {
        match self.next(prompt) {
            Answer::Confirm(yes) => yes,
            other => panic!("expected confirm answer for '{prompt}', got {other:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Failure,
}

#[derive(Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<(Level, String)>>,
}

impl RecordingReporter {
    pub fn messages(&self) -> Vec<(Level, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn at(&self, level: Level) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    pub fn has(&self, level: Level, needle: &str) -> bool {
        self.at(level).iter().any(|m| m.contains(needle))
    }

    fn push(&self, level: Level, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }

    fn success(&self, message: &str) {
        self.push(Level::Success, message);
    }

    fn warning(&self, message: &str) {
        self.push(Level::Warning, message);
    }

    fn failure(&self, message: &str) {
        self.push(Level::Failure, message);
    }
}
