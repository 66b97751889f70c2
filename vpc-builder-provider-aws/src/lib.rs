//! VPC Builder AWS Provider
//!
//! `NetworkProvider` implementation over the EC2 API

pub mod convert;
mod error;

use aws_config::Region;
use aws_sdk_ec2::Client as Ec2Client;
use aws_sdk_ec2::types::{AttributeBooleanValue, DomainType};
use vpc_builder_core::provider::{
    BoxFuture, Filter, NetworkProvider, ProviderError, ProviderResult,
};
use vpc_builder_core::resource::{
    InternetGateway, NatGateway, RouteTable, SecurityGroup, Subnet, Tag, Vpc,
};

use crate::error::sdk_error;

/// EC2 client bound to one region for the lifetime of the process
pub struct AwsProvider {
    client: Ec2Client,
    region: String,
}

impl AwsProvider {
    /// Create a new AWS Provider using the default credential chain
    pub async fn new(region: &str) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        log::info!("EC2 client ready for {}", region);

        Self {
            client: Ec2Client::new(&config),
            region: region.to_string(),
        }
    }

    /// Create with a specific client (for testing)
    pub fn with_client(client: Ec2Client, region: String) -> Self {
        Self { client, region }
    }
}

impl NetworkProvider for AwsProvider {
    fn region(&self) -> &str {
        &self.region
    }

    fn describe_vpcs(&self, filter: Option<&Filter>) -> BoxFuture<'_, ProviderResult<Vec<Vpc>>> {
        let filters = convert::sdk_filters(filter);
        Box::pin(async move {
            let output = self
                .client
                .describe_vpcs()
                .set_filters(filters)
                .send()
                .await
                .map_err(|e| sdk_error("DescribeVpcs", e))?;
            Ok(output.vpcs().iter().map(convert::vpc).collect())
        })
    }

    fn describe_subnets(
        &self,
        filter: Option<&Filter>,
    ) -> BoxFuture<'_, ProviderResult<Vec<Subnet>>> {
        let filters = convert::sdk_filters(filter);
        Box::pin(async move {
            let output = self
                .client
                .describe_subnets()
                .set_filters(filters)
                .send()
                .await
                .map_err(|e| sdk_error("DescribeSubnets", e))?;
            Ok(output.subnets().iter().map(convert::subnet).collect())
        })
    }

    fn describe_route_tables(
        &self,
        filter: Option<&Filter>,
    ) -> BoxFuture<'_, ProviderResult<Vec<RouteTable>>> {
        let filters = convert::sdk_filters(filter);
        Box::pin(async move {
            let output = self
                .client
                .describe_route_tables()
                .set_filters(filters)
                .send()
                .await
                .map_err(|e| sdk_error("DescribeRouteTables", e))?;
            Ok(output
                .route_tables()
                .iter()
                .map(convert::route_table)
                .collect())
        })
    }

    fn describe_internet_gateways(
        &self,
        filter: Option<&Filter>,
    ) -> BoxFuture<'_, ProviderResult<Vec<InternetGateway>>> {
        let filters = convert::sdk_filters(filter);
        Box::pin(async move {
            let output = self
                .client
                .describe_internet_gateways()
                .set_filters(filters)
                .send()
                .await
                .map_err(|e| sdk_error("DescribeInternetGateways", e))?;
            Ok(output
                .internet_gateways()
                .iter()
                .map(convert::internet_gateway)
                .collect())
        })
    }

    fn describe_security_groups(
        &self,
        filter: Option<&Filter>,
    ) -> BoxFuture<'_, ProviderResult<Vec<SecurityGroup>>> {
        let filters = convert::sdk_filters(filter);
        Box::pin(async move {
            let output = self
                .client
                .describe_security_groups()
                .set_filters(filters)
                .send()
                .await
                .map_err(|e| sdk_error("DescribeSecurityGroups", e))?;
            Ok(output
                .security_groups()
                .iter()
                .map(convert::security_group)
                .collect())
        })
    }

    fn describe_nat_gateways(
        &self,
        filter: Option<&Filter>,
    ) -> BoxFuture<'_, ProviderResult<Vec<NatGateway>>> {
        let filters = convert::sdk_filters(filter);
        Box::pin(async move {
            let output = self
                .client
                .describe_nat_gateways()
                .set_filter(filters)
                .send()
                .await
                .map_err(|e| sdk_error("DescribeNatGateways", e))?;
            Ok(output
                .nat_gateways()
                .iter()
                .map(convert::nat_gateway)
                .collect())
        })
    }

    fn create_vpc(&self, cidr_block: &str) -> BoxFuture<'_, ProviderResult<Vpc>> {
        let cidr_block = cidr_block.to_string();
        Box::pin(async move {
            log::debug!("CreateVpc {}", cidr_block);
            let output = self
                .client
                .create_vpc()
                .cidr_block(&cidr_block)
                .send()
                .await
                .map_err(|e| sdk_error("CreateVpc", e))?;
            output
                .vpc()
                .map(convert::vpc)
                .ok_or_else(|| ProviderError::new("VPC created but no ID returned"))
        })
    }

    fn create_subnet(
        &self,
        vpc_id: &str,
        cidr_block: &str,
    ) -> BoxFuture<'_, ProviderResult<Subnet>> {
        let vpc_id = vpc_id.to_string();
        let cidr_block = cidr_block.to_string();
        Box::pin(async move {
            log::debug!("CreateSubnet {} {}", vpc_id, cidr_block);
            let output = self
                .client
                .create_subnet()
                .vpc_id(&vpc_id)
                .cidr_block(&cidr_block)
                .send()
                .await
                .map_err(|e| sdk_error("CreateSubnet", e))?;
            output
                .subnet()
                .map(convert::subnet)
                .ok_or_else(|| ProviderError::new("Subnet created but no ID returned"))
        })
    }

    fn create_route_table(&self, vpc_id: &str) -> BoxFuture<'_, ProviderResult<RouteTable>> {
        let vpc_id = vpc_id.to_string();
        Box::pin(async move {
            log::debug!("CreateRouteTable {}", vpc_id);
            let output = self
                .client
                .create_route_table()
                .vpc_id(&vpc_id)
                .send()
                .await
                .map_err(|e| sdk_error("CreateRouteTable", e))?;
            output
                .route_table()
                .map(convert::route_table)
                .ok_or_else(|| ProviderError::new("Route table created but no ID returned"))
        })
    }

    fn create_internet_gateway(&self) -> BoxFuture<'_, ProviderResult<InternetGateway>> {
        Box::pin(async move {
            log::debug!("CreateInternetGateway");
            let output = self
                .client
                .create_internet_gateway()
                .send()
                .await
                .map_err(|e| sdk_error("CreateInternetGateway", e))?;
            output
                .internet_gateway()
                .map(convert::internet_gateway)
                .ok_or_else(|| ProviderError::new("Internet gateway created but no ID returned"))
        })
    }

    fn create_security_group(
        &self,
        vpc_id: &str,
        name: &str,
        description: &str,
    ) -> BoxFuture<'_, ProviderResult<String>> {
        let vpc_id = vpc_id.to_string();
        let name = name.to_string();
        let description = description.to_string();
        Box::pin(async move {
            log::debug!("CreateSecurityGroup {} {}", vpc_id, name);
            let output = self
                .client
                .create_security_group()
                .vpc_id(&vpc_id)
                .group_name(&name)
                .description(&description)
                .send()
                .await
                .map_err(|e| sdk_error("CreateSecurityGroup", e))?;
            output
                .group_id()
                .map(str::to_string)
                .ok_or_else(|| ProviderError::new("Security group created but no ID returned"))
        })
    }

    fn allocate_address(&self) -> BoxFuture<'_, ProviderResult<String>> {
        Box::pin(async move {
            log::debug!("AllocateAddress vpc");
            let output = self
                .client
                .allocate_address()
                .domain(DomainType::Vpc)
                .send()
                .await
                .map_err(|e| sdk_error("AllocateAddress", e))?;
            output
                .allocation_id()
                .map(str::to_string)
                .ok_or_else(|| ProviderError::new("Address allocated but no allocation ID returned"))
        })
    }

    fn create_nat_gateway(
        &self,
        subnet_id: &str,
        allocation_id: &str,
    ) -> BoxFuture<'_, ProviderResult<NatGateway>> {
        let subnet_id = subnet_id.to_string();
        let allocation_id = allocation_id.to_string();
        Box::pin(async move {
            log::debug!("CreateNatGateway {} {}", subnet_id, allocation_id);
            let output = self
                .client
                .create_nat_gateway()
                .subnet_id(&subnet_id)
                .allocation_id(&allocation_id)
                .send()
                .await
                .map_err(|e| sdk_error("CreateNatGateway", e))?;
            output
                .nat_gateway()
                .map(convert::nat_gateway)
                .ok_or_else(|| ProviderError::new("NAT gateway created but no ID returned"))
        })
    }

    fn create_tags(&self, resource_id: &str, tags: &[Tag]) -> BoxFuture<'_, ProviderResult<()>> {
        let resource_id = resource_id.to_string();
        let tags = convert::sdk_tags(tags);
        Box::pin(async move {
            log::debug!("CreateTags {} ({} tags)", resource_id, tags.len());
            self.client
                .create_tags()
                .resources(&resource_id)
                .set_tags(Some(tags))
                .send()
                .await
                .map_err(|e| sdk_error("CreateTags", e))?;
            Ok(())
        })
    }

    fn attach_internet_gateway(
        &self,
        gateway_id: &str,
        vpc_id: &str,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        let gateway_id = gateway_id.to_string();
        let vpc_id = vpc_id.to_string();
        Box::pin(async move {
            log::debug!("AttachInternetGateway {} {}", gateway_id, vpc_id);
            self.client
                .attach_internet_gateway()
                .internet_gateway_id(&gateway_id)
                .vpc_id(&vpc_id)
                .send()
                .await
                .map_err(|e| sdk_error("AttachInternetGateway", e))?;
            Ok(())
        })
    }

    fn detach_internet_gateway(
        &self,
        gateway_id: &str,
        vpc_id: &str,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        let gateway_id = gateway_id.to_string();
        let vpc_id = vpc_id.to_string();
        Box::pin(async move {
            log::debug!("DetachInternetGateway {} {}", gateway_id, vpc_id);
            self.client
                .detach_internet_gateway()
                .internet_gateway_id(&gateway_id)
                .vpc_id(&vpc_id)
                .send()
                .await
                .map_err(|e| sdk_error("DetachInternetGateway", e))?;
            Ok(())
        })
    }

    fn associate_route_table(
        &self,
        subnet_id: &str,
        route_table_id: &str,
    ) -> BoxFuture<'_, ProviderResult<String>> {
        let subnet_id = subnet_id.to_string();
        let route_table_id = route_table_id.to_string();
        Box::pin(async move {
            log::debug!("AssociateRouteTable {} {}", subnet_id, route_table_id);
            let output = self
                .client
                .associate_route_table()
                .subnet_id(&subnet_id)
                .route_table_id(&route_table_id)
                .send()
                .await
                .map_err(|e| sdk_error("AssociateRouteTable", e))?;
            output
                .association_id()
                .map(str::to_string)
                .ok_or_else(|| ProviderError::new("Route table associated but no ID returned"))
        })
    }

    fn disassociate_route_table(
        &self,
        association_id: &str,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        let association_id = association_id.to_string();
        Box::pin(async move {
            log::debug!("DisassociateRouteTable {}", association_id);
            self.client
                .disassociate_route_table()
                .association_id(&association_id)
                .send()
                .await
                .map_err(|e| sdk_error("DisassociateRouteTable", e))?;
            Ok(())
        })
    }

    fn create_route(
        &self,
        route_table_id: &str,
        destination_cidr_block: &str,
        gateway_id: &str,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        let route_table_id = route_table_id.to_string();
        let destination = destination_cidr_block.to_string();
        let target = gateway_id.to_string();
        Box::pin(async move {
            log::debug!("CreateRoute {} {} -> {}", route_table_id, destination, target);
            let request = self
                .client
                .create_route()
                .route_table_id(&route_table_id)
                .destination_cidr_block(&destination);
            // NAT gateways have their own target field
            let request = if target.starts_with("nat-") {
                request.nat_gateway_id(&target)
            } else {
                request.gateway_id(&target)
            };
            request
                .send()
                .await
                .map_err(|e| sdk_error("CreateRoute", e))?;
            Ok(())
        })
    }

    fn delete_route(
        &self,
        route_table_id: &str,
        destination_cidr_block: &str,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        let route_table_id = route_table_id.to_string();
        let destination = destination_cidr_block.to_string();
        Box::pin(async move {
            log::debug!("DeleteRoute {} {}", route_table_id, destination);
            self.client
                .delete_route()
                .route_table_id(&route_table_id)
                .destination_cidr_block(&destination)
                .send()
                .await
                .map_err(|e| sdk_error("DeleteRoute", e))?;
            Ok(())
        })
    }

    fn set_map_public_ip_on_launch(
        &self,
        subnet_id: &str,
        enabled: bool,
    ) -> BoxFuture<'_, ProviderResult<()>> {
        let subnet_id = subnet_id.to_string();
        Box::pin(async move {
            log::debug!("ModifySubnetAttribute {} MapPublicIpOnLaunch={}", subnet_id, enabled);
            self.client
                .modify_subnet_attribute()
                .subnet_id(&subnet_id)
                .map_public_ip_on_launch(AttributeBooleanValue::builder().value(enabled).build())
                .send()
                .await
                .map_err(|e| sdk_error("ModifySubnetAttribute", e))?;
            Ok(())
        })
    }

    fn delete_vpc(&self, vpc_id: &str) -> BoxFuture<'_, ProviderResult<()>> {
        let vpc_id = vpc_id.to_string();
        Box::pin(async move {
            log::debug!("DeleteVpc {}", vpc_id);
            self.client
                .delete_vpc()
                .vpc_id(&vpc_id)
                .send()
                .await
                .map_err(|e| sdk_error("DeleteVpc", e))?;
            Ok(())
        })
    }

    fn delete_subnet(&self, subnet_id: &str) -> BoxFuture<'_, ProviderResult<()>> {
        let subnet_id = subnet_id.to_string();
        Box::pin(async move {
            log::debug!("DeleteSubnet {}", subnet_id);
            self.client
                .delete_subnet()
                .subnet_id(&subnet_id)
                .send()
                .await
                .map_err(|e| sdk_error("DeleteSubnet", e))?;
            Ok(())
        })
    }

    fn delete_route_table(&self, route_table_id: &str) -> BoxFuture<'_, ProviderResult<()>> {
        let route_table_id = route_table_id.to_string();
        Box::pin(async move {
            log::debug!("DeleteRouteTable {}", route_table_id);
            self.client
                .delete_route_table()
                .route_table_id(&route_table_id)
                .send()
                .await
                .map_err(|e| sdk_error("DeleteRouteTable", e))?;
            Ok(())
        })
    }

    fn delete_internet_gateway(&self, gateway_id: &str) -> BoxFuture<'_, ProviderResult<()>> {
        let gateway_id = gateway_id.to_string();
        Box::pin(async move {
            log::debug!("DeleteInternetGateway {}", gateway_id);
            self.client
                .delete_internet_gateway()
                .internet_gateway_id(&gateway_id)
                .send()
                .await
                .map_err(|e| sdk_error("DeleteInternetGateway", e))?;
            Ok(())
        })
    }

    fn delete_security_group(&self, group_id: &str) -> BoxFuture<'_, ProviderResult<()>> {
        let group_id = group_id.to_string();
        Box::pin(async move {
            log::debug!("DeleteSecurityGroup {}", group_id);
            self.client
                .delete_security_group()
                .group_id(&group_id)
                .send()
                .await
                .map_err(|e| sdk_error("DeleteSecurityGroup", e))?;
            Ok(())
        })
    }

    fn delete_nat_gateway(&self, nat_gateway_id: &str) -> BoxFuture<'_, ProviderResult<()>> {
        let nat_gateway_id = nat_gateway_id.to_string();
        Box::pin(async move {
            log::debug!("DeleteNatGateway {}", nat_gateway_id);
            self.client
                .delete_nat_gateway()
                .nat_gateway_id(&nat_gateway_id)
                .send()
                .await
                .map_err(|e| sdk_error("DeleteNatGateway", e))?;
            Ok(())
        })
    }
}
