//! Conversion between EC2 SDK shapes and core descriptors

use aws_sdk_ec2::types as ec2;
use vpc_builder_core::provider::Filter;
use vpc_builder_core::resource::{
    GatewayAttachment, InternetGateway, NatGateway, Route, RouteTable, RouteTableAssociation,
    SecurityGroup, Subnet, Tag, Vpc,
};

fn owned(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

pub fn tags(tags: &[ec2::Tag]) -> Vec<Tag> {
    tags.iter()
        .map(|t| Tag::new(owned(t.key()), owned(t.value())))
        .collect()
}

pub fn sdk_tags(tags: &[Tag]) -> Vec<ec2::Tag> {
    tags.iter()
        .map(|t| ec2::Tag::builder().key(&t.key).value(&t.value).build())
        .collect()
}

/// `None` lists everything
pub fn sdk_filters(filter: Option<&Filter>) -> Option<Vec<ec2::Filter>> {
    filter.map(|f| {
        vec![
            ec2::Filter::builder()
                .name(&f.name)
                .set_values(Some(f.values.clone()))
                .build(),
        ]
    })
}

pub fn vpc(v: &ec2::Vpc) -> Vpc {
    Vpc {
        id: owned(v.vpc_id()),
        cidr_block: owned(v.cidr_block()),
        tags: tags(v.tags()),
    }
}

pub fn subnet(s: &ec2::Subnet) -> Subnet {
    Subnet {
        id: owned(s.subnet_id()),
        vpc_id: owned(s.vpc_id()),
        cidr_block: owned(s.cidr_block()),
        map_public_ip_on_launch: s.map_public_ip_on_launch().unwrap_or(false),
        tags: tags(s.tags()),
    }
}

fn route(r: &ec2::Route) -> Route {
    let target = r
        .gateway_id()
        .or(r.nat_gateway_id())
        .or(r.transit_gateway_id())
        .or(r.vpc_peering_connection_id())
        .or(r.network_interface_id())
        .map(str::to_string);
    Route {
        destination_cidr_block: owned(r.destination_cidr_block()),
        target,
    }
}

fn association(a: &ec2::RouteTableAssociation) -> RouteTableAssociation {
    RouteTableAssociation {
        id: owned(a.route_table_association_id()),
        route_table_id: owned(a.route_table_id()),
        subnet_id: a.subnet_id().map(str::to_string),
        main: a.main().unwrap_or(false),
    }
}

pub fn route_table(t: &ec2::RouteTable) -> RouteTable {
    RouteTable {
        id: owned(t.route_table_id()),
        vpc_id: owned(t.vpc_id()),
        routes: t.routes().iter().map(route).collect(),
        associations: t.associations().iter().map(association).collect(),
        tags: tags(t.tags()),
    }
}

pub fn internet_gateway(g: &ec2::InternetGateway) -> InternetGateway {
    InternetGateway {
        id: owned(g.internet_gateway_id()),
        attachments: g
            .attachments()
            .iter()
            .map(|a| GatewayAttachment {
                vpc_id: owned(a.vpc_id()),
                state: a
                    .state()
                    .map(|s| s.as_str().to_string())
                    .unwrap_or_default(),
            })
            .collect(),
        tags: tags(g.tags()),
    }
}

pub fn security_group(g: &ec2::SecurityGroup) -> SecurityGroup {
    SecurityGroup {
        id: owned(g.group_id()),
        vpc_id: owned(g.vpc_id()),
        name: owned(g.group_name()),
        description: owned(g.description()),
        tags: tags(g.tags()),
    }
}

pub fn nat_gateway(n: &ec2::NatGateway) -> NatGateway {
    NatGateway {
        id: owned(n.nat_gateway_id()),
        vpc_id: owned(n.vpc_id()),
        subnet_id: owned(n.subnet_id()),
        allocation_id: n
            .nat_gateway_addresses()
            .first()
            .and_then(|a| a.allocation_id())
            .map(str::to_string),
        state: n
            .state()
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
        tags: tags(n.tags()),
    }
}
