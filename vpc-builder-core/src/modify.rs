//! Modification workflow - Point edits to existing resources

use crate::console::{choose_from, optional_text};
use crate::create::Creator;
use crate::error::{FlowError, FlowResult, ProviderContext};
use crate::provider::Filter;
use crate::resource::{DEFAULT_ROUTE_CIDR, ResourceKind, Tag};
use crate::session::Session;
use crate::validation::{ValidationError, parse_cidr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Subnet,
    RouteTable,
    AttachGateway,
    Vpc,
}

const MODIFY_MENU: &[(Target, &str)] = &[
    (Target::Subnet, "Subnet"),
    (Target::RouteTable, "Route Table"),
    (Target::AttachGateway, "Attach IGW to Route Table"),
    (Target::Vpc, "VPC"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubnetAction {
    AddSubnets,
    Rename,
    AutoAssignPublicIp,
    Associate,
}

const SUBNET_MENU: &[(SubnetAction, &str)] = &[
    (SubnetAction::AddSubnets, "Add Subnet(s)"),
    (SubnetAction::Rename, "Rename"),
    (SubnetAction::AutoAssignPublicIp, "Auto-assign Public IP"),
    (SubnetAction::Associate, "Associate with Route Table"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteTableAction {
    AddRoute,
    DeleteRoute,
    Rename,
}

const ROUTE_TABLE_MENU: &[(RouteTableAction, &str)] = &[
    (RouteTableAction::AddRoute, "Add Route"),
    (RouteTableAction::DeleteRoute, "Delete Route"),
    (RouteTableAction::Rename, "Rename"),
];

pub struct Modifier<'a> {
    session: Session<'a>,
}

impl<'a> Modifier<'a> {
    pub fn new(session: Session<'a>) -> Self {
        Self { session }
    }

    /// The "Modify" menu entry
    pub async fn run(&self) {
        let s = &self.session;
        s.reporter
            .info(&format!("Selected AWS Region: {}", s.provider.region()));

        if let Some(target) = choose_from(s.prompter, "Select a resource to modify:", MODIFY_MENU) {
            let result = match target {
                Target::Subnet => self.modify_subnet().await,
                Target::RouteTable => self.modify_route_table().await,
                Target::AttachGateway => self.attach_gateway_route().await,
                Target::Vpc => self.modify_vpc().await,
            };
            s.finish(result);
        }

        s.reporter.info("Returning to main menu...");
    }

    async fn pick_vpc(&self) -> FlowResult<String> {
        self.session
            .selector()
            .choose_vpc()
            .await
            .ok_or(FlowError::Cancelled)
    }

    async fn pick(&self, kind: ResourceKind, vpc_id: &str) -> FlowResult<String> {
        self.session
            .selector()
            .choose_id(kind, Some(vpc_id))
            .await
            .ok_or(FlowError::Cancelled)
    }

    async fn modify_subnet(&self) -> FlowResult<()> {
        let s = &self.session;
        s.reporter.info("Modify Subnet");
        let vpc_id = self.pick_vpc().await?;

        let action = choose_from(s.prompter, "Choose subnet action:", SUBNET_MENU)
            .ok_or(FlowError::Cancelled)?;
        match action {
            SubnetAction::AddSubnets => {
                Creator::new(*s).create_subnets(&vpc_id).await?;
            }
            SubnetAction::Rename => {
                let subnet_id = self.pick(ResourceKind::Subnet, &vpc_id).await?;
                self.rename(ResourceKind::Subnet, &subnet_id).await?;
            }
            SubnetAction::AutoAssignPublicIp => {
                let subnet_id = self.pick(ResourceKind::Subnet, &vpc_id).await?;
                let enabled = choose_from(
                    s.prompter,
                    "Auto-assign public IPv4 address on launch:",
                    &[(true, "Enable"), (false, "Disable")],
                )
                .ok_or(FlowError::Cancelled)?;
                self.set_auto_assign_public_ip(&subnet_id, enabled).await?;
            }
            SubnetAction::Associate => {
                self.reassociate(&vpc_id).await?;
            }
        }
        Ok(())
    }

    async fn modify_route_table(&self) -> FlowResult<()> {
        let s = &self.session;
        s.reporter.info("Modify Route Table");
        let vpc_id = self.pick_vpc().await?;
        let table_id = self.pick(ResourceKind::RouteTable, &vpc_id).await?;

        let action = choose_from(s.prompter, "Select route table action:", ROUTE_TABLE_MENU)
            .ok_or(FlowError::Cancelled)?;
        match action {
            RouteTableAction::AddRoute => self.add_route(&table_id).await,
            RouteTableAction::DeleteRoute => self.delete_route(&table_id).await,
            RouteTableAction::Rename => self.rename(ResourceKind::RouteTable, &table_id).await,
        }
    }

    async fn modify_vpc(&self) -> FlowResult<()> {
        let vpc_id = self.pick_vpc().await?;
        self.rename(ResourceKind::Vpc, &vpc_id).await
    }

    async fn attach_gateway_route(&self) -> FlowResult<()> {
        self.session.reporter.info("Attach IGW to Route Table");
        let vpc_id = self.pick_vpc().await?;
        let table_id = self.pick(ResourceKind::RouteTable, &vpc_id).await?;
        let gateway_id = self.pick(ResourceKind::InternetGateway, &vpc_id).await?;
        self.add_default_route(&table_id, &gateway_id).await
    }

    /// Apply or overwrite the `Name` tag
    pub async fn rename(&self, kind: ResourceKind, id: &str) -> FlowResult<()> {
        let s = &self.session;
        let name = optional_text(s.prompter, "Enter new name:")
            .ok_or(ValidationError::Required("Name"))?;

        s.provider
            .create_tags(id, &[Tag::name(name.as_str())])
            .await
            .context(format!("Failed to rename {} {}", kind.singular(), id))?;

        s.reporter
            .success(&format!("{} {} renamed to {}", kind.singular(), id, name));
        Ok(())
    }

    pub async fn set_auto_assign_public_ip(&self, subnet_id: &str, enabled: bool) -> FlowResult<()> {
        let s = &self.session;
        s.provider
            .set_map_public_ip_on_launch(subnet_id, enabled)
            .await
            .context(format!("Failed to update subnet {}", subnet_id))?;

        let state = if enabled { "enabled" } else { "disabled" };
        s.reporter.success(&format!(
            "Auto-assign Public IP {} for {}.",
            state, subnet_id
        ));
        Ok(())
    }

    /// Point a subnet at a different route table.
    ///
    /// An existing explicit association is only removed after the operator
    /// confirms the replacement and has picked the new table; it is always
    /// disassociated before the new association is made.
    pub async fn reassociate(&self, vpc_id: &str) -> FlowResult<String> {
        let s = &self.session;
        s.reporter.info("Associate Subnet with Route Table");

        let subnet_id = self.pick(ResourceKind::Subnet, vpc_id).await?;

        let current = s
            .provider
            .describe_route_tables(Some(&Filter::associated_subnet(&subnet_id)))
            .await
            .context("Failed to check current association")?
            .into_iter()
            .find_map(|table| table.association_for_subnet(&subnet_id).cloned());

        if let Some(association) = &current {
            s.reporter.info(&format!(
                "Subnet is currently associated with Route Table: {}",
                association.route_table_id
            ));
            if !s.prompter.confirm("Do you want to replace the association?") {
                return Err(FlowError::declined("Operation cancelled."));
            }
        }

        let table_id = self.pick(ResourceKind::RouteTable, vpc_id).await?;

        if let Some(association) = current {
            if association.route_table_id == table_id {
                s.reporter.info(&format!(
                    "Subnet {} is already associated with Route Table {}.",
                    subnet_id, table_id
                ));
                return Ok(association.id);
            }
            s.provider
                .disassociate_route_table(&association.id)
                .await
                .context("Failed to disassociate")?;
            log::info!("disassociated {} from {}", association.id, subnet_id);
        }

        let association_id = s
            .provider
            .associate_route_table(&subnet_id, &table_id)
            .await
            .context("Association failed")?;

        s.reporter.success(&format!(
            "Subnet {} is now associated with Route Table {}.",
            subnet_id, table_id
        ));
        Ok(association_id)
    }

    pub async fn add_route(&self, table_id: &str) -> FlowResult<()> {
        let s = &self.session;
        let destination = optional_text(s.prompter, "Destination CIDR:")
            .ok_or(ValidationError::Required("Destination CIDR"))?;
        let destination = parse_cidr(&destination)?.to_string();
        let target = optional_text(s.prompter, "Target (e.g. igw-xxx):")
            .ok_or(ValidationError::Required("Target"))?;

        s.provider
            .create_route(table_id, &destination, &target)
            .await
            .context("Route Table update failed")?;

        s.reporter.success(&format!(
            "Route {} -> {} added to {}.",
            destination, target, table_id
        ));
        Ok(())
    }

    pub async fn delete_route(&self, table_id: &str) -> FlowResult<()> {
        let s = &self.session;
        let destination = optional_text(s.prompter, "CIDR to delete:")
            .ok_or(ValidationError::Required("CIDR"))?;
        let destination = parse_cidr(&destination)?.to_string();

        s.provider
            .delete_route(table_id, &destination)
            .await
            .context("Route Table update failed")?;

        s.reporter
            .success(&format!("Route {} deleted from {}.", destination, table_id));
        Ok(())
    }

    /// Route all non-local traffic from `table_id` through `gateway_id`
    pub async fn add_default_route(&self, table_id: &str, gateway_id: &str) -> FlowResult<()> {
        let s = &self.session;
        s.provider
            .create_route(table_id, DEFAULT_ROUTE_CIDR, gateway_id)
            .await
            .context("Attach IGW failed")?;

        s.reporter.success(&format!(
            "IGW {} attached to Route Table {} as the default route.",
            gateway_id, table_id
        ));
        Ok(())
    }
}
