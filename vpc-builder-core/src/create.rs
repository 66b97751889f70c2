//! Creation workflow
//!
//! Each resource kind is a linear flow: prompt, validate, confirm, create,
//! tag, report. Only CIDR input loops; everything else abandons the flow.

use crate::console::{choose_from, optional_text, trimmed_text};
use crate::error::{FlowError, FlowResult, ProviderContext};
use crate::resource::{Classification, ResourceKind, Tag};
use crate::session::Session;
use crate::validation::{
    BatchSplit, ValidationError, needs_explicit_split, parse_cidr, parse_count,
    parse_positive_count, plan_subnet_batch,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateTarget {
    Vpc,
    InternetGateway,
    Subnet,
    RouteTable,
    NatGateway,
    SecurityGroup,
    Exit,
}

const CREATE_MENU: &[(CreateTarget, &str)] = &[
    (CreateTarget::Vpc, "VPC"),
    (CreateTarget::InternetGateway, "Internet Gateway"),
    (CreateTarget::Subnet, "Subnet"),
    (CreateTarget::RouteTable, "Route Table"),
    (CreateTarget::NatGateway, "NAT Gateway"),
    (CreateTarget::SecurityGroup, "Security Group"),
    (CreateTarget::Exit, "Exit"),
];

const DEFAULT_SECURITY_GROUP_DESCRIPTION: &str = "Managed by vpc-builder";

/// `" 'name'"` when a name was given, empty otherwise
fn quoted(name: Option<&str>) -> String {
    name.map(|n| format!(" '{}'", n)).unwrap_or_default()
}

pub struct Creator<'a> {
    session: Session<'a>,
}

impl<'a> Creator<'a> {
    pub fn new(session: Session<'a>) -> Self {
        Self { session }
    }

    /// The "Create" menu entry
    pub async fn run(&self) {
        let s = &self.session;
        s.reporter
            .info(&format!("Selected AWS Region: {}", s.provider.region()));

        let target = choose_from(s.prompter, "Which resource do you want to create?", CREATE_MENU)
            .unwrap_or(CreateTarget::Exit);

        let result = match target {
            CreateTarget::Exit => {
                s.reporter.info("Create flow exited.");
                return;
            }
            CreateTarget::Vpc => self.create_vpc().await.map(drop),
            target => {
                let Some(vpc_id) = s.selector().choose_vpc().await else {
                    return;
                };
                match target {
                    CreateTarget::InternetGateway => {
                        self.create_internet_gateway(&vpc_id).await.map(drop)
                    }
                    CreateTarget::Subnet => self.create_subnets(&vpc_id).await.map(drop),
                    CreateTarget::RouteTable => self.create_route_tables(&vpc_id).await.map(drop),
                    CreateTarget::NatGateway => self.create_nat_gateway(&vpc_id).await.map(drop),
                    CreateTarget::SecurityGroup => {
                        self.create_security_group(&vpc_id).await.map(drop)
                    }
                    CreateTarget::Vpc | CreateTarget::Exit => Ok(()),
                }
            }
        };
        s.finish(result);
    }

    /// Prompt until the input is a valid IPv4 network; cancel abandons
    fn prompt_cidr(&self, prompt: &str) -> FlowResult<String> {
        let s = &self.session;
        loop {
            let input = trimmed_text(s.prompter, prompt).ok_or(FlowError::Cancelled)?;
            match parse_cidr(&input) {
                Ok(net) => return Ok(net.to_string()),
                Err(e) => s.reporter.failure(&format!("{}. Try again.", e)),
            }
        }
    }

    fn prompt_count(
        &self,
        prompt: &str,
        parse: fn(&str) -> Result<usize, ValidationError>,
    ) -> FlowResult<usize> {
        let input = self
            .session
            .prompter
            .text(prompt)
            .ok_or(FlowError::Cancelled)?;
        Ok(parse(&input)?)
    }

    pub async fn create_vpc(&self) -> FlowResult<String> {
        let s = &self.session;
        s.reporter.info("Starting VPC creation...");

        let name = optional_text(s.prompter, "Enter a name for your VPC (optional):");
        let cidr = self.prompt_cidr("Enter CIDR block for VPC (e.g., 10.0.0.0/16):")?;

        if !s.prompter.confirm(&format!(
            "Create VPC{} with CIDR {}?",
            quoted(name.as_deref()),
            cidr
        )) {
            return Err(FlowError::declined("VPC creation cancelled."));
        }

        let vpc = s
            .provider
            .create_vpc(&cidr)
            .await
            .context("Error during VPC creation")?;
        log::info!("created {} ({})", vpc.id, cidr);

        if let Some(name) = name {
            s.provider
                .create_tags(&vpc.id, &[Tag::name(name)])
                .await
                .context(format!("VPC {} created but tagging failed", vpc.id))?;
        }

        s.reporter
            .success(&format!("VPC created successfully! VPC ID: {}", vpc.id));
        Ok(vpc.id)
    }

    pub async fn create_internet_gateway(&self, vpc_id: &str) -> FlowResult<String> {
        let s = &self.session;
        if !s.prompter.confirm(&format!(
            "Create and attach an Internet Gateway to VPC {}?",
            vpc_id
        )) {
            return Err(FlowError::declined("Internet Gateway creation cancelled."));
        }

        let name = optional_text(
            s.prompter,
            "Enter a name for the Internet Gateway (optional):",
        );

        let gateway = s
            .provider
            .create_internet_gateway()
            .await
            .context("Error during Internet Gateway creation")?;

        if let Some(name) = &name {
            s.provider
                .create_tags(&gateway.id, &[Tag::name(name.as_str())])
                .await
                .context(format!("Internet Gateway {} created but tagging failed", gateway.id))?;
        }

        s.provider
            .attach_internet_gateway(&gateway.id, vpc_id)
            .await
            .context(format!(
                "Internet Gateway {} created but could not be attached to {}",
                gateway.id, vpc_id
            ))?;

        s.reporter.success(&format!(
            "Internet Gateway '{}' created and attached to VPC {}!",
            name.as_deref().unwrap_or(&gateway.id),
            vpc_id
        ));
        Ok(gateway.id)
    }

    /// Ask for the batch size and its public/private split
    fn plan_batch(&self) -> FlowResult<Vec<Classification>> {
        let total = self.prompt_count(
            "How many subnets do you want to create?",
            parse_positive_count,
        )?;

        let split = if needs_explicit_split(total) {
            let public = self.prompt_count("How many public subnets?", parse_count)?;
            let private = self.prompt_count("How many private subnets?", parse_count)?;
            BatchSplit::Explicit { public, private }
        } else {
            BatchSplit::Pair
        };

        Ok(plan_subnet_batch(total, split)?)
    }

    /// Create a batch of subnets, each configured and confirmed on its own.
    ///
    /// A declined or failed subnet is reported and the batch moves on; a
    /// cancelled prompt ends the batch.
    pub async fn create_subnets(&self, vpc_id: &str) -> FlowResult<Vec<String>> {
        let s = &self.session;
        s.reporter
            .info(&format!("Creating Subnet(s) inside VPC {}", vpc_id));

        let plan = self.plan_batch()?;

        let mut created = Vec::new();
        for (index, class) in plan.into_iter().enumerate() {
            match self.create_subnet(vpc_id, index + 1, class).await {
                Ok(id) => created.push(id),
                Err(FlowError::Cancelled) => break,
                Err(e) => e.report(s.reporter),
            }
        }
        log::info!("created {} subnet(s) in {}", created.len(), vpc_id);
        Ok(created)
    }

    async fn create_subnet(
        &self,
        vpc_id: &str,
        index: usize,
        class: Classification,
    ) -> FlowResult<String> {
        let s = &self.session;
        s.reporter.info(&format!(
            "Configuring {} Subnet #{}",
            class.as_str().to_uppercase(),
            index
        ));

        let cidr = self.prompt_cidr(&format!(
            "Enter CIDR block for {} Subnet #{} (e.g., 10.0.{}.0/24):",
            class, index, index
        ))?;
        let name = optional_text(
            s.prompter,
            &format!("Enter a name for the {} Subnet #{} (optional):", class, index),
        );

        if !s.prompter.confirm(&format!(
            "Create {} Subnet{} with CIDR {}?",
            class,
            quoted(name.as_deref()),
            cidr
        )) {
            return Err(FlowError::declined("Subnet creation skipped by user."));
        }

        let subnet = s
            .provider
            .create_subnet(vpc_id, &cidr)
            .await
            .context(format!("Error creating {} Subnet", class))?;

        let mut tags = Vec::with_capacity(2);
        if let Some(name) = name {
            tags.push(Tag::name(name));
        }
        tags.push(class.tag());
        s.provider
            .create_tags(&subnet.id, &tags)
            .await
            .context(format!("Subnet {} created but tagging failed", subnet.id))?;

        s.reporter.success(&format!(
            "{} Subnet created! Subnet ID: {}",
            class.title(),
            subnet.id
        ));
        Ok(subnet.id)
    }

    /// Create a batch of route tables tagged with their intended use
    pub async fn create_route_tables(&self, vpc_id: &str) -> FlowResult<Vec<String>> {
        let s = &self.session;
        s.reporter
            .info(&format!("Creating Route Table(s) inside VPC {}", vpc_id));

        let total = self.prompt_count(
            "How many Route Tables do you want to create?",
            parse_positive_count,
        )?;

        let mut created = Vec::new();
        for index in 1..=total {
            match self.create_route_table(vpc_id, index).await {
                Ok(id) => created.push(id),
                Err(FlowError::Cancelled) => break,
                Err(e) => e.report(s.reporter),
            }
        }
        Ok(created)
    }

    async fn create_route_table(&self, vpc_id: &str, index: usize) -> FlowResult<String> {
        let s = &self.session;
        let choices = Classification::ALL.map(|c| (c, c.as_str()));
        let class = choose_from(
            s.prompter,
            &format!("Is Route Table #{} for Public or Private subnet?", index),
            &choices,
        )
        .ok_or(FlowError::Cancelled)?;

        let name = optional_text(
            s.prompter,
            &format!("Enter a name for {} Route Table #{} (optional):", class, index),
        );

        if !s.prompter.confirm(&format!(
            "Create {} Route Table{}?",
            class,
            quoted(name.as_deref())
        )) {
            return Err(FlowError::declined("Route Table creation skipped by user."));
        }

        let table = s
            .provider
            .create_route_table(vpc_id)
            .await
            .context("Error during Route Table creation")?;

        let mut tags = vec![class.tag()];
        if let Some(name) = name {
            tags.push(Tag::name(name));
        }
        s.provider
            .create_tags(&table.id, &tags)
            .await
            .context(format!("Route Table {} created but tagging failed", table.id))?;

        s.reporter.success(&format!(
            "{} Route Table created! ID: {}",
            class.title(),
            table.id
        ));
        Ok(table.id)
    }

    /// Allocate an address and start a NAT gateway; provisioning is not awaited
    pub async fn create_nat_gateway(&self, vpc_id: &str) -> FlowResult<String> {
        let s = &self.session;
        s.reporter
            .info(&format!("Creating NAT Gateway inside VPC {}", vpc_id));

        let subnet_id = s
            .selector()
            .choose_id(ResourceKind::Subnet, Some(vpc_id))
            .await
            .ok_or(FlowError::Cancelled)?;

        if !s.prompter.confirm(&format!(
            "Create NAT Gateway in subnet {}? Note: This incurs AWS costs.",
            subnet_id
        )) {
            return Err(FlowError::declined("NAT Gateway creation cancelled."));
        }

        let allocation_id = s
            .provider
            .allocate_address()
            .await
            .context("Error allocating Elastic IP for NAT Gateway")?;
        log::debug!("allocated {} for NAT gateway", allocation_id);

        let gateway = s
            .provider
            .create_nat_gateway(&subnet_id, &allocation_id)
            .await
            .context("Error during NAT Gateway creation")?;

        s.reporter.success(&format!(
            "NAT Gateway created successfully! ID: {}",
            gateway.id
        ));
        Ok(gateway.id)
    }

    pub async fn create_security_group(&self, vpc_id: &str) -> FlowResult<String> {
        let s = &self.session;
        s.reporter
            .info(&format!("Creating Security Group inside VPC {}", vpc_id));

        let name = optional_text(s.prompter, "Enter Security Group name:")
            .ok_or(ValidationError::Required("Security Group name"))?;
        let description =
            optional_text(s.prompter, "Enter description for the Security Group:")
                .unwrap_or_else(|| DEFAULT_SECURITY_GROUP_DESCRIPTION.to_string());

        if !s.prompter.confirm(&format!(
            "Create Security Group '{}' in VPC {}?",
            name, vpc_id
        )) {
            return Err(FlowError::declined("Security Group creation cancelled."));
        }

        let group_id = s
            .provider
            .create_security_group(vpc_id, &name, &description)
            .await
            .context("Error during Security Group creation")?;

        s.reporter.success(&format!(
            "Security Group created successfully! ID: {}",
            group_id
        ));
        Ok(group_id)
    }
}
