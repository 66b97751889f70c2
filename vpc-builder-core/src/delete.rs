//! Deletion workflow - Dependency-aware teardown of a VPC
//!
//! Whole-VPC teardown runs a fixed pipeline:
//!
//! 1. subnets (operator-selected)
//! 2. non-main route tables (operator-selected), disassociated first
//! 3. internet gateways, detached first
//! 4. security groups except `default`
//! 5. the VPC itself
//!
//! Every stage is best-effort. A failed item is reported and the pipeline
//! moves on; nothing is rolled back, so a partial teardown is re-run to
//! finish it.

use std::fmt;

use crate::console::choose_from;
use crate::error::{FlowError, FlowResult};
use crate::provider::{Filter, NetworkProvider, ProviderResult};
use crate::resource::{
    ResourceKind, RouteTable, SecurityGroup, label_for, name_from_tags,
};
use crate::session::Session;

/// Result of detaching an internet gateway from a VPC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetachOutcome {
    Detached,
    /// The gateway was not attached; treated as success
    AlreadyDetached,
}

/// Detach `gateway_id` from `vpc_id`, folding "not attached" into success
pub async fn detach_gateway(
    provider: &dyn NetworkProvider,
    gateway_id: &str,
    vpc_id: &str,
) -> ProviderResult<DetachOutcome> {
    match provider.detach_internet_gateway(gateway_id, vpc_id).await {
        Ok(()) => Ok(DetachOutcome::Detached),
        Err(e) if e.is_not_attached() => {
            log::info!("{} was not attached to {}", gateway_id, vpc_id);
            Ok(DetachOutcome::AlreadyDetached)
        }
        Err(e) => Err(e),
    }
}

/// Route tables eligible for deletion: any table holding a main
/// association is excluded.
pub fn deletable_route_tables(tables: Vec<RouteTable>) -> Vec<RouteTable> {
    tables.into_iter().filter(|t| !t.is_main()).collect()
}

/// Split security groups into (deletable, protected); `default` is protected
pub fn partition_security_groups(
    groups: Vec<SecurityGroup>,
) -> (Vec<SecurityGroup>, Vec<SecurityGroup>) {
    groups.into_iter().partition(|g| !g.is_default())
}

/// Per-stage outcome, by resource id
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub deleted: Vec<String>,
    pub failed: Vec<String>,
    pub skipped: Vec<String>,
}

impl StageReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TeardownReport {
    pub subnets: StageReport,
    pub route_tables: StageReport,
    pub internet_gateways: StageReport,
    pub security_groups: StageReport,
    pub vpc: StageReport,
}

impl TeardownReport {
    fn stages(&self) -> [&StageReport; 5] {
        [
            &self.subnets,
            &self.route_tables,
            &self.internet_gateways,
            &self.security_groups,
            &self.vpc,
        ]
    }

    pub fn deleted(&self) -> usize {
        self.stages().iter().map(|s| s.deleted.len()).sum()
    }

    pub fn failed(&self) -> usize {
        self.stages().iter().map(|s| s.failed.len()).sum()
    }

    pub fn skipped(&self) -> usize {
        self.stages().iter().map(|s| s.skipped.len()).sum()
    }

    pub fn vpc_deleted(&self) -> bool {
        !self.vpc.deleted.is_empty()
    }
}

impl fmt::Display for TeardownReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} deleted, {} failed, {} skipped",
            self.deleted(),
            self.failed(),
            self.skipped()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    EntireVpc,
    Specific,
}

const SCOPE_MENU: &[(Scope, &str)] = &[
    (Scope::EntireVpc, "Entire VPC"),
    (Scope::Specific, "Specific Resources"),
];

const KIND_MENU: &[(ResourceKind, &str)] = &[
    (ResourceKind::Subnet, "Subnets"),
    (ResourceKind::RouteTable, "Route Tables"),
    (ResourceKind::InternetGateway, "Internet Gateways"),
    (ResourceKind::SecurityGroup, "Security Groups"),
    (ResourceKind::NatGateway, "NAT Gateways"),
];

pub struct Deleter<'a> {
    session: Session<'a>,
}

impl<'a> Deleter<'a> {
    pub fn new(session: Session<'a>) -> Self {
        Self { session }
    }

    /// The "Delete" menu entry
    pub async fn run(&self) {
        let s = &self.session;
        s.reporter.info("Delete AWS Resources");

        let Some(scope) = choose_from(s.prompter, "What would you like to delete?", SCOPE_MENU)
        else {
            return;
        };
        let Some(vpc_id) = s.selector().choose_vpc().await else {
            return;
        };

        match scope {
            Scope::EntireVpc => {
                let result = self.teardown_vpc(&vpc_id).await;
                s.finish(result);
            }
            Scope::Specific => {
                let Some(kind) =
                    choose_from(s.prompter, "Select the resource type to delete:", KIND_MENU)
                else {
                    return;
                };
                let report = self.delete_kind(kind, &vpc_id).await;
                log::info!(
                    "{} stage in {}: {} deleted, {} failed",
                    kind.plural(),
                    vpc_id,
                    report.deleted.len(),
                    report.failed.len()
                );
            }
        }
    }

    /// Confirm, then tear the whole VPC down
    pub async fn teardown_vpc(&self, vpc_id: &str) -> FlowResult<TeardownReport> {
        let s = &self.session;
        if !s.prompter.confirm(&format!(
            "Are you sure you want to delete VPC {} and all its associated resources?",
            vpc_id
        )) {
            return Err(FlowError::declined("Deletion cancelled."));
        }
        Ok(self.teardown(vpc_id).await)
    }

    /// Run every stage in order, then attempt the VPC regardless of earlier
    /// failures
    pub async fn teardown(&self, vpc_id: &str) -> TeardownReport {
        let s = &self.session;
        let mut report = TeardownReport {
            subnets: self.delete_subnets(vpc_id).await,
            route_tables: self.delete_route_tables(vpc_id).await,
            internet_gateways: self.delete_internet_gateways(vpc_id).await,
            security_groups: self.delete_security_groups(vpc_id).await,
            ..Default::default()
        };
        report.vpc = self.delete_vpc(vpc_id).await;

        if report.vpc_deleted() && report.stages().iter().all(|stage| stage.is_clean()) {
            s.reporter.success(&format!(
                "VPC {} and all related resources deleted successfully.",
                vpc_id
            ));
        } else {
            s.reporter
                .warning(&format!("Teardown of VPC {} finished: {}", vpc_id, report));
        }
        report
    }

    /// Single-kind teardown inside `vpc_id`
    pub async fn delete_kind(&self, kind: ResourceKind, vpc_id: &str) -> StageReport {
        match kind {
            ResourceKind::Subnet => self.delete_subnets(vpc_id).await,
            ResourceKind::RouteTable => self.delete_route_tables(vpc_id).await,
            ResourceKind::InternetGateway => self.delete_internet_gateways(vpc_id).await,
            ResourceKind::SecurityGroup => self.delete_security_groups(vpc_id).await,
            ResourceKind::NatGateway => self.delete_nat_gateways(vpc_id).await,
            ResourceKind::Vpc => self.delete_vpc(vpc_id).await,
        }
    }

    async fn delete_one(&self, report: &mut StageReport, kind: ResourceKind, id: &str) {
        let s = &self.session;
        log::debug!("deleting {} {}", kind.singular(), id);
        match kind.delete(s.provider, id).await {
            Ok(()) => {
                s.reporter
                    .success(&format!("Deleted {}: {}", kind.singular(), id));
                report.deleted.push(id.to_string());
            }
            Err(e) => {
                log::warn!("delete {} {} failed: {:?}", kind.singular(), id, e);
                let message = match e.kind().hint() {
                    Some(hint) => format!(
                        "Failed to delete {} {}: {} ({})",
                        kind.singular(),
                        id,
                        e,
                        hint
                    ),
                    None => format!("Failed to delete {} {}: {}", kind.singular(), id, e),
                };
                s.reporter.failure(&message);
                report.failed.push(id.to_string());
            }
        }
    }

    async fn delete_vpc(&self, vpc_id: &str) -> StageReport {
        let mut report = StageReport::default();
        self.delete_one(&mut report, ResourceKind::Vpc, vpc_id).await;
        report
    }

    pub async fn delete_subnets(&self, vpc_id: &str) -> StageReport {
        let s = &self.session;
        let mut report = StageReport::default();
        s.reporter.info("Fetching subnets...");

        let subnets = s.lister().subnets(vpc_id).await;
        if subnets.is_empty() {
            s.reporter.info("No subnets found in the VPC.");
            return report;
        }

        let selected = s
            .selector()
            .pick_many("Select subnets to delete:", subnets, |subnet| {
                label_for(&subnet.id, &name_from_tags(&subnet.tags))
            });
        if selected.is_empty() {
            s.reporter.info("No subnets selected for deletion.");
            return report;
        }

        s.reporter.info(&format!(
            "Selected {} subnet(s) for deletion",
            selected.len()
        ));
        for subnet in selected {
            self.delete_one(&mut report, ResourceKind::Subnet, &subnet.id)
                .await;
        }
        report
    }

    pub async fn delete_route_tables(&self, vpc_id: &str) -> StageReport {
        let s = &self.session;
        let mut report = StageReport::default();
        s.reporter.info("Fetching route tables...");

        let tables = s.lister().route_tables(&Filter::vpc(vpc_id)).await;
        for table in tables.iter().filter(|t| t.is_main()) {
            log::info!("skipping main route table {}", table.id);
            report.skipped.push(table.id.clone());
        }
        let candidates = deletable_route_tables(tables);

        if candidates.is_empty() {
            s.reporter.info("No non-main route tables found to delete.");
            return report;
        }

        let selected = s.selector().pick_many(
            "Select route tables to delete (excluding main):",
            candidates,
            |table| label_for(&table.id, &name_from_tags(&table.tags)),
        );
        if selected.is_empty() {
            s.reporter.info("No route tables selected.");
            return report;
        }

        for table in selected {
            for association in table.explicit_associations() {
                match s.provider.disassociate_route_table(&association.id).await {
                    Ok(()) => s
                        .reporter
                        .info(&format!("Disassociated: {}", association.id)),
                    Err(e) => s.reporter.failure(&format!(
                        "Failed to disassociate {}: {}",
                        association.id, e
                    )),
                }
            }
            self.delete_one(&mut report, ResourceKind::RouteTable, &table.id)
                .await;
        }
        report
    }

    pub async fn delete_internet_gateways(&self, vpc_id: &str) -> StageReport {
        let s = &self.session;
        let mut report = StageReport::default();
        s.reporter.info("Deleting Internet Gateways...");

        let gateways = s.lister().internet_gateways(vpc_id).await;
        if gateways.is_empty() {
            s.reporter.info("No internet gateways found.");
            return report;
        }

        for gateway in gateways {
            if let Err(e) = detach_gateway(s.provider, &gateway.id, vpc_id).await {
                s.reporter
                    .failure(&format!("Failed to detach IGW {}: {}", gateway.id, e));
                report.failed.push(gateway.id);
                continue;
            }
            self.delete_one(&mut report, ResourceKind::InternetGateway, &gateway.id)
                .await;
        }
        report
    }

    pub async fn delete_security_groups(&self, vpc_id: &str) -> StageReport {
        let s = &self.session;
        let mut report = StageReport::default();
        s.reporter.info("Deleting Security Groups...");

        let groups = s.lister().security_groups(vpc_id).await;
        if groups.is_empty() {
            s.reporter.info("No security groups found.");
            return report;
        }

        let (deletable, protected) = partition_security_groups(groups);
        for group in protected {
            s.reporter
                .info(&format!("Skipping {} (default security group).", group.id));
            report.skipped.push(group.id);
        }
        for group in deletable {
            self.delete_one(&mut report, ResourceKind::SecurityGroup, &group.id)
                .await;
        }
        report
    }

    pub async fn delete_nat_gateways(&self, vpc_id: &str) -> StageReport {
        let s = &self.session;
        let mut report = StageReport::default();
        s.reporter.info("Deleting NAT Gateways...");

        let gateways = s.lister().nat_gateways(vpc_id).await;
        if gateways.is_empty() {
            s.reporter.info("No NAT gateways found.");
            return report;
        }

        for gateway in gateways {
            if matches!(gateway.state.as_str(), "deleting" | "deleted") {
                log::info!("{} is already {}", gateway.id, gateway.state);
                report.skipped.push(gateway.id);
                continue;
            }
            self.delete_one(&mut report, ResourceKind::NatGateway, &gateway.id)
                .await;
        }
        report
    }
}
