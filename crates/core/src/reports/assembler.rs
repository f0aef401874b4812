//! Report assembly.
//!
//! One run reads the reference tables, enriches the ledger once, and then
//! compiles, lays out and aggregates every report of the overview. Reports
//! only read the shared classification, so they are built in parallel.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::{debug, info};

use saldo_shared::types::{ReportId, Table, TimeSlotId};
use saldo_shared::{AppResult, ReportConfig};

use super::listing::build_listings;
use super::types::{AssembledReports, Report, SchemaTables};
use crate::accounts::AccountClassifier;
use crate::cost_location::CostLocationHierarchy;
use crate::formula::FormulaSynthesizer;
use crate::issue::{Issue, IssueLog};
use crate::layout::LayoutEngine;
use crate::ledger::{
    BookingEnricher, ClassifiedBooking, LedgerEntry, LedgerTotals, summarize_accounts,
    summarize_cost_locations,
};
use crate::schema::{
    ReportEntry, ReportSchemaCompiler, TimeSlotTemplate, parse_reports_overview, parse_time_slots,
};

/// Turns a ledger and its reference tables into reports.
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    config: ReportConfig,
}

impl ReportAssembler {
    /// Creates an assembler.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the configuration is unusable.
    pub fn new(config: ReportConfig) -> AppResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Assembles every report of the overview.
    ///
    /// Input problems never abort the run; they are collected in the
    /// returned issue log.
    pub fn assemble(
        &self,
        ledger: Vec<LedgerEntry>,
        chart_of_accounts: &Table,
        cost_location_plan: &Table,
        schemas: &SchemaTables,
    ) -> AssembledReports {
        let mut issues = IssueLog::new();

        let classifier = AccountClassifier::from_table(chart_of_accounts, &mut issues);
        let hierarchy = CostLocationHierarchy::from_table(cost_location_plan, &self.config, &mut issues);
        let bookings = BookingEnricher::new(&classifier, &self.config).enrich(ledger, &mut issues);

        let accounts = summarize_accounts(&bookings);
        let cost_locations =
            summarize_cost_locations(&bookings, &hierarchy, &self.config.terms, &mut issues);

        let entries = parse_reports_overview(&schemas.overview, &mut issues);
        let templates = parse_time_slots(&schemas.time_slots, &mut issues);

        let built: Vec<(ReportId, Option<Report>, IssueLog)> = entries
            .par_iter()
            .map(|entry| {
                let mut report_issues = IssueLog::new();
                let report = match schemas.schemas.get(&entry.id) {
                    Some(table) => Some(self.build_report(
                        entry,
                        table,
                        &templates,
                        &bookings,
                        &mut report_issues,
                    )),
                    None => {
                        report_issues.record(Issue::MissingSchema {
                            report: entry.id.clone(),
                        });
                        None
                    }
                };
                (entry.id.clone(), report, report_issues)
            })
            .collect();

        let mut reports = BTreeMap::new();
        for (id, report, report_issues) in built {
            issues.merge(report_issues);
            if let Some(report) = report {
                reports.entry(id).or_insert(report);
            }
        }

        info!(
            reports = reports.len(),
            bookings = bookings.len(),
            issues = issues.len(),
            "reports assembled"
        );

        AssembledReports {
            reports,
            bookings,
            accounts,
            cost_locations,
            issues,
        }
    }

    fn build_report(
        &self,
        entry: &ReportEntry,
        table: &Table,
        templates: &BTreeMap<TimeSlotId, TimeSlotTemplate>,
        bookings: &[ClassifiedBooking],
        issues: &mut IssueLog,
    ) -> Report {
        let definition = ReportSchemaCompiler::new(&self.config).compile(entry, table, templates, issues);
        let layout = LayoutEngine::new(&self.config.layout).layout(&definition);
        let cells = FormulaSynthesizer::new(&self.config).synthesize_all(&definition, &layout, issues);

        let bookings: Vec<ClassifiedBooking> = bookings
            .iter()
            .filter(|b| {
                b.cost_location()
                    .is_some_and(|code| definition.cost_locations.contains(code))
            })
            .cloned()
            .collect();
        let totals = LedgerTotals::from_bookings(&bookings, &self.config.terms);
        let listings = build_listings(&definition, &bookings);

        debug!(
            report = %definition.id,
            bookings = bookings.len(),
            listings = listings.len(),
            "report built"
        );

        Report {
            definition,
            layout,
            cells,
            bookings,
            totals,
            listings,
        }
    }
}
