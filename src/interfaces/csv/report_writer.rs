use crate::application::dashboard::DashboardReport;
use crate::domain::catalog::{Catalog, ServiceCategory};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct PlanRow<'a> {
    category: ServiceCategory,
    provider_id: &'a str,
    provider: &'a str,
    plan_id: &'a str,
    plan: &'a str,
    amount: u32,
    price: String,
    currency: String,
    description: &'a str,
}

#[derive(Serialize)]
struct MetricRow {
    metric: String,
    value: String,
}

impl MetricRow {
    fn new(metric: impl Into<String>, value: impl ToString) -> Self {
        Self {
            metric: metric.into(),
            value: value.to_string(),
        }
    }
}

/// Writes catalog listings and dashboard metrics as CSV.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// One row per plan, optionally limited to one category.
    pub fn write_catalog(
        &mut self,
        catalog: &Catalog,
        category: Option<ServiceCategory>,
    ) -> Result<()> {
        for plan in catalog.plans() {
            let Some(provider) = catalog.provider(&plan.provider_id) else {
                continue;
            };
            if category.is_some_and(|c| c != provider.category) {
                continue;
            }
            self.writer.serialize(PlanRow {
                category: provider.category,
                provider_id: &provider.id,
                provider: &provider.name,
                plan_id: &plan.id,
                plan: &plan.name,
                amount: plan.amount,
                price: plan.price.to_plain_string(),
                currency: plan.currency.to_string(),
                description: &plan.description,
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// `metric,value` rows; weekday and category rows are prefixed
    /// `spend_` and `category_`.
    pub fn write_dashboard(&mut self, report: &DashboardReport) -> Result<()> {
        let mut rows = vec![
            MetricRow::new("total_spend", report.total_spend.to_plain_string()),
            MetricRow::new("transaction_count", report.transaction_count),
            MetricRow::new("points_earned", report.points_earned),
        ];
        rows.extend(report.spend_by_weekday.iter().map(|(day, spend)| {
            MetricRow::new(
                format!("spend_{}", day.to_string().to_ascii_lowercase()),
                spend.to_plain_string(),
            )
        }));
        if let Some(distribution) = &report.category_distribution {
            rows.extend(distribution.iter().map(|(category, count)| {
                MetricRow::new(
                    format!("category_{}", category.to_string().to_ascii_lowercase()),
                    count,
                )
            }));
        }

        for row in rows {
            self.writer.serialize(row)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
