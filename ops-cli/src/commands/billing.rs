use billing_service::{Bill, BillDraft, BillStatus};
use colored::*;
use records_service::today;

use crate::cli::BillingCommand;
use crate::context::AppContext;
use crate::output::{empty, field, heading, or_dash};

pub async fn run(cmd: BillingCommand, ctx: &AppContext) -> anyhow::Result<()> {
    let mut billing = ctx.billing().await?;
    let currency = ctx.config.documents.currency_symbol.as_str();

    match cmd {
        BillingCommand::List { search, status } => {
            let status = status.map(BillStatus::from);
            let rows: Vec<&Bill> = billing
                .search(search.as_deref().unwrap_or_default())
                .into_iter()
                .filter(|b| status.map_or(true, |s| b.status == s))
                .collect();
            heading("Bills", rows.len());
            if rows.is_empty() {
                empty("bills");
            }
            for bill in rows {
                print_bill(bill, currency);
            }
        }
        BillingCommand::Create {
            patient,
            amount,
            due,
            invoice,
            description,
            appointment,
        } => {
            let mut draft = BillDraft::new(patient, amount, due).with_invoice_number(invoice.as_deref());
            if let Some(description) = description.as_deref() {
                draft = draft.with_description(description);
            }
            draft.appointment_id = appointment;

            let bill = billing.create(draft).await?;
            print_bill(&bill, currency);
        }
        BillingCommand::MarkPaid { id } => {
            let bill = billing.mark_paid(id, today()).await?;
            print_bill(&bill, currency);
        }
        BillingCommand::Delete { id } => billing.delete(id).await?,
        BillingCommand::Export { id } => {
            let bill = billing
                .find(id)
                .ok_or_else(|| anyhow::anyhow!("bill {id} not found"))?;
            let path = document_service::export_invoice(bill, &ctx.config.documents)?;
            println!("{} {}", "Invoice saved to".bright_green(), path.display());
        }
        BillingCommand::Report => {
            let report = billing.report(today());
            heading("Revenue", billing.bills().len());
            field("Total billed", format!("{currency}{:.2}", report.total_billed));
            field("Collected", format!("{currency}{:.2}", report.collected));
            field("Pending", format!("{currency}{:.2}", report.pending));
            field("Overdue", format!("{currency}{:.2}", report.overdue));
            field("This month", format!("{currency}{:.2}", report.monthly_revenue));
        }
    }
    Ok(())
}

fn print_bill(bill: &Bill, currency: &str) {
    let status = match bill.status {
        BillStatus::Paid => bill.status.to_string().green(),
        BillStatus::Overdue => bill.status.to_string().red(),
        BillStatus::Pending => bill.status.to_string().yellow(),
        BillStatus::Cancelled => bill.status.to_string().dimmed(),
    };
    println!(
        "  {}  {:<18} {:<22} {:>12}  due {}  {}",
        bill.id,
        bill.invoice_number,
        or_dash(bill.patient_name()),
        format!("{currency}{:.2}", bill.amount),
        bill.due_date,
        status
    );
}
