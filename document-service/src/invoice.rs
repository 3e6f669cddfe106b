use billing_service::Bill;
use config_engine::DocumentsConfig;

use crate::layout::{wrap_text, Layout, Rgb, Weight};

const DESCRIPTION_WIDTH: usize = 85;

/// `invoice-<number>.pdf`
pub fn invoice_file_name(bill: &Bill) -> String {
    format!("invoice-{}.pdf", crate::file_component(&bill.invoice_number))
}

/// Amount with two decimals behind the configured currency symbol
pub fn format_amount(config: &DocumentsConfig, bill: &Bill) -> String {
    format!("{}{:.2}", config.currency_symbol, bill.amount)
}

pub fn invoice_layout(bill: &Bill, config: &DocumentsConfig) -> Layout {
    let mut page = Layout::new(format!("Invoice {}", bill.invoice_number));

    page.bold(&config.clinic_name, 22.0, 10.0, 18.0)
        .bold("INVOICE", 16.0, 150.0, 18.0)
        .rule(10.0, 200.0, 22.0, 0.5);

    page.text(format!("Invoice #: {}", bill.invoice_number), 12.0, 10.0, 32.0)
        .text(format!("Date: {}", bill.due_date), 12.0, 150.0, 32.0);

    page.bold("Billed To:", 14.0, 10.0, 45.0)
        .text(bill.patient_name().unwrap_or_default(), 12.0, 10.0, 52.0);

    page.frame(10.0, 60.0, 190.0, 30.0, Rgb::LIGHT_GREY)
        .bold("Service Description", 14.0, 12.0, 68.0);
    let description = bill.description.as_deref().unwrap_or_default();
    for (i, line) in wrap_text(description, DESCRIPTION_WIDTH).into_iter().take(2).enumerate() {
        page.text(line, 12.0, 12.0, 76.0 + 6.0 * i as f32);
    }

    page.bold("Amount Due:", 14.0, 10.0, 105.0)
        .styled_text(format_amount(config, bill), 16.0, 50.0, 105.0, Weight::Bold, Rgb::GREEN)
        .text(format!("Status: {}", bill.status), 12.0, 10.0, 115.0);

    page.styled_text(
        "Thank you for your business!",
        10.0,
        10.0,
        140.0,
        Weight::Regular,
        Rgb::GREY,
    );

    page
}
