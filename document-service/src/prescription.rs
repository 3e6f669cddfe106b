use config_engine::DocumentsConfig;
use records_service::Prescription;

use crate::layout::{wrap_text, Layout, Rgb, Weight};

const INSTRUCTIONS_WIDTH: usize = 80;

/// `prescription-<patient>-<date>.pdf`
pub fn prescription_file_name(prescription: &Prescription) -> String {
    let patient = records_service::slug(prescription.patient_name());
    format!(
        "prescription-{}-{}.pdf",
        crate::file_component(&patient),
        prescription.prescribed_date
    )
}

/// `prescriber` is printed in the signature line; blank falls back to "Doctor"
pub fn prescription_layout(prescription: &Prescription, prescriber: &str, config: &DocumentsConfig) -> Layout {
    let mut page = Layout::new(format!("Prescription {}", prescription.medication_name));

    page.bold(&config.clinic_name, 22.0, 10.0, 18.0)
        .bold("PRESCRIPTION", 16.0, 140.0, 18.0)
        .rule(10.0, 200.0, 22.0, 0.5);

    page.text(
        format!("Patient: {}", prescription.patient_name().unwrap_or_default()),
        12.0,
        10.0,
        32.0,
    )
    .text(format!("Date: {}", prescription.prescribed_date), 12.0, 150.0, 32.0);

    page.bold("Medication Details", 14.0, 10.0, 45.0)
        .text(format!("Medication: {}", prescription.medication_name), 12.0, 10.0, 55.0)
        .text(format!("Dosage: {}", prescription.dosage), 12.0, 10.0, 65.0)
        .text(format!("Frequency: {}", prescription.frequency), 12.0, 10.0, 75.0)
        .text(format!("Duration: {}", prescription.duration), 12.0, 10.0, 85.0);

    let mut y = 95.0;
    if let Some(instructions) = prescription.instructions.as_deref().filter(|i| !i.trim().is_empty()) {
        for line in wrap_text(&format!("Instructions: {instructions}"), INSTRUCTIONS_WIDTH) {
            page.text(line, 12.0, 10.0, y);
            y += 6.0;
        }
    }

    let prescriber = if prescriber.trim().is_empty() { "Doctor" } else { prescriber };
    let signature_y = f32::max(110.0, y + 9.0);
    page.text(format!("Prescribed by: {prescriber}"), 12.0, 10.0, signature_y);

    page.styled_text(
        "Take medications as prescribed. Contact us for any questions.",
        10.0,
        10.0,
        signature_y + 20.0,
        Weight::Regular,
        Rgb::GREY,
    );

    page
}
