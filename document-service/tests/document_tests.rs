use billing_service::{Bill, BillStatus};
use chrono::{NaiveDate, Utc};
use config_engine::DocumentsConfig;
use document_service::*;
use records_service::{PatientSummary, Prescription, PrescriptionStatus};
use rust_decimal::Decimal;
use uuid::Uuid;

fn patient(name: &str) -> PatientSummary {
    PatientSummary {
        id: Uuid::new_v4(),
        full_name: name.to_string(),
        phone: Some("9876543210".to_string()),
        email: None,
    }
}

fn sample_bill() -> Bill {
    Bill {
        id: Uuid::new_v4(),
        doctor_id: "user_1".to_string(),
        patient_id: Uuid::new_v4(),
        appointment_id: None,
        invoice_number: "INV-1001".to_string(),
        amount: "1500.5".parse::<Decimal>().unwrap(),
        description: Some("General consultation".to_string()),
        due_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        paid_date: None,
        status: BillStatus::Pending,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        patients: Some(patient("Asha Rao")),
        appointments: None,
    }
}

fn sample_prescription() -> Prescription {
    Prescription {
        id: Uuid::new_v4(),
        doctor_id: "user_1".to_string(),
        patient_id: Uuid::new_v4(),
        appointment_id: None,
        medication_name: "Amoxicillin".to_string(),
        dosage: "500mg".to_string(),
        frequency: "Twice daily".to_string(),
        duration: "7 days".to_string(),
        instructions: Some("Take after meals".to_string()),
        prescribed_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        status: PrescriptionStatus::Active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        patients: Some(patient("Asha Rao")),
    }
}

#[test]
fn test_invoice_layout_content() {
    let config = DocumentsConfig::default();
    let page = invoice_layout(&sample_bill(), &config);

    assert!(page.contains(&config.clinic_name));
    assert!(page.contains("INVOICE"));
    assert!(page.contains("Invoice #: INV-1001"));
    assert!(page.contains("Date: 2024-03-15"));
    assert!(page.contains("Asha Rao"));
    assert!(page.contains("General consultation"));
    assert!(page.contains("1500.50"));
    assert!(page.contains("Status: pending"));
    assert!(page.contains("Thank you for your business!"));
    assert_eq!(format_amount(&config, &sample_bill()), "Rs. 1500.50");
}

#[test]
fn test_invoice_without_patient_or_description() {
    let mut bill = sample_bill();
    bill.patients = None;
    bill.description = None;

    let page = invoice_layout(&bill, &DocumentsConfig::default());
    assert!(page.contains("Billed To:"));
    assert!(page.contains("Service Description"));
    assert!(page.contains("Amount Due:"));
}

#[test]
fn test_prescription_layout_content() {
    let page = prescription_layout(&sample_prescription(), "Dr. Meera Iyer", &DocumentsConfig::default());

    assert!(page.contains("PRESCRIPTION"));
    assert!(page.contains("Patient: Asha Rao"));
    assert!(page.contains("Date: 2024-03-10"));
    assert!(page.contains("Medication: Amoxicillin"));
    assert!(page.contains("Dosage: 500mg"));
    assert!(page.contains("Frequency: Twice daily"));
    assert!(page.contains("Duration: 7 days"));
    assert!(page.contains("Instructions: Take after meals"));
    assert!(page.contains("Prescribed by: Dr. Meera Iyer"));
}

#[test]
fn test_prescription_without_instructions() {
    let mut prescription = sample_prescription();
    prescription.instructions = Some("  ".to_string());

    let page = prescription_layout(&prescription, "", &DocumentsConfig::default());
    assert!(!page.contains("Instructions"));
    assert!(page.contains("Prescribed by: Doctor"));
}

#[test]
fn test_file_names() {
    assert_eq!(invoice_file_name(&sample_bill()), "invoice-INV-1001.pdf");
    assert_eq!(
        prescription_file_name(&sample_prescription()),
        "prescription-asha-rao-2024-03-10.pdf"
    );

    let mut bill = sample_bill();
    bill.invoice_number = "INV/../7".to_string();
    assert_eq!(invoice_file_name(&bill), "invoice-INV_.._7.pdf");
}

#[test]
fn test_render_produces_pdf() {
    let bytes = render(&invoice_layout(&sample_bill(), &DocumentsConfig::default())).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

/// Operand of a `Tj` operator as printpdf writes it for built-in fonts
fn hex_text(text: &str) -> String {
    let hex: String = text.bytes().map(|b| format!("{b:02X}")).collect();
    format!("<{hex}> Tj")
}

#[test]
#[cfg_attr(not(debug_assertions), ignore = "release builds compress content streams")]
fn test_rendered_invoice_carries_amount_and_number() {
    let bytes = render(&invoice_layout(&sample_bill(), &DocumentsConfig::default())).unwrap();
    let pdf = String::from_utf8_lossy(&bytes);

    assert!(pdf.contains(&hex_text("Rs. 1500.50")));
    assert!(pdf.contains(&hex_text("Invoice #: INV-1001")));
    assert!(pdf.contains(&hex_text("Status: pending")));
    assert!(!pdf.contains(&hex_text("Rs. 1500.5")));
}

#[test]
#[cfg_attr(not(debug_assertions), ignore = "release builds compress content streams")]
fn test_rendered_prescription_carries_medication() {
    let page = prescription_layout(&sample_prescription(), "Dr. Meera Iyer", &DocumentsConfig::default());
    let bytes = render(&page).unwrap();
    let pdf = String::from_utf8_lossy(&bytes);

    assert!(pdf.contains(&hex_text("Medication: Amoxicillin")));
    assert!(pdf.contains(&hex_text("Prescribed by: Dr. Meera Iyer")));
}

#[test]
fn test_export_writes_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = DocumentsConfig {
        output_dir: dir.path().join("out"),
        ..DocumentsConfig::default()
    };

    let invoice = export_invoice(&sample_bill(), &config).unwrap();
    assert_eq!(invoice, dir.path().join("out").join("invoice-INV-1001.pdf"));
    assert!(std::fs::read(&invoice).unwrap().starts_with(b"%PDF"));

    let prescription = export_prescription(&sample_prescription(), "Dr. Meera Iyer", &config).unwrap();
    assert!(prescription.exists());
}
