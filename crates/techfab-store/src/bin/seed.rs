//! # Seed Data Generator
//!
//! Populates a state file with demo data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default state file
//! cargo run -p techfab-store --bin seed
//!
//! # Specify the state file path
//! cargo run -p techfab-store --bin seed -- --file ./data/techfab_dev.json
//! ```
//!
//! ## Generated Data
//! - Company settings for a demo fabrication shop
//! - A handful of customers and catalog products
//! - A quotation per customer, one converted down the funnel to an invoice
//!
//! Re-running against a non-empty state file is a no-op to avoid duplicates.

use std::env;

use techfab_core::lifecycle::NewDocument;
use techfab_core::{
    report, CompanySettings, Customer, DocStatus, DocType, LineItem, Product,
};
use techfab_store::{BillingStore, JsonFilePersister};
use uuid::Uuid;

/// Demo customers: (name, address, phone).
const CUSTOMERS: &[(&str, &str, &str)] = &[
    (
        "Ah Seng Hardware Sdn Bhd",
        "12 Jalan Besar, 81000 Kulai, Johor",
        "07-663 1234",
    ),
    (
        "Southern Marine Works",
        "Lot 8, Kawasan Perindustrian Senai, Johor",
        "07-599 8800",
    ),
    (
        "Harbour Interior Studio",
        "33-1 Jalan Austin Heights 3, Johor Bahru",
        "012-770 4455",
    ),
];

/// Demo catalog: (name, unit price, tax rate).
const PRODUCTS: &[(&str, f64, f64)] = &[
    ("Mild steel bracket (custom)", 18.5, 0.08),
    ("Stainless railing, per meter", 145.0, 0.08),
    ("Laser cutting, per sheet", 60.0, 0.08),
    ("Site installation, per day", 450.0, 0.0),
    ("Powder coating, per m²", 28.0, 0.08),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut file_path = String::from("./techfab_dev.json");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--file" | "-f" => {
                if i + 1 < args.len() {
                    file_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Techfab Billing Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -f, --file <PATH>   State file path (default: ./techfab_dev.json)");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Techfab Billing Seed Data Generator");
    println!("======================================");
    println!("State file: {}", file_path);
    println!();

    let mut store = BillingStore::open(JsonFilePersister::new(&file_path))?;

    let existing = store.snapshot();
    if !existing.documents.is_empty() {
        println!("⚠ State already has {} documents", existing.documents.len());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the state file to regenerate.");
        return Ok(());
    }

    // Company identity
    store.update_settings(CompanySettings {
        name: "Techfab Engineering Sdn Bhd".to_string(),
        address: "No. 7, Jalan Perindustrian 12, 81100 Johor Bahru".to_string(),
        ssm_number: "201901012345 (1322334-X)".to_string(),
        sst_reg_no: "W10-1808-32100099".to_string(),
        phone: "07-350 2200".to_string(),
        email: "billing@techfab.example".to_string(),
        bank_name: "Maybank".to_string(),
        bank_account: "5512 3456 7890".to_string(),
        sst_rate: techfab_core::SST_RATE,
        logo: None,
        signature: None,
    })?;
    println!("✓ Company settings written");

    // Customers
    let mut customer_ids = Vec::new();
    for (name, address, phone) in CUSTOMERS {
        let id = Uuid::new_v4().to_string();
        store.add_customer(Customer {
            id: id.clone(),
            name: name.to_string(),
            address: address.to_string(),
            email: String::new(),
            phone: phone.to_string(),
            attention_to: None,
            tin: None,
            brn: None,
        })?;
        customer_ids.push(id);
    }
    println!("✓ {} customers added", customer_ids.len());

    // Catalog
    for (name, price, tax_rate) in PRODUCTS {
        store.add_product(Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            price: *price,
            description: None,
            tax_rate: Some(*tax_rate),
        })?;
    }
    println!("✓ {} products added", PRODUCTS.len());

    // One quotation per customer, priced off the catalog
    let mut quotation_ids = Vec::new();
    for (idx, customer_id) in customer_ids.iter().enumerate() {
        let (name, price, tax_rate) = PRODUCTS[idx % PRODUCTS.len()];
        let quotation = store.create_document(NewDocument {
            doc_type: DocType::Quotation,
            customer_id: customer_id.clone(),
            date: None,
            items: vec![
                LineItem {
                    id: Uuid::new_v4().to_string(),
                    description: name.to_string(),
                    quantity: (idx + 1) as f64,
                    unit_price: price,
                    tax_rate,
                },
                LineItem {
                    id: Uuid::new_v4().to_string(),
                    description: "Site installation, per day".to_string(),
                    quantity: 1.0,
                    unit_price: 450.0,
                    tax_rate: 0.0,
                },
            ],
            discount: 0.0,
            notes: Some("Validity: 30 days".to_string()),
        })?;
        println!("  Created {}", quotation.number);
        quotation_ids.push(quotation.id);
    }

    // Walk the first quotation down the funnel
    let proforma = store.convert_document(&quotation_ids[0], DocType::Proforma)?;
    println!("  Converted to {}", proforma.number);
    let invoice = store.convert_document(&proforma.id, DocType::Invoice)?;
    println!("  Converted to {}", invoice.number);
    store.update_status(&invoice.id, DocStatus::Sent)?;

    // Summary
    let snapshot = store.snapshot();
    let stats = report::dashboard_stats(&snapshot);
    println!();
    println!("✓ Seed complete!");
    println!(
        "  Active: {} quotations, {} pro-formas, {} delivery orders, {} invoices",
        stats.quotation_count,
        stats.proforma_count,
        stats.delivery_order_count,
        stats.invoice_count
    );
    println!(
        "  Invoiced {}, outstanding {}",
        techfab_core::money::format_currency(stats.invoiced_total),
        techfab_core::money::format_currency(stats.outstanding_total)
    );

    Ok(())
}
