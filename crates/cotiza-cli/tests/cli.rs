use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const QUOTATION: &str = "COTIZACION N° 0021458877
Fecha: 03.02.2025
Vendedor: MARIA JOSE PEREZ
Datos Cliente
Señores: CONSTRUCTORA SUR LTDA
R.U.T: 76.568.660-1
Dirección: Los Aromos 455 Actividad: Construcción
Comuna: ÑUÑOA
Pos Material Descripción Cant. Unidad Precio Precio Dcto Valor Dcto Total
10 123456 CEMENTO POLPAICO 25KG 4 UN 5990.00 5500.00 22000.00 23960.00
20 654321 MARTILLO CARPINTERO 2 UN 12990.00 12000.00 24000.00 25980.00
TOTAL AFECTO:
DESCUENTO:
SUBTOTAL:
IVA:
TOTAL :
49940.00
3940.00
46000.00
8740.00
54740.00
DESPACHO: retiro en tienda
";

const CONFIG: &str = r#"{
  "order": {
    "companies": [
      {
        "key": "sur",
        "name": "Constructora Sur Ltda",
        "tax_id": "76.123.456-0",
        "address": "Av. Las Torres 1200",
        "commune": "Ñuñoa"
      }
    ]
  }
}"#;

/// Command with the user config directory pointed into the temp dir.
fn cotiza(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cotiza").unwrap();
    cmd.env("XDG_CONFIG_HOME", dir.path()).env("HOME", dir.path());
    cmd
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_extract_json_from_text() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "quote.txt", QUOTATION);

    cotiza(&dir)
        .args(["extract", "--from-text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""client_name": "CONSTRUCTORA SUR LTDA""#))
        .stdout(predicate::str::contains(r#""quotation_number": "0021458877""#))
        .stdout(predicate::str::contains(r#""total_final": "54740.00""#));
}

#[test]
fn test_extract_text_and_csv_formats() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "quote.txt", QUOTATION);

    cotiza(&dir)
        .args(["extract", "-f", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Line items (2):"))
        .stdout(predicate::str::contains("RUT: 76.568.660-1"));

    cotiza(&dir)
        .args(["extract", "-f", "csv"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("quotation_number,date,client_name"))
        .stdout(predicate::str::contains("MARTILLO CARPINTERO"));
}

#[test]
fn test_extract_missing_fields_use_sentinel() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "empty.txt", "Documento sin datos\n");

    cotiza(&dir)
        .args(["extract", "-f", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Quotation: No encontrado"))
        .stderr(predicate::str::contains("Could not extract line items"));
}

#[test]
fn test_extract_dump_text_to_file() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "quote.txt", QUOTATION);
    let output = dir.path().join("raw.txt");

    cotiza(&dir)
        .args(["extract", "--dump-text", "-o"])
        .arg(&output)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    assert_eq!(fs::read_to_string(&output).unwrap(), QUOTATION);
}

#[test]
fn test_extract_rejects_invalid_pdf() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "bad.pdf", "not a pdf");

    cotiza(&dir)
        .arg("extract")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed PDF document"));
}

#[test]
fn test_extract_missing_input() {
    let dir = TempDir::new().unwrap();

    cotiza(&dir)
        .args(["extract", "does-not-exist.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_order_text() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "quote.txt", QUOTATION);
    let config = write_file(dir.path(), "config.json", CONFIG);

    cotiza(&dir)
        .arg("--config")
        .arg(&config)
        .args(["order", "--number", "4500123", "--company", "SUR", "--date", "2025-02-03"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("ORDEN DE COMPRA 4500123"))
        .stdout(predicate::str::contains("AV. LAS TORRES 1200 ÑUÑOA"))
        .stdout(predicate::str::contains("03-02-2025"))
        .stdout(predicate::str::contains("EASY RETAIL S. A"))
        .stdout(predicate::str::contains(
            "123456 | CEMENTO POLPAICO 25KG | 5.500,00 | 4 | 22.000",
        ))
        .stdout(predicate::str::contains("NETO:  46000.00"));
}

#[test]
fn test_order_json() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "quote.txt", QUOTATION);
    let config = write_file(dir.path(), "config.json", CONFIG);

    cotiza(&dir)
        .arg("--config")
        .arg(&config)
        .args(["order", "-n", "77", "--company", "sur", "-f", "json"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""title": "ORDEN DE COMPRA 77""#))
        .stdout(predicate::str::contains(r#""unit_price": "12.000,00""#));
}

#[test]
fn test_order_unknown_company() {
    let dir = TempDir::new().unwrap();
    let input = write_file(dir.path(), "quote.txt", QUOTATION);
    let config = write_file(dir.path(), "config.json", CONFIG);

    cotiza(&dir)
        .arg("--config")
        .arg(&config)
        .args(["order", "--number", "1", "--company", "norte"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown purchasing company: norte"));
}

#[test]
fn test_companies_listing() {
    let dir = TempDir::new().unwrap();
    let config = write_file(dir.path(), "config.json", CONFIG);

    cotiza(&dir)
        .arg("--config")
        .arg(&config)
        .arg("companies")
        .assert()
        .success()
        .stdout(predicate::str::contains("Constructora Sur Ltda"));

    cotiza(&dir)
        .arg("companies")
        .assert()
        .success()
        .stdout(predicate::str::contains("No purchasing companies configured"));
}

#[test]
fn test_config_init_set_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("nested").join("config.json");

    cotiza(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    cotiza(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    cotiza(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "order.columns.unit_price", "unit_price_original"])
        .assert()
        .success();

    cotiza(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "order.columns.unit_price"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"unit_price_original\""));

    cotiza(&dir)
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "pdf.backend", "tesseract"])
        .assert()
        .failure();
}

#[test]
fn test_batch_with_summary() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("in");
    fs::create_dir_all(&inputs).unwrap();
    write_file(&inputs, "q1.txt", QUOTATION);
    write_file(&inputs, "q2.txt", &QUOTATION.replace("0021458877", "0021458878"));
    let out = dir.path().join("out");

    cotiza(&dir)
        .arg("batch")
        .arg(format!("{}/*.txt", inputs.display()))
        .arg("-o")
        .arg(&out)
        .args(["--summary", "-j", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files to process"))
        .stdout(predicate::str::contains("2 successful, 0 failed"));

    assert!(out.join("q1.json").exists());
    assert!(out.join("q2.json").exists());

    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.contains("q1.txt,success,0021458877"));
    assert!(summary.contains("q2.txt,success,0021458878"));
}

#[test]
fn test_batch_stops_on_error() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "bad.pdf", "not a pdf");

    cotiza(&dir)
        .arg("batch")
        .arg(format!("{}/*.pdf", dir.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));

    cotiza(&dir)
        .arg("batch")
        .arg(format!("{}/*.pdf", dir.path().display()))
        .arg("--continue-on-error")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 successful, 1 failed"));
}

#[test]
fn test_batch_shared_stems_and_directories() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("in");
    fs::create_dir_all(inputs.join("archivados.d")).unwrap();
    write_file(&inputs, "q.txt", QUOTATION);
    write_file(&inputs, "q.dat", &QUOTATION.replace("0021458877", "0021458878"));
    let out = dir.path().join("out");

    cotiza(&dir)
        .args(["batch", "--from-text"])
        .arg(format!("{}/*", inputs.display()))
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 files to process"))
        .stdout(predicate::str::contains("2 successful, 0 failed"));

    let txt = fs::read_to_string(out.join("q_txt.json")).unwrap();
    let dat = fs::read_to_string(out.join("q_dat.json")).unwrap();
    assert!(txt.contains("0021458877"));
    assert!(dat.contains("0021458878"));
    assert!(!out.join("q.json").exists());
}
