use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn cart_cmd(server: &MockServer, data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cart").unwrap();
    cmd.env_remove("RUST_LOG")
        .arg("--api-url")
        .arg(server.base_url())
        .arg("--data-dir")
        .arg(data_dir.path());
    cmd
}

fn mock_shoe(server: &MockServer, stock: u32) {
    server.mock(|when, then| {
        when.method(GET).path("/stock/1");
        then.status(200).json_body(json!({"id": 1, "amount": stock}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/products/1");
        then.status(200)
            .json_body(json!({"id": 1, "title": "Tenis de Caminhada", "price": 179.9}));
    });
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("cart")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("update"));
}

#[test]
fn test_add_then_list_as_json() {
    let data_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    mock_shoe(&server, 5);

    cart_cmd(&server, &data_dir)
        .args(["add", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added product 1"));

    let output = cart_cmd(&server, &data_dir)
        .args(["list", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let listed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listed[0]["id"], json!(1));
    assert_eq!(listed[0]["amount"], json!(1));
    assert_eq!(listed[0]["title"], json!("Tenis de Caminhada"));

    assert!(data_dir.path().join("_RocketShoes_cart.json").exists());
}

#[test]
fn test_out_of_stock_exits_with_business_rule_code() {
    let data_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    mock_shoe(&server, 0);

    cart_cmd(&server, &data_dir)
        .args(["add", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Requested quantity is out of stock"));

    assert!(!data_dir.path().join("_RocketShoes_cart.json").exists());
}

#[test]
fn test_remove_missing_product_fails() {
    let data_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    cart_cmd(&server, &data_dir)
        .args(["remove", "3"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error removing product"));
}

#[test]
fn test_api_error_exits_with_network_code() {
    let data_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/stock/1");
        then.status(503);
    });

    cart_cmd(&server, &data_dir)
        .args(["add", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error adding product"));
}

#[test]
fn test_config_file_messages_are_used() {
    let data_dir = TempDir::new().unwrap();
    let server = MockServer::start();
    mock_shoe(&server, 0);

    let mut config_file = NamedTempFile::new().unwrap();
    write!(
        config_file,
        "[api]\nbase_url = \"{}\"\n\n[messages]\nout_of_stock = \"Quantidade solicitada fora de estoque\"\n",
        server.base_url()
    )
    .unwrap();

    Command::cargo_bin("cart")
        .unwrap()
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config_file.path())
        .arg("--data-dir")
        .arg(data_dir.path())
        .args(["add", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Quantidade solicitada fora de estoque"));
}

#[test]
fn test_invalid_api_url_is_a_config_error() {
    let data_dir = TempDir::new().unwrap();

    Command::cargo_bin("cart")
        .unwrap()
        .args(["--api-url", "ftp://example.com", "--data-dir"])
        .arg(data_dir.path())
        .arg("list")
        .assert()
        .code(3);
}

#[test]
fn test_list_empty_cart_as_csv() {
    let data_dir = TempDir::new().unwrap();
    let server = MockServer::start();

    cart_cmd(&server, &data_dir)
        .args(["list", "--format", "csv"])
        .assert()
        .success()
        .stdout("id,title,price,amount,subtotal\n");
}
