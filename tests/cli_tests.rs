mod common;

use common::fixtures::VULKAN_FEATURES;
use common::temp_files::{mini_registry, write_config};
use std::fs;
use std::process::Command;

fn cli() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vk-api-gen"));
    cmd.env_remove("VKGEN_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_generate_to_file() {
    let (dir, registry) = mini_registry();
    let output = dir.path().join("vulkan.py");
    let status = cli()
        .arg("generate")
        .arg("--registry")
        .arg(&registry)
        .arg("--output")
        .arg(&output)
        .status()
        .expect("run cli");
    assert!(status.success());
    let text = fs::read_to_string(&output).unwrap();
    for name in VULKAN_FEATURES {
        assert!(text.contains(&format!("{name} = Extension(")), "{name}");
    }
}

#[test]
fn test_cli_generate_to_stdout() {
    let (_dir, registry) = mini_registry();
    let out = cli()
        .arg("generate")
        .arg("--registry")
        .arg(&registry)
        .arg("--versions")
        .arg("VK_VERSION_1_0")
        .arg("--extensions")
        .arg("VK_KHR_surface")
        .output()
        .expect("run cli");
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("VK_VERSION_1_0 = Extension("));
    assert!(stdout.contains("VK_KHR_surface = Extension("));
    assert!(!stdout.contains("VK_VERSION_1_1 = Extension("));
    assert!(!stdout.contains("VK_KHR_swapchain = Extension("));
}

#[test]
fn test_cli_auto_detects_config() {
    let (_dir, registry) = mini_registry();
    write_config(
        &registry,
        r##"
extensions = "VK_KHR_.*"
prefix_text = ["# Copyright (c) 2026 Example"]
"##,
    );
    let out = cli()
        .arg("generate")
        .arg("--registry")
        .arg(&registry)
        .output()
        .expect("run cli");
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("# Copyright (c) 2026 Example\n"));
    assert!(!stdout.contains("VK_EXT_debug_report = Extension("));
}

#[test]
fn test_cli_inspect_json() {
    let (_dir, registry) = mini_registry();
    let out = cli()
        .arg("inspect")
        .arg("--registry")
        .arg(&registry)
        .arg("--display-server")
        .arg("Win32")
        .arg("--json")
        .output()
        .expect("run cli");
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["api"], "vulkan");
    assert_eq!(value["platform"], "Win32");
    assert_eq!(value["features"].as_array().unwrap().len(), VULKAN_FEATURES.len());
    assert_eq!(value["buckets"]["win32"]["wsi"][0], "VK_KHR_win32_surface");
    assert_eq!(value["skipped_commands"][0], "vkMissingFromTable");
    let extensions: Vec<&str> = value["selection"]["extensions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(
        extensions,
        vec![
            "VK_VERSION_1_0",
            "VK_KHR_surface",
            "VK_KHR_swapchain",
            "VK_KHR_win32_surface"
        ]
    );
}

#[test]
fn test_cli_inspect_text() {
    let (_dir, registry) = mini_registry();
    let out = cli()
        .arg("inspect")
        .arg("--registry")
        .arg(&registry)
        .output()
        .expect("run cli");
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("dispatchable objects (4):"));
    assert!(stdout.contains("display server: none (all platforms)"));
    assert!(stdout.contains("skipped commands (1):"));
}

#[test]
fn test_cli_reports_bad_pattern() {
    let (_dir, registry) = mini_registry();
    let out = cli()
        .arg("generate")
        .arg("--registry")
        .arg(&registry)
        .arg("--extensions")
        .arg("VK_(")
        .output()
        .expect("run cli");
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("extensions"));
}

#[test]
fn test_cli_missing_registry_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = cli()
        .arg("generate")
        .arg("--registry")
        .arg(dir.path().join("nope.xml"))
        .output()
        .expect("run cli");
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("Failed to read registry"));
}
