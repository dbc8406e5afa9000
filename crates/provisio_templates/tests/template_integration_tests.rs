//! Integration tests for rendering and writing Terraform configuration.

use std::collections::BTreeMap;
use std::fs;

use provisio_core::{
    Catalog, ChoiceSet, ImageFamily, InstanceSize, PLACEHOLDER_IMAGE_ID, PLACEHOLDER_INSTANCE_TYPE,
};
use provisio_templates::{
    ConfigWriter, TemplateRenderer, OUTPUT_INSTANCE_ID, OUTPUT_LOAD_BALANCER_DNS,
};
use tempfile::tempdir;

fn ubuntu_small() -> ChoiceSet {
    ChoiceSet::new(ImageFamily::Ubuntu, InstanceSize::Small, "us-east-1", "myalb")
}

#[test]
fn test_render_fills_every_slot() {
    let rendered = TemplateRenderer::new()
        .render(&ubuntu_small(), &Catalog::default())
        .unwrap();
    let text = rendered.as_str();

    assert!(text.contains(r#"region = "us-east-1""#));
    assert!(text.contains(r#"ami                    = "ami-0abcdef1234567890""#));
    assert!(text.contains(r#"instance_type          = "t3.small""#));
    assert!(text.contains(r#"availability_zone      = "us-east-1a""#));
    assert!(text.contains(r#"name               = "myalb""#));
}

#[test]
fn test_render_declares_expected_resources_and_outputs() {
    let rendered = TemplateRenderer::new()
        .render(&ubuntu_small(), &Catalog::default())
        .unwrap();
    let text = rendered.as_str();

    for resource in [
        r#"resource "aws_vpc" "main""#,
        r#"resource "aws_subnet" "public""#,
        r#"resource "aws_security_group" "lb_sg""#,
        r#"resource "aws_instance" "web_server""#,
        r#"resource "aws_lb" "application_lb""#,
        r#"resource "aws_lb_listener" "http_listener""#,
        r#"resource "aws_lb_target_group" "web_target_group""#,
        r#"resource "aws_lb_target_group_attachment" "web_instance_attachment""#,
    ] {
        assert!(text.contains(resource), "missing {}", resource);
    }

    assert!(text.contains(&format!("output \"{}\"", OUTPUT_INSTANCE_ID)));
    assert!(text.contains(&format!("output \"{}\"", OUTPUT_LOAD_BALANCER_DNS)));
}

#[test]
fn test_render_is_deterministic() {
    let renderer = TemplateRenderer::new();
    let catalog = Catalog::default();

    let first = renderer.render(&ubuntu_small(), &catalog).unwrap();
    let second = renderer.render(&ubuntu_small(), &catalog).unwrap();
    let third = TemplateRenderer::new()
        .render(&ubuntu_small(), &Catalog::default())
        .unwrap();

    assert_eq!(first.as_str().as_bytes(), second.as_str().as_bytes());
    assert_eq!(first, third);
}

#[test]
fn test_different_choices_render_differently() {
    let renderer = TemplateRenderer::new();
    let catalog = Catalog::default();

    let linux_medium = ChoiceSet::new(ImageFamily::AmazonLinux, InstanceSize::Medium, "us-east-1", "myalb");
    let rendered = renderer.render(&linux_medium, &catalog).unwrap();

    assert!(rendered.as_str().contains("ami-0fedcba9876543210"));
    assert!(rendered.as_str().contains(r#""t3.medium""#));
    assert_ne!(rendered, renderer.render(&ubuntu_small(), &catalog).unwrap());
}

#[test]
fn test_missing_catalog_keys_render_placeholders() {
    let catalog = Catalog::new(BTreeMap::new(), BTreeMap::new());
    let choices = ChoiceSet::new(ImageFamily::AmazonLinux, InstanceSize::Medium, "us-east-1", "myalb");

    let rendered = TemplateRenderer::new().render(&choices, &catalog).unwrap();

    assert!(rendered.as_str().contains(&format!("\"{}\"", PLACEHOLDER_IMAGE_ID)));
    assert!(rendered
        .as_str()
        .contains(&format!("instance_type          = \"{}\"", PLACEHOLDER_INSTANCE_TYPE)));
}

#[test]
fn test_write_rendered_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("terraform").join("main.tf");

    let rendered = TemplateRenderer::new()
        .render(&ubuntu_small(), &Catalog::default())
        .unwrap();
    ConfigWriter::write(rendered.as_str(), &path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), rendered.as_str());
}
