/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

use std::{fs, time::Duration};
use serde::Deserialize;
use odin_common::config::{OdinConfigError, find_config_file, load_config_from, load_config_path};

#[derive(Deserialize,Debug,PartialEq)]
struct TestConfig {
    name: String,
    bbox: Vec<f64>,
    interval: Duration,
    timeout: Option<Duration>,
}

const TEST_CONFIG: &str = r#"
// a comment
TestConfig(
    name: "test",
    bbox: [-64.9, -22.5, -57.0, -16.0],
    interval: (secs: 900, nanos: 0),
    timeout: Some((secs: 5, nanos: 0)),
)
"#;

#[test]
fn test_load_config_path () {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.ron");
    fs::write( &path, TEST_CONFIG).unwrap();

    let config: TestConfig = load_config_path( &path).unwrap();
    println!("{config:?}");
    assert_eq!( config.name, "test");
    assert_eq!( config.bbox.len(), 4);
    assert_eq!( config.interval, Duration::from_secs(900));
    assert_eq!( config.timeout, Some( Duration::from_secs(5)));
}

#[test]
fn test_crate_configs_dir () {
    let crate_dir = tempfile::tempdir().unwrap();
    let configs = crate_dir.path().join("configs");
    fs::create_dir( &configs).unwrap();
    fs::write( configs.join("test.ron"), TEST_CONFIG).unwrap();

    let crate_dir = crate_dir.path().to_str().unwrap();
    assert!( find_config_file( crate_dir, "test.ron").is_some());

    let config: TestConfig = load_config_from( crate_dir, "test.ron").unwrap();
    assert_eq!( config.name, "test");

    let res: Result<TestConfig,_> = load_config_from( crate_dir, "missing.ron");
    assert!( matches!( res, Err(OdinConfigError::ConfigNotFound(_))));
}

#[test]
fn test_malformed_config () {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.ron");
    fs::write( &path, "TestConfig( name: 42 )").unwrap();

    let res: Result<TestConfig,_> = load_config_path( &path);
    assert!( matches!( res, Err(OdinConfigError::RonError(_))));
}
