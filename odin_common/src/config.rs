/*
 * Copyright (c) 2024, United States Government, as represented by the
 * Administrator of the National Aeronautics and Space Administration.
 * All rights reserved.
 *
 * The ODIN - Open Data Integration Framework is licensed under the
 * Apache License, Version 2.0 (the "License"); you may not use this file
 * except in compliance with the License. You may obtain a copy of the
 * License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! RON based config file lookup and loading.
//!
//! Config files are looked up (in this order) in
//!   - the directory set by the `ODIN_CONFIG_DIR` environment var
//!   - `./configs/` of the current working dir
//!   - the `configs/` dir of the crate that defines the config (set at compile time)
//!
//! Crates that define configs should expand [`define_load_config`] at the top of their lib.rs, which
//! gives them a `load_config(filename)` function that knows the crate `configs/` dir.

use std::{env, fs, path::{Path,PathBuf}};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::define_error;

pub const CONFIGS: &str = "configs";
pub const CONFIG_DIR_ENV: &str = "ODIN_CONFIG_DIR";

define_error!{ pub OdinConfigError =
    IOError(#[from] std::io::Error) : "IO error {0}",
    RonError(#[from] ron::error::SpannedError) : "config RON error {0}",
    ConfigNotFound(String) : "config not found {0}"
}

pub type Result<T> = std::result::Result<T, OdinConfigError>;

pub fn find_config_file (crate_dir: &str, filename: &str)->Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::with_capacity(3);
    if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
        candidates.push( Path::new(&dir).join(filename));
    }
    candidates.push( Path::new(CONFIGS).join(filename));
    candidates.push( Path::new(crate_dir).join(CONFIGS).join(filename));

    candidates.into_iter().find( |p| p.is_file())
}

/// load config from explicit pathname
pub fn load_config_path<C> (path: impl AsRef<Path>)->Result<C> where C: DeserializeOwned {
    let path = path.as_ref();
    debug!("loading config {:?}", path);
    let data = fs::read_to_string(path)?;
    Ok( ron::from_str( &data)? )
}

/// look up config file `filename` (see module doc) and deserialize it
pub fn load_config_from<C> (crate_dir: &str, filename: &str)->Result<C> where C: DeserializeOwned {
    match find_config_file( crate_dir, filename) {
        Some(path) => load_config_path( path),
        None => Err( OdinConfigError::ConfigNotFound( filename.to_string()))
    }
}

/// this is the macro that needs to be expanded at the top of crates (lib.rs) that define configs.
/// Config users call the defined `load_config(..)` function to instantiate config structs
#[macro_export]
macro_rules! define_load_config {
    () => {
        /// load config using the odin_common lookup mechanism (env dir, ./configs, crate configs)
        pub fn load_config<C> (filename: &str)->odin_common::config::Result<C> where C: serde::de::DeserializeOwned {
            odin_common::config::load_config_from( env!("CARGO_MANIFEST_DIR"), filename)
        }
    }
}
pub use define_load_config;
