/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
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

use thiserror::Error;
use odin_common::net::OdinNetError;

pub type Result<T> = std::result::Result<T, OdinFirmsError>;

#[derive(Error,Debug)]
pub enum OdinFirmsError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("HTTP {status} - {snippet}")]
    Transport { status: u16, snippet: String },

    #[error("net error {0}")]
    NetError(String),

    #[error("config error {0}")]
    ConfigError( #[from] odin_common::config::OdinConfigError),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("serde error {0}")]
    SerdeError( #[from] serde_json::Error),

    #[error("operation failed {0}")]
    OpFailed(String)
}

impl From<OdinNetError> for OdinFirmsError {
    fn from (e: OdinNetError)->Self {
        match e {
            OdinNetError::StatusError(status,snippet) => OdinFirmsError::Transport{ status, snippet },
            other => OdinFirmsError::NetError( other.to_string())
        }
    }
}

impl From<reqwest::Error> for OdinFirmsError {
    fn from (e: reqwest::Error)->Self { OdinFirmsError::NetError( e.to_string()) }
}

impl OdinFirmsError {
    /// is this a failure that happened before we did any network activity
    pub fn is_invalid_request (&self)->bool { matches!( self, OdinFirmsError::InvalidRequest(_)) }

    /// the HTTP status code if this was a non-success response
    pub fn status (&self)->Option<u16> {
        if let OdinFirmsError::Transport{status,..} = self { Some(*status) } else { None }
    }
}

macro_rules! invalid_request {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::OdinFirmsError::InvalidRequest( format!( $fmt $(, $arg)* ))
    };
}
pub(crate) use invalid_request;

macro_rules! op_failed {
    ($fmt:literal $(, $arg:expr )* ) => {
        $crate::errors::OdinFirmsError::OpFailed( format!( $fmt $(, $arg)* ))
    };
}
pub(crate) use op_failed;
