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

use async_trait::async_trait;
use reqwest::{Client,header::HeaderMap};
use odin_common::net::{fetch_text,get_headermap};

use crate::{FirmsConfig, errors::Result};

/// the abstraction of how we retrieve CSV text for a given request URL.
/// Implementations do not cache or retry - each call has to get fresh data, and whoever calls
/// this decides if and when to try again
#[async_trait]
pub trait FirmsFetcher: Send + Sync + 'static {
    /// return the response body. Non-success responses have to be reported as [`crate::OdinFirmsError::Transport`]
    async fn fetch_csv (&self, url: &str)->Result<String>;
}

/// the reqwest based FirmsFetcher we use to talk to the FIRMS server
#[derive(Debug,Clone)]
pub struct HttpFetcher {
    client: Client,
    headers: Option<HeaderMap>
}

impl HttpFetcher {
    pub fn new (config: &FirmsConfig)->Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout( timeout);
        }
        let client = builder.build()?;

        let headers = get_headermap( &config.headers)?;
        let headers = if headers.is_empty() { None } else { Some(headers) };

        Ok( HttpFetcher{ client, headers } )
    }

    pub fn with_client (client: Client)->Self {
        HttpFetcher{ client, headers: None }
    }
}

#[async_trait]
impl FirmsFetcher for HttpFetcher {
    async fn fetch_csv (&self, url: &str)->Result<String> {
        Ok( fetch_text( &self.client, url, &self.headers).await? )
    }
}
