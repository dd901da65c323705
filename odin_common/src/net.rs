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

//! common utility functions for network operations

use reqwest::{header::{HeaderMap,HeaderName,HeaderValue,CACHE_CONTROL}, Client};
use tracing::debug;

use crate::define_error;

/// max number of body characters we keep for non-success responses
pub const MAX_BODY_SNIPPET: usize = 120;

define_error!{ pub OdinNetError =
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    StatusError(u16, String) : "HTTP {0} - {1}",
    OpFailed(String) : "operation failed: {0}"
}

pub type Result<T> = std::result::Result<T, OdinNetError>;

/// parse a list of "<name>: <value>" header specs
pub fn get_headermap (headers: &[String])->Result<HeaderMap> {
    let mut hm = HeaderMap::new();
    for h in headers {
        if let Some(idx) = h.find(':') {
            let k = h[0..idx].trim();
            let v = h[idx+1..].trim();
            hm.append(
                HeaderName::from_bytes( k.as_bytes()).map_err(|e| OdinNetError::OpFailed(e.to_string()))?,
                HeaderValue::from_str(v).map_err(|e| OdinNetError::OpFailed(e.to_string()))?
            );
        }
    }
    Ok(hm)
}

/// retrieve the text body of a HTTP GET request, bypassing caches.
/// Non-success responses are reported as `StatusError` with the status code and up to [`MAX_BODY_SNIPPET`]
/// characters of the body. If that body can't be read we use an empty snippet
pub async fn fetch_text (client: &Client, url: &str, opt_headers: &Option<HeaderMap>)->Result<String> {
    let mut req = client.get(url).header( CACHE_CONTROL, "no-cache");
    if let Some(headermap) = opt_headers {
        req = req.headers(headermap.clone())
    }

    let response = req.send().await?;
    let status = response.status();
    debug!("GET {} -> {}", redact_url(url), status);

    if status.is_success() {
        Ok( response.text().await? )
    } else {
        let body = response.text().await.unwrap_or_default();
        Err( OdinNetError::StatusError( status.as_u16(), body_snippet( &body, MAX_BODY_SNIPPET)) )
    }
}

/// the first `max_chars` characters of `s` (char based so that we never split a UTF-8 sequence)
pub fn body_snippet (s: &str, max_chars: usize)->String {
    match s.char_indices().nth(max_chars) {
        Some((idx,_)) => s[..idx].to_string(),
        None => s.to_string()
    }
}

/// strip everything after the path prefix of an URL so that embedded keys don't end up in logs.
/// We keep scheme, host and the first two path elements
pub fn redact_url (url: &str)->String {
    let (scheme, rest) = match url.find("://") {
        Some(i) => (&url[..i+3], &url[i+3..]),
        None => ("", url)
    };
    let mut parts = rest.splitn( 4, '/');
    let host = parts.next().unwrap_or_default();
    let p1 = parts.next();
    let p2 = parts.next();
    let tail = parts.next();

    let mut s = format!("{scheme}{host}");
    for p in [p1,p2].into_iter().flatten() {
        s.push('/');
        s.push_str(p);
    }
    if tail.is_some() { s.push_str("/…") }
    s
}
