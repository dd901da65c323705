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

//! shared test fixtures: an in-memory FirmsFetcher with canned responses per source, and FIRMS CSV payloads

use std::{collections::HashMap, sync::{Arc,Mutex}, time::Duration};
use async_trait::async_trait;
use strum::IntoEnumIterator;

use odin_firms::{FirmsConfig, FirmsFetcher, FirmsSource, OdinFirmsError, Result};

pub const VIIRS_HEADER: &str = "latitude,longitude,bright_ti4,scan,track,acq_date,acq_time,satellite,instrument,confidence,version,bright_ti5,frp,daynight";

/// two detections, the first one also reported by NOAA-20
pub const SNPP_CSV: &str = "latitude,longitude,bright_ti4,scan,track,acq_date,acq_time,satellite,instrument,confidence,version,bright_ti5,frp,daynight
-19.12345,-60.54321,330.5,0.39,0.36,2024-08-15,530,N,VIIRS,n,2.0NRT,290.1,12.3,D
-20.00001,-61.00002,340.2,0.40,0.37,2024-08-15,1745,N,VIIRS,h,2.0NRT,295.3,75.0,D
";

/// same position (within 5 decimals), date and time as the first SNPP row, plus one NOAA-20 only detection
pub const NOAA20_CSV: &str = "latitude,longitude,bright_ti4,scan,track,acq_date,acq_time,satellite,instrument,confidence,version,bright_ti5,frp,daynight
-19.123451,-60.543209,331.0,0.41,0.38,2024-08-15,530,1,VIIRS,n,2.0NRT,291.0,13.0,D
-21.5,-59.25,325.7,0.45,0.39,2024-08-15,1800,1,VIIRS,l,2.0NRT,288.4,25.1,D
";

pub const TEST_BBOX: [f64;4] = [-64.9, -22.5, -57.0, -16.0];

pub fn test_config ()->FirmsConfig {
    FirmsConfig::new( "TESTKEY", TEST_BBOX.to_vec())
}

#[derive(Debug,Clone)]
pub enum MockResponse {
    Csv(String),
    Status(u16,String),
}

/// a FirmsFetcher that answers from a source->response map and records requested URLs
#[derive(Debug,Default)]
pub struct MockFetcher {
    responses: Mutex<HashMap<FirmsSource,MockResponse>>,
    delay: Mutex<Duration>,
    urls: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new ()->Self { Self::default() }

    pub fn with_csv (self, source: FirmsSource, csv: &str)->Self {
        self.set_response( source, MockResponse::Csv( csv.to_string()));
        self
    }

    pub fn with_status (self, source: FirmsSource, status: u16, body: &str)->Self {
        self.set_response( source, MockResponse::Status( status, body.to_string()));
        self
    }

    pub fn with_delay (self, delay: Duration)->Self {
        *self.delay.lock().unwrap() = delay;
        self
    }

    pub fn set_response (&self, source: FirmsSource, response: MockResponse) {
        self.responses.lock().unwrap().insert( source, response);
    }

    pub fn n_calls (&self)->usize { self.urls.lock().unwrap().len() }

    pub fn urls (&self)->Vec<String> { self.urls.lock().unwrap().clone() }
}

#[async_trait]
impl FirmsFetcher for MockFetcher {
    async fn fetch_csv (&self, url: &str)->Result<String> {
        self.urls.lock().unwrap().push( url.to_string());

        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep( delay).await;
        }

        let response = FirmsSource::iter()
            .find( |s| url.contains( &format!("/{}/", s)))
            .and_then( |s| self.responses.lock().unwrap().get(&s).cloned());

        match response {
            Some(MockResponse::Csv(csv)) => Ok(csv),
            Some(MockResponse::Status(status,body)) => Err( OdinFirmsError::Transport{ status, snippet: body }),
            None => Err( OdinFirmsError::Transport{ status: 404, snippet: "Not Found".to_string() })
        }
    }
}

/// a status sink closure that records all messages
pub fn status_recorder ()->(Arc<Mutex<Vec<String>>>, impl FnMut(&str) + Send + 'static) {
    let messages = Arc::new( Mutex::new( Vec::<String>::new()));
    let msgs = messages.clone();
    (messages, move |msg: &str| msgs.lock().unwrap().push( msg.to_string()))
}
