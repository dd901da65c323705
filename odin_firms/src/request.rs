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

use std::fmt;
use serde::{Serialize,Deserialize};
use odin_common::BoundingBox;

use crate::{FirmsSource, errors::{Result, invalid_request}};

/// number of days (counting back from today) a FIRMS area request covers. Always within [MIN..=MAX]
#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Serialize,Deserialize)]
#[serde(from="i64", into="i64")]
pub struct DayWindow(u8);

impl DayWindow {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 10;

    /// what we use for missing or non-numeric input when building requests
    pub const REQUEST_DEFAULT: i64 = 1;

    /// what we use for missing or non-numeric input coming from the UI
    pub const UI_DEFAULT: i64 = 3;

    pub fn new (days: i64)->Self {
        DayWindow( days.clamp( Self::MIN, Self::MAX) as u8)
    }

    /// parse user input. Empty, zero or non-numeric input maps to `default`, fractional values are truncated.
    /// The result is always clamped, including the default
    pub fn parse (input: &str, default: i64)->Self {
        let days = match input.trim().parse::<f64>() {
            Ok(v) if !v.is_nan() && v != 0.0 => v.trunc() as i64, // 'as' saturates infinities
            _ => default
        };
        Self::new(days)
    }

    pub fn days (&self)->u8 { self.0 }
}

impl Default for DayWindow {
    fn default()->Self { DayWindow::new( Self::REQUEST_DEFAULT) }
}

impl From<i64> for DayWindow {
    fn from (days: i64)->Self { DayWindow::new(days) }
}

impl From<DayWindow> for i64 {
    fn from (dw: DayWindow)->Self { dw.0 as i64 }
}

impl fmt::Display for DayWindow {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        write!( f, "{}", self.0)
    }
}

/// a validated area request for one FIRMS source
#[derive(Debug,Clone,PartialEq)]
pub struct SourceRequest {
    pub map_key: String,
    pub source: FirmsSource,
    pub bbox: BoundingBox,
    pub days: DayWindow,
}

impl SourceRequest {
    /// this is where we reject malformed input, before anything goes out on the wire
    pub fn new (map_key: &str, source: FirmsSource, bbox: &[f64], days: DayWindow)->Result<Self> {
        if map_key.trim().is_empty() {
            return Err( invalid_request!("empty map key"))
        }
        let bbox = BoundingBox::from_slice( bbox)
            .ok_or_else( || invalid_request!("bounding box needs [west,south,east,north], got {} values", bbox.len()))?;

        Ok( SourceRequest{ map_key: map_key.to_string(), source, bbox, days } )
    }

    /// `<server>/api/area/csv/<map-key>/<source>/<w,s,e,n>/<days>`
    pub fn url (&self, server: &str)->String {
        format!("{}/api/area/csv/{}/{}/{}/{}", server.trim_end_matches('/'), self.map_key, self.source, self.bbox, self.days)
    }
}

/// build the area retrieval URL for a single source. This fails with `InvalidRequest` if `bbox` does not
/// have exactly 4 elements or the map key is empty
pub fn build_area_url (server: &str, map_key: &str, source: FirmsSource, bbox: &[f64], days: DayWindow)->Result<String> {
    Ok( SourceRequest::new( map_key, source, bbox, days)?.url( server) )
}
