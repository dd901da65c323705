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

//! crate to import near-real-time hotspot detections from the NASA FIRMS area API and turn them into
//! a styled, de-duplicated point layer.
//!
//! The data flow of one refresh cycle is
//! [`request`] (URL per source) → [`transport`] (concurrent fetch) → [`csv_normalizer`] →
//! [`dedupe`] → [`style`] → [`render`] surface, sequenced by the [`pipeline`] orchestrator, which in
//! turn is driven by UI triggers and a timer in the [`monitor`] task.

use std::{fmt, time::Duration};
use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize};
use strum::{Display,EnumString,EnumIter,AsRefStr};

use odin_common::{define_load_config, datetime::{minutes, utc_from_date_hm}};

pub mod errors;
pub use errors::{OdinFirmsError,Result};

pub mod request;
pub use request::*;

pub mod transport;
pub use transport::*;

pub mod csv_normalizer;
pub use csv_normalizer::*;

pub mod dedupe;
pub use dedupe::*;

pub mod style;
pub use style::*;

pub mod render;
pub use render::*;

pub mod pipeline;
pub use pipeline::*;

pub mod monitor;
pub use monitor::*;

define_load_config!{}

pub const DEFAULT_SERVER: &str = "https://firms.modaps.eosdis.nasa.gov";

/* #region FIRMS data structures ***************************************************************************/

/// the FIRMS area API products (satellite/sensor combinations) we can request
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize,Display,EnumString,EnumIter,AsRefStr)]
pub enum FirmsSource {
    #[serde(rename="VIIRS_SNPP_NRT")]   #[strum(serialize="VIIRS_SNPP_NRT")]   ViirsSnppNrt,
    #[serde(rename="VIIRS_NOAA20_NRT")] #[strum(serialize="VIIRS_NOAA20_NRT")] ViirsNoaa20Nrt,
    #[serde(rename="VIIRS_NOAA21_NRT")] #[strum(serialize="VIIRS_NOAA21_NRT")] ViirsNoaa21Nrt,
    #[serde(rename="VIIRS_SNPP_SP")]    #[strum(serialize="VIIRS_SNPP_SP")]    ViirsSnppSp,
    #[serde(rename="VIIRS_NOAA20_SP")]  #[strum(serialize="VIIRS_NOAA20_SP")]  ViirsNoaa20Sp,
    #[serde(rename="MODIS_NRT")]        #[strum(serialize="MODIS_NRT")]        ModisNrt,
    #[serde(rename="MODIS_SP")]         #[strum(serialize="MODIS_SP")]         ModisSp,
    #[serde(rename="LANDSAT_NRT")]      #[strum(serialize="LANDSAT_NRT")]      LandsatNrt,
}

impl FirmsSource {
    /// the VIIRS near-real-time products we show if nothing else is configured
    pub fn defaults()->Vec<FirmsSource> {
        vec![ FirmsSource::ViirsSnppNrt, FirmsSource::ViirsNoaa20Nrt, FirmsSource::ViirsNoaa21Nrt ]
    }

    pub fn id (&self)->&str { self.as_ref() }
}

/// WGS84 position in decimal degrees
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64
}

impl LonLat {
    pub fn new (lon: f64, lat: f64)->Self { LonLat{lon,lat} }

    pub fn is_finite (&self)->bool { self.lon.is_finite() && self.lat.is_finite() }
}

impl fmt::Display for LonLat {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        write!( f, "{:.5},{:.5}", self.lon, self.lat)
    }
}

/// a single hotspot observation as we get it from one of the FIRMS products.
/// All attribute values are kept as the text we got from the CSV (FIRMS products differ in what they use
/// for confidence), derived numeric values are computed on demand
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct Detection {
    pub source: FirmsSource,
    pub position: LonLat,
    pub acq_date: String,   // YYYY-MM-DD
    pub acq_time: String,   // HH:MM (UTC)
    pub confidence: String, // low|nominal|high (VIIRS) or percentage (MODIS)
    pub frp: String,        // fire radiative power in MW, might be empty
    pub satellite: String,
    pub instrument: String,
}

impl Detection {
    pub fn has_geometry (&self)->bool { self.position.is_finite() }

    pub fn frp_value (&self)->Option<f64> {
        self.frp.trim().parse::<f64>().ok().filter( |v| v.is_finite())
    }

    pub fn acquired (&self)->Option<DateTime<Utc>> {
        utc_from_date_hm( &self.acq_date, &self.acq_time)
    }
}

/* #endregion FIRMS data structures */

/* #region config ******************************************************************************************/

/// the static part of our configuration. This is loaded once (e.g. from `firms.ron`) and then shared
/// read-only by the pipeline. What can change at runtime is in [`Selection`]
#[derive(Serialize,Deserialize,Debug,Clone)]
pub struct FirmsConfig {
    #[serde(default="default_server")]
    pub server: String,

    pub map_key: String,

    /// [west,south,east,north] in decimal degrees. Validated when we build requests
    pub bbox: Vec<f64>,

    #[serde(default="FirmsSource::defaults")]
    pub default_sources: Vec<FirmsSource>,

    /// day window used if the UI doesn't provide a valid one
    #[serde(default="default_days")]
    pub default_days: i64,

    #[serde(default="default_refresh_interval")]
    pub refresh_interval: Duration,

    #[serde(default)]
    pub request_timeout: Option<Duration>,

    /// additional "<name>: <value>" request headers
    #[serde(default)]
    pub headers: Vec<String>,
}

fn default_server()->String { DEFAULT_SERVER.to_string() }
fn default_days()->i64 { DayWindow::UI_DEFAULT }
fn default_refresh_interval()->Duration { minutes(15) }

impl FirmsConfig {
    pub fn new (map_key: impl ToString, bbox: Vec<f64>)->Self {
        FirmsConfig {
            server: default_server(),
            map_key: map_key.to_string(),
            bbox,
            default_sources: FirmsSource::defaults(),
            default_days: default_days(),
            refresh_interval: default_refresh_interval(),
            request_timeout: None,
            headers: Vec::new(),
        }
    }

    /// the selection we start with before the UI pushes anything
    pub fn initial_selection (&self)->Selection {
        Selection {
            enabled: true,
            days: DayWindow::new( self.default_days),
            sources: self.default_sources.clone()
        }
    }
}

/* #endregion config */
