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

//! turn FIRMS area CSV text into [`Detection`] values.
//!
//! FIRMS products differ in the columns they provide (e.g. VIIRS `bright_ti4` vs. MODIS `brightness`,
//! categorical vs. percentage `confidence`), hence we don't deserialize into a fixed record type but
//! resolve the columns we need by header name once per payload.
//!
//! NOTE - fields are split strictly on ',' and quotes have no special meaning. FIRMS area CSVs don't
//! contain quoted fields, should that change we have to turn on quoting in [`csv_reader`]

use csv::{ReaderBuilder,StringRecord,Trim};
use tracing::{debug,warn};

use crate::{Detection,FirmsSource,LonLat};

/// column positions of the fields we use, resolved from the header row. Missing columns are `None`
#[derive(Debug,Clone,Default,PartialEq)]
pub struct ColumnMap {
    pub latitude: Option<usize>,
    pub longitude: Option<usize>,
    pub acq_date: Option<usize>,
    pub acq_time: Option<usize>,
    pub confidence: Option<usize>,
    pub frp: Option<usize>,
    pub satellite: Option<usize>,
    pub instrument: Option<usize>,
}

impl ColumnMap {
    pub fn from_header (header: &StringRecord)->Self {
        let idx = |name: &str| header.iter().position( |h| h.trim() == name);

        ColumnMap {
            latitude: idx("latitude"),
            longitude: idx("longitude"),
            acq_date: idx("acq_date"),
            acq_time: idx("acq_time"),
            confidence: idx("confidence"),
            frp: idx("frp"),
            satellite: idx("satellite"),
            instrument: idx("instrument"),
        }
    }

    /// without both coordinate columns no row can be valid
    pub fn has_position (&self)->bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// read a field, failing closed: absent column or short row give us ""
    fn field<'a> (record: &'a StringRecord, idx: Option<usize>)->&'a str {
        idx.and_then( |i| record.get(i)).map( |s| s.trim()).unwrap_or("")
    }

    /// create a Detection from a data record, or None if we can't get a finite position
    pub fn detection (&self, record: &StringRecord, source: FirmsSource)->Option<Detection> {
        let lat = parse_coordinate( Self::field( record, self.latitude))?;
        let lon = parse_coordinate( Self::field( record, self.longitude))?;

        Some( Detection {
            source,
            position: LonLat::new( lon, lat),
            acq_date: Self::field( record, self.acq_date).to_string(),
            acq_time: normalize_time( Self::field( record, self.acq_time)),
            confidence: Self::field( record, self.confidence).to_string(),
            frp: Self::field( record, self.frp).to_string(),
            satellite: Self::field( record, self.satellite).to_string(),
            instrument: Self::field( record, self.instrument).to_string(),
        })
    }
}

/// a reader that splits on ',' only, accepts rows of any length and leaves fields untouched
pub fn csv_reader (input: &[u8])->csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers( true)
        .delimiter( b',')
        .quoting( false)
        .flexible( true)
        .trim( Trim::None)
        .from_reader( input)
}

/// parse FIRMS area CSV text (header row + data rows) into Detections, preserving row order.
/// Rows without a parseable finite latitude/longitude are skipped. Input without data rows yields
/// an empty vec
pub fn parse_detections (csv_text: &str, source: FirmsSource)->Vec<Detection> {
    let text = csv_text.trim();
    if text.is_empty() { return Vec::new() }

    let mut rdr = csv_reader( text.as_bytes());
    let columns = match rdr.headers() {
        Ok(header) => ColumnMap::from_header( header),
        Err(e) => {
            warn!("unreadable {} header: {}", source, e);
            return Vec::new()
        }
    };
    if !columns.has_position() {
        debug!("{} payload has no latitude/longitude columns", source);
    }

    let mut detections: Vec<Detection> = Vec::new();
    let mut n_skipped = 0;
    let mut record = StringRecord::new();

    loop {
        match rdr.read_record( &mut record) {
            Ok(true) => {
                match columns.detection( &record, source) {
                    Some(d) => detections.push(d),
                    None => n_skipped += 1
                }
            }
            Ok(false) => break,
            Err(e) => { // row level problem, skip it like any other invalid row
                debug!("{} skipping unreadable row: {}", source, e);
                n_skipped += 1;
            }
        }
    }

    if n_skipped > 0 {
        debug!("{}: {} detections, {} rows without valid position", source, detections.len(), n_skipped);
    }
    detections
}

/// a latitude or longitude value, `None` unless it is a finite number. The whole (trimmed) field has to
/// parse, hence values with trailing garbage such as "-60.5x" are rejected and their rows are skipped
pub fn parse_coordinate (s: &str)->Option<f64> {
    s.trim().parse::<f64>().ok().filter( |v| v.is_finite())
}

/// FIRMS reports acquisition time as HHMM without leading zeros (e.g. "530" for 05:30 UTC).
/// We left-pad to 4 digits and return "HH:MM". Empty input becomes "00:00"
pub fn normalize_time (raw: &str)->String {
    let raw = raw.trim();
    let n = raw.chars().count();
    let padded: Vec<char> = std::iter::repeat_n( '0', 4usize.saturating_sub(n)).chain( raw.chars()).collect();

    let hh: String = padded[0..2].iter().collect();
    let mm: String = padded[2..4].iter().collect();
    format!("{hh}:{mm}")
}
