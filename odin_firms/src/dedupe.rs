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

use std::collections::HashSet;
use tracing::debug;

use crate::Detection;

/// decimal places of lon/lat that make two detections the same
pub const KEY_PRECISION: usize = 5;

/// what makes two detections the same observation, no matter which source reported them:
/// position rounded to [`KEY_PRECISION`] decimals (see [`fixed_decimals`]), acquisition date and time
#[derive(Debug,Clone,PartialEq,Eq,Hash)]
pub struct IdentityKey {
    lon: String,
    lat: String,
    date: String,
    time: String,
}

impl IdentityKey {
    /// None if the detection has no usable geometry
    pub fn of (d: &Detection)->Option<IdentityKey> {
        if !d.has_geometry() { return None }

        Some( IdentityKey {
            lon: fixed_decimals( d.position.lon, KEY_PRECISION),
            lat: fixed_decimals( d.position.lat, KEY_PRECISION),
            date: d.acq_date.clone(),
            time: d.acq_time.clone(),
        })
    }
}

/// format `v` with `digits` fraction digits. Unlike `format!("{:.*}")` this rounds values that lie
/// exactly halfway between two candidates away from zero (-22.015625 becomes "-22.01563")
pub fn fixed_decimals (v: f64, digits: usize)->String {
    let mag = v.abs();

    // the first 60 extra digits are exact for anything that can be a coordinate
    let exact = format!("{:.*}", digits + 60, mag);
    let is_tie = exact.split_once('.').is_some_and( |(_,frac)| {
        let tail = &frac[digits..];
        tail.starts_with('5') && tail[1..].bytes().all( |b| b == b'0')
    });

    let mag = if is_tie { mag + 0.25 * 10f64.powi( -(digits as i32)) } else { mag };
    let s = format!("{:.*}", digits, mag);
    if v < 0.0 { format!("-{s}") } else { s }
}

/// remove detections with duplicate [`IdentityKey`]s. The first one we see wins and the
/// result keeps the input order. Detections without geometry are dropped
pub fn dedupe_detections (detections: Vec<Detection>)->Vec<Detection> {
    let n_in = detections.len();
    let mut seen: HashSet<IdentityKey> = HashSet::with_capacity( n_in);
    let mut unique: Vec<Detection> = Vec::with_capacity( n_in);

    for d in detections {
        if let Some(key) = IdentityKey::of( &d) {
            if seen.insert( key) {
                unique.push( d);
            }
        }
    }

    debug!("dedupe: {} -> {} detections", n_in, unique.len());
    unique
}
