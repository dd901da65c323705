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

use std::fmt;
use serde::{Serialize,Deserialize};

pub mod macros;
pub mod datetime;
pub mod net;
pub mod config;

/// a geographic bounding box in decimal degrees, ordered the way most area APIs expect it: west,south,east,north
#[derive(Debug,Copy,Clone,Serialize,Deserialize,PartialEq)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64
}

impl BoundingBox {
    pub fn new (west: f64, south: f64, east: f64, north: f64)->Self {
        BoundingBox{ west, south, east, north }
    }

    pub fn from_wsen (wsen: &[f64;4])->Self {
        BoundingBox{ west: wsen[0], south: wsen[1], east: wsen[2], north: wsen[3] }
    }

    /// this is the checked ctor for externally provided sequences - anything that is not exactly
    /// four ordered values is rejected
    pub fn from_slice (wsen: &[f64])->Option<Self> {
        let a: &[f64;4] = wsen.try_into().ok()?;
        Some( Self::from_wsen(a))
    }

    pub fn to_minmax_array (&self)->[f64;4] {
        [self.west, self.south, self.east, self.north]
    }

    pub fn center (&self)->(f64,f64) {
        ( (self.west + self.east) / 2.0, (self.south + self.north) / 2.0 )
    }

    pub fn contains (&self, lon: f64, lat: f64)->bool {
        lon >= self.west && lon <= self.east && lat >= self.south && lat <= self.north
    }
}

/// comma separated "w,s,e,n" (shortest float representation, i.e. -57.0 is written as "-57")
impl fmt::Display for BoundingBox {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        write!( f, "{},{},{},{}", self.west, self.south, self.east, self.north)
    }
}
