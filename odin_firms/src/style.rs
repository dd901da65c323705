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

//! derived visual encoding of detections. Nothing in here is stored with a Detection, styles are
//! recomputed on each render pass

use serde::Serialize;
use strum::{Display,AsRefStr};

use crate::Detection;

pub const HIGH_CONFIDENCE: f64 = 80.0;
pub const NOMINAL_CONFIDENCE: f64 = 40.0;
pub const LOW_CONFIDENCE: f64 = 1.0;

pub const LARGE_FRP: f64 = 50.0; // MW
pub const MEDIUM_FRP: f64 = 20.0;

pub const STROKE_WEIGHT: u32 = 1;
pub const FILL_OPACITY: f64 = 0.8;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Display,AsRefStr)]
#[serde(rename_all="lowercase")]
#[strum(serialize_all="lowercase")]
pub enum ColorTier {
    High,
    Nominal,
    Low,
    Unknown
}

impl ColorTier {
    /// (stroke, fill) colors
    pub fn colors (&self)->(&'static str, &'static str) {
        match self {
            ColorTier::High => ("#ff0000", "#ff0000"),
            ColorTier::Nominal => ("#ff8c00", "#ff8c00"),
            ColorTier::Low => ("#ffd000", "#ffd000"),
            ColorTier::Unknown => ("#0d00ff", "#2f00ff"),
        }
    }

    pub fn color (&self)->&'static str { self.colors().0 }
    pub fn fill_color (&self)->&'static str { self.colors().1 }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Display,AsRefStr)]
#[serde(rename_all="lowercase")]
#[strum(serialize_all="lowercase")]
pub enum MarkerRadius {
    Small,
    Medium,
    Large
}

impl MarkerRadius {
    pub fn pixels (&self)->u32 {
        match self {
            MarkerRadius::Small => 4,
            MarkerRadius::Medium => 6,
            MarkerRadius::Large => 8,
        }
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Serialize)]
pub struct MarkerStyle {
    pub tier: ColorTier,
    pub radius: MarkerRadius,
}

impl MarkerStyle {
    pub fn color (&self)->&'static str { self.tier.color() }
    pub fn fill_color (&self)->&'static str { self.tier.fill_color() }
    pub fn radius_pixels (&self)->u32 { self.radius.pixels() }
    pub fn weight (&self)->u32 { STROKE_WEIGHT }
    pub fn fill_opacity (&self)->f64 { FILL_OPACITY }
}

/// the style for a (confidence,frp) pair
pub fn resolve_style (confidence: &str, frp: &str)->MarkerStyle {
    MarkerStyle {
        tier: confidence_tier( confidence),
        radius: frp_radius( frp)
    }
}

pub fn detection_style (d: &Detection)->MarkerStyle {
    resolve_style( &d.confidence, &d.frp)
}

/// VIIRS products report confidence as low|nominal|high (or l|n|h), MODIS products as percentage.
/// Rules are checked in order, the first match wins. Note the letter check applies to the whole text,
/// i.e. anything that contains an 'h' is high
pub fn confidence_tier (confidence: &str)->ColorTier {
    let v = confidence.trim().to_lowercase();
    let pct = v.parse::<f64>().ok().filter( |x| !x.is_nan());
    let at_least = |threshold: f64| pct.is_some_and( |x| x >= threshold);

    if v.contains('h') || at_least( HIGH_CONFIDENCE) {
        ColorTier::High
    } else if v.contains('n') || at_least( NOMINAL_CONFIDENCE) {
        ColorTier::Nominal
    } else if v.contains('l') || at_least( LOW_CONFIDENCE) {
        ColorTier::Low
    } else {
        ColorTier::Unknown
    }
}

/// marker size by fire radiative power. Anything we can't parse is small
pub fn frp_radius (frp: &str)->MarkerRadius {
    match frp.trim().parse::<f64>().ok().filter( |v| v.is_finite()) {
        Some(v) if v > LARGE_FRP => MarkerRadius::Large,
        Some(v) if v > MEDIUM_FRP => MarkerRadius::Medium,
        _ => MarkerRadius::Small
    }
}
