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

//! the collaborators the pipeline renders into: a [`RenderSurface`] that holds the styled hotspot
//! layer and a [`StatusSink`] for human readable state. Both are owned (and only mutated) by the
//! pipeline orchestrator

use std::{fs, path::{Path,PathBuf}};
use geojson::{Feature,FeatureCollection,Geometry,JsonObject,Value};
use serde_json::json;
use tokio::sync::watch;
use tracing::{info,error};

use crate::{Detection,LonLat,style::{MarkerStyle,detection_style}, errors::Result};

/// a point marker with resolved style and popup text, ready to be put on a map
#[derive(Debug,Clone,PartialEq)]
pub struct StyledMarker {
    pub position: LonLat,
    pub style: MarkerStyle,
    pub popup: String,
    pub detection: Detection,
}

impl StyledMarker {
    pub fn new (detection: Detection)->Self {
        StyledMarker {
            position: detection.position,
            style: detection_style( &detection),
            popup: popup_content( &detection),
            detection
        }
    }

    pub fn to_feature (&self)->Feature {
        let d = &self.detection;
        let s = &self.style;

        let mut properties = JsonObject::new();
        properties.insert( "source".into(), json!( d.source.id()));
        properties.insert( "acq_date".into(), json!( d.acq_date));
        properties.insert( "acq_time".into(), json!( d.acq_time));
        properties.insert( "confidence".into(), json!( d.confidence));
        properties.insert( "frp".into(), json!( d.frp));
        properties.insert( "satellite".into(), json!( d.satellite));
        properties.insert( "instrument".into(), json!( d.instrument));
        properties.insert( "tier".into(), json!( s.tier.as_ref()));
        properties.insert( "color".into(), json!( s.color()));
        properties.insert( "fillColor".into(), json!( s.fill_color()));
        properties.insert( "radius".into(), json!( s.radius_pixels()));
        properties.insert( "weight".into(), json!( s.weight()));
        properties.insert( "fillOpacity".into(), json!( s.fill_opacity()));
        properties.insert( "popup".into(), json!( self.popup));

        Feature {
            bbox: None,
            geometry: Some( Geometry::new( Value::Point( vec![ self.position.lon, self.position.lat ]))),
            id: None,
            properties: Some( properties),
            foreign_members: None
        }
    }
}

pub fn popup_content (d: &Detection)->String {
    let instrument = if d.instrument.is_empty() { "FIRMS" } else { d.instrument.as_str() };
    format!("<b>{} hotspot</b><br>Date: {} {}<br>Confidence: {}<br>FRP: {}<br>Satellite: {}",
            instrument, d.acq_date, d.acq_time, d.confidence, d.frp, d.satellite)
}

/// what we need from a map layer. Implementations are external collaborators (map widgets, files,
/// web socket clients etc.) - the pipeline only clears and fills the layer as a whole
pub trait RenderSurface: Send + 'static {
    /// remove all markers
    fn clear (&mut self);

    fn add_marker (&mut self, marker: StyledMarker);

    /// add the layer to the map
    fn show_layer (&mut self);

    /// remove the layer from the map (keeping its contents)
    fn hide_layer (&mut self);

    fn is_layer_shown (&self)->bool;

    /// notification that a clear or a complete rebuild is done
    fn layer_updated (&mut self) {}
}

/// where we report pipeline state to ("downloading…", "showing N detections", "error: ..")
pub trait StatusSink: Send + 'static {
    fn set_status (&mut self, msg: &str);
}

/// status sink that only logs
#[derive(Debug,Default,Clone,Copy)]
pub struct LogStatus;

impl StatusSink for LogStatus {
    fn set_status (&mut self, msg: &str) {
        info!("status: {}", msg);
    }
}

impl<F> StatusSink for F where F: FnMut(&str) + Send + 'static {
    fn set_status (&mut self, msg: &str) {
        self(msg)
    }
}

/// lets any number of watch receivers (e.g. UI tasks) see the last status
impl StatusSink for watch::Sender<String> {
    fn set_status (&mut self, msg: &str) {
        self.send_replace( msg.to_string());
    }
}

/* #region GeoJSON layers *************************************************************************************/

/// in-memory layer that can be turned into a GeoJSON FeatureCollection of styled points
#[derive(Debug,Clone)]
pub struct GeoJsonLayer {
    markers: Vec<StyledMarker>,
    shown: bool,
}

impl GeoJsonLayer {
    pub fn new ()->Self { GeoJsonLayer { markers: Vec::new(), shown: true } }

    pub fn markers (&self)->&[StyledMarker] { &self.markers }
    pub fn len (&self)->usize { self.markers.len() }
    pub fn is_empty (&self)->bool { self.markers.is_empty() }

    pub fn to_feature_collection (&self)->FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.markers.iter().map( |m| m.to_feature()).collect(),
            foreign_members: None
        }
    }

    pub fn to_json (&self)->String {
        self.to_feature_collection().to_string()
    }
}

impl Default for GeoJsonLayer {
    fn default()->Self { Self::new() }
}

impl RenderSurface for GeoJsonLayer {
    fn clear (&mut self) { self.markers.clear() }
    fn add_marker (&mut self, marker: StyledMarker) { self.markers.push( marker) }
    fn show_layer (&mut self) { self.shown = true }
    fn hide_layer (&mut self) { self.shown = false }
    fn is_layer_shown (&self)->bool { self.shown }
}

/// a GeoJsonLayer that (re)writes its contents to a file whenever it changes. Hidden layers are written
/// as empty FeatureCollections, which is what map clients that poll the file should show
#[derive(Debug)]
pub struct GeoJsonFileLayer {
    layer: GeoJsonLayer,
    path: PathBuf,
}

impl GeoJsonFileLayer {
    pub fn new (path: impl AsRef<Path>)->Self {
        GeoJsonFileLayer { layer: GeoJsonLayer::new(), path: path.as_ref().to_path_buf() }
    }

    pub fn layer (&self)->&GeoJsonLayer { &self.layer }
    pub fn path (&self)->&Path { &self.path }

    /// write through a temp file so that readers never see partial contents
    pub fn write (&self)->Result<()> {
        let json = if self.layer.is_layer_shown() {
            self.layer.to_json()
        } else {
            GeoJsonLayer::new().to_json()
        };

        let tmp_path = self.path.with_extension("tmp");
        fs::write( &tmp_path, json.as_bytes())?;
        fs::rename( &tmp_path, &self.path)?;
        Ok(())
    }

    fn write_logged (&self) {
        if let Err(e) = self.write() {
            error!("failed to write {:?}: {}", self.path, e);
        }
    }
}

impl RenderSurface for GeoJsonFileLayer {
    fn clear (&mut self) { self.layer.clear() }
    fn add_marker (&mut self, marker: StyledMarker) { self.layer.add_marker( marker) }

    fn show_layer (&mut self) {
        self.layer.show_layer();
        self.write_logged();
    }

    fn hide_layer (&mut self) {
        self.layer.hide_layer();
        self.write_logged();
    }

    fn is_layer_shown (&self)->bool { self.layer.is_layer_shown() }

    fn layer_updated (&mut self) { self.write_logged() }
}

/* #endregion GeoJSON layers */
