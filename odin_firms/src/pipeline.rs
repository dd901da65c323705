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

//! the refresh cycle orchestrator.
//!
//! A cycle is split into three steps so that the network part can run outside of the pipeline:
//! [`FirmsPipeline::start_cycle`] validates the selection and builds the source URLs,
//! [`PendingCycle::fetch`] concurrently retrieves, parses and de-duplicates, and
//! [`FirmsPipeline::finish_cycle`] renders the result, but only if no newer cycle was started in
//! the meantime. [`FirmsPipeline::refresh`] runs all three in sequence.

use std::sync::Arc;
use futures::future::join_all;
use strum::{Display,AsRefStr};
use tracing::{debug,info,warn};

use crate::{
    FirmsConfig, FirmsSource, Detection, OdinFirmsError, errors::Result,
    request::{DayWindow,build_area_url}, transport::FirmsFetcher, csv_normalizer::parse_detections,
    dedupe::dedupe_detections, render::{RenderSurface,StatusSink,StyledMarker}
};

pub const STATUS_DOWNLOADING: &str = "downloading FIRMS data…";
pub const STATUS_NO_SOURCES: &str = "no sensors selected";

pub fn status_showing (n: usize)->String { format!("showing {n} detections (VIIRS)") }
pub fn status_error (e: &OdinFirmsError)->String { format!("error: {e}") }

/// the user controlled part of a refresh cycle. UI collaborators push a new value with each trigger
#[derive(Debug,Clone,PartialEq)]
pub struct Selection {
    pub enabled: bool,
    pub days: DayWindow,
    pub sources: Vec<FirmsSource>,
}

impl Selection {
    pub fn new (enabled: bool, days: DayWindow, sources: Vec<FirmsSource>)->Self {
        Selection { enabled, days, sources }
    }

    /// set the day window from (unvalidated) UI text
    pub fn with_days_input (mut self, input: &str)->Self {
        self.days = DayWindow::parse( input, DayWindow::UI_DEFAULT);
        self
    }
}

/// `Idle -> Loading -> Rendered` or `Idle -> Loading -> Failed -> Idle`. A failed cycle only stays in
/// `Failed` until its error is reported
#[derive(Debug,Clone,Copy,PartialEq,Eq,Display,AsRefStr)]
pub enum PipelineState {
    Idle,
    Loading,
    Rendered,
    Failed
}

#[derive(Debug,Clone,PartialEq)]
pub enum CycleOutcome {
    /// number of distinct detections now shown
    Rendered(usize),
    /// no sources selected, layer was cleared
    Cleared,
    /// the reported error message. The layer was not changed
    Failed(String),
    /// a newer cycle was started before this one completed, results were dropped
    Superseded,
}

pub type CycleId = u64;

/// the network part of a started cycle
#[derive(Debug,Clone)]
pub struct PendingCycle {
    pub id: CycleId,
    pub requests: Vec<(FirmsSource,String)>, // (source, url) in selection order
}

#[derive(Debug)]
pub struct CycleResult {
    pub id: CycleId,
    pub result: Result<Vec<Detection>>,
}

/// what starting a cycle gave us
#[derive(Debug)]
pub enum CycleStart {
    /// nothing to fetch, the cycle is already complete
    Done(CycleOutcome),
    Pending(PendingCycle),
}

impl PendingCycle {
    /// this does not need the pipeline, hence it can be run (and dropped) while the pipeline processes
    /// other triggers
    pub async fn fetch<F: FirmsFetcher> (self, fetcher: Arc<F>)->CycleResult {
        let result = fetch_detections( fetcher.as_ref(), &self.requests).await;
        CycleResult { id: self.id, result }
    }
}

/// fetch all requests concurrently and wait for all of them. Detections are concatenated in request order
/// and then de-duplicated. If any request failed we return the first error (in request order)
pub async fn fetch_detections<F: FirmsFetcher> (fetcher: &F, requests: &[(FirmsSource,String)])->Result<Vec<Detection>> {
    let results = join_all( requests.iter().map( |(source,url)| fetch_source( fetcher, *source, url))).await;

    let mut detections: Vec<Detection> = Vec::new();
    for r in results {
        detections.extend( r?);
    }

    Ok( dedupe_detections( detections) )
}

async fn fetch_source<F: FirmsFetcher> (fetcher: &F, source: FirmsSource, url: &str)->Result<Vec<Detection>> {
    let csv = fetcher.fetch_csv( url).await?;
    let detections = parse_detections( &csv, source);
    debug!("{}: {} detections", source, detections.len());
    Ok( detections )
}

/// sequences refresh cycles from request construction to rendering, and reports what it is doing to the
/// status sink. The pipeline is the only one that mutates the render surface
pub struct FirmsPipeline<F,R,S> where F: FirmsFetcher, R: RenderSurface, S: StatusSink {
    config: Arc<FirmsConfig>,
    fetcher: Arc<F>,
    surface: R,
    status: S,

    state: PipelineState,
    enabled: bool,
    last_cycle: CycleId,
    last_status: String,
}

impl<F,R,S> FirmsPipeline<F,R,S> where F: FirmsFetcher, R: RenderSurface, S: StatusSink {
    pub fn new (config: Arc<FirmsConfig>, fetcher: Arc<F>, surface: R, status: S)->Self {
        FirmsPipeline {
            config, fetcher, surface, status,
            state: PipelineState::Idle,
            enabled: true,
            last_cycle: 0,
            last_status: String::new()
        }
    }

    pub fn config (&self)->&FirmsConfig { &self.config }
    pub fn fetcher (&self)->Arc<F> { self.fetcher.clone() }
    pub fn surface (&self)->&R { &self.surface }
    pub fn surface_mut (&mut self)->&mut R { &mut self.surface }
    pub fn status_sink (&self)->&S { &self.status }
    pub fn state (&self)->PipelineState { self.state }
    pub fn is_enabled (&self)->bool { self.enabled }
    pub fn last_cycle (&self)->CycleId { self.last_cycle }
    pub fn last_status (&self)->&str { &self.last_status }

    /// start a new cycle for `selection`. This supersedes all cycles that were started before
    pub fn start_cycle (&mut self, selection: &Selection)->CycleStart {
        self.last_cycle += 1;
        self.enabled = selection.enabled;
        let id = self.last_cycle;

        if selection.sources.is_empty() {
            self.surface.clear();
            self.surface.layer_updated();
            self.sync_visibility();
            self.set_state( PipelineState::Idle);
            self.report( STATUS_NO_SOURCES);
            return CycleStart::Done( CycleOutcome::Cleared)
        }

        match self.build_requests( selection) {
            Ok(requests) => {
                self.set_state( PipelineState::Loading);
                self.report( STATUS_DOWNLOADING);
                debug!("started cycle {} for {} sources, {} days", id, requests.len(), selection.days);
                CycleStart::Pending( PendingCycle { id, requests })
            }
            Err(e) => CycleStart::Done( self.fail( id, e))
        }
    }

    /// start a cycle unless the layer is toggled off
    pub fn start_timed_cycle (&mut self, selection: &Selection)->Option<CycleStart> {
        if selection.enabled {
            Some( self.start_cycle( selection))
        } else {
            debug!("layer disabled, ignoring timer");
            None
        }
    }

    fn build_requests (&self, selection: &Selection)->Result<Vec<(FirmsSource,String)>> {
        let cfg = &self.config;
        selection.sources.iter().map( |source| {
            let url = build_area_url( &cfg.server, &cfg.map_key, *source, &cfg.bbox, selection.days)?;
            Ok( (*source, url) )
        }).collect()
    }

    /// render the result of a cycle, provided it is still the latest one we started
    pub fn finish_cycle (&mut self, cycle_result: CycleResult)->CycleOutcome {
        let CycleResult { id, result } = cycle_result;

        if id != self.last_cycle {
            info!("discarding results of superseded cycle {} (latest is {})", id, self.last_cycle);
            return CycleOutcome::Superseded
        }

        match result {
            Ok(detections) => {
                let n = detections.len();
                self.surface.clear();
                for d in detections {
                    self.surface.add_marker( StyledMarker::new(d));
                }
                self.surface.layer_updated();

                self.set_state( PipelineState::Rendered);
                self.report( &status_showing(n));
                self.sync_visibility();
                CycleOutcome::Rendered(n)
            }
            Err(e) => self.fail( id, e)
        }
    }

    /// a failed cycle goes back to idle once the error is reported. The layer keeps what it showed
    fn fail (&mut self, id: CycleId, e: OdinFirmsError)->CycleOutcome {
        warn!("cycle {} failed: {}", id, e);
        let msg = status_error( &e);
        self.set_state( PipelineState::Failed);
        self.report( &msg);
        self.set_state( PipelineState::Idle);
        CycleOutcome::Failed(msg)
    }

    /// run a complete cycle. Errors are reported to the status sink and returned as [`CycleOutcome::Failed`]
    pub async fn refresh (&mut self, selection: &Selection)->CycleOutcome {
        match self.start_cycle( selection) {
            CycleStart::Done(outcome) => outcome,
            CycleStart::Pending(pending) => {
                let cycle_result = pending.fetch( self.fetcher.clone()).await;
                self.finish_cycle( cycle_result)
            }
        }
    }

    /// show or hide the layer right away, without touching its contents
    pub fn set_enabled (&mut self, enabled: bool) {
        self.enabled = enabled;
        self.sync_visibility();
    }

    fn sync_visibility (&mut self) {
        let shown = self.surface.is_layer_shown();
        if self.enabled && !shown {
            self.surface.show_layer();
        } else if !self.enabled && shown {
            self.surface.hide_layer();
        }
    }

    fn set_state (&mut self, state: PipelineState) {
        if state != self.state {
            debug!("state {} -> {}", self.state, state);
            self.state = state;
        }
    }

    fn report (&mut self, msg: &str) {
        self.last_status = msg.to_string();
        self.status.set_status( msg);
    }
}
