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

use std::{future::pending, time::Duration};
use futures::{FutureExt, future::BoxFuture};
use tokio::{sync::mpsc, task::JoinHandle, time::{Instant,Interval,MissedTickBehavior,interval_at}};
use tracing::{debug,info,warn};

use crate::{
    FirmsSource, errors::{Result,op_failed}, request::DayWindow, transport::FirmsFetcher,
    render::{RenderSurface,StatusSink},
    pipeline::{FirmsPipeline,Selection,CycleStart,CycleResult}
};

const TRIGGER_QUEUE_LEN: usize = 16;

/// the UI (and shutdown) events that drive a [`FirmsMonitor`]
#[derive(Debug,Clone,PartialEq)]
pub enum FirmsTrigger {
    Refresh,
    SelectSources(Vec<FirmsSource>),
    SetDays(DayWindow),
    SetEnabled(bool),
    Shutdown,
}

/// runs a [`FirmsPipeline`] in its own task: initial load on start, cycles for each trigger we receive and
/// periodic refreshes while the layer is enabled. Only the latest started cycle gets rendered, a new trigger
/// drops the fetch of a cycle that is still in flight
pub struct FirmsMonitor<F,R,S> where F: FirmsFetcher, R: RenderSurface, S: StatusSink {
    tx: mpsc::Sender<FirmsTrigger>,
    task: JoinHandle<FirmsPipeline<F,R,S>>,
}

impl<F,R,S> FirmsMonitor<F,R,S> where F: FirmsFetcher, R: RenderSurface, S: StatusSink {

    /// spawn with the refresh interval from the pipeline config
    pub fn spawn (pipeline: FirmsPipeline<F,R,S>, selection: Selection)->Self {
        let refresh_interval = pipeline.config().refresh_interval;
        Self::spawn_with_interval( pipeline, selection, refresh_interval)
    }

    /// a zero `refresh_interval` turns periodic refreshes off
    pub fn spawn_with_interval (pipeline: FirmsPipeline<F,R,S>, selection: Selection, refresh_interval: Duration)->Self {
        let (tx,rx) = mpsc::channel( TRIGGER_QUEUE_LEN);
        let task = tokio::spawn( run_monitor( pipeline, selection, rx, refresh_interval));
        FirmsMonitor { tx, task }
    }

    pub async fn send (&self, trigger: FirmsTrigger)->Result<()> {
        self.tx.send( trigger).await.map_err( |e| op_failed!("monitor not running: {}", e))
    }

    /// for callers that can't wait (e.g. sync UI callbacks)
    pub fn try_send (&self, trigger: FirmsTrigger)->Result<()> {
        self.tx.try_send( trigger).map_err( |e| op_failed!("trigger not accepted: {}", e))
    }

    pub fn is_running (&self)->bool { !self.task.is_finished() }

    /// stop after the current trigger has been processed and hand back the pipeline
    pub async fn shutdown (self)->Result<FirmsPipeline<F,R,S>> {
        if self.tx.send( FirmsTrigger::Shutdown).await.is_err() {
            debug!("monitor already stopped");
        }
        self.task.await.map_err( |e| op_failed!("monitor task failed: {}", e))
    }

    /// abort the task right away
    pub fn terminate (&self) {
        self.task.abort();
    }
}

type InFlight = Option<BoxFuture<'static,CycleResult>>;

async fn run_monitor<F,R,S> (mut pipeline: FirmsPipeline<F,R,S>, mut selection: Selection,
                             mut rx: mpsc::Receiver<FirmsTrigger>, refresh_interval: Duration)->FirmsPipeline<F,R,S>
    where F: FirmsFetcher, R: RenderSurface, S: StatusSink
{
    let mut ticker = create_ticker( refresh_interval);
    let mut in_flight: InFlight = None;

    info!("starting FIRMS monitor with sources {:?}", selection.sources);
    let start = pipeline.start_cycle( &selection);
    launch( &pipeline, start, &mut in_flight);

    loop {
        tokio::select! {
            cycle_result = async { match in_flight.as_mut() { Some(f) => f.await, None => pending().await } } => {
                in_flight = None;
                let id = cycle_result.id;
                let outcome = pipeline.finish_cycle( cycle_result);
                debug!("cycle {} done: {:?}", id, outcome);
            }

            trigger = rx.recv() => {
                let start = match trigger {
                    Some(FirmsTrigger::Refresh) => pipeline.start_cycle( &selection),
                    Some(FirmsTrigger::SelectSources(sources)) => {
                        selection.sources = sources;
                        pipeline.start_cycle( &selection)
                    }
                    Some(FirmsTrigger::SetDays(days)) => {
                        selection.days = days;
                        pipeline.start_cycle( &selection)
                    }
                    Some(FirmsTrigger::SetEnabled(enabled)) => {
                        selection.enabled = enabled;
                        pipeline.set_enabled( enabled);
                        pipeline.start_cycle( &selection)
                    }
                    Some(FirmsTrigger::Shutdown) | None => break
                };
                launch( &pipeline, start, &mut in_flight);
            }

            _ = async { match ticker.as_mut() { Some(t) => { t.tick().await; } None => pending::<()>().await } } => {
                if let Some(start) = pipeline.start_timed_cycle( &selection) {
                    launch( &pipeline, start, &mut in_flight);
                }
            }
        }
    }

    info!("FIRMS monitor stopped");
    pipeline
}

/// the first tick is one period out since the initial load is done explicitly
fn create_ticker (refresh_interval: Duration)->Option<Interval> {
    if refresh_interval.is_zero() {
        warn!("no refresh interval, periodic updates disabled");
        None
    } else {
        let mut ticker = interval_at( Instant::now() + refresh_interval, refresh_interval);
        ticker.set_missed_tick_behavior( MissedTickBehavior::Delay);
        Some(ticker)
    }
}

/// a newly started cycle always supersedes the one in flight, so we drop its fetch future
fn launch<F,R,S> (pipeline: &FirmsPipeline<F,R,S>, start: CycleStart, in_flight: &mut InFlight)
    where F: FirmsFetcher, R: RenderSurface, S: StatusSink
{
    if in_flight.is_some() {
        debug!("cancelling superseded fetch");
    }

    *in_flight = match start {
        CycleStart::Pending(pending_cycle) => Some( pending_cycle.fetch( pipeline.fetcher()).boxed()),
        CycleStart::Done(_) => None
    };
}
