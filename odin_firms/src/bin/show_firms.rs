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

use std::{path::PathBuf, sync::Arc};
use anyhow::Result;
use clap::Parser;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

use odin_firms::{load_config, FirmsConfig, FirmsPipeline, FirmsMonitor, HttpFetcher, GeoJsonFileLayer};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "periodically update a GeoJSON file with FIRMS hotspots until terminated")]
pub struct Args {
    /// config file to use
    #[arg(short,long, default_value = "firms.ron")]
    pub config: String,

    /// number of days to retrieve (1..10)
    #[arg(short,long)]
    pub days: Option<String>,

    /// GeoJSON file to (re-)write on each update
    #[arg(default_value = "firms.geojson")]
    pub output: PathBuf,
}

#[tokio::main]
async fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env()) // use RUST_LOG to set max level
        .init();

    let args = Args::parse();
    let config: FirmsConfig = load_config( &args.config)?;

    let mut selection = config.initial_selection();
    if let Some(days) = &args.days {
        selection = selection.with_days_input( days);
    }

    let (status_tx, mut status_rx) = watch::channel( String::new());
    let status_task = tokio::spawn( async move {
        while status_rx.changed().await.is_ok() {
            let status = status_rx.borrow_and_update().clone();
            println!("{status}");
        }
    });

    let fetcher = Arc::new( HttpFetcher::new( &config)?);
    let surface = GeoJsonFileLayer::new( &args.output);
    info!("writing FIRMS layer to {:?} every {:?}", args.output, config.refresh_interval);

    let pipeline = FirmsPipeline::new( Arc::new(config), fetcher, surface, status_tx);
    let monitor = FirmsMonitor::spawn( pipeline, selection);

    tokio::signal::ctrl_c().await?;

    monitor.shutdown().await?;
    status_task.abort();
    Ok(())
}
