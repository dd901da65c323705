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

use std::{fs, path::PathBuf, sync::Arc};
use anyhow::{Result,bail};
use clap::Parser;
use strum::IntoEnumIterator;
use tracing_subscriber::EnvFilter;

use odin_firms::{
    load_config, FirmsConfig, FirmsSource, FirmsPipeline, CycleOutcome, HttpFetcher, GeoJsonLayer, LogStatus
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "retrieve FIRMS hotspots for the configured area and print them")]
pub struct Args {
    /// config file to use
    #[arg(short,long, default_value = "firms.ron")]
    pub config: String,

    /// MAP_KEY to use instead of the configured one
    #[arg(short,long)]
    pub map_key: Option<String>,

    /// number of days to retrieve (1..10)
    #[arg(short,long)]
    pub days: Option<String>,

    /// write the rendered layer as GeoJSON to this file
    #[arg(short,long)]
    pub output: Option<PathBuf>,

    /// list known sources and exit
    #[arg(long)]
    pub list: bool,

    /// sources to retrieve, e.g. VIIRS_SNPP_NRT (defaults to configured sources)
    #[arg(num_args=0..)]
    pub sources: Vec<FirmsSource>,
}

#[tokio::main]
async fn main()->Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env()) // use RUST_LOG to set max level
        .init();

    let args = Args::parse();

    if args.list {
        for source in FirmsSource::iter() { println!("{source}") }
        return Ok(())
    }

    let mut config: FirmsConfig = load_config( &args.config)?;
    if let Some(map_key) = &args.map_key {
        config.map_key = map_key.clone();
    }

    let mut selection = config.initial_selection();
    if let Some(days) = &args.days {
        selection = selection.with_days_input( days);
    }
    if !args.sources.is_empty() {
        selection.sources = args.sources.clone();
    }

    let fetcher = Arc::new( HttpFetcher::new( &config)?);
    let mut pipeline = FirmsPipeline::new( Arc::new(config), fetcher, GeoJsonLayer::new(), LogStatus);

    match pipeline.refresh( &selection).await {
        CycleOutcome::Rendered(n) => {
            let layer = pipeline.surface();
            for m in layer.markers() {
                let d = &m.detection;
                println!("{:16} {} {} {} conf={:<8} frp={:<6} {}", d.source, d.acq_date, d.acq_time, d.position, d.confidence, d.frp, m.style.tier);
            }
            println!("{n} distinct detections for {} days", selection.days);

            if let Some(path) = &args.output {
                fs::write( path, layer.to_json())?;
                println!("GeoJSON written to {path:?}");
            }
        }
        CycleOutcome::Cleared => println!("no sources selected"),
        CycleOutcome::Failed(msg) => bail!( msg),
        CycleOutcome::Superseded => {} // can't happen with a single cycle
    }

    Ok(())
}
