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
#![allow(unused)]

use std::str::FromStr;
use odin_firms::{DayWindow, FirmsSource, OdinFirmsError, SourceRequest, build_area_url, DEFAULT_SERVER};

const BBOX: [f64;4] = [-64.9, -22.5, -57.0, -16.0];

#[test]
fn test_day_window_clamp () {
    assert_eq!( DayWindow::new(0).days(), 1);
    assert_eq!( DayWindow::new(-3).days(), 1);
    assert_eq!( DayWindow::new(5).days(), 5);
    assert_eq!( DayWindow::new(15).days(), 10);
    assert_eq!( DayWindow::default().days(), 1);
}

#[test]
fn test_day_window_parse () {
    assert_eq!( DayWindow::parse( "abc", DayWindow::UI_DEFAULT).days(), 3);
    assert_eq!( DayWindow::parse( "", DayWindow::REQUEST_DEFAULT).days(), 1);
    assert_eq!( DayWindow::parse( "0", DayWindow::UI_DEFAULT).days(), 3);
    assert_eq!( DayWindow::parse( " 7 ", DayWindow::UI_DEFAULT).days(), 7);
    assert_eq!( DayWindow::parse( "2.7", DayWindow::UI_DEFAULT).days(), 2);
    assert_eq!( DayWindow::parse( "15", DayWindow::UI_DEFAULT).days(), 10);
    assert_eq!( DayWindow::parse( "-4", DayWindow::UI_DEFAULT).days(), 1);
    assert_eq!( DayWindow::parse( "NaN", DayWindow::UI_DEFAULT).days(), 3);
    assert_eq!( DayWindow::parse( "x", 42).days(), 10); // defaults are clamped too
}

#[test]
fn test_area_url () {
    let url = build_area_url( DEFAULT_SERVER, "KEY", FirmsSource::ViirsSnppNrt, &BBOX, DayWindow::new(1)).unwrap();
    println!("{url}");
    assert_eq!( url, "https://firms.modaps.eosdis.nasa.gov/api/area/csv/KEY/VIIRS_SNPP_NRT/-64.9,-22.5,-57,-16/1");

    // trailing '/' on server doesn't give us double slashes
    let url = build_area_url( "http://localhost:8080/", "KEY", FirmsSource::ModisNrt, &BBOX, DayWindow::new(10)).unwrap();
    assert_eq!( url, "http://localhost:8080/api/area/csv/KEY/MODIS_NRT/-64.9,-22.5,-57,-16/10");
}

#[test]
fn test_invalid_requests () {
    let bboxes: [&[f64];3] = [ &BBOX[..3], &[], &[1.0, 2.0, 3.0, 4.0, 5.0] ];
    for bbox in bboxes {
        let res = build_area_url( DEFAULT_SERVER, "KEY", FirmsSource::ViirsSnppNrt, bbox, DayWindow::default());
        assert!( matches!( res, Err(OdinFirmsError::InvalidRequest(_))));
    }

    let res = SourceRequest::new( "  ", FirmsSource::ViirsSnppNrt, &BBOX, DayWindow::default());
    assert!( res.unwrap_err().is_invalid_request());

    // any 4 numbers are accepted, we don't check ordering or range
    assert!( SourceRequest::new( "KEY", FirmsSource::ViirsSnppNrt, &[200.0, 100.0, -200.0, -100.0], DayWindow::default()).is_ok());
}

#[test]
fn test_source_ids () {
    assert_eq!( FirmsSource::ViirsNoaa21Nrt.id(), "VIIRS_NOAA21_NRT");
    assert_eq!( FirmsSource::from_str("LANDSAT_NRT").unwrap(), FirmsSource::LandsatNrt);
    assert!( FirmsSource::from_str("VIIRS").is_err());

    let ids: Vec<String> = FirmsSource::defaults().iter().map( |s| s.to_string()).collect();
    assert_eq!( ids, vec!["VIIRS_SNPP_NRT", "VIIRS_NOAA20_NRT", "VIIRS_NOAA21_NRT"]);
}
