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

use odin_common::{BoundingBox, datetime::utc_from_date_hm};
use chrono::{Datelike,Timelike};

/// run with "cargo test --test test_bbox -- --nocapture"

#[test]
fn test_bbox_from_slice () {
    let bbox = BoundingBox::from_slice( &[-64.9, -22.5, -57.0, -16.0]).unwrap();
    println!("bbox: {bbox}");
    assert_eq!( bbox.west, -64.9);
    assert_eq!( bbox.north, -16.0);
    assert_eq!( bbox.to_minmax_array(), [-64.9, -22.5, -57.0, -16.0]);

    assert!( BoundingBox::from_slice( &[]).is_none());
    assert!( BoundingBox::from_slice( &[1.0, 2.0, 3.0]).is_none());
    assert!( BoundingBox::from_slice( &[1.0, 2.0, 3.0, 4.0, 5.0]).is_none());
}

#[test]
fn test_bbox_display () {
    let bbox = BoundingBox::new( -64.9, -22.5, -57.0, -16.0);
    assert_eq!( bbox.to_string(), "-64.9,-22.5,-57,-16");

    let bbox = BoundingBox::from_wsen( &[-122.75, 37.25, -121.5, 38.125]);
    assert_eq!( bbox.to_string(), "-122.75,37.25,-121.5,38.125");
}

#[test]
fn test_bbox_contains () {
    let bbox = BoundingBox::new( -64.9, -22.5, -57.0, -16.0);
    assert!( bbox.contains( -60.0, -20.0));
    assert!( bbox.contains( -64.9, -16.0)); // boundary is inside
    assert!( !bbox.contains( -56.9, -20.0));
    assert!( !bbox.contains( -60.0, -23.0));

    let (lon,lat) = bbox.center();
    assert!( (lon - -60.95).abs() < 1e-9);
    assert!( (lat - -19.25).abs() < 1e-9);
}

#[test]
fn test_date_hm () {
    let dt = utc_from_date_hm( "2024-08-15", "05:30").unwrap();
    assert_eq!( (dt.year(), dt.month(), dt.day()), (2024, 8, 15));
    assert_eq!( (dt.hour(), dt.minute()), (5, 30));

    assert!( utc_from_date_hm( "2024-08-15", "5:3x").is_none());
    assert!( utc_from_date_hm( "15/08/2024", "05:30").is_none());
}
