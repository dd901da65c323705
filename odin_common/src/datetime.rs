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

use std::time::Duration;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

// the min,hour,day Duration ctors are still experimental, hence we provide our own wrappers
#[inline] pub fn millis (n: u64)->Duration { Duration::from_millis(n) }
#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }
#[inline] pub fn minutes (n: u64)->Duration { Duration::from_secs(n * 60) }

/// combine a "YYYY-MM-DD" date and a "HH:MM" time of day into a UTC timestamp
pub fn utc_from_date_hm (date: &str, hm: &str)->Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str( date.trim(), "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str( hm.trim(), "%H:%M").ok()?;
    Some( date.and_time(time).and_utc() )
}
