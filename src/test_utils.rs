//! CSV fixtures shared by the unit tests.

use crate::config::DataSources;
use std::io;
use std::path::PathBuf;
use tempfile::TempDir;

/// Three stations in two cities on four days.
///
/// Population-weighted means per day are 2.2, 21.3, 2.7 and 0.2; PDX2 is filled on
/// 2015-01-15 and NYC1 on 2015-12-15.
pub(crate) const STATIONS_CSV: &str = "\
,location_date,name,station_code,temp_min_c,temp_mean_c,temp_max_c,filled,Lat,Lon,population,population_weight
0,2015-01-15,Portland,PDX1,-1.0,2.0,6.0,False,45.59,-122.6,650000,0.3
1,2015-01-15,Portland,PDX2,1.0,4.0,8.0,True,45.53,-122.67,650000,0.2
2,2015-01-15,New York,NYC1,-1.4,1.6,5.6,False,40.78,-73.97,8400000,0.5
3,2015-06-15,Portland,PDX1,15.0,20.0,26.0,False,45.59,-122.6,650000,0.3
4,2015-06-15,Portland,PDX2,18.0,24.0,30.0,False,45.53,-122.67,650000,0.2
5,2015-06-15,New York,NYC1,17.0,21.0,25.0,False,40.78,-73.97,8400000,0.5
6,2015-12-15,Portland,PDX1,0.0,3.0,7.0,False,45.59,-122.6,650000,0.3
7,2015-12-15,Portland,PDX2,-2.0,1.0,4.0,False,45.53,-122.67,650000,0.2
8,2015-12-15,New York,NYC1,0.2,3.2,7.2,True,40.78,-73.97,8400000,0.5
9,2016-01-15,Portland,PDX1,-3.0,0.0,3.0,False,45.59,-122.6,650000,0.3
10,2016-01-15,Portland,PDX2,-4.0,-1.0,2.0,False,45.53,-122.67,650000,0.2
11,2016-01-15,New York,NYC1,-2.2,0.8,3.8,False,40.78,-73.97,8400000,0.5
";

/// Nine days between January 2015 and February 2016 covering every season.
pub(crate) const WEIGHTED_CSV: &str = "\
location_date,weighted_mean_temp,weighted_min_temp,weighted_max_temp,filled
2015-01-10,2.0,-1.0,5.0,False
2015-01-20,4.0,1.0,7.0,True
2015-02-10,3.0,0.0,6.0,False
2015-04-10,12.0,8.0,16.0,False
2015-07-10,24.0,18.0,30.0,False
2015-10-10,14.0,9.0,19.0,False
2015-12-10,5.0,1.0,9.0,False
2016-01-10,1.0,-3.0,5.0,True
2016-02-10,3.0,-1.0,7.0,False
";

pub(crate) fn write_csv(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    std::fs::write(&path, contents)?;
    Ok(path)
}

/// Writes both fixtures under their default file names.
pub(crate) fn fixture_sources(dir: &TempDir) -> io::Result<DataSources> {
    let sources = DataSources::in_dir(dir.path());
    std::fs::write(sources.stations(), STATIONS_CSV)?;
    std::fs::write(sources.weighted_daily(), WEIGHTED_CSV)?;
    Ok(sources)
}
