//! Identifiers and values used by the test fixtures.
#![allow(dead_code)]

// Songs
pub const SONG_1_ID: &str = "SOMZWCG12A8C13C480";
pub const SONG_1_TITLE: &str = "I Didn't Mean To";
pub const SONG_1_DURATION: f64 = 218.93179;
pub const SONG_1_YEAR: i32 = 0;

pub const SONG_2_ID: &str = "SOZCTXZ12AB0182364";
pub const SONG_2_TITLE: &str = "Setanta matins";
pub const SONG_2_DURATION: f64 = 269.58322;
pub const SONG_2_YEAR: i32 = 0;

// Artists
pub const ARTIST_1_ID: &str = "ARD7TVE1187B99BFB1";
pub const ARTIST_1_NAME: &str = "Casual";
pub const ARTIST_1_LOCATION: &str = "California - LA";

pub const ARTIST_2_ID: &str = "AR5KOSW1187FB35FF4";
pub const ARTIST_2_NAME: &str = "Elena";
pub const ARTIST_2_LOCATION: &str = "Dubai UAE";
pub const ARTIST_2_LATITUDE: f64 = 49.80388;
pub const ARTIST_2_LONGITUDE: f64 = 15.47491;

// Users
pub const USER_1_ID: &str = "10";
pub const USER_1_FIRST_NAME: &str = "Sylvie";
pub const USER_1_LAST_NAME: &str = "Cruz";

pub const USER_2_ID: &str = "26";
pub const USER_2_FIRST_NAME: &str = "Ryan";
pub const USER_2_LAST_NAME: &str = "Smith";

// Event timestamps (milliseconds since the Unix epoch)
/// 2018-11-02 01:25:34.796 UTC, a Friday in ISO week 44.
pub const TS_1: i64 = 1541121934796;
pub const TS_1_START_TIME: &str = "2018-11-02 01:25:34.796";
/// 2018-11-15 00:30:26.796 UTC.
pub const TS_2: i64 = 1542241826796;
pub const TS_2_START_TIME: &str = "2018-11-15 00:30:26.796";
