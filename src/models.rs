use jiff::{
    Timestamp,
    civil::{Date, DateTime},
    tz::TimeZone,
};
use sea_orm::Set;

use crate::entities::movie;

/// Columns kept from the source, in output order.
pub const MOVIE_COLUMNS: [&str; 11] = [
    "budget",
    "genres",
    "id",
    "keywords",
    "overview",
    "popularity",
    "release_date",
    "revenue",
    "title",
    "vote_average",
    "vote_count",
];

/// A cleaned source row, typed.
#[derive(Clone, Debug, PartialEq)]
pub struct Movie {
    pub budget: i64,
    pub genres: String,
    pub id: i64,
    pub keywords: String,
    pub overview: String,
    pub popularity: f64,
    pub release_date: Date,
    pub revenue: i64,
    pub title: String,
    pub vote_average: f64,
    pub vote_count: i64,
}

impl Movie {
    /// Column-name to value mapping for one `movies` row.
    pub fn into_active_model(self) -> movie::ActiveModel {
        movie::ActiveModel {
            id: Set(self.id),
            budget: Set(self.budget),
            genres: Set(self.genres),
            keywords: Set(self.keywords),
            overview: Set(self.overview),
            popularity: Set(self.popularity),
            release_date: Set(self.release_date.to_string()),
            revenue: Set(self.revenue),
            title: Set(self.title),
            vote_average: Set(self.vote_average),
            vote_count: Set(self.vote_count),
        }
    }
}

/// Accepts `42` as well as float-rendered integers such as `42.0`.
pub fn parse_integral(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n);
    }
    let f = raw.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// `YYYY-MM-DD`, or a date-time whose date part is kept. Instants given in
/// UTC (`...Z`) keep their UTC date.
pub fn parse_calendar_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    raw.parse::<Date>()
        .ok()
        .or_else(|| raw.parse::<DateTime>().ok().map(|dt| dt.date()))
        .or_else(|| raw.parse::<Timestamp>().ok().map(|ts| ts.to_zoned(TimeZone::UTC).date()))
}
