use std::{fs::File, io, path::Path};

use csv::{ReaderBuilder, StringRecord};
use jiff::civil::Date;
use tracing::debug;

use crate::{
    error::{LoadError, LoadResult},
    models::{MOVIE_COLUMNS, Movie, parse_calendar_date, parse_integral},
};

/// Cell values read as missing, in addition to absent trailing cells.
pub const NA_VALUES: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing(cell: &str) -> bool {
    NA_VALUES.iter().any(|na| *na == cell)
}

#[derive(Clone, Debug)]
pub struct SourceRow {
    pub line: u64,
    pub record: StringRecord,
}

impl SourceRow {
    fn is_complete(&self, width: usize) -> bool {
        self.record.len() == width && !self.record.iter().any(is_missing)
    }
}

/// The whole source file held in memory, every column kept as text.
#[derive(Debug)]
pub struct SourceTable {
    headers: StringRecord,
    /// Header index of each entry of `MOVIE_COLUMNS`.
    projection: [usize; MOVIE_COLUMNS.len()],
    rows: Vec<SourceRow>,
}

impl SourceTable {
    pub fn from_path(path: impl AsRef<Path>) -> LoadResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading source csv");

        let file = File::open(path)
            .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: io::Read>(reader: R) -> LoadResult<Self> {
        let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = reader.headers()?.clone();

        let mut projection = [0; MOVIE_COLUMNS.len()];
        for (slot, column) in projection.iter_mut().zip(MOVIE_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.trim() == column)
                .ok_or(LoadError::MissingColumn(column))?;
        }

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            if record.len() > headers.len() {
                return Err(LoadError::RaggedRow {
                    line,
                    expected: headers.len(),
                    found: record.len(),
                });
            }
            rows.push(SourceRow { line, record });
        }

        debug!(columns = headers.len(), rows = rows.len(), "parsed source csv");

        Ok(Self { headers, projection, rows })
    }

    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drops every row with a missing cell in any column, retained or not.
    /// Returns how many rows were dropped.
    pub fn drop_incomplete(&mut self) -> usize {
        let width = self.headers.len();
        let before = self.rows.len();
        self.rows.retain(|row| row.is_complete(width));
        before - self.rows.len()
    }

    /// Restricts rows to `MOVIE_COLUMNS` and types them, keeping source order.
    pub fn project(&self) -> LoadResult<Vec<Movie>> {
        self.rows.iter().map(|row| self.movie(row)).collect()
    }

    /// One cell per entry of `MOVIE_COLUMNS`, in that order. Cells absent
    /// from a short row read as empty.
    fn cells<'r>(&self, row: &'r SourceRow) -> [Cell<'r>; MOVIE_COLUMNS.len()] {
        std::array::from_fn(|slot| Cell {
            line: row.line,
            column: MOVIE_COLUMNS[slot],
            raw: row.record.get(self.projection[slot]).unwrap_or_default(),
        })
    }

    fn movie(&self, row: &SourceRow) -> LoadResult<Movie> {
        let [
            budget,
            genres,
            id,
            keywords,
            overview,
            popularity,
            release_date,
            revenue,
            title,
            vote_average,
            vote_count,
        ] = self.cells(row);

        Ok(Movie {
            budget: budget.integer()?,
            genres: genres.text(),
            id: id.integer()?,
            keywords: keywords.text(),
            overview: overview.text(),
            popularity: popularity.float()?,
            release_date: release_date.date()?,
            revenue: revenue.integer()?,
            title: title.text(),
            vote_average: vote_average.float()?,
            vote_count: vote_count.integer()?,
        })
    }
}

struct Cell<'r> {
    line: u64,
    column: &'static str,
    raw: &'r str,
}

impl Cell<'_> {
    fn text(&self) -> String {
        self.raw.to_string()
    }

    fn integer(&self) -> LoadResult<i64> {
        parse_integral(self.raw).ok_or_else(|| self.invalid("not an integer"))
    }

    fn float(&self) -> LoadResult<f64> {
        self.raw.trim().parse().map_err(|_| self.invalid("not a number"))
    }

    fn date(&self) -> LoadResult<Date> {
        parse_calendar_date(self.raw).ok_or_else(|| self.invalid("not a calendar date"))
    }

    fn invalid(&self, reason: &str) -> LoadError {
        LoadError::InvalidField {
            line: self.line,
            column: self.column,
            message: format!("{reason}: {:?}", self.raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    const HEADER: &str = "index,budget,genres,homepage,id,keywords,overview,popularity,\
                          release_date,revenue,title,vote_average,vote_count";

    fn table(body: &str) -> SourceTable {
        let csv = format!("{HEADER}\n{body}");
        SourceTable::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn drops_rows_missing_any_column() {
        let mut t = table(
            "0,100,Drama,http://a,1,k,o,1.5,2001-01-01,200,A,6.5,10\n\
             1,100,Drama,,2,k,o,1.5,2001-01-01,200,B,6.5,10\n\
             2,100,Drama,http://c,3,k,o,NaN,2001-01-01,200,C,6.5,10\n\
             3,100,Drama,http://d,4,k,o,1.5,2001-01-01,200\n\
             4,NA,Drama,http://e,5,k,o,1.5,2001-01-01,200,E,6.5,10\n\
             5,100,Drama,null,6,k,o,1.5,2001-01-01,200,F,6.5,10\n\
             6,100,Drama,http://g,7,k,o,1.5,2001-01-01,200,G,6.5,10\n",
        );
        assert_eq!(t.len(), 7);

        // Rows with `homepage` empty or `null` go even though `homepage` is not retained.
        assert_eq!(t.drop_incomplete(), 5);
        let movies = t.project().unwrap();
        assert_eq!(movies.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 7]);
    }

    #[test]
    fn every_pandas_na_token_is_missing() {
        for token in NA_VALUES {
            assert!(is_missing(token), "{token:?}");
        }
        assert!(!is_missing(" "));
        assert!(!is_missing("none"));
        assert!(!is_missing("0"));
    }

    #[test]
    fn projects_typed_columns_in_source_order() {
        let mut t = table(
            "0,237000000,Action,http://a,19995,culture,\"In the 22nd century, a marine\",\
             150.437577,2009-12-10,2787965087,Avatar,7.2,11800\n\
             1,300000000.0,Adventure,http://b,285,ocean,Captain Barbossa,139.082615,\
             2007-05-19,961000000,Pirates,6.9,4500\n",
        );
        assert_eq!(t.drop_incomplete(), 0);

        let movies = t.project().unwrap();
        assert_eq!(movies.iter().map(|m| m.id).collect::<Vec<_>>(), vec![19995, 285]);
        assert_eq!(movies[0].overview, "In the 22nd century, a marine");
        assert_eq!(movies[0].release_date, date(2009, 12, 10));
        assert_eq!(movies[0].revenue, 2_787_965_087);
        assert_eq!(movies[1].budget, 300_000_000);
    }

    #[test]
    fn rejects_source_without_required_column() {
        let csv = "id,title\n1,Avatar\n";
        let err = SourceTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("budget")));
    }

    #[test]
    fn rejects_rows_wider_than_header() {
        let csv = format!("{HEADER}\n0,1,g,h,1,k,o,1.0,2001-01-01,2,t,5.0,3,extra\n");
        let err = SourceTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::RaggedRow { line: 2, expected: 13, found: 14 }));
    }

    #[test]
    fn short_row_reports_the_first_unparseable_column() {
        let t = table("0,1,g,h,1,k,o,1.0,2001-01-01,2\n");
        let err = t.project().unwrap_err();
        assert!(
            matches!(err, LoadError::InvalidField { line: 2, column: "vote_average", .. }),
            "{err:?}"
        );
    }

    #[test]
    fn unparseable_date_names_the_column() {
        let mut t = table("0,1,g,h,1,k,o,1.0,someday,2,t,5.0,3\n");
        t.drop_incomplete();
        let err = t.project().unwrap_err();
        assert!(
            matches!(err, LoadError::InvalidField { line: 2, column: "release_date", .. }),
            "{err:?}"
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = SourceTable::from_path("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
