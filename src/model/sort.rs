use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    ClubName,
    City,
    GolfDigestRating,
    GolfMagRating,
    ConsensusRanking,
}

impl SortColumn {
    pub const ALL: [SortColumn; 5] = [
        SortColumn::ClubName,
        SortColumn::City,
        SortColumn::GolfDigestRating,
        SortColumn::GolfMagRating,
        SortColumn::ConsensusRanking,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortColumn::ClubName => "club_name",
            SortColumn::City => "city",
            SortColumn::GolfDigestRating => "golf_digest_rating",
            SortColumn::GolfMagRating => "golf_mag_rating",
            SortColumn::ConsensusRanking => "consensus_ranking",
        }
    }

    /// Store column this sort maps onto, or `None` for derived columns the
    /// store cannot order by.
    #[must_use]
    pub fn store_column(self) -> Option<&'static str> {
        match self {
            SortColumn::ConsensusRanking => None,
            other => Some(other.as_str()),
        }
    }

    #[must_use]
    pub fn is_native(self) -> bool {
        self.store_column().is_some()
    }

    /// Numeric rating columns keep missing values last in either direction.
    #[must_use]
    pub fn nulls_last(self) -> bool {
        matches!(self, SortColumn::GolfDigestRating | SortColumn::GolfMagRating)
    }

    #[must_use]
    pub fn header(self) -> &'static str {
        match self {
            SortColumn::ClubName => "Course",
            SortColumn::City => "",
            SortColumn::GolfDigestRating => "Golf Digest",
            SortColumn::GolfMagRating => "Golf Mag",
            SortColumn::ConsensusRanking => "Consensus",
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        SortColumn::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown sort column '{s}'"))
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Single-column sort. There is no unsorted value: once a column
/// has been chosen the state only ever alternates between directions.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: SortColumn::ConsensusRanking,
            direction: SortDirection::Asc,
        }
    }
}

impl SortState {
    #[must_use]
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// A header click: a new column starts ascending, the active column flips.
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == column {
            self.direction = self.direction.flipped();
        } else {
            self.column = column;
            self.direction = SortDirection::Asc;
        }
    }

    /// Direction shown on a header, `None` for inactive columns.
    #[must_use]
    pub fn direction_for(&self, column: SortColumn) -> Option<SortDirection> {
        (self.column == column).then_some(self.direction)
    }
}
