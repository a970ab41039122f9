use std::fmt;

pub const CELL_ID_PREFIX: &str = "cell-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId {
    row: u32,
    col: u32,
}

impl CellId {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub fn parse(value: &str) -> Result<Self, CellIdError> {
        let rest = value
            .strip_prefix(CELL_ID_PREFIX)
            .ok_or(CellIdError::MissingPrefix)?;
        let mut parts = rest.splitn(2, '-');
        let row_part = parts.next().filter(|part| !part.is_empty());
        let col_part = parts.next().filter(|part| !part.is_empty());
        let (row_part, col_part) = match (row_part, col_part) {
            (Some(row), Some(col)) => (row, col),
            _ => return Err(CellIdError::MissingField),
        };
        let row = row_part
            .parse::<u32>()
            .map_err(|_| CellIdError::InvalidNumber { field: "row" })?;
        let col = col_part
            .parse::<u32>()
            .map_err(|_| CellIdError::InvalidNumber { field: "col" })?;
        Ok(Self { row, col })
    }

    pub fn row(self) -> u32 {
        self.row
    }

    pub fn col(self) -> u32 {
        self.col
    }

    pub fn index(self, cols: u32) -> usize {
        (self.row * cols + self.col) as usize
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}-{}", CELL_ID_PREFIX, self.row, self.col)
    }
}

impl std::str::FromStr for CellId {
    type Err = CellIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellIdError {
    MissingPrefix,
    MissingField,
    InvalidNumber { field: &'static str },
}

impl fmt::Display for CellIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellIdError::MissingPrefix => {
                write!(f, "cell id must start with '{CELL_ID_PREFIX}'")
            }
            CellIdError::MissingField => write!(f, "cell id must name a row and a column"),
            CellIdError::InvalidNumber { field } => {
                write!(f, "cell id has a non-numeric {field}")
            }
        }
    }
}

impl std::error::Error for CellIdError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_parse_round_trip() {
        let cell = CellId::new(2, 7);
        assert_eq!(cell.to_string(), "cell-2-7");
        assert_eq!(CellId::parse("cell-2-7"), Ok(cell));
    }

    #[test]
    fn parse_rejects_malformed_ids() {
        assert_eq!(CellId::parse("slot-1-1"), Err(CellIdError::MissingPrefix));
        assert_eq!(CellId::parse("cell-1"), Err(CellIdError::MissingField));
        assert_eq!(CellId::parse("cell--1"), Err(CellIdError::MissingField));
        assert_eq!(
            CellId::parse("cell-a-1"),
            Err(CellIdError::InvalidNumber { field: "row" })
        );
        assert_eq!(
            CellId::parse("cell-1-x"),
            Err(CellIdError::InvalidNumber { field: "col" })
        );
    }

    #[test]
    fn index_is_row_major() {
        assert_eq!(CellId::new(0, 0).index(3), 0);
        assert_eq!(CellId::new(1, 2).index(3), 5);
    }
}
