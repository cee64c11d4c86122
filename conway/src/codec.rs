// codec.rs - Grid import/export
//
// Plaintext follows the usual Life `.cells` layout: `!` starts a comment
// line, `O` is alive, `.` is dead, and short lines are padded with dead
// cells. JSON carries the declared size next to rows of 0/1.

use serde::{Deserialize, Serialize};

use crate::error::CodecError;
use crate::grid::{CellState, Grid, GridSize, Row, validate_shape};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridFormat {
    Plaintext,
    Json,
}

const ALIVE_CHAR: char = 'O';
const DEAD_CHAR: char = '.';
const COMMENT_CHAR: char = '!';

#[derive(Debug, Serialize, Deserialize)]
struct GridDocument {
    rows: usize,
    cols: usize,
    cells: Grid,
}

pub fn import(text: &str, format: GridFormat) -> Result<Grid, CodecError> {
    match format {
        GridFormat::Plaintext => from_plaintext(text),
        GridFormat::Json => from_json(text),
    }
}

pub fn export(grid: &[Row], format: GridFormat) -> Result<String, CodecError> {
    match format {
        GridFormat::Plaintext => Ok(to_plaintext(grid, "conway")),
        GridFormat::Json => to_json(grid),
    }
}

pub fn to_plaintext(grid: &[Row], name: &str) -> String {
    let mut out = format!("{COMMENT_CHAR}Name: {name}\n");
    for row in grid {
        out.extend(row.iter().map(|cell| if cell.is_alive() { ALIVE_CHAR } else { DEAD_CHAR }));
        out.push('\n');
    }
    out
}

pub fn from_plaintext(text: &str) -> Result<Grid, CodecError> {
    let mut grid = Grid::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.starts_with(COMMENT_CHAR) {
            continue;
        }
        let row = line
            .chars()
            .enumerate()
            .map(|(column, c)| match c {
                ALIVE_CHAR => Ok(CellState::Alive),
                DEAD_CHAR => Ok(CellState::Dead),
                found => Err(CodecError::UnexpectedChar { line: index + 1, column: column + 1, found }),
            })
            .collect::<Result<Row, _>>()?;
        grid.push(row);
    }

    let cols = grid.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut grid {
        row.resize(cols, CellState::Dead);
    }
    Ok(grid)
}

pub fn to_json(grid: &[Row]) -> Result<String, CodecError> {
    let size = GridSize::of(grid);
    let document = GridDocument {
        rows: size.rows,
        cols: size.cols,
        cells: grid.to_vec(),
    };
    Ok(serde_json::to_string(&document)?)
}

pub fn from_json(text: &str) -> Result<Grid, CodecError> {
    let document: GridDocument = serde_json::from_str(text)?;
    let actual = validate_shape(&document.cells)?;
    let declared = GridSize::new(document.rows, document.cols);
    // A zero-row grid has no columns to speak of.
    if declared != actual && !(actual.rows == 0 && declared.rows == 0) {
        return Err(CodecError::SizeMismatch { declared, actual });
    }
    Ok(document.cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;
    use crate::grid::from_bits;

    #[test]
    fn plaintext_export_layout() {
        let grid = from_bits(&[&[0, 1, 0], &[1, 1, 1]]);
        assert_eq!(to_plaintext(&grid, "tee"), "!Name: tee\n.O.\nOOO\n");
    }

    #[test]
    fn plaintext_import_skips_comments_and_pads() {
        let text = "!Name: Glider\n!\n.O\n..O\r\nOOO\n";
        let grid = from_plaintext(text).unwrap();
        assert_eq!(grid, from_bits(&[&[0, 1, 0], &[0, 0, 1], &[1, 1, 1]]));
    }

    #[test]
    fn plaintext_import_keeps_blank_rows() {
        let grid = from_plaintext("O.\n\n.O\n").unwrap();
        assert_eq!(grid, from_bits(&[&[1, 0], &[0, 0], &[0, 1]]));
    }

    #[test]
    fn plaintext_rejects_unknown_characters() {
        let err = from_plaintext("!c\n.O\n.X.\n").unwrap_err();
        match err {
            CodecError::UnexpectedChar { line, column, found } => {
                assert_eq!((line, column, found), (3, 2, 'X'));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn plaintext_exports_back_to_same_grid() {
        let grid = from_bits(&[&[1, 0, 0, 1], &[0, 0, 0, 0], &[0, 1, 1, 0]]);
        let text = export(&grid, GridFormat::Plaintext).unwrap();
        assert_eq!(import(&text, GridFormat::Plaintext).unwrap(), grid);
    }

    #[test]
    fn json_document_shape() {
        let grid = from_bits(&[&[1, 0], &[0, 1]]);
        let text = to_json(&grid).unwrap();
        assert_eq!(text, r#"{"rows":2,"cols":2,"cells":[[1,0],[0,1]]}"#);
        assert_eq!(from_json(&text).unwrap(), grid);
    }

    #[test]
    fn json_size_mismatch_is_rejected() {
        let err = from_json(r#"{"rows":3,"cols":2,"cells":[[1,0],[0,1]]}"#).unwrap_err();
        assert!(matches!(err, CodecError::SizeMismatch { .. }));
    }

    #[test]
    fn json_ragged_cells_are_rejected() {
        let err = from_json(r#"{"rows":2,"cols":2,"cells":[[1,0],[0]]}"#).unwrap_err();
        assert!(matches!(err, CodecError::Grid(GridError::InvalidShape { row: 1, .. })));
    }

    #[test]
    fn json_rejects_non_binary_cells() {
        let err = from_json(r#"{"rows":1,"cols":1,"cells":[[2]]}"#).unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
    }

    #[test]
    fn empty_json_grid() {
        assert!(from_json(r#"{"rows":0,"cols":0,"cells":[]}"#).unwrap().is_empty());
    }
}
