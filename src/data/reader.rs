//! CSV ingestion
//!
//! The header row names the attributes and the last column holds the 0/1
//! outcome of each instance.
use super::dataset::{Dataset, Label};
use crate::error::TreeError;
use csv::{ReaderBuilder, Trim};
use nalgebra::{DMatrix, DVector};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Dataset<f64>, TreeError> {
    let file = File::open(path)?;
    read_csv_from(file)
}

pub fn read_csv_from<R: Read>(source: R) -> Result<Dataset<f64>, TreeError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let Some(dimension) = headers.len().checked_sub(1) else {
        return Err(TreeError::EmptyDataset);
    };
    let attributes = headers
        .iter()
        .take(dimension)
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut columns = vec![Vec::new(); dimension];
    let mut outcomes = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let record = result?;
        // the header is line 1
        let line = index + 2;

        for (column, field) in record.iter().take(dimension).enumerate() {
            let value = field.parse::<f64>().map_err(|_| TreeError::Parse {
                line,
                column,
                value: field.to_string(),
            })?;
            columns[column].push(value);
        }

        let field = record.get(dimension).ok_or(TreeError::DimensionMismatch {
            expected: dimension + 1,
            found: record.len(),
        })?;
        outcomes.push(parse_label(field, line, dimension)?);
    }

    let nrows = outcomes.len();
    let x = DMatrix::from_vec(nrows, dimension, columns.concat());
    Dataset::new(attributes, x, DVector::from_vec(outcomes))
}

fn parse_label(field: &str, line: usize, column: usize) -> Result<Label, TreeError> {
    let value = field.parse::<f64>().map_err(|_| TreeError::Parse {
        line,
        column,
        value: field.to_string(),
    })?;

    if value == 0.0 {
        Ok(0)
    } else if value == 1.0 {
        Ok(1)
    } else {
        Err(TreeError::InvalidLabel(field.to_string()))
    }
}
