//! Tables for Quarto documents
//!
//! [`QuartoTable`] wraps an Arrow [`RecordBatch`] and renders it as LaTeX or
//! HTML. Arrow support is compiled in with the `tables` feature (on by
//! default); without it, construction fails with
//! [`Error::MissingDependency`].
//!
//! [`RecordBatch`]: https://docs.rs/arrow/latest/arrow/record_batch/struct.RecordBatch.html

pub mod render;

use std::any::Any;

use crate::error::{Error, Result};

pub use render::TextTable;

#[cfg(feature = "tables")]
use arrow::record_batch::RecordBatch;

/// A tabular value that can render itself for LaTeX and HTML documents
#[derive(Debug, Clone)]
pub struct QuartoTable {
    #[cfg(feature = "tables")]
    batch: RecordBatch,
}

impl QuartoTable {
    /// Wrap an arbitrary value, which must be an Arrow `RecordBatch`
    #[cfg(feature = "tables")]
    pub fn from_any(value: Box<dyn Any>) -> Result<Self> {
        value
            .downcast::<RecordBatch>()
            .map(|batch| Self::new(*batch))
            .map_err(|_| Error::InvalidInputType("The input must be an Arrow RecordBatch.".to_string()))
    }

    /// Wrap an arbitrary value, which must be an Arrow `RecordBatch`
    #[cfg(not(feature = "tables"))]
    pub fn from_any(_value: Box<dyn Any>) -> Result<Self> {
        Err(Error::MissingDependency(
            "arrow is required to use QuartoTable; enable the `tables` feature.".to_string(),
        ))
    }
}

#[cfg(feature = "tables")]
mod arrow_table {
    use std::fs::File;
    use std::path::Path;

    use arrow::compute::concat_batches;
    use arrow::error::ArrowError;
    use arrow::record_batch::RecordBatch;
    use arrow::util::display::{ArrayFormatter, FormatOptions};
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use super::{QuartoTable, TextTable};
    use crate::error::Result;

    impl QuartoTable {
        #[must_use]
        pub fn new(batch: RecordBatch) -> Self {
            Self { batch }
        }

        /// Read a whole Parquet file into a single table
        pub fn from_parquet(path: &Path) -> Result<Self> {
            let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(path)?)?;
            let schema = builder.schema().clone();
            let batches = builder
                .build()?
                .collect::<std::result::Result<Vec<_>, ArrowError>>()?;
            log::debug!("Read {} batches from {}", batches.len(), path.display());
            Ok(Self::new(concat_batches(&schema, &batches)?))
        }

        #[must_use]
        pub fn batch(&self) -> &RecordBatch {
            &self.batch
        }

        /// LaTeX representation, without index column
        pub fn to_latex(&self) -> Result<String> {
            Ok(self.to_text()?.to_latex())
        }

        /// HTML representation, without index column
        pub fn to_html(&self) -> Result<String> {
            Ok(self.to_text()?.to_html())
        }

        fn to_text(&self) -> Result<TextTable> {
            let schema = self.batch.schema();
            let options = FormatOptions::default().with_null("NaN");
            let formatters = self
                .batch
                .columns()
                .iter()
                .map(|column| ArrayFormatter::try_new(column.as_ref(), &options))
                .collect::<std::result::Result<Vec<_>, ArrowError>>()?;

            let rows: Vec<Vec<String>> = (0..self.batch.num_rows())
                .map(|row| {
                    formatters
                        .iter()
                        .map(|formatter| formatter.value(row).to_string())
                        .collect::<Vec<_>>()
                })
                .collect();

            Ok(TextTable {
                headers: schema.fields().iter().map(|f| f.name().clone()).collect(),
                right_align: schema
                    .fields()
                    .iter()
                    .map(|f| f.data_type().is_numeric())
                    .collect(),
                rows,
            })
        }
    }

    impl From<RecordBatch> for QuartoTable {
        fn from(batch: RecordBatch) -> Self {
            Self::new(batch)
        }
    }
}
