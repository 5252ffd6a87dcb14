use thiserror::Error;

/// Errors raised while converting one lab report table.
///
/// `UnrecognizedSchema` is a skip-level outcome (the file is not one of the
/// known lab formats). The remaining variants are fatal for the file: they
/// mean the table claimed a known layout but its contents cannot be carried
/// into the canonical schema without losing or corrupting data.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("columns do not match any known lab report layout")]
    UnrecognizedSchema,

    #[error("column `{column}` survived mapping unaccounted for")]
    SchemaDrift { column: String },

    #[error("cannot convert value `{value}` in column `{column}` (row {row})")]
    UnparseableValue {
        column: String,
        row: usize,
        value: String,
    },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
