use crate::model::record::{Field, TaskRecord, parse_date};

/// Error type for field edits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("the {0} field cannot be changed")]
    ImmutableField(Field),
    #[error("invalid date `{0}`: expected MM/DD/YYYY")]
    InvalidDate(String),
}

/// Set one field of a record from user input. Surrounding whitespace is trimmed.
pub fn edit_field(record: &mut TaskRecord, field: Field, value: &str) -> Result<(), EditError> {
    let value = value.trim();
    match field {
        Field::Id => return Err(EditError::ImmutableField(Field::Id)),
        Field::Date => {
            record.date = parse_date(value).ok_or_else(|| EditError::InvalidDate(value.into()))?;
        }
        Field::Name => record.name = value.to_string(),
        Field::Duration => record.duration = value.to_string(),
        Field::Notes => record.notes = value.to_string(),
    }
    Ok(())
}
