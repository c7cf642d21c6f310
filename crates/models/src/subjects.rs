use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

#[cfg(feature = "database")]
use sea_orm::Value;

/// Ordered list of subjects a teacher covers.
///
/// Stored in a single text column joined by [`SubjectList::SEPARATOR`]. An
/// empty list is stored as the empty string, and both the empty string and
/// NULL read back as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectList(Vec<String>);

/// Reasons a subject cannot be stored without changing the list on read-back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidSubject {
    Empty,
    ContainsSeparator(String),
}

impl Display for InvalidSubject {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Empty => write!(f, "subject names must not be empty"),
            Self::ContainsSeparator(subject) => write!(
                f,
                "subject '{subject}' must not contain '{}'",
                SubjectList::SEPARATOR
            ),
        }
    }
}

impl SubjectList {
    pub const SEPARATOR: &'static str = ",";

    /// Builds a list, rejecting entries that would not survive a
    /// join-then-split through the text column
    pub fn new(subjects: Vec<String>) -> Result<Self, InvalidSubject> {
        for subject in &subjects {
            if subject.is_empty() {
                return Err(InvalidSubject::Empty);
            }
            if subject.contains(Self::SEPARATOR) {
                return Err(InvalidSubject::ContainsSeparator(subject.clone()));
            }
        }

        Ok(Self(subjects))
    }

    /// Decodes the stored column text
    pub fn from_stored(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }

        Self(text.split(Self::SEPARATOR).map(str::to_owned).collect())
    }

    /// Encodes the list for the text column
    pub fn to_stored(&self) -> String {
        self.0.join(Self::SEPARATOR)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::ValueType for SubjectList {
    fn try_from(v: Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
        match v {
            Value::String(Some(s)) => Ok(Self::from_stored(&s)),
            Value::String(None) => Ok(Self::default()),
            _ => Err(sea_orm::sea_query::ValueTypeErr),
        }
    }

    fn type_name() -> String {
        "SubjectList".to_string()
    }

    fn array_type() -> sea_orm::sea_query::ArrayType {
        sea_orm::sea_query::ArrayType::String
    }

    fn column_type() -> sea_orm::sea_query::ColumnType {
        sea_orm::sea_query::ColumnType::Text
    }
}

#[cfg(feature = "database")]
impl From<SubjectList> for Value {
    fn from(subjects: SubjectList) -> Self {
        Value::String(Some(Box::new(subjects.to_stored())))
    }
}

#[cfg(feature = "database")]
impl sea_orm::TryGetable for SubjectList {
    fn try_get_by<I: sea_orm::ColIdx>(
        res: &sea_orm::QueryResult,
        index: I,
    ) -> Result<Self, sea_orm::TryGetError> {
        // Rows written before the column was constrained may hold NULL
        let val: Option<String> = res.try_get_by(index)?;

        Ok(val.as_deref().map(Self::from_stored).unwrap_or_default())
    }
}

#[cfg(feature = "database")]
impl sea_orm::sea_query::Nullable for SubjectList {
    fn null() -> Value {
        Value::String(None)
    }
}

#[cfg(test)]
mod test {
    use super::{InvalidSubject, SubjectList};

    #[test]
    fn test_subjects_keep_order_through_storage() {
        let subjects =
            SubjectList::new(vec!["Math".to_string(), "Physics".to_string()]).unwrap();
        let stored = subjects.to_stored();

        assert_eq!(stored, "Math,Physics");
        assert_eq!(
            SubjectList::from_stored(&stored).into_inner(),
            vec!["Math", "Physics"]
        );
    }

    #[test]
    fn test_empty_list_is_empty_text() {
        let subjects = SubjectList::new(vec![]).unwrap();

        assert_eq!(subjects.to_stored(), "");
        assert!(SubjectList::from_stored("").is_empty());
    }

    #[test]
    fn test_rejects_unstorable_subjects() {
        assert_eq!(
            SubjectList::new(vec![String::new()]),
            Err(InvalidSubject::Empty)
        );
        assert_eq!(
            SubjectList::new(vec!["Art, Craft".to_string()]),
            Err(InvalidSubject::ContainsSeparator("Art, Craft".to_string()))
        );
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let subjects = SubjectList::new(vec!["Chemistry".to_string()]).unwrap();
        assert_eq!(
            serde_json::to_string(&subjects).unwrap(),
            "[\"Chemistry\"]"
        );
    }
}
