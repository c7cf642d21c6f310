use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Kind of media behind an uploaded piece of content
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    DeriveActiveEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ContentType {
    #[default]
    #[sea_orm(string_value = "video")]
    Video,
    #[sea_orm(string_value = "pdf")]
    Pdf,
    #[sea_orm(string_value = "image")]
    Image,
    #[sea_orm(string_value = "other")]
    Other,
}

#[cfg(test)]
mod test {
    use super::ContentType;
    use std::str::FromStr;

    #[test]
    fn test_content_type_parse() {
        assert_eq!(ContentType::from_str("pdf").unwrap(), ContentType::Pdf);
        assert_eq!(ContentType::Image.to_string(), "image");
        assert!(ContentType::from_str("audio").is_err());
    }
}
