use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a listing, derived from the creation timestamp in milliseconds
pub type RecordId = i64;

/// Kind of property being listed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    House,
    Commercial,
}

impl PropertyType {
    pub const ALL: [PropertyType; 3] = [Self::Apartment, Self::House, Self::Commercial];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apartment => "apartment",
            Self::House => "house",
            Self::Commercial => "commercial",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| s.to_string())
    }
}

/// Occupancy status of a listing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Available,
    Occupied,
}

impl Status {
    pub const ALL: [Status; 2] = [Self::Available, Self::Occupied];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| s.to_string())
    }
}

/// Core property data model, one managed listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub id: RecordId,
    pub name: String,
    pub location: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(deserialize_with = "rent_from_number_or_text")]
    pub rent: f64,
    pub status: Status,
    #[serde(default)]
    pub notes: String,
    pub date_added: String,
}

/// Older documents carry rent as the raw form text ("25000")
fn rent_from_number_or_text<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Rent {
        Number(f64),
        Text(String),
    }

    match Rent::deserialize(deserializer)? {
        Rent::Number(n) => Ok(n),
        Rent::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("rent is not a number: {:?}", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_browser_field_names() {
        let record = PropertyRecord {
            id: 1_700_000_000_000,
            name: "Unit A".to_string(),
            location: "Nairobi".to_string(),
            property_type: PropertyType::Apartment,
            rent: 25000.0,
            status: Status::Available,
            notes: String::new(),
            date_added: "14/11/2023".to_string(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1_700_000_000_000i64,
                "name": "Unit A",
                "location": "Nairobi",
                "type": "apartment",
                "rent": 25000.0,
                "status": "available",
                "notes": "",
                "dateAdded": "14/11/2023"
            })
        );
    }

    #[test]
    fn accepts_rent_written_as_text() {
        let record: PropertyRecord = serde_json::from_value(json!({
            "id": 5,
            "name": "Shop 3",
            "location": "Mombasa",
            "type": "commercial",
            "rent": " 120000 ",
            "status": "occupied",
            "notes": "Corner unit",
            "dateAdded": "01/02/2024"
        }))
        .unwrap();

        assert_eq!(record.rent, 120000.0);
        assert_eq!(record.property_type, PropertyType::Commercial);
    }

    #[test]
    fn rejects_unparseable_rent_text() {
        let result: Result<PropertyRecord, _> = serde_json::from_value(json!({
            "id": 5,
            "name": "Shop 3",
            "location": "Mombasa",
            "type": "commercial",
            "rent": "a lot",
            "status": "occupied",
            "notes": "",
            "dateAdded": "01/02/2024"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn vocabulary_parsing_is_case_insensitive() {
        assert_eq!("House".parse::<PropertyType>(), Ok(PropertyType::House));
        assert_eq!(" OCCUPIED ".parse::<Status>(), Ok(Status::Occupied));
        assert!("villa".parse::<PropertyType>().is_err());
    }
}
