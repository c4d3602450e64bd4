use crate::error::FormError;
use crate::models::{PropertyRecord, PropertyType, RecordId, Status};

/// Raw values of the six form inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub location: String,
    pub property_type: String,
    pub rent: String,
    pub status: String,
    pub notes: String,
}

/// Validated field values, waiting for an id and a creation date
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDraft {
    pub name: String,
    pub location: String,
    pub property_type: PropertyType,
    pub rent: f64,
    pub status: Status,
    pub notes: String,
}

impl FormFields {
    /// Prefill values for editing; id and creation date are not form fields
    pub fn from_record(record: &PropertyRecord) -> Self {
        Self {
            name: record.name.clone(),
            location: record.location.clone(),
            property_type: record.property_type.to_string(),
            rent: record.rent.to_string(),
            status: record.status.to_string(),
            notes: record.notes.clone(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    pub fn parse(&self) -> Result<PropertyDraft, FormError> {
        let name = required("name", &self.name)?;
        let location = required("location", &self.location)?;
        let property_type = required("type", &self.property_type)?
            .parse::<PropertyType>()
            .map_err(FormError::UnknownType)?;
        let rent_text = required("rent", &self.rent)?;
        let status = required("status", &self.status)?
            .parse::<Status>()
            .map_err(FormError::UnknownStatus)?;

        let rent = rent_text
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite() && *r >= 0.0)
            .ok_or_else(|| FormError::InvalidRent(rent_text.to_string()))?;

        Ok(PropertyDraft {
            name: name.to_string(),
            location: location.to_string(),
            property_type,
            rent,
            status,
            notes: self.notes.trim().to_string(),
        })
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::MissingField(field))
    } else {
        Ok(value)
    }
}

impl PropertyDraft {
    pub fn into_record(self, id: RecordId, date_added: String) -> PropertyRecord {
        PropertyRecord {
            id,
            name: self.name,
            location: self.location,
            property_type: self.property_type,
            rent: self.rent,
            status: self.status,
            notes: self.notes,
            date_added,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormFields {
        FormFields {
            name: " Unit A ".to_string(),
            location: "Nairobi".to_string(),
            property_type: "apartment".to_string(),
            rent: "25000".to_string(),
            status: "available".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn parses_a_complete_form() {
        let draft = filled().parse().unwrap();
        assert_eq!(draft.name, "Unit A");
        assert_eq!(draft.property_type, PropertyType::Apartment);
        assert_eq!(draft.rent, 25000.0);
        assert_eq!(draft.status, Status::Available);
        assert_eq!(draft.notes, "");
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        let mut fields = filled();
        fields.location = "   ".to_string();
        assert_eq!(fields.parse(), Err(FormError::MissingField("location")));

        let mut fields = filled();
        fields.rent.clear();
        assert_eq!(fields.parse(), Err(FormError::MissingField("rent")));
    }

    #[test]
    fn notes_are_optional() {
        let mut fields = filled();
        fields.notes = "  Near the stage ".to_string();
        assert_eq!(fields.parse().unwrap().notes, "Near the stage");
    }

    #[test]
    fn vocabulary_is_enforced() {
        let mut fields = filled();
        fields.property_type = "castle".to_string();
        assert_eq!(fields.parse(), Err(FormError::UnknownType("castle".to_string())));

        let mut fields = filled();
        fields.status = "sold".to_string();
        assert_eq!(fields.parse(), Err(FormError::UnknownStatus("sold".to_string())));
    }

    #[test]
    fn rent_must_be_a_non_negative_number() {
        for bad in ["abc", "-10", "NaN", "inf"] {
            let mut fields = filled();
            fields.rent = bad.to_string();
            assert_eq!(fields.parse(), Err(FormError::InvalidRent(bad.to_string())));
        }
    }

    #[test]
    fn prefill_round_trips_through_parse() {
        let record = PropertyRecord {
            id: 11,
            name: "Plot 9".to_string(),
            location: "Eldoret".to_string(),
            property_type: PropertyType::Commercial,
            rent: 40500.75,
            status: Status::Occupied,
            notes: "Two floors".to_string(),
            date_added: "01/01/2025".to_string(),
        };

        let fields = FormFields::from_record(&record);
        assert_eq!(fields.rent, "40500.75");
        let rebuilt = fields.parse().unwrap().into_record(record.id, record.date_added.clone());
        assert_eq!(rebuilt, record);
    }

    #[test]
    fn clear_resets_every_field() {
        let mut fields = filled();
        fields.clear();
        assert!(fields.is_blank());
    }
}
