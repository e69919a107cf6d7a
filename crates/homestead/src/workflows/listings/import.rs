//! Bulk listing intake from a CSV export.
//!
//! Each row becomes a pending submission; the first malformed row aborts the
//! import with an error naming the offending line.

use std::io::Read;

use serde::{Deserialize, Deserializer};

use super::domain::{
    ListingDetails, ListingSubmission, OwnerId, PropertyKind, ValidationError,
};

#[derive(Debug, thiserror::Error)]
pub enum ListingImportError {
    #[error("failed to read listing csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unknown property kind '{value}'")]
    UnknownKind { row: usize, value: String },
    #[error("row {row}: {source}")]
    InvalidRow {
        row: usize,
        source: ValidationError,
    },
}

/// Parse a CSV document into validated listing submissions.
pub fn submissions_from_reader<R: Read>(
    reader: R,
) -> Result<Vec<ListingSubmission>, ListingImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut submissions = Vec::new();

    for (index, record) in csv_reader.deserialize::<ListingRow>().enumerate() {
        // Header occupies line 1, so data rows start at line 2.
        let row = index + 2;
        let parsed = record?;

        let kind = PropertyKind::parse(&parsed.kind).ok_or_else(|| {
            ListingImportError::UnknownKind {
                row,
                value: parsed.kind.clone(),
            }
        })?;

        let submission = ListingSubmission {
            owner: OwnerId(parsed.owner),
            details: ListingDetails {
                title: parsed.title,
                description: parsed.description,
                kind,
                city: parsed.city,
                address: parsed.address,
                price: parsed.price,
                bedrooms: parsed.bedrooms,
                bathrooms: parsed.bathrooms,
                area_sqft: parsed.area,
                furnished: parsed.furnished,
                amenities: Vec::new(),
                image_urls: Vec::new(),
            },
        };

        submission
            .validate()
            .map_err(|source| ListingImportError::InvalidRow { row, source })?;

        submissions.push(submission);
    }

    Ok(submissions)
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    #[serde(rename = "Owner")]
    owner: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Kind")]
    kind: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "Address", default)]
    address: String,
    #[serde(rename = "Price")]
    price: u64,
    #[serde(rename = "Bedrooms", default)]
    bedrooms: u8,
    #[serde(rename = "Bathrooms", default)]
    bathrooms: u8,
    #[serde(rename = "Area", default)]
    area: u32,
    #[serde(rename = "Furnished", default, deserialize_with = "truthy_flag")]
    furnished: bool,
    #[serde(rename = "Description", default)]
    description: String,
}

fn truthy_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "yes" | "true" | "1"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "Owner,Title,Kind,City,Address,Price,Bedrooms,Bathrooms,Area,Furnished,Description\n";

    #[test]
    fn parses_rows_into_pending_submissions() {
        let csv = format!(
            "{HEADER}own-1,Sunny Bungalow,house,Pokhara,Lakeside Rd,14500000,3,2,1800,yes,Garden and parking\n\
             own-2,City Flat,flat,Kathmandu,,9800000,2,1,950,no,\n"
        );

        let submissions =
            submissions_from_reader(Cursor::new(csv)).expect("rows parse");

        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0].details.kind, PropertyKind::House);
        assert!(submissions[0].details.furnished);
        assert_eq!(submissions[1].details.kind, PropertyKind::Apartment);
        assert!(!submissions[1].details.furnished);
        assert_eq!(submissions[1].owner, OwnerId("own-2".to_string()));
    }

    #[test]
    fn unknown_kind_names_the_row() {
        let csv = format!("{HEADER}own-1,Sunny Bungalow,castle,Pokhara,,14500000,3,2,1800,yes,\n");

        match submissions_from_reader(Cursor::new(csv)) {
            Err(ListingImportError::UnknownKind { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "castle");
            }
            other => panic!("expected unknown kind error, got {other:?}"),
        }
    }

    #[test]
    fn zero_price_rows_fail_validation() {
        let csv = format!(
            "{HEADER}own-1,Sunny Bungalow,house,Pokhara,,14500000,3,2,1800,yes,\n\
             own-2,Freebie,house,Pokhara,,0,1,1,400,no,\n"
        );

        match submissions_from_reader(Cursor::new(csv)) {
            Err(ListingImportError::InvalidRow { row, source }) => {
                assert_eq!(row, 3);
                assert_eq!(source, ValidationError::ZeroPrice);
            }
            other => panic!("expected invalid row error, got {other:?}"),
        }
    }
}
