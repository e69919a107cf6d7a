use serde::{Deserialize, Serialize};

/// Identifier wrapper for KYC submissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KycId(pub String);

/// Identifier wrapper for the verifying user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Accepted identity document categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Citizenship,
    DrivingLicense,
    Passport,
}

impl DocumentType {
    pub const fn label(self) -> &'static str {
        match self {
            DocumentType::Citizenship => "citizenship",
            DocumentType::DrivingLicense => "driving_license",
            DocumentType::Passport => "passport",
        }
    }
}

/// Review status of a KYC submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    Pending,
    Approved,
    Rejected,
}

impl KycStatus {
    pub const fn label(self) -> &'static str {
        match self {
            KycStatus::Pending => "pending",
            KycStatus::Approved => "approved",
            KycStatus::Rejected => "rejected",
        }
    }
}

/// Inbound submission payload. Both document faces and a document type are
/// required; the optionals exist so validation can name what is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycRequest {
    pub user_id: UserId,
    pub document_type: Option<DocumentType>,
    pub front_image_url: Option<String>,
    pub back_image_url: Option<String>,
}

impl KycRequest {
    /// Validate the submission into a complete identity document.
    pub fn into_document(self) -> Result<(UserId, KycDocument), KycValidationError> {
        let document_type = self
            .document_type
            .ok_or(KycValidationError::MissingDocumentType)?;
        let front_image_url = self
            .front_image_url
            .filter(|url| !url.trim().is_empty())
            .ok_or(KycValidationError::MissingFrontImage)?;
        let back_image_url = self
            .back_image_url
            .filter(|url| !url.trim().is_empty())
            .ok_or(KycValidationError::MissingBackImage)?;

        Ok((
            self.user_id,
            KycDocument {
                document_type,
                front_image_url,
                back_image_url,
            },
        ))
    }
}

/// The validated identity document carried by a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycDocument {
    pub document_type: DocumentType,
    pub front_image_url: String,
    pub back_image_url: String,
}

/// Validation failures for an incomplete KYC submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum KycValidationError {
    #[error("a document type must be selected")]
    MissingDocumentType,
    #[error("the front document image is required")]
    MissingFrontImage,
    #[error("the back document image is required")]
    MissingBackImage,
}

/// Caller-supplied profile facts merged into trust-factor derivation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSnapshot {
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub phone_verified: bool,
    #[serde(default)]
    pub has_profile_photo: bool,
    #[serde(default)]
    pub open_reports: u32,
}
