use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

/// An uploaded file as received from the caller, validated against the
/// accepted media-type set before any extraction happens.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedDocument {
    pub id: DocumentId,
    pub original_filename: String,
    pub content_type: ContentType,
    pub declared_mime: String,
    pub size_bytes: u64,
}

impl SubmittedDocument {
    pub fn new(
        original_filename: String,
        content_type: ContentType,
        declared_mime: String,
        size_bytes: u64,
    ) -> Self {
        Self {
            id: DocumentId::new(),
            original_filename,
            content_type,
            declared_mime,
            size_bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Pdf,
    Image,
    Text,
}

impl ContentType {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(Self::Pdf),
            m if m.starts_with("image/") => Some(Self::Image),
            "text/plain" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Image => "image/*",
            Self::Text => "text/plain",
        }
    }
}

/// The original binary artifact of a submission, kept alongside extraction so
/// the pipeline can still send it to the model when extracted text is not
/// trustworthy.
#[derive(Debug, Clone, PartialEq)]
pub struct RawArtifact {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl RawArtifact {
    pub fn new(media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            bytes,
        }
    }
}

/// Exactly one of the two shapes is populated per request: an uploaded file
/// with its declared media type, or inline pasted text.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    File {
        document: SubmittedDocument,
        data: Vec<u8>,
    },
    InlineText(String),
}
