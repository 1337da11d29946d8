/// Transport file reference of the highest-resolution photo variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRef {
    pub file_id: String,
}

/// What the pipeline accepts. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    Text(String),
    Photo(PhotoRef),
}

impl InboundMessage {
    pub fn text(content: impl Into<String>) -> Self {
        InboundMessage::Text(content.into())
    }

    pub fn photo(file_id: impl Into<String>) -> Self {
        InboundMessage::Photo(PhotoRef {
            file_id: file_id.into(),
        })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            InboundMessage::Text(_) => "text",
            InboundMessage::Photo(_) => "photo",
        }
    }
}
