use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::errors::{require, DomainError, DomainResult};

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_LIMIT: i64 = 50;

/// A persisted record of one event that needs a specific user's attention.
///
/// Everything except `read` is write-once. Optional references deserialize
/// empty strings as `None`, so `{"link": ""}` and a missing `link` are the same.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "userID", default)]
    pub user_id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub from: String,
    /// Milliseconds since the Unix epoch.
    #[serde(rename = "createAt", default)]
    pub create_at: i64,
    #[serde(default)]
    pub read: bool,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub link: Option<String>,
    #[serde(
        rename = "boardID",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub board_id: Option<String>,
    #[serde(
        rename = "cardID",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub card_id: Option<String>,
}

impl Notification {
    /// Unread notification with no id or timestamp yet; the service fills both.
    pub fn new(
        user_id: impl Into<String>,
        message: impl Into<String>,
        from: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            user_id: user_id.into(),
            message: message.into(),
            from: from.into(),
            create_at: 0,
            read: false,
            link: None,
            board_id: None,
            card_id: None,
        }
    }

    pub fn with_board(mut self, board_id: impl Into<String>, card_id: Option<String>) -> Self {
        self.board_id = non_empty(Some(board_id.into()));
        self.card_id = non_empty(card_id);
        self
    }

    /// Checks the fields every stored notification must carry.
    pub fn validate(&self) -> DomainResult<()> {
        require(&self.user_id, "userID")?;
        require(&self.message, "message")?;
        require(&self.from, "from")?;
        Ok(())
    }

    pub fn from_json(data: &[u8]) -> DomainResult<Self> {
        Ok(serde_json::from_slice(data)?)
    }

    pub fn list_from_json(data: &[u8]) -> DomainResult<Vec<Self>> {
        Ok(serde_json::from_slice(data)?)
    }
}

/// Navigable path for a board, or for a card on that board.
pub fn board_link(board_id: &str, card_id: Option<&str>) -> String {
    match card_id.filter(|c| !c.is_empty()) {
        Some(card_id) => format!("/boards/{}/{}", board_id, card_id),
        None => format!("/boards/{}", board_id),
    }
}

/// Offset pagination for notification listings.
///
/// No snapshot isolation: rows inserted between two page requests shift
/// later pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl Pagination {
    /// Parses raw query values. Absent or empty values fall back to the
    /// defaults; anything else must be an integer.
    pub fn from_query(limit: Option<&str>, offset: Option<&str>) -> DomainResult<Self> {
        let mut page = Self::default();
        if let Some(raw) = limit.filter(|s| !s.is_empty()) {
            page.limit = parse_int(raw, "limit")?;
        }
        if let Some(raw) = offset.filter(|s| !s.is_empty()) {
            page.offset = parse_int(raw, "offset")?;
        }
        Ok(page)
    }
}

fn parse_int(raw: &str, field: &str) -> DomainResult<i64> {
    raw.trim().parse::<i64>().map_err(|e| {
        DomainError::validation(format!("invalid {} parameter {:?}: {}", field, raw, e))
    })
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(non_empty(value))
}
