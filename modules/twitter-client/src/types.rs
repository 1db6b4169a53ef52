use serde::Deserialize;

/// Cursor value requesting the first page of a paginated listing.
pub const FIRST_CURSOR: i64 = -1;

/// One page of the friends/ids listing.
///
/// `next_cursor` is the provider's opaque token for the following page;
/// any value `<= 0` means there are no further pages.
#[derive(Debug, Clone, Deserialize)]
pub struct FriendIdsPage {
    pub ids: Vec<i64>,
    pub next_cursor: i64,
}

impl FriendIdsPage {
    pub fn is_last(&self) -> bool {
        self.next_cursor <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_decodes_and_ignores_cursor_strings() {
        let body = r#"{
            "ids": [101, 102, 103],
            "next_cursor": 1374004777531007833,
            "next_cursor_str": "1374004777531007833",
            "previous_cursor": 0,
            "previous_cursor_str": "0"
        }"#;

        let page: FriendIdsPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.ids, vec![101, 102, 103]);
        assert!(!page.is_last());
    }

    #[test]
    fn zero_or_negative_cursor_is_terminal() {
        let last: FriendIdsPage =
            serde_json::from_str(r#"{"ids": [], "next_cursor": 0}"#).unwrap();
        assert!(last.is_last());

        let negative: FriendIdsPage =
            serde_json::from_str(r#"{"ids": [5], "next_cursor": -1}"#).unwrap();
        assert!(negative.is_last());
    }
}
