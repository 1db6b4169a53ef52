use serde::Deserialize;

/// The author of a post, carried inside every inbound event.
///
/// `id` is the external numeric identity (stable, globally unique). A
/// followee discovered during graph expansion is known only by id, so the
/// profile attributes are optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TwitterUser {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub screen_name: Option<String>,
}

impl TwitterUser {
    /// A bare identity, as yielded by friend-ids pagination.
    pub fn from_id(id: i64) -> Self {
        Self {
            id,
            name: None,
            screen_name: None,
        }
    }
}

/// Inbound event payload: a serialized post with its embedded author.
/// Only the fields the consumer acts on are decoded; the rest of the
/// payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(default)]
    pub text: Option<String>,
    pub user: TwitterUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_decodes_embedded_author_and_ignores_extras() {
        let payload = r#"{
            "id": 4001,
            "text": "hello",
            "user": {"id": 42, "name": "Ada", "screen_name": "ada", "followers_count": 9},
            "retweet_count": 3
        }"#;

        let post: Post = serde_json::from_str(payload).unwrap();
        assert_eq!(post.id, 4001);
        assert_eq!(post.user.id, 42);
        assert_eq!(post.user.screen_name.as_deref(), Some("ada"));
    }

    #[test]
    fn author_profile_fields_are_optional() {
        let post: Post =
            serde_json::from_str(r#"{"id": 1, "user": {"id": 7}}"#).unwrap();
        assert_eq!(post.user, TwitterUser::from_id(7));
    }
}
