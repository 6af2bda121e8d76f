//! Records returned by `list=` modules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ListItem;

/// An entry from `list=recentchanges`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecentChange {
    /// `edit`, `new`, `log`, `categorize` or `external`.
    #[serde(rename = "type")]
    pub kind: String,
    pub ns: i32,
    pub title: String,
    #[serde(default)]
    pub pageid: u64,
    #[serde(default)]
    pub revid: u64,
    #[serde(default)]
    pub old_revid: u64,
    #[serde(default)]
    pub rcid: u64,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub oldlen: u64,
    #[serde(default)]
    pub newlen: u64,
    #[serde(default)]
    pub minor: bool,
    #[serde(default)]
    pub bot: bool,
    #[serde(default)]
    pub new: bool,
}

impl ListItem for RecentChange {
    const MODULE: &'static str = "recentchanges";
    const LIMIT_PARAM: &'static str = "rclimit";
    const CONTINUE_PARAM: &'static str = "rccontinue";
}

/// A result from `list=search`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub ns: i32,
    pub title: String,
    #[serde(default)]
    pub pageid: u64,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub wordcount: u64,
    /// Matching excerpt, with highlight markup.
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ListItem for SearchHit {
    const MODULE: &'static str = "search";
    const LIMIT_PARAM: &'static str = "srlimit";
    const CONTINUE_PARAM: &'static str = "sroffset";
}

/// An entry from `list=logevents`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub logid: u64,
    #[serde(default)]
    pub ns: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub pageid: u64,
    #[serde(default)]
    pub logpage: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub action: String,
    #[serde(default)]
    pub user: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub comment: Option<String>,
    /// Type-specific details; the shape depends on `kind` and `action`.
    #[serde(default)]
    pub params: serde_json::Value,
}

impl ListItem for LogEntry {
    const MODULE: &'static str = "logevents";
    const LIMIT_PARAM: &'static str = "lelimit";
    const CONTINUE_PARAM: &'static str = "lecontinue";
}

/// An entry from `list=usercontribs`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserContrib {
    #[serde(default)]
    pub userid: u64,
    pub user: String,
    pub pageid: u64,
    pub revid: u64,
    #[serde(default)]
    pub parentid: u64,
    pub ns: i32,
    pub title: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub minor: bool,
    #[serde(default)]
    pub new: bool,
    /// Whether this is the page's latest revision.
    #[serde(default)]
    pub top: bool,
}

impl ListItem for UserContrib {
    const MODULE: &'static str = "usercontribs";
    const LIMIT_PARAM: &'static str = "uclimit";
    const CONTINUE_PARAM: &'static str = "uccontinue";
}

/// An account from `list=allusers`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub userid: u64,
    pub name: String,
    #[serde(default)]
    pub editcount: u64,
    #[serde(default)]
    pub groups: Vec<String>,
    /// Absent for very old accounts.
    #[serde(default, deserialize_with = "super::optional_timestamp")]
    pub registration: Option<DateTime<Utc>>,
    #[serde(default)]
    pub blockedby: Option<String>,
    #[serde(default)]
    pub blockreason: Option<String>,
}

impl UserRecord {
    pub fn is_blocked(&self) -> bool {
        self.blockedby.is_some()
    }
}

impl ListItem for UserRecord {
    const MODULE: &'static str = "allusers";
    const LIMIT_PARAM: &'static str = "aulimit";
    const CONTINUE_PARAM: &'static str = "aufrom";
}

/// A page in a category, from `list=categorymembers`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryMember {
    pub pageid: u64,
    pub ns: i32,
    pub title: String,
}

impl ListItem for CategoryMember {
    const MODULE: &'static str = "categorymembers";
    const LIMIT_PARAM: &'static str = "cmlimit";
    const CONTINUE_PARAM: &'static str = "cmcontinue";
}

/// A category from `list=allcategories`, with its member counts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryInfo {
    /// Category name without the namespace prefix.
    #[serde(rename = "category")]
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub pages: u64,
    #[serde(default)]
    pub files: u64,
    #[serde(default)]
    pub subcats: u64,
}

impl ListItem for CategoryInfo {
    const MODULE: &'static str = "allcategories";
    const LIMIT_PARAM: &'static str = "aclimit";
    const CONTINUE_PARAM: &'static str = "accontinue";
}

/// A page linking to the target, from `list=backlinks`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Backlink {
    pub pageid: u64,
    pub ns: i32,
    pub title: String,
    #[serde(default)]
    pub redirect: bool,
}

impl ListItem for Backlink {
    const MODULE: &'static str = "backlinks";
    const LIMIT_PARAM: &'static str = "bllimit";
    const CONTINUE_PARAM: &'static str = "blcontinue";
}

/// A page transcluding the target, from `list=embeddedin`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transclusion {
    pub pageid: u64,
    pub ns: i32,
    pub title: String,
}

impl ListItem for Transclusion {
    const MODULE: &'static str = "embeddedin";
    const LIMIT_PARAM: &'static str = "eilimit";
    const CONTINUE_PARAM: &'static str = "eicontinue";
}

/// A page from `list=allpages`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub pageid: u64,
    pub ns: i32,
    pub title: String,
}

impl ListItem for PageRecord {
    const MODULE: &'static str = "allpages";
    const LIMIT_PARAM: &'static str = "aplimit";
    const CONTINUE_PARAM: &'static str = "apcontinue";
}

/// The identity the server associates with the session, from `meta=userinfo`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub id: u64,
    /// Username, or the client IP address when anonymous.
    pub name: String,
    #[serde(default)]
    pub anon: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn recent_change_decodes() {
        let rc: RecentChange = serde_json::from_value(json!({
            "type": "edit",
            "ns": 0,
            "title": "Sandbox",
            "pageid": 12,
            "revid": 1001,
            "old_revid": 1000,
            "rcid": 55,
            "user": "Example",
            "bot": true,
            "oldlen": 10,
            "newlen": 14,
            "timestamp": "2024-03-01T12:00:00Z",
            "comment": "tweak"
        }))
        .unwrap();
        assert_eq!(rc.kind, "edit");
        assert!(rc.bot);
        assert!(!rc.minor);
        assert_eq!(rc.timestamp.to_rfc3339(), "2024-03-01T12:00:00+00:00");
    }

    #[test]
    fn user_record_tolerates_missing_registration() {
        let user: UserRecord = serde_json::from_value(json!({
            "userid": 1,
            "name": "Old Account",
            "editcount": 3,
            "registration": ""
        }))
        .unwrap();
        assert!(user.registration.is_none());
        assert!(user.groups.is_empty());
        assert!(!user.is_blocked());

        let user: UserRecord = serde_json::from_value(json!({
            "name": "New Account",
            "registration": "2020-05-05T00:00:00Z",
            "groups": ["*", "user"],
            "blockedby": "Admin"
        }))
        .unwrap();
        assert!(user.registration.is_some());
        assert_eq!(user.groups, ["*", "user"]);
        assert!(user.is_blocked());
    }

    #[test]
    fn category_info_uses_category_key() {
        let info: CategoryInfo =
            serde_json::from_value(json!({"category": "Bots", "size": 4, "pages": 3, "files": 0, "subcats": 1}))
                .unwrap();
        assert_eq!(info.name, "Bots");
        assert_eq!(info.subcats, 1);
    }

    #[test]
    fn anonymous_user_info() {
        let info: UserInfo =
            serde_json::from_value(json!({"id": 0, "name": "192.0.2.1", "anon": true})).unwrap();
        assert!(info.anon);
    }
}
