//! Single-record conveniences built on the revision and list reads.

use crate::Result;
use crate::records::{Cursor, UserRecord};
use crate::transport::Transport;
use crate::types::{SortOrder, Title};

use super::ApiClient;
use super::revisions::RevisionQuery;

impl<T: Transport> ApiClient<T> {
    /// Wikitext of the latest revision, or `None` if the page does not exist.
    pub async fn page_text(&self, title: &Title) -> Result<Option<String>> {
        let query = RevisionQuery::new(title.clone())
            .content(true)
            .fail_on_missing(false);
        let page = self.revisions(&query).await?;
        Ok(page.and_then(|page| page.revisions.into_iter().next()?.content))
    }

    /// Page id, or `None` if the page does not exist.
    pub async fn page_id(&self, title: &Title) -> Result<Option<u64>> {
        let query = RevisionQuery::new(title.clone()).fail_on_missing(false);
        Ok(self.revisions(&query).await?.map(|page| page.page_id))
    }

    /// Look up one account by exact name.
    pub async fn user(&self, name: &str) -> Result<Option<UserRecord>> {
        let page = self
            .users(1, SortOrder::Ascending, None, Some(&Cursor::new(name)))
            .await?;
        Ok(page.items.into_iter().next().filter(|user| user.name == name))
    }

    /// Edit count of an account, or `None` if there is no such user.
    pub async fn contrib_count(&self, name: &str) -> Result<Option<u64>> {
        Ok(self.user(name).await?.map(|user| user.editcount))
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::ScriptedTransport;
    use super::*;
    use crate::config::ClientConfig;
    use crate::types::ApiUrl;

    fn client(replies: &[&str]) -> ApiClient<ScriptedTransport> {
        let config = ClientConfig::new(ApiUrl::new("https://wiki.example.org/w/api.php").unwrap());
        ApiClient::with_transport(config, ScriptedTransport::new(replies.iter().copied()))
    }

    #[tokio::test]
    async fn user_lookup_requires_exact_name() {
        let client = client(&[
            r#"{"query":{"allusers":[{"userid":4,"name":"Examplea","editcount":9}]}}"#,
            r#"{"query":{"allusers":[{"userid":3,"name":"Example","editcount":12}]}}"#,
        ]);
        assert!(client.user("Example").await.unwrap().is_none());
        assert_eq!(client.contrib_count("Example").await.unwrap(), Some(12));

        let url = &client.transport().sent()[0].url;
        assert!(url.contains("aufrom=Example"));
        assert!(url.contains("aulimit=1"));
    }

    #[tokio::test]
    async fn page_text_of_missing_page() {
        let client = client(&[r#"{"query":{"pages":[{"ns":0,"title":"Nowhere","missing":true}]}}"#]);
        let title = Title::new("Nowhere").unwrap();
        assert_eq!(client.page_text(&title).await.unwrap(), None);
    }
}
