//! News and comment domain service.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::comment::{Comment, CommentId};
use crate::domain::error::Error;
use crate::domain::moderation::comment_rules;
use crate::domain::news::{News, NewsId};
use crate::domain::policy::{Actor, Operation, decide, ensure_allowed};
use crate::domain::ports::{
    CommentRepository, CommentStoreError, NewsRepository, NewsStoreError,
};

/// Use-cases for the news site: the ordered home page, news detail, and
/// comment submission/edit/delete under the access-control policy.
#[derive(Clone)]
pub struct NewsService {
    news: Arc<dyn NewsRepository>,
    comments: Arc<dyn CommentRepository>,
    page_size: usize,
}

impl NewsService {
    pub fn new(
        news: Arc<dyn NewsRepository>,
        comments: Arc<dyn CommentRepository>,
        page_size: usize,
    ) -> Self {
        Self {
            news,
            comments,
            page_size,
        }
    }

    /// The home page: news sorted by date descending, truncated to the
    /// configured page size.
    pub async fn home_page(&self) -> Result<Vec<News>, Error> {
        self.news
            .list_recent(self.page_size)
            .await
            .map_err(map_news_error)
    }

    /// A news item plus its comments sorted by creation time ascending.
    pub async fn detail(&self, id: &NewsId) -> Result<(News, Vec<Comment>), Error> {
        let news = self
            .news
            .find_by_id(id)
            .await
            .map_err(map_news_error)?
            .ok_or_else(|| Error::not_found("no such news"))?;
        let comments = self
            .comments
            .list_for_news(id)
            .await
            .map_err(map_comment_error)?;
        Ok((news, comments))
    }

    /// Submit a comment on a news item.
    ///
    /// Moderation runs before anything is persisted; a rejected text leaves
    /// the store untouched.
    pub async fn submit_comment(
        &self,
        actor: &Actor,
        news_id: &NewsId,
        text: &str,
    ) -> Result<Comment, Error> {
        ensure_allowed(decide(actor, Operation::Submit))?;
        let Some(author) = actor.user_id() else {
            return Err(Error::unauthorized("login required"));
        };
        comment_rules().evaluate(text)?;

        self.news
            .find_by_id(news_id)
            .await
            .map_err(map_news_error)?
            .ok_or_else(|| Error::not_found("no such news"))?;

        let comment = Comment::new(*news_id, *author, text, Utc::now());
        self.comments
            .upsert(&comment)
            .await
            .map_err(map_comment_error)?;
        tracing::info!(comment_id = %comment.id(), news_id = %news_id, "comment created");
        Ok(comment)
    }

    /// Load a comment on behalf of `actor`, applying the ownership policy.
    ///
    /// A non-owner learns nothing: the comment is reported absent.
    pub async fn comment_for(&self, actor: &Actor, id: &CommentId) -> Result<Comment, Error> {
        let comment = self
            .comments
            .find_by_id(id)
            .await
            .map_err(map_comment_error)?
            .ok_or_else(|| Error::not_found("no such comment"))?;
        ensure_allowed(decide(
            actor,
            Operation::Owned {
                author: comment.author_id(),
            },
        ))?;
        Ok(comment)
    }

    /// Replace the text of the actor's own comment.
    pub async fn edit_comment(
        &self,
        actor: &Actor,
        id: &CommentId,
        text: &str,
    ) -> Result<Comment, Error> {
        let mut comment = self.comment_for(actor, id).await?;
        comment_rules().evaluate(text)?;
        comment.set_text(text);
        self.comments
            .upsert(&comment)
            .await
            .map_err(map_comment_error)?;
        Ok(comment)
    }

    /// Delete the actor's own comment, returning the removed record.
    pub async fn delete_comment(&self, actor: &Actor, id: &CommentId) -> Result<Comment, Error> {
        let comment = self.comment_for(actor, id).await?;
        self.comments
            .delete(id)
            .await
            .map_err(map_comment_error)?;
        tracing::info!(comment_id = %id, "comment deleted");
        Ok(comment)
    }
}

fn map_news_error(error: NewsStoreError) -> Error {
    Error::internal(format!("news store error: {error}"))
}

fn map_comment_error(error: CommentStoreError) -> Error {
    Error::internal(format!("comment store error: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::moderation::{FORBIDDEN_WORDS, WARNING};
    use crate::domain::ports::{MockCommentRepository, MockNewsRepository};
    use crate::domain::user::UserId;
    use chrono::NaiveDate;

    const PAGE_SIZE: usize = 10;

    fn sample_news() -> News {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
        News::new("Headline", "Body", date)
    }

    fn service(news: MockNewsRepository, comments: MockCommentRepository) -> NewsService {
        NewsService::new(Arc::new(news), Arc::new(comments), PAGE_SIZE)
    }

    #[tokio::test]
    async fn home_page_queries_the_configured_page_size() {
        let mut news = MockNewsRepository::new();
        news.expect_list_recent()
            .withf(|limit| *limit == PAGE_SIZE)
            .times(1)
            .return_once(|_| Ok(Vec::new()));

        let service = service(news, MockCommentRepository::new());
        let page = service.home_page().await.expect("home page");
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn detail_of_unknown_news_is_not_found() {
        let mut news = MockNewsRepository::new();
        news.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let service = service(news, MockCommentRepository::new());
        let error = service
            .detail(&NewsId::random())
            .await
            .expect_err("missing news");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn submit_comment_persists_for_the_author() {
        let item = sample_news();
        let news_id = *item.id();
        let author = UserId::random();

        let mut news = MockNewsRepository::new();
        news.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(item)));
        let mut comments = MockCommentRepository::new();
        comments
            .expect_upsert()
            .withf(move |comment| comment.author_id() == &author && comment.news_id() == &news_id)
            .times(1)
            .return_once(|_| Ok(()));

        let service = service(news, comments);
        let comment = service
            .submit_comment(&Actor::User(author), &news_id, "Comment text")
            .await
            .expect("comment created");
        assert_eq!(comment.text(), "Comment text");
    }

    #[tokio::test]
    async fn submit_comment_rejects_forbidden_words_without_persisting() {
        let mut comments = MockCommentRepository::new();
        comments.expect_upsert().times(0);

        let service = service(MockNewsRepository::new(), comments);
        let text = format!("Some text, {}, more text", FORBIDDEN_WORDS[0]);
        let error = service
            .submit_comment(&Actor::User(UserId::random()), &NewsId::random(), &text)
            .await
            .expect_err("moderated");
        assert_eq!(error.code(), ErrorCode::InvalidForm);
        assert_eq!(error.message(), WARNING);
        assert_eq!(error.field(), Some("text"));
    }

    #[tokio::test]
    async fn submit_comment_rejects_anonymous_actors() {
        let service = service(MockNewsRepository::new(), MockCommentRepository::new());
        let error = service
            .submit_comment(&Actor::Anonymous, &NewsId::random(), "text")
            .await
            .expect_err("anonymous");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn edit_comment_by_a_reader_is_not_found() {
        let author = UserId::random();
        let existing = Comment::new(NewsId::random(), author, "original", Utc::now());

        let mut comments = MockCommentRepository::new();
        comments
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(existing)));
        comments.expect_upsert().times(0);

        let service = service(MockNewsRepository::new(), comments);
        let error = service
            .edit_comment(&Actor::User(UserId::random()), &CommentId::random(), "new")
            .await
            .expect_err("hidden from readers");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn delete_comment_by_the_author_removes_it() {
        let author = UserId::random();
        let existing = Comment::new(NewsId::random(), author, "original", Utc::now());
        let id = *existing.id();

        let mut comments = MockCommentRepository::new();
        comments
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(existing)));
        comments
            .expect_delete()
            .withf(move |candidate| candidate == &id)
            .times(1)
            .return_once(|_| Ok(()));

        let service = service(MockNewsRepository::new(), comments);
        let removed = service
            .delete_comment(&Actor::User(author), &id)
            .await
            .expect("deleted");
        assert_eq!(removed.id(), &id);
    }
}
