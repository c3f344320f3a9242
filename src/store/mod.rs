//! In-memory entity store.
//!
//! The store is the sole owner of the question, answer, and notification
//! collections plus the saved-question set and the current user. All
//! mutation goes through the operations below; reads return owned
//! snapshots, never references into the backing collections. The only
//! durable state is the saved-question set, mirrored through [`SavedStore`]
//! on every change.

mod saved;
pub mod seed;

pub use saved::SavedStore;

use std::collections::HashSet;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    Answer, Datastore, Notification, NotificationKind, Question, QuestionSort, RevisionInfo,
    Stats, StatsQuestion, TagCount, User, UserAnswer,
};

const SCHEMA_VERSION: i32 = 1;

/// The application entity store.
pub struct Store {
    saved_store: SavedStore,
    inner: RwLock<Inner>,
}

struct Inner {
    current_user: User,
    questions: Vec<Question>,
    notifications: Vec<Notification>,
    saved: Vec<String>,
    /// Question ids whose view count was already bumped this session.
    viewed: HashSet<String>,
    revision_id: i64,
    generated_at: String,
}

impl Store {
    /// Seed the sample collections and load the saved-question set from the
    /// durable slot. The current user comes from the identity collaborator.
    pub async fn open(saved_store: SavedStore, current_user: User) -> Self {
        let saved = saved_store.load().await;

        Self {
            saved_store,
            inner: RwLock::new(Inner {
                current_user,
                questions: seed::questions(),
                notifications: seed::notifications(),
                saved,
                viewed: HashSet::new(),
                revision_id: 0,
                generated_at: Utc::now().to_rfc3339(),
            }),
        }
    }

    // ==================== SNAPSHOTS ====================

    pub async fn revision_id(&self) -> i64 {
        self.inner.read().await.revision_id
    }

    pub async fn revision_info(&self) -> RevisionInfo {
        let inner = self.inner.read().await;
        RevisionInfo {
            revision_id: inner.revision_id,
            generated_at: inner.generated_at.clone(),
        }
    }

    /// Full read-only snapshot of the application state.
    pub async fn snapshot(&self) -> Datastore {
        let inner = self.inner.read().await;
        Datastore {
            schema_version: SCHEMA_VERSION,
            generated_at: inner.generated_at.clone(),
            revision_id: inner.revision_id,
            current_user: inner.current_user.clone(),
            questions: inner.questions.clone(),
            notifications: inner.notifications.clone(),
            saved_question_ids: inner.saved.clone(),
        }
    }

    pub async fn current_user(&self) -> User {
        self.inner.read().await.current_user.clone()
    }

    // ==================== QUESTION OPERATIONS ====================

    /// List questions in the requested order. The backing collection is
    /// newest-first by insertion, which is what `Newest` returns.
    pub async fn list_questions(&self, sort: QuestionSort) -> Vec<Question> {
        let inner = self.inner.read().await;

        let mut questions: Vec<Question> = match sort {
            QuestionSort::Unanswered => inner
                .questions
                .iter()
                .filter(|q| q.answers.is_empty())
                .cloned()
                .collect(),
            _ => inner.questions.clone(),
        };

        match sort {
            QuestionSort::Newest | QuestionSort::Unanswered => {}
            QuestionSort::Votes => questions.sort_by(|a, b| b.votes.cmp(&a.votes)),
            QuestionSort::Active => {
                questions.sort_by(|a, b| b.last_activity_at().cmp(a.last_activity_at()))
            }
        }

        questions
    }

    /// Get a question by id.
    pub async fn get_question(&self, id: &str) -> Option<Question> {
        let inner = self.inner.read().await;
        inner.questions.iter().find(|q| q.id == id).cloned()
    }

    /// Create a new question authored by the current user and prepend it to
    /// the collection.
    pub async fn create_question(
        &self,
        title: String,
        body: String,
        tags: Vec<String>,
    ) -> Result<Question, AppError> {
        let mut inner = self.inner.write().await;
        inner.ensure_active()?;

        let question = Question {
            id: Uuid::new_v4().to_string(),
            title,
            body,
            tags,
            votes: 0,
            views: 0,
            answers: Vec::new(),
            author: inner.current_user.summary(),
            created_at: Utc::now().to_rfc3339(),
            has_accepted_answer: false,
        };

        inner.questions.insert(0, question.clone());
        inner.touch();

        Ok(question)
    }

    /// Bump a question's view count, at most once per question per session.
    /// Returns the current count either way.
    pub async fn record_view(&self, question_id: &str) -> Result<i64, AppError> {
        let mut inner = self.inner.write().await;

        if inner.viewed.contains(question_id) {
            return Ok(inner.question(question_id)?.views);
        }

        let question = inner.question_mut(question_id)?;
        question.views += 1;
        let views = question.views;

        inner.viewed.insert(question_id.to_string());
        inner.touch();

        Ok(views)
    }

    /// Add `delta` to a question's vote count. Emits a `vote` notification
    /// on upvotes of another user's question.
    pub async fn vote_question(
        &self,
        question_id: &str,
        delta: i64,
    ) -> Result<Question, AppError> {
        let mut inner = self.inner.write().await;
        inner.ensure_active()?;
        let actor = inner.current_user.summary();

        let question = inner.question_mut(question_id)?;
        question.votes += delta;
        let updated = question.clone();

        if delta > 0 && updated.author.id != actor.id {
            inner.notify(
                NotificationKind::Vote,
                format!("{} upvoted your question \"{}\"", actor.name, updated.title),
                Some(question_id.to_string()),
            );
        }
        inner.touch();

        Ok(updated)
    }

    // ==================== ANSWER OPERATIONS ====================

    /// Append an answer authored by the current user to a question. Emits an
    /// `answer` notification when the question belongs to someone else.
    pub async fn add_answer(
        &self,
        question_id: &str,
        body: String,
    ) -> Result<Answer, AppError> {
        let mut inner = self.inner.write().await;
        inner.ensure_active()?;
        let actor = inner.current_user.summary();

        let answer = Answer {
            id: Uuid::new_v4().to_string(),
            body,
            votes: 0,
            author: actor.clone(),
            created_at: Utc::now().to_rfc3339(),
            is_accepted: false,
        };

        let question = inner.question_mut(question_id)?;
        question.answers.push(answer.clone());
        let question_author = question.author.id.clone();
        let question_title = question.title.clone();

        if question_author != actor.id {
            inner.notify(
                NotificationKind::Answer,
                format!(
                    "{} answered your question \"{}\"",
                    actor.name, question_title
                ),
                Some(question_id.to_string()),
            );
        }
        inner.touch();

        Ok(answer)
    }

    /// Add `delta` to an answer's vote count. Emits a `vote` notification on
    /// upvotes of another user's answer.
    pub async fn vote_answer(
        &self,
        question_id: &str,
        answer_id: &str,
        delta: i64,
    ) -> Result<Answer, AppError> {
        let mut inner = self.inner.write().await;
        inner.ensure_active()?;
        let actor = inner.current_user.summary();

        let question = inner.question_mut(question_id)?;
        let question_title = question.title.clone();
        let answer = question
            .answers
            .iter_mut()
            .find(|a| a.id == answer_id)
            .ok_or_else(|| AppError::NotFound(format!("Answer {} not found", answer_id)))?;

        answer.votes += delta;
        let updated = answer.clone();

        if delta > 0 && updated.author.id != actor.id {
            inner.notify(
                NotificationKind::Vote,
                format!(
                    "{} upvoted your answer on \"{}\"",
                    actor.name, question_title
                ),
                Some(question_id.to_string()),
            );
        }
        inner.touch();

        Ok(updated)
    }

    /// Mark one answer as accepted, unmarking all of its siblings so at most
    /// one answer per question is accepted. Only the question's author may
    /// accept.
    pub async fn accept_answer(
        &self,
        question_id: &str,
        answer_id: &str,
    ) -> Result<Answer, AppError> {
        let mut inner = self.inner.write().await;
        inner.ensure_active()?;
        let actor_id = inner.current_user.id.clone();

        let question = inner.question_mut(question_id)?;
        if question.author.id != actor_id {
            return Err(AppError::Forbidden(
                "Only the question author can accept an answer".to_string(),
            ));
        }

        let mut accepted = None;
        for answer in &mut question.answers {
            answer.is_accepted = answer.id == answer_id;
            if answer.is_accepted {
                accepted = Some(answer.clone());
            }
        }

        let accepted = accepted
            .ok_or_else(|| AppError::NotFound(format!("Answer {} not found", answer_id)))?;
        question.has_accepted_answer = true;
        inner.touch();

        Ok(accepted)
    }

    // ==================== SAVED QUESTIONS ====================

    pub async fn saved_question_ids(&self) -> Vec<String> {
        self.inner.read().await.saved.clone()
    }

    /// Flip a question's membership in the saved set and mirror the new set
    /// into the durable slot. Returns the new membership.
    pub async fn toggle_saved(&self, question_id: &str) -> Result<bool, AppError> {
        let ids = {
            let mut inner = self.inner.write().await;
            inner.ensure_active()?;
            inner.question(question_id)?;

            match inner.saved.iter().position(|id| id == question_id) {
                Some(pos) => {
                    inner.saved.remove(pos);
                }
                None => inner.saved.push(question_id.to_string()),
            }
            inner.touch();
            inner.saved.clone()
        };

        let saved = ids.iter().any(|id| id == question_id);
        self.saved_store.persist(&ids).await;

        Ok(saved)
    }

    // ==================== NOTIFICATIONS ====================

    /// All notifications, newest first.
    pub async fn notifications(&self) -> Vec<Notification> {
        self.inner.read().await.notifications.clone()
    }

    pub async fn unread_notifications(&self) -> i64 {
        let inner = self.inner.read().await;
        inner.notifications.iter().filter(|n| !n.read).count() as i64
    }

    /// Mark one notification read.
    pub async fn mark_notification_read(&self, id: &str) -> Result<Notification, AppError> {
        let mut inner = self.inner.write().await;

        let notification = inner
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Notification {} not found", id)))?;

        notification.read = true;
        let updated = notification.clone();
        inner.touch();

        Ok(updated)
    }

    /// Mark every notification read. Returns how many were still unread.
    pub async fn mark_all_notifications_read(&self) -> i64 {
        let mut inner = self.inner.write().await;

        let mut updated = 0;
        for notification in &mut inner.notifications {
            if !notification.read {
                notification.read = true;
                updated += 1;
            }
        }
        if updated > 0 {
            inner.touch();
        }

        updated
    }

    // ==================== DERIVED QUERIES ====================

    /// Questions carrying the given tag, in collection order.
    pub async fn questions_by_tag(&self, tag: &str) -> Vec<Question> {
        let inner = self.inner.read().await;
        inner
            .questions
            .iter()
            .filter(|q| q.tags.iter().any(|t| t == tag))
            .cloned()
            .collect()
    }

    /// Questions authored by the given user, in collection order.
    pub async fn questions_by_author(&self, user_id: &str) -> Vec<Question> {
        let inner = self.inner.read().await;
        inner
            .questions
            .iter()
            .filter(|q| q.author.id == user_id)
            .cloned()
            .collect()
    }

    /// All answers by the given user across every question, each projected
    /// with its parent question's id and title.
    pub async fn answers_by_author(&self, user_id: &str) -> Vec<UserAnswer> {
        let inner = self.inner.read().await;
        let mut answers = Vec::new();
        for question in &inner.questions {
            for answer in &question.answers {
                if answer.author.id == user_id {
                    answers.push(UserAnswer {
                        answer: answer.clone(),
                        question_id: question.id.clone(),
                        question_title: question.title.clone(),
                    });
                }
            }
        }
        answers
    }

    /// Live tag aggregate, recomputed on every call.
    pub async fn all_tags(&self) -> Vec<TagCount> {
        self.inner.read().await.tag_counts()
    }

    /// Platform summary statistics.
    pub async fn stats(&self) -> Stats {
        let inner = self.inner.read().await;

        let total_answers: i64 = inner.questions.iter().map(|q| q.answers.len() as i64).sum();

        let mut users: HashSet<&str> = HashSet::new();
        for question in &inner.questions {
            users.insert(question.author.id.as_str());
            for answer in &question.answers {
                users.insert(answer.author.id.as_str());
            }
        }

        // First-encountered question wins vote ties.
        let mut most_voted: Option<&Question> = None;
        for question in &inner.questions {
            match most_voted {
                Some(current) if question.votes <= current.votes => {}
                _ => most_voted = Some(question),
            }
        }

        Stats {
            total_questions: inner.questions.len() as i64,
            total_answers,
            total_users: users.len() as i64,
            most_used_tag: inner.tag_counts().first().map(|t| t.name.clone()),
            most_voted_question: most_voted.map(|q| StatsQuestion {
                id: q.id.clone(),
                title: q.title.clone(),
                votes: q.votes,
            }),
        }
    }
}

impl Inner {
    fn ensure_active(&self) -> Result<(), AppError> {
        if self.current_user.is_active {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "User account is inactive".to_string(),
            ))
        }
    }

    fn question(&self, id: &str) -> Result<&Question, AppError> {
        self.questions
            .iter()
            .find(|q| q.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Question {} not found", id)))
    }

    fn question_mut(&mut self, id: &str) -> Result<&mut Question, AppError> {
        self.questions
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Question {} not found", id)))
    }

    /// Prepend a notification so the newest is always at the head.
    fn notify(&mut self, kind: NotificationKind, message: String, question_id: Option<String>) {
        self.notifications.insert(
            0,
            Notification {
                id: Uuid::new_v4().to_string(),
                kind,
                message,
                question_id,
                created_at: Utc::now().to_rfc3339(),
                read: false,
            },
        );
    }

    /// Tag counts descending; sort_by is stable, so ties keep first-seen
    /// order.
    fn tag_counts(&self) -> Vec<TagCount> {
        let mut tags: Vec<TagCount> = Vec::new();
        for question in &self.questions {
            for tag in &question.tags {
                match tags.iter_mut().find(|t| &t.name == tag) {
                    Some(entry) => entry.count += 1,
                    None => tags.push(TagCount {
                        name: tag.clone(),
                        count: 1,
                    }),
                }
            }
        }
        tags.sort_by(|a, b| b.count.cmp(&a.count));
        tags
    }

    fn touch(&mut self) {
        self.revision_id += 1;
        self.generated_at = Utc::now().to_rfc3339();
    }
}
