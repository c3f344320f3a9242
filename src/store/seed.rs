//! Fixed sample data seeded into the store at startup.

use crate::models::{
    Answer, Notification, NotificationKind, Question, User, UserSummary,
};

/// The current user, as supplied by the identity collaborator.
pub fn current_user() -> User {
    User {
        id: "u123".to_string(),
        name: "Tom Cook".to_string(),
        avatar: "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e".to_string(),
        email: Some("tom@example.com".to_string()),
        reputation: 1250,
        joined_date: "2023-01-15".to_string(),
        is_active: true,
    }
}

fn alice() -> UserSummary {
    UserSummary {
        id: "u456".to_string(),
        name: "Alice Johnson".to_string(),
        avatar: "https://images.unsplash.com/photo-1494790108755-2616b612b786".to_string(),
        reputation: 892,
    }
}

fn bob() -> UserSummary {
    UserSummary {
        id: "u789".to_string(),
        name: "Bob Wilson".to_string(),
        avatar: "https://images.unsplash.com/photo-1519244703995-f4e0f30006d5".to_string(),
        reputation: 1456,
    }
}

/// Initial questions, newest first.
pub fn questions() -> Vec<Question> {
    vec![
        Question {
            id: "q1".to_string(),
            title: "How to handle async operations in JavaScript?".to_string(),
            body: "I'm having trouble understanding how to properly handle asynchronous \
                   operations in JavaScript. Can someone explain the difference between \
                   callbacks, promises, and async/await? I've been working on a project \
                   where I need to fetch data from an API and I'm getting confused about \
                   the best approach."
                .to_string(),
            tags: vec![
                "javascript".to_string(),
                "async".to_string(),
                "promises".to_string(),
            ],
            votes: 15,
            views: 234,
            answers: vec![],
            author: alice(),
            created_at: "2024-01-15T10:30:00Z".to_string(),
            has_accepted_answer: false,
        },
        Question {
            id: "q2".to_string(),
            title: "Best practices for React component optimization".to_string(),
            body: "What are the best practices for optimizing React components? I'm \
                   looking for techniques to improve performance in a large application. \
                   My app is getting slower as it grows and I need to optimize it."
                .to_string(),
            tags: vec![
                "react".to_string(),
                "performance".to_string(),
                "optimization".to_string(),
            ],
            votes: 8,
            views: 156,
            answers: vec![Answer {
                id: "a1".to_string(),
                body: "Here are key React optimization techniques:\n\n\
                       1. **React.memo()** - Prevents unnecessary re-renders\n\
                       2. **useMemo()** - Memoizes expensive calculations\n\
                       3. **useCallback()** - Memoizes functions\n\
                       4. **Code splitting** - Load components on demand\n\
                       5. **Virtualization** - For large lists"
                    .to_string(),
                votes: 12,
                author: bob(),
                created_at: "2024-01-14T18:30:00Z".to_string(),
                is_accepted: true,
            }],
            author: alice(),
            created_at: "2024-01-14T16:45:00Z".to_string(),
            has_accepted_answer: true,
        },
        Question {
            id: "q3".to_string(),
            title: "MySQL vs PostgreSQL: Which database to choose?".to_string(),
            body: "I'm starting a new project and need to choose between MySQL and \
                   PostgreSQL. What are the key differences and use cases for each? The \
                   project will handle user data and needs to be scalable."
                .to_string(),
            tags: vec![
                "mysql".to_string(),
                "postgresql".to_string(),
                "database".to_string(),
            ],
            votes: 12,
            views: 445,
            answers: vec![],
            author: current_user().summary(),
            created_at: "2024-01-13T09:15:00Z".to_string(),
            has_accepted_answer: false,
        },
    ]
}

/// Initial notifications for the current user, newest first.
pub fn notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: "n1".to_string(),
            kind: NotificationKind::Answer,
            message: "Bob Wilson answered your question \"MySQL vs PostgreSQL: Which \
                      database to choose?\""
                .to_string(),
            question_id: Some("q3".to_string()),
            created_at: "2024-01-15T08:05:00Z".to_string(),
            read: false,
        },
        Notification {
            id: "n2".to_string(),
            kind: NotificationKind::Vote,
            message: "Alice Johnson upvoted your question \"MySQL vs PostgreSQL: Which \
                      database to choose?\""
                .to_string(),
            question_id: Some("q3".to_string()),
            created_at: "2024-01-14T11:20:00Z".to_string(),
            read: true,
        },
    ]
}
