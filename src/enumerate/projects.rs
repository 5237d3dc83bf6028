//! Stage 2: projects visible to each user

use indicatif::ProgressBar;
use log::debug;

use crate::client::models::Scope;
use crate::client::{AuthApi, Cursor, MAX_PAGE_SIZE, ResourceManagerApi, Session, fetch_each};
use crate::error::Result;
use crate::models::UserProject;

/// Settings for the per-user project listings
#[derive(Debug, Clone, Copy)]
pub struct ProjectListOptions {
    /// Projects requested per page
    pub page_size: u32,

    /// Users listed at the same time (1 = sequential)
    pub concurrency: usize,
}

impl Default for ProjectListOptions {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            concurrency: 1,
        }
    }
}

/// List every project `email` can access, impersonating that user.
///
/// The session lives only for this listing.
pub async fn list_user_projects<C>(
    client: &C,
    email: &str,
    page_size: u32,
) -> Result<Vec<UserProject>>
where
    C: AuthApi + ResourceManagerApi + ?Sized,
{
    let mut session = Session::new(client, email, Scope::CloudPlatform);
    let mut cursor = Cursor::new();
    let mut records = Vec::new();

    while !cursor.is_done() {
        let token = session.access_token().await?;
        let page = client
            .list_projects_page(token, page_size, cursor.token())
            .await?;

        cursor.advance(page.next_page_token)?;
        records.extend(
            page.items
                .into_iter()
                .map(|project| UserProject::new(email, project)),
        );
    }

    debug!("{} can access {} projects", email, records.len());
    Ok(records)
}

/// List projects for every user and flatten them into report records.
///
/// Records are grouped by user in the order of `users`, then in page order,
/// for any concurrency. Users without projects contribute nothing. The first
/// failure aborts the remaining users.
///
/// `progress` advances once per finished user; the caller clears it.
pub async fn enumerate_projects<C>(
    client: &C,
    users: &[String],
    options: ProjectListOptions,
    progress: &ProgressBar,
) -> Result<Vec<UserProject>>
where
    C: AuthApi + ResourceManagerApi + ?Sized,
{
    progress.set_length(users.len() as u64);

    let per_user = fetch_each(
        users.iter().map(String::as_str).collect(),
        |email| async move {
            let records = list_user_projects(client, email, options.page_size).await?;
            progress.inc(1);
            Ok(records)
        },
        options.concurrency,
    )
    .await?;

    let records: Vec<UserProject> = per_user.into_iter().flatten().collect();
    debug!(
        "Found {} (user, project) pairs across {} users",
        records.len(),
        users.len()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockGoogleClient;
    use crate::client::mock::{emails, project};
    use crate::error::{AuthError, Error};

    fn line(record: &UserProject) -> String {
        format!(
            "{}, {}, {}, {}",
            record.email, record.project_name, record.project_id, record.project_number
        )
    }

    async fn run(
        mock: &MockGoogleClient,
        users: &[String],
        concurrency: usize,
    ) -> Result<Vec<UserProject>> {
        let options = ProjectListOptions {
            concurrency,
            ..Default::default()
        };
        enumerate_projects(mock, users, options, &ProgressBar::hidden()).await
    }

    #[tokio::test]
    async fn test_two_users_one_without_projects() {
        let mock = MockGoogleClient::new().with_projects(
            "a@x.com",
            vec![vec![project("P1", "id1", "111"), project("P2", "id2", "222")]],
        );
        let users = vec!["a@x.com".to_string(), "b@x.com".to_string()];

        let records = run(&mock, &users, 1).await.unwrap();

        let lines: Vec<String> = records.iter().map(line).collect();
        assert_eq!(lines, vec!["a@x.com, P1, id1, 111", "a@x.com, P2, id2, 222"]);
    }

    #[tokio::test]
    async fn test_user_without_projects_contributes_nothing() {
        let mock = MockGoogleClient::new().with_projects("b@x.com", vec![vec![]]);
        let users = vec!["b@x.com".to_string()];

        let records = run(&mock, &users, 1).await.unwrap();

        assert!(records.is_empty());
        assert_eq!(mock.call_counts().await.list_projects, 1);
    }

    #[tokio::test]
    async fn test_n_projects_across_pages() {
        let mock = MockGoogleClient::new().with_projects(
            "a@x.com",
            vec![
                vec![project("P1", "id1", "1"), project("P2", "id2", "2")],
                vec![],
                vec![project("P3", "id3", "3")],
            ],
        );
        let users = vec!["a@x.com".to_string()];

        let records = run(&mock, &users, 1).await.unwrap();

        let ids: Vec<&str> = records.iter().map(|r| r.project_id.as_str()).collect();
        assert_eq!(ids, vec!["id1", "id2", "id3"]);
        assert_eq!(mock.call_counts().await.list_projects, 3);
    }

    #[tokio::test]
    async fn test_one_session_per_user_with_cloud_platform_scope() {
        let users = emails(0, 3);
        let mock = MockGoogleClient::new();

        run(&mock, &users, 1).await.unwrap();

        let sessions = mock.authorized_sessions().await;
        assert_eq!(sessions.len(), 3);
        for ((subject, scope), email) in sessions.iter().zip(&users) {
            assert_eq!(subject, email);
            assert_eq!(*scope, Scope::CloudPlatform);
        }
    }

    #[tokio::test]
    async fn test_output_order_independent_of_concurrency() {
        let users = emails(0, 8);
        let mut mock = MockGoogleClient::new();
        let mut expected = Vec::new();
        for (i, email) in users.iter().enumerate() {
            let pages: Vec<Vec<_>> = (0..i % 3)
                .map(|p| {
                    let name = format!("P{}-{}", i, p);
                    let id = format!("id{}-{}", i, p);
                    vec![project(&name, &id, "1")]
                })
                .collect();
            for page in &pages {
                expected.extend(page.iter().cloned().map(|p| UserProject::new(email, p)));
            }
            mock = mock.with_projects(email, pages);
        }

        let sequential = run(&mock, &users, 1).await.unwrap();
        let parallel = run(&mock, &users, 4).await.unwrap();
        let again = run(&mock, &users, 4).await.unwrap();

        assert_eq!(sequential, expected);
        assert_eq!(parallel, expected);
        assert_eq!(again, expected);
    }

    #[tokio::test]
    async fn test_failing_user_aborts_run() {
        let users = emails(0, 3);
        let mock = MockGoogleClient::new()
            .with_projects("user-2@x.com", vec![vec![project("P", "p", "1")]])
            .with_failing_subject("user-1@x.com");

        let err = run(&mock, &users, 1).await.unwrap_err();

        match err {
            Error::Auth(AuthError::TokenExchange { subject, .. }) => {
                assert_eq!(subject, "user-1@x.com")
            }
            other => panic!("Expected TokenExchange, got {:?}", other),
        }
        // user-2 is never reached when running sequentially
        assert_eq!(mock.call_counts().await.list_projects, 1);
    }

    #[tokio::test]
    async fn test_progress_left_to_caller() {
        let users = emails(0, 3);
        let mock = MockGoogleClient::new();
        let progress = ProgressBar::hidden();

        enumerate_projects(&mock, &users, ProjectListOptions::default(), &progress)
            .await
            .unwrap();

        assert_eq!(progress.position(), 3);
        assert_eq!(progress.length(), Some(3));
        assert!(!progress.is_finished());
    }

    #[tokio::test]
    async fn test_no_users_no_calls() {
        let mock = MockGoogleClient::new();

        let records = run(&mock, &[], 4).await.unwrap();

        assert!(records.is_empty());
        assert_eq!(mock.call_counts().await.total(), 0);
    }
}
