//! Stage 1: active users of the Workspace account

use log::debug;

use crate::client::models::Scope;
use crate::client::{AuthApi, Cursor, DirectoryApi, Session, UserListParams};
use crate::error::Result;

/// List the primary email of every non-suspended user, in API order.
///
/// Authorizes once as `super_admin` and follows the cursor until the last
/// page. Any failure aborts the listing; no partial result is returned.
pub async fn enumerate_users<C>(
    client: &C,
    super_admin: &str,
    params: &UserListParams,
) -> Result<Vec<String>>
where
    C: AuthApi + DirectoryApi + ?Sized,
{
    let mut session = Session::new(client, super_admin, Scope::DirectoryUser);
    let mut cursor = Cursor::new();
    let mut users = Vec::new();

    while !cursor.is_done() {
        let token = session.access_token().await?;
        let page = client
            .list_users_page(token, params, cursor.token())
            .await?;

        debug!(
            "User page {} returned {} users",
            cursor.pages() + 1,
            page.items.len()
        );
        cursor.advance(page.next_page_token)?;
        users.extend(page.items);
    }

    debug!(
        "Found {} active users for customer {} in {} pages",
        users.len(),
        params.customer_id,
        cursor.pages()
    );
    Ok(users)
}
