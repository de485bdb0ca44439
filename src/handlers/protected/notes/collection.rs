use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::database::models::{NewNote, Note};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /notes - every note owned by the caller
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.notes.list_by_owner(&user.id).await.map_err(|e| {
        tracing::error!("Listing notes for {} failed: {}", user.id, e);
        ApiError::internal_server_error(format!(
            "Unable to retrieve the notes from database. Error: {}",
            e
        ))
    })?;

    if notes.is_empty() {
        return Err(ApiError::not_found(format!(
            "No notes found for user id {}",
            user.id
        )));
    }

    Ok(Json(notes))
}

/// POST /notes - create a note owned by the caller
///
/// Input: `{"title": "...", "content": "..."}`. The id and owner are assigned
/// here and never taken from the body.
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<NewNote>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let input = match payload {
        Ok(Json(input)) if !input.is_empty() => input,
        _ => return Err(ApiError::bad_request("Note is missing or invalid")),
    };

    let note = Note::create(user.id.clone(), input);
    let id = note.id.clone();

    state.notes.append(note).await.map_err(|e| {
        tracing::error!("Adding note for {} failed: {}", user.id, e);
        ApiError::internal_server_error(format!(
            "Unable to add the note to database, error: {}",
            e
        ))
    })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": format!("Note with user_id {} added to Database!", user.id),
            "id": id,
        })),
    ))
}

#[cfg(test)]
mod tests {
    use crate::testing::TestContext;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_empty_is_not_found() {
        let ctx = TestContext::new();
        let (user, token) = ctx.sign_in_as("a@x.com").await;

        let (status, body) = ctx.send("GET", "/notes", Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "message": format!("No notes found for user id {}", user.id) })
        );
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let ctx = TestContext::new();
        let (user, token) = ctx.sign_in_as("a@x.com").await;

        let (status, body) = ctx
            .send("POST", "/notes", Some(&token), Some(json!({ "title": "t", "content": "c" })))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body["message"],
            format!("Note with user_id {} added to Database!", user.id)
        );
        let created_id = body["id"].clone();

        let (status, body) = ctx.send("GET", "/notes", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        let notes = body.as_array().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0]["title"], "t");
        assert_eq!(notes[0]["user_id"], user.id);
        assert_eq!(notes[0]["id"], created_id);
    }

    #[tokio::test]
    async fn test_create_ignores_client_owner() {
        let ctx = TestContext::new();
        let (user, token) = ctx.sign_in_as("a@x.com").await;

        ctx.send(
            "POST",
            "/notes",
            Some(&token),
            Some(json!({ "title": "t", "content": "c", "user_id": "someone-else" })),
        )
        .await;

        let (_, body) = ctx.send("GET", "/notes", Some(&token), None).await;
        assert_eq!(body[0]["user_id"], user.id);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_or_empty_body() {
        let ctx = TestContext::new();
        let (_, token) = ctx.sign_in_as("a@x.com").await;
        let expected = json!({ "message": "Note is missing or invalid" });

        let (status, body) = ctx.send("POST", "/notes", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, expected);

        let (status, body) = ctx
            .send("POST", "/notes", Some(&token), Some(json!({ "title": "", "content": "" })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, expected);

        let (status, _) = ctx
            .send("POST", "/notes", Some(&token), Some(json!("not an object")))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_with_title_only() {
        let ctx = TestContext::new();
        let (_, token) = ctx.sign_in_as("a@x.com").await;

        let (status, body) = ctx
            .send("POST", "/notes", Some(&token), Some(json!({ "title": "only" })))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["id"].as_str().unwrap().to_string();

        let (status, body) = ctx.send("GET", &format!("/notes/{}", id), Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "only");
        assert_eq!(body["content"], "");
    }

    #[tokio::test]
    async fn test_lists_are_isolated_between_users() {
        let ctx = TestContext::new();
        let (_, alice) = ctx.sign_in_as("alice@x.com").await;
        let (bob_user, bob) = ctx.sign_in_as("bob@x.com").await;

        ctx.send("POST", "/notes", Some(&alice), Some(json!({ "title": "a", "content": "1" })))
            .await;
        ctx.send("POST", "/notes", Some(&bob), Some(json!({ "title": "b", "content": "2" })))
            .await;

        let (_, body) = ctx.send("GET", "/notes", Some(&bob), None).await;
        let notes = body.as_array().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0]["title"], "b");
        assert_eq!(notes[0]["user_id"], bob_user.id);
    }

    #[tokio::test]
    async fn test_store_failure_is_internal_error() {
        let ctx = TestContext::with_broken_notes_store();
        let (_, token) = ctx.sign_in_as("a@x.com").await;

        let (status, body) = ctx.send("GET", "/notes", Some(&token), None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "message": "Unable to retrieve the notes from database. Error: Error reading file" })
        );
    }
}
