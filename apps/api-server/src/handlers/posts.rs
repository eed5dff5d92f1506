//! Post resource handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{Post, PostInput};
use quill_shared::ApiResponse;
use quill_shared::dto::PostResource;

use crate::middleware::error::AppResult;
use crate::state::AppState;

fn to_resource(post: Post) -> PostResource {
    PostResource {
        id: post.id.to_string(),
        title: post.title,
        body: post.body,
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

/// GET /api/posts
pub async fn index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;
    let data: Vec<PostResource> = posts.into_iter().map(to_resource).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(data, "Posts retrieved successfully")))
}

/// POST /api/posts
pub async fn store(
    state: web::Data<AppState>,
    body: web::Json<PostInput>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::created(
        to_resource(post),
        "Post created successfully",
    )))
}

/// GET /api/posts/{id}
pub async fn show(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        to_resource(post),
        "Post retrieved successfully",
    )))
}

/// PUT|PATCH /api/posts/{id}
///
/// An unknown id wins over a bad body, so the body is only rejected once the
/// post is known to exist.
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: Result<web::Json<PostInput>, actix_web::Error>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let input = match body {
        Ok(json) => json.into_inner(),
        Err(err) => {
            state.posts.get(id).await?;
            return Ok(err.error_response());
        }
    };

    let post = state.posts.update(id, input).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        to_resource(post),
        "Post updated successfully",
    )))
}

/// DELETE /api/posts/{id}
pub async fn destroy(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    state.posts.delete(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message_only(200, "Post deleted successfully")))
}
